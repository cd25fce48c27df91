use thiserror::Error;

/// Errors surfaced by the calculator core.
///
/// All of these are recoverable: the session layer turns them into a
/// status message and carries on. None of them should abort the process.
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("{0} requires two operands")]
    MissingOperand(&'static str),

    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    #[error("malformed complex literal: {0}")]
    MalformedLiteral(String),

    #[error("malformed history entry: {0}")]
    MalformedEntry(String),

    #[error("history index {index} out of range (0..{len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid shape input: {0}")]
    InvalidShapeInput(String),

    #[error("file error for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl CalcError {
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        CalcError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

pub type CalcResult<T> = Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_io_error_message_includes_path() {
        let err = CalcError::io(
            Path::new("/tmp/history.txt"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert!(err.to_string().contains("/tmp/history.txt"));
    }

    #[test]
    fn test_index_out_of_range_message() {
        let err = CalcError::IndexOutOfRange { index: 7, len: 3 };
        assert!(err.to_string().contains('7'));
        assert!(err.to_string().contains('3'));
    }
}
