use std::fs;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{error, info};

use crate::complex::ComplexNumber;
use crate::error::{CalcError, CalcResult};
use crate::operation::CalcOperation;

/// One executed calculation: which operation ran, what it consumed and
/// what it produced. Entries are created by `HistoryManager::add_operation`
/// and never mutated afterwards.
///
/// `operand2` is present exactly when the operation is binary.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub operation: CalcOperation,
    pub result: ComplexNumber,
    pub operand1: ComplexNumber,
    pub operand2: Option<ComplexNumber>,
}

impl HistoryEntry {
    /// Wire form: `<identity>:<result>,<operand1>[,<operand2>]`.
    fn serialize(&self) -> String {
        let mut out = format!(
            "{}:{},{}",
            self.operation.identity(),
            self.result,
            self.operand1
        );
        if let Some(op2) = self.operand2 {
            out.push(',');
            out.push_str(&op2.to_string());
        }
        out
    }

    fn deserialize(text: &str) -> CalcResult<HistoryEntry> {
        let (name, operands) = text
            .split_once(':')
            .ok_or_else(|| CalcError::MalformedEntry(text.to_string()))?;

        let operation = CalcOperation::deserialize(name)
            .ok_or_else(|| CalcError::UnknownOperation(name.to_string()))?;

        let literals: Vec<&str> = operands.split(',').collect();
        let expected = if operation.is_unary() { 2 } else { 3 };
        if literals.len() != expected {
            return Err(CalcError::MalformedEntry(text.to_string()));
        }

        let result = ComplexNumber::parse_literal(literals[0])?;
        let operand1 = ComplexNumber::parse_literal(literals[1])?;
        let operand2 = if operation.is_unary() {
            None
        } else {
            Some(ComplexNumber::parse_literal(literals[2])?)
        };

        Ok(HistoryEntry {
            operation,
            result,
            operand1,
            operand2,
        })
    }
}

/// Append-only log of executed operations with text persistence.
///
/// The manager owns only the log; the viewing position lives in
/// `HistoryCursor` so that clearing the log and resetting the cursor
/// stay two separate, separately testable actions.
#[derive(Debug, Default)]
pub struct HistoryManager {
    entries: Vec<HistoryEntry>,
}

impl HistoryManager {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record one executed operation. Pure data capture: the caller has
    /// already computed the result and resolved operand presence, so
    /// this cannot fail.
    pub fn add_operation(
        &mut self,
        operation: CalcOperation,
        result: ComplexNumber,
        operand1: ComplexNumber,
        operand2: Option<ComplexNumber>,
    ) {
        self.entries.push(HistoryEntry {
            operation,
            result,
            operand1,
            operand2,
        });
    }

    pub fn get(&self, index: usize) -> CalcResult<&HistoryEntry> {
        self.entries.get(index).ok_or(CalcError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries joined by `;`, no trailing separator. An empty log
    /// serializes to the empty string.
    pub fn serialize(&self) -> String {
        self.entries
            .iter()
            .map(HistoryEntry::serialize)
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Replace the log with the parsed contents of `text`.
    ///
    /// Replace-or-fail: the whole document is parsed into a fresh vector
    /// first, so an unknown identity or malformed literal anywhere in
    /// the text leaves the current log untouched. A silently truncated
    /// history would be worse than a loud failure.
    pub fn deserialize(&mut self, text: &str) -> CalcResult<()> {
        let trimmed = text.trim();
        let mut parsed = Vec::new();

        if !trimmed.is_empty() {
            for entry in trimmed.split(';') {
                parsed.push(HistoryEntry::deserialize(entry)?);
            }
        }

        self.entries = parsed;
        Ok(())
    }

    pub fn save_to_file(&self, path: &Path) -> CalcResult<()> {
        let file = File::create(path).map_err(|e| CalcError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(self.serialize().as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| {
                error!(path = %path.display(), error = %e, "failed to write history");
                CalcError::io(path, e)
            })?;

        info!(path = %path.display(), entries = self.entries.len(), "history saved");
        Ok(())
    }

    pub fn load_from_file(&mut self, path: &Path) -> CalcResult<()> {
        let text = fs::read_to_string(path).map_err(|e| {
            error!(path = %path.display(), error = %e, "failed to read history");
            CalcError::io(path, e)
        })?;

        self.deserialize(&text)?;
        info!(path = %path.display(), entries = self.entries.len(), "history loaded");
        Ok(())
    }
}
