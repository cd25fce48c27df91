use crate::complex::ComplexNumber;
use crate::error::CalcError;

/// The nine calculator operations as a closed tagged variant.
///
/// Operations carry no state, so a history entry stores the variant
/// inline and behavior is reconstructed purely from the wire tag. The
/// tag-to-variant mapping lives in `deserialize` as a plain exhaustive
/// match rather than any runtime registry: the set is known at build
/// time and the compiler checks it stays in sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcOperation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Conjugate,
    AbsoluteValue,
    Square,
    Root,
    Inverse,
}

impl CalcOperation {
    #[allow(dead_code)]
    pub const ALL: [CalcOperation; 9] = [
        CalcOperation::Addition,
        CalcOperation::Subtraction,
        CalcOperation::Multiplication,
        CalcOperation::Division,
        CalcOperation::Conjugate,
        CalcOperation::AbsoluteValue,
        CalcOperation::Square,
        CalcOperation::Root,
        CalcOperation::Inverse,
    ];

    /// The stable serialization tag for this variant.
    pub fn identity(&self) -> &'static str {
        match self {
            CalcOperation::Addition => "AdditionOperation",
            CalcOperation::Subtraction => "SubtractionOperation",
            CalcOperation::Multiplication => "MultiplicationOperation",
            CalcOperation::Division => "DivisionOperation",
            CalcOperation::Conjugate => "ConjugateOperation",
            CalcOperation::AbsoluteValue => "AbsoluteValueOperation",
            CalcOperation::Square => "SquareOperation",
            CalcOperation::Root => "RootOperation",
            CalcOperation::Inverse => "InverseOperation",
        }
    }

    /// Resolve a serialization tag back to its variant. Unknown tags are
    /// `None` and the caller must report them, never fall back to a
    /// default operation.
    pub fn deserialize(name: &str) -> Option<CalcOperation> {
        match name {
            "AdditionOperation" => Some(CalcOperation::Addition),
            "SubtractionOperation" => Some(CalcOperation::Subtraction),
            "MultiplicationOperation" => Some(CalcOperation::Multiplication),
            "DivisionOperation" => Some(CalcOperation::Division),
            "ConjugateOperation" => Some(CalcOperation::Conjugate),
            "AbsoluteValueOperation" => Some(CalcOperation::AbsoluteValue),
            "SquareOperation" => Some(CalcOperation::Square),
            "RootOperation" => Some(CalcOperation::Root),
            "InverseOperation" => Some(CalcOperation::Inverse),
            _ => None,
        }
    }

    pub fn is_unary(&self) -> bool {
        match self {
            CalcOperation::Addition
            | CalcOperation::Subtraction
            | CalcOperation::Multiplication
            | CalcOperation::Division => false,
            CalcOperation::Conjugate
            | CalcOperation::AbsoluteValue
            | CalcOperation::Square
            | CalcOperation::Root
            | CalcOperation::Inverse => true,
        }
    }

    /// Apply the operation. Binary variants fail with `MissingOperand`
    /// when `operand2` is absent; unary variants ignore a supplied
    /// `operand2` rather than rejecting it.
    pub fn perform(
        &self,
        operand1: ComplexNumber,
        operand2: Option<ComplexNumber>,
    ) -> Result<ComplexNumber, CalcError> {
        let second = || operand2.ok_or(CalcError::MissingOperand(self.identity()));

        match self {
            CalcOperation::Addition => Ok(operand1.add(second()?)),
            CalcOperation::Subtraction => Ok(operand1.subtract(second()?)),
            CalcOperation::Multiplication => Ok(operand1.multiply(second()?)),
            CalcOperation::Division => operand1.divide(second()?),
            CalcOperation::Conjugate => Ok(operand1.conjugate()),
            CalcOperation::AbsoluteValue => {
                Ok(ComplexNumber::new(operand1.absolute_value(), 0.0))
            }
            CalcOperation::Square => Ok(operand1.square()),
            CalcOperation::Root => Ok(operand1.root()),
            CalcOperation::Inverse => operand1.inverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_roundtrip_all_variants() {
        for op in CalcOperation::ALL {
            assert_eq!(CalcOperation::deserialize(op.identity()), Some(op));
        }
    }

    #[test]
    fn test_deserialize_unknown_is_none() {
        assert_eq!(CalcOperation::deserialize("NotARealOp"), None);
        assert_eq!(CalcOperation::deserialize(""), None);
        // Tags are case-sensitive.
        assert_eq!(CalcOperation::deserialize("additionoperation"), None);
    }

    #[test]
    fn test_arity() {
        assert!(!CalcOperation::Addition.is_unary());
        assert!(!CalcOperation::Subtraction.is_unary());
        assert!(!CalcOperation::Multiplication.is_unary());
        assert!(!CalcOperation::Division.is_unary());
        assert!(CalcOperation::Conjugate.is_unary());
        assert!(CalcOperation::AbsoluteValue.is_unary());
        assert!(CalcOperation::Square.is_unary());
        assert!(CalcOperation::Root.is_unary());
        assert!(CalcOperation::Inverse.is_unary());
    }

    #[test]
    fn test_binary_without_second_operand_fails() {
        let a = ComplexNumber::new(1.0, 1.0);
        for op in CalcOperation::ALL.iter().filter(|op| !op.is_unary()) {
            assert!(
                matches!(op.perform(a, None), Err(CalcError::MissingOperand(_))),
                "{} accepted a single operand",
                op.identity()
            );
        }
    }

    #[test]
    fn test_unary_ignores_extra_operand() {
        let a = ComplexNumber::new(2.0, -3.0);
        let extra = Some(ComplexNumber::new(9.0, 9.0));
        assert_eq!(
            CalcOperation::Conjugate.perform(a, extra).unwrap(),
            ComplexNumber::new(2.0, 3.0)
        );
    }

    #[test]
    fn test_perform_addition() {
        let r = CalcOperation::Addition
            .perform(
                ComplexNumber::new(2.0, 3.0),
                Some(ComplexNumber::new(1.0, -1.0)),
            )
            .unwrap();
        assert_eq!(r, ComplexNumber::new(3.0, 2.0));
    }

    #[test]
    fn test_perform_absolute_value_is_real() {
        let r = CalcOperation::AbsoluteValue
            .perform(ComplexNumber::new(3.0, 4.0), None)
            .unwrap();
        assert_eq!(r, ComplexNumber::new(5.0, 0.0));
    }

    #[test]
    fn test_perform_division_by_zero() {
        let r = CalcOperation::Division.perform(
            ComplexNumber::new(1.0, 0.0),
            Some(ComplexNumber::zero()),
        );
        assert!(matches!(r, Err(CalcError::DivisionByZero)));
    }

    #[test]
    fn test_perform_inverse_of_zero() {
        let r = CalcOperation::Inverse.perform(ComplexNumber::zero(), None);
        assert!(matches!(r, Err(CalcError::DivisionByZero)));
    }
}
