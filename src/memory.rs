use crate::complex::ComplexNumber;

/// Classic calculator memory: a running sum (MC/MR/MS/M+) plus the value
/// that was on screen when the last operator key committed it.
#[derive(Debug, Clone, Copy)]
pub struct CalcMemory {
    sum: ComplexNumber,
    last: ComplexNumber,
}

impl Default for CalcMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl CalcMemory {
    pub fn new() -> Self {
        Self {
            sum: ComplexNumber::zero(),
            last: ComplexNumber::zero(),
        }
    }

    /// MR: the current memory sum.
    pub fn recall(&self) -> ComplexNumber {
        self.sum
    }

    /// MS: replace the memory sum.
    pub fn store(&mut self, value: ComplexNumber) {
        self.sum = value;
    }

    /// M+: accumulate into the memory sum.
    pub fn add(&mut self, value: ComplexNumber) {
        self.sum = self.sum.add(value);
    }

    /// MC: back to zero.
    pub fn clear(&mut self) {
        self.sum = ComplexNumber::zero();
    }

    /// The value held when a binary operator was last committed.
    pub fn last(&self) -> ComplexNumber {
        self.last
    }

    pub fn set_last(&mut self, value: ComplexNumber) {
        self.last = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_starts_at_zero() {
        let mem = CalcMemory::new();
        assert_eq!(mem.recall(), ComplexNumber::zero());
        assert_eq!(mem.last(), ComplexNumber::zero());
    }

    #[test]
    fn test_store_and_recall() {
        let mut mem = CalcMemory::new();
        mem.store(ComplexNumber::new(2.0, -1.0));
        assert_eq!(mem.recall(), ComplexNumber::new(2.0, -1.0));
    }

    #[test]
    fn test_add_accumulates() {
        let mut mem = CalcMemory::new();
        mem.add(ComplexNumber::new(1.0, 1.0));
        mem.add(ComplexNumber::new(2.0, -3.0));
        assert_eq!(mem.recall(), ComplexNumber::new(3.0, -2.0));
    }

    #[test]
    fn test_clear_keeps_last_value() {
        let mut mem = CalcMemory::new();
        mem.store(ComplexNumber::new(5.0, 5.0));
        mem.set_last(ComplexNumber::new(1.0, 2.0));
        mem.clear();
        assert_eq!(mem.recall(), ComplexNumber::zero());
        assert_eq!(mem.last(), ComplexNumber::new(1.0, 2.0));
    }
}
