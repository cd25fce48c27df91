use std::fmt;

use regex::Regex;

use crate::error::CalcError;

/// A complex number as a plain (real, imaginary) pair of doubles.
///
/// Values are never validated beyond being finite-float representable:
/// NaN/Inf can only get in through caller input and flow through the
/// arithmetic untouched. The only guarded cases are the two explicit
/// zero-denominator errors in `divide` and `inverse`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexNumber {
    pub re: f64,
    pub im: f64,
}

impl ComplexNumber {
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    pub fn zero() -> Self {
        Self { re: 0.0, im: 0.0 }
    }

    pub fn is_zero(&self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }

    pub fn add(&self, other: ComplexNumber) -> ComplexNumber {
        ComplexNumber::new(self.re + other.re, self.im + other.im)
    }

    /// `self - other`. The session layer always calls this with the held
    /// value as `self`, so the value entered before the operator key is
    /// the minuend.
    pub fn subtract(&self, other: ComplexNumber) -> ComplexNumber {
        ComplexNumber::new(self.re - other.re, self.im - other.im)
    }

    pub fn multiply(&self, other: ComplexNumber) -> ComplexNumber {
        ComplexNumber::new(
            self.re * other.re - self.im * other.im,
            self.re * other.im + self.im * other.re,
        )
    }

    pub fn divide(&self, other: ComplexNumber) -> Result<ComplexNumber, CalcError> {
        if other.is_zero() {
            return Err(CalcError::DivisionByZero);
        }
        let d = other.re * other.re + other.im * other.im;
        Ok(ComplexNumber::new(
            (self.re * other.re + self.im * other.im) / d,
            (self.im * other.re - self.re * other.im) / d,
        ))
    }

    pub fn absolute_value(&self) -> f64 {
        (self.re * self.re + self.im * self.im).sqrt()
    }

    /// Doubles the value rather than multiplying it by itself. This is
    /// the behavior existing history files were recorded with, so it is
    /// kept verbatim; see DESIGN.md before changing it.
    pub fn square(&self) -> ComplexNumber {
        self.add(*self)
    }

    /// Principal square root. A zero imaginary part counts as
    /// non-negative, so the result lands in the upper half-plane.
    pub fn root(&self) -> ComplexNumber {
        let abs = self.absolute_value();
        let new_re = ((abs + self.re) / 2.0).sqrt();
        let sign = if self.im >= 0.0 { 1.0 } else { -1.0 };
        let new_im = sign * ((abs - self.re) / 2.0).sqrt();
        ComplexNumber::new(new_re, new_im)
    }

    pub fn inverse(&self) -> Result<ComplexNumber, CalcError> {
        let d = self.re * self.re + self.im * self.im;
        if d == 0.0 {
            return Err(CalcError::DivisionByZero);
        }
        Ok(ComplexNumber::new(self.re / d, -self.im / d))
    }

    pub fn conjugate(&self) -> ComplexNumber {
        ComplexNumber::new(self.re, -self.im)
    }

    /// Parse a `<float>+<float>i` literal, e.g. `3+2i` or `1+-1i`.
    ///
    /// The `+` is a fixed separator between the two components; a
    /// negative imaginary part shows up as `+-`. Anything else is a
    /// `MalformedLiteral`.
    pub fn parse_literal(s: &str) -> Result<ComplexNumber, CalcError> {
        let float = r"-?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?";
        let re = Regex::new(&format!(r"^\s*({float})\+({float})i\s*$"))
            .expect("literal regex is valid");
        let caps = re
            .captures(s)
            .ok_or_else(|| CalcError::MalformedLiteral(s.to_string()))?;

        let real: f64 = caps[1]
            .parse()
            .map_err(|_| CalcError::MalformedLiteral(s.to_string()))?;
        let imag: f64 = caps[2]
            .parse()
            .map_err(|_| CalcError::MalformedLiteral(s.to_string()))?;
        Ok(ComplexNumber::new(real, imag))
    }
}

impl fmt::Display for ComplexNumber {
    /// Renders the wire form `<re>+<im>i`, matching `parse_literal`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}i", self.re, self.im)
    }
}
