use std::f64::consts::PI;

use crate::complex::ComplexNumber;
use crate::error::CalcError;

/// Geometry helpers driven from the calculator display.
///
/// These are display-only extras: their results are shown and plotted
/// but never recorded in the operation history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { radius: f64 },
    Triangle { side: f64 },
}

impl Shape {
    pub fn circle(radius: f64) -> Result<Shape, CalcError> {
        validate_dimension(radius)?;
        Ok(Shape::Circle { radius })
    }

    /// Equilateral triangle with the given side length.
    pub fn triangle(side: f64) -> Result<Shape, CalcError> {
        validate_dimension(side)?;
        Ok(Shape::Triangle { side })
    }

    pub fn area(&self) -> f64 {
        match self {
            Shape::Circle { radius } => PI * radius * radius,
            Shape::Triangle { side } => 3f64.sqrt() * side * side / 4.0,
        }
    }

    pub fn circumference(&self) -> f64 {
        match self {
            Shape::Circle { radius } => 2.0 * PI * radius,
            Shape::Triangle { side } => 3.0 * side,
        }
    }
}

fn validate_dimension(value: f64) -> Result<(), CalcError> {
    if value <= 0.0 {
        return Err(CalcError::InvalidShapeInput(format!(
            "dimension must be positive, got {value}"
        )));
    }
    Ok(())
}

/// Extract a shape dimension from the display value: the imaginary part
/// must be zero, the real part strictly positive.
pub fn dimension_from(value: ComplexNumber) -> Result<f64, CalcError> {
    if value.im != 0.0 {
        return Err(CalcError::InvalidShapeInput(format!(
            "imaginary part must be zero, got {value}"
        )));
    }
    validate_dimension(value.re)?;
    Ok(value.re)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-10;

    #[test]
    fn test_circle_area_and_circumference() {
        let circle = Shape::circle(2.0).unwrap();
        assert!((circle.area() - 4.0 * PI).abs() < EPS);
        assert!((circle.circumference() - 4.0 * PI).abs() < EPS);
    }

    #[test]
    fn test_triangle_area_and_circumference() {
        let triangle = Shape::triangle(2.0).unwrap();
        assert!((triangle.area() - 3f64.sqrt()).abs() < EPS);
        assert!((triangle.circumference() - 6.0).abs() < EPS);
    }

    #[test]
    fn test_rejects_nonpositive_dimension() {
        assert!(matches!(
            Shape::circle(0.0),
            Err(CalcError::InvalidShapeInput(_))
        ));
        assert!(matches!(
            Shape::triangle(-1.0),
            Err(CalcError::InvalidShapeInput(_))
        ));
    }

    #[test]
    fn test_dimension_requires_real_input() {
        assert!(matches!(
            dimension_from(ComplexNumber::new(2.0, 1.0)),
            Err(CalcError::InvalidShapeInput(_))
        ));
        assert_eq!(dimension_from(ComplexNumber::new(2.0, 0.0)).unwrap(), 2.0);
    }
}
