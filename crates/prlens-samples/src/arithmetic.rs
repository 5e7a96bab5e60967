// SPDX-License-Identifier: Apache-2.0

//! Basic arithmetic on two operands.
//!
//! Every operation reports its undefined cases as [`SampleError`] values:
//! integer overflow, division by zero, and averaging nothing.

use crate::Result;
use crate::error::SampleError;

/// Adds two numbers together.
///
/// # Errors
///
/// Returns [`SampleError::Overflow`] if the sum does not fit in `i64`.
pub fn add(a: i64, b: i64) -> Result<i64> {
    a.checked_add(b)
        .ok_or(SampleError::Overflow { operation: "add" })
}

/// Subtracts `b` from `a`.
///
/// # Errors
///
/// Returns [`SampleError::Overflow`] if the difference does not fit in `i64`.
pub fn subtract(a: i64, b: i64) -> Result<i64> {
    a.checked_sub(b).ok_or(SampleError::Overflow {
        operation: "subtract",
    })
}

/// Multiplies two numbers.
///
/// # Errors
///
/// Returns [`SampleError::Overflow`] if the product does not fit in `i64`.
pub fn multiply(a: i64, b: i64) -> Result<i64> {
    a.checked_mul(b).ok_or(SampleError::Overflow {
        operation: "multiply",
    })
}

/// Divides `a` by `b`.
///
/// # Errors
///
/// Returns [`SampleError::DivisionByZero`] when `b` is zero.
#[allow(clippy::cast_precision_loss)]
pub fn divide(a: i64, b: i64) -> Result<f64> {
    if b == 0 {
        return Err(SampleError::DivisionByZero);
    }
    Ok(a as f64 / b as f64)
}

/// Returns the arithmetic mean of `numbers`.
///
/// # Errors
///
/// Returns [`SampleError::EmptyInput`] for an empty slice.
#[allow(clippy::cast_precision_loss)]
pub fn calculate_average(numbers: &[f64]) -> Result<f64> {
    if numbers.is_empty() {
        return Err(SampleError::EmptyInput);
    }
    let total: f64 = numbers.iter().sum();
    Ok(total / numbers.len() as f64)
}

/// Doubles `n`.
///
/// # Errors
///
/// Returns [`SampleError::Overflow`] if `2 * n` does not fit in `i64`.
pub fn double(n: i64) -> Result<i64> {
    n.checked_mul(2)
        .ok_or(SampleError::Overflow { operation: "double" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add() {
        assert_eq!(add(5, 3).unwrap(), 8);
        assert_eq!(add(-4, 4).unwrap(), 0);
    }

    #[test]
    fn test_add_is_commutative() {
        for (a, b) in [(1, 2), (-7, 13), (0, 99), (i64::MAX, -1)] {
            assert_eq!(add(a, b).unwrap(), add(b, a).unwrap());
        }
    }

    #[test]
    fn test_add_overflow() {
        assert!(matches!(
            add(i64::MAX, 1),
            Err(SampleError::Overflow { operation: "add" })
        ));
        assert!(add(i64::MIN, -1).is_err());
    }

    #[test]
    fn test_subtract() {
        assert_eq!(subtract(10, 4).unwrap(), 6);
        assert_eq!(subtract(4, 10).unwrap(), -6);
    }

    #[test]
    fn test_subtract_overflow() {
        assert!(matches!(
            subtract(i64::MIN, 1),
            Err(SampleError::Overflow {
                operation: "subtract"
            })
        ));
    }

    #[test]
    fn test_multiply() {
        assert_eq!(multiply(6, 7).unwrap(), 42);
        assert_eq!(multiply(123_456, 0).unwrap(), 0);
        assert_eq!(multiply(-3, 3).unwrap(), -9);
        assert_eq!(multiply(i64::MAX, 0).unwrap(), 0);
    }

    #[test]
    fn test_multiply_overflow() {
        let err = multiply(i64::MAX, 2).unwrap_err();
        assert!(matches!(
            err,
            SampleError::Overflow {
                operation: "multiply"
            }
        ));
        assert_eq!(err.to_string(), "Arithmetic overflow in multiply");
        assert!(multiply(i64::MIN, -1).is_err());
    }

    #[test]
    fn test_divide() {
        let result = divide(20, 4).unwrap();
        assert!((result - 5.0).abs() < f64::EPSILON);

        let result = divide(7, 2).unwrap();
        assert!((result - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_divide_by_zero() {
        let result = divide(1, 0);
        assert!(matches!(result, Err(SampleError::DivisionByZero)));
        assert_eq!(result.unwrap_err().to_string(), "Cannot divide by zero");
    }

    #[test]
    fn test_calculate_average() {
        let avg = calculate_average(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((avg - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_calculate_average_empty() {
        assert!(matches!(
            calculate_average(&[]),
            Err(SampleError::EmptyInput)
        ));
    }

    #[test]
    fn test_double() {
        assert_eq!(double(21).unwrap(), 42);
        assert!(matches!(
            double(i64::MAX / 2 + 1),
            Err(SampleError::Overflow { operation: "double" })
        ));
    }
}
