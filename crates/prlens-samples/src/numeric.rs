// SPDX-License-Identifier: Apache-2.0

//! Numeric helpers: area, powers, roots, factorials, primes and maxima.

use std::f64::consts::PI;

use crate::Result;
use crate::error::SampleError;

/// Area of a circle with the given radius.
#[must_use]
pub fn calculate_area(radius: f64) -> f64 {
    PI * radius * radius
}

/// Raises `base` to `exponent`.
///
/// # Errors
///
/// Returns [`SampleError::Overflow`] if the result does not fit in `i64`.
pub fn power(base: i64, exponent: u32) -> Result<i64> {
    base.checked_pow(exponent)
        .ok_or(SampleError::Overflow { operation: "power" })
}

/// Square root of `n`.
///
/// # Errors
///
/// Returns [`SampleError::NegativeInput`] when `n` is negative.
pub fn square_root(n: f64) -> Result<f64> {
    if n < 0.0 {
        return Err(SampleError::NegativeInput {
            value: n.to_string(),
        });
    }
    Ok(n.sqrt())
}

/// Computes `n!` iteratively.
///
/// # Errors
///
/// Returns [`SampleError::NegativeInput`] for negative `n` and
/// [`SampleError::Overflow`] once the result exceeds `u64` (past `20!`).
pub fn factorial(n: i64) -> Result<u64> {
    let n = u64::try_from(n).map_err(|_| SampleError::NegativeInput {
        value: n.to_string(),
    })?;

    (1..=n).try_fold(1u64, |acc, k| {
        acc.checked_mul(k).ok_or(SampleError::Overflow {
            operation: "factorial",
        })
    })
}

/// Checks whether `n` is prime.
///
/// Trial division stops at `sqrt(n)`.
#[must_use]
pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let mut divisor = 3i64;
    // divisor <= n / divisor avoids overflowing divisor * divisor near i64::MAX
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Returns the largest element of `numbers`.
///
/// Ties keep the first occurrence.
///
/// # Errors
///
/// Returns [`SampleError::EmptyInput`] for an empty slice.
pub fn find_max<T: PartialOrd + Copy>(numbers: &[T]) -> Result<T> {
    let (first, rest) = numbers.split_first().ok_or(SampleError::EmptyInput)?;
    Ok(rest
        .iter()
        .fold(*first, |max, &n| if n > max { n } else { max }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_area() {
        let area = calculate_area(5.0);
        assert!((area - 78.5).abs() < 0.1);
        assert!(calculate_area(0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_power() {
        assert_eq!(power(2, 10).unwrap(), 1024);
        assert_eq!(power(7, 0).unwrap(), 1);
        assert_eq!(power(-2, 3).unwrap(), -8);
    }

    #[test]
    fn test_power_overflow() {
        assert!(matches!(
            power(2, 64),
            Err(SampleError::Overflow { operation: "power" })
        ));
    }

    #[test]
    fn test_square_root() {
        let root = square_root(16.0).unwrap();
        assert!((root - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_square_root_negative() {
        let err = square_root(-1.0).unwrap_err();
        assert!(matches!(err, SampleError::NegativeInput { .. }));
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0).unwrap(), 1);
        assert_eq!(factorial(1).unwrap(), 1);
        assert_eq!(factorial(5).unwrap(), 120);
        assert_eq!(factorial(20).unwrap(), 2_432_902_008_176_640_000);
    }

    #[test]
    fn test_factorial_negative_terminates_with_error() {
        assert!(matches!(
            factorial(-3),
            Err(SampleError::NegativeInput { .. })
        ));
    }

    #[test]
    fn test_factorial_overflow() {
        assert!(matches!(
            factorial(21),
            Err(SampleError::Overflow {
                operation: "factorial"
            })
        ));
    }

    #[test]
    fn test_is_prime() {
        assert!(is_prime(17));
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(is_prime(7919));
        assert!(!is_prime(1));
        assert!(!is_prime(0));
        assert!(!is_prime(-7));
        assert!(!is_prime(9));
        assert!(!is_prime(25));
        assert!(!is_prime(7917));
    }

    #[test]
    fn test_is_prime_matches_naive_check() {
        for n in 0..500i64 {
            let naive = n >= 2 && (2..n).all(|d| n % d != 0);
            assert_eq!(is_prime(n), naive, "mismatch for {n}");
        }
    }

    #[test]
    fn test_is_prime_large_values() {
        assert!(is_prime(1_000_000_007));
        assert!(!is_prime(1_000_000_007 * 3));
        // 2^63 - 1 = 7^2 * 73 * ...
        assert!(!is_prime(i64::MAX));
    }

    #[test]
    fn test_find_max() {
        assert_eq!(find_max(&[3, 1, 4, 1, 5, 9]).unwrap(), 9);
        assert_eq!(find_max(&[-5, -2, -9]).unwrap(), -2);
        assert!((find_max(&[1.5_f64, 0.5]).unwrap() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_find_max_empty() {
        let empty: [i32; 0] = [];
        assert!(matches!(find_max(&empty), Err(SampleError::EmptyInput)));
    }
}
