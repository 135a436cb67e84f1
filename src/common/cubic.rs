//! Real root of a depressed cubic `x^3 + b*x + c = 0`.
//!
//! VPM-B's allowable-gradient relationship inverts to the monic depressed cubic
//! `x^3 - b*x - c = 0`; the real root is the allowable gradient itself, a physical
//! pressure difference, so only the single real-valued root is of interest here,
//! never the complex pair that can accompany it.

use crate::common::error::DiveError;
use crate::common::math_utils::{acos, cbrt, cos, sqrt};

/// Solve `x^3 - b*x - c = 0` for its real root, given `b > 0`.
pub fn solve_depressed_cubic(b: f64, c: f64) -> Result<f64, DiveError> {
    if b == 0.0 {
        let root = cbrt(c);
        return if root.is_nan() {
            Err(DiveError::NonConvergent)
        } else {
            Ok(root)
        };
    }

    let discriminant = 27.0 * c * c - 4.0 * b * b * b;

    let root = if discriminant < 0.0 {
        2.0 * sqrt(b / 3.0) * cos(acos(3.0 * c * sqrt(3.0 / b) / (2.0 * b)) / 3.0)
    } else {
        let denominator = cbrt(9.0 * c + sqrt(3.0 * discriminant));
        cbrt(2.0 / 3.0) * b / denominator + denominator / cbrt(18.0)
    };

    if root.is_nan() {
        Err(DiveError::NonConvergent)
    } else {
        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_known_single_real_root() {
        // x^3 - 6x - 9 = 0 has one real root near x = 3.
        let root = solve_depressed_cubic(6.0, 9.0).unwrap();
        assert!((root * root * root - 6.0 * root - 9.0).abs() < 1e-6);
    }

    #[test]
    fn solves_three_real_root_case() {
        // x^3 - 3x - (-1) = 0, i.e. x^3 - 3x + 1 = 0, has three real roots.
        let root = solve_depressed_cubic(3.0, -1.0).unwrap();
        assert!((root * root * root - 3.0 * root - (-1.0)).abs() < 1e-6);
    }

    #[test]
    fn zero_b_reduces_to_cube_root() {
        let root = solve_depressed_cubic(0.0, 8.0).unwrap();
        assert!((root - 2.0).abs() < 1e-9);
    }
}
