use crate::math::{copysign, fmod};

/// Computes `a mod b` using floored division, so that the result carries
/// the sign of the divisor.
///
/// For a positive divisor, the result is always in `[0, b)`.
/// This differs from Rust's `%` operator on floats, which truncates
/// and so carries the sign of the dividend instead.
///
/// # Edge Cases
/// - If `b` is zero, the raw truncating remainder is returned, which is
///   NaN for IEEE floats.
/// - If the remainder is zero, a zero with the sign of `b` is returned.
///
/// # Example
/// ```
/// use core::f64::consts::TAU;
/// use kepler_solver::floor_rem;
///
/// assert_eq!(floor_rem(7.0, 3.0), 1.0);
/// assert_eq!(floor_rem(-1.0, 3.0), 2.0);
/// assert_eq!(floor_rem(1.0, -3.0), -2.0);
/// assert!((floor_rem(-TAU - 1.0, TAU) - (TAU - 1.0)).abs() < 1e-12);
/// ```
#[inline]
#[must_use]
pub fn floor_rem(a: f64, b: f64) -> f64 {
    let rem = fmod(a, b);

    if b == 0.0 {
        return rem;
    }

    if rem != 0.0 {
        if (b < 0.0) != (rem < 0.0) {
            rem + b
        } else {
            rem
        }
    } else {
        copysign(0.0, b)
    }
}
