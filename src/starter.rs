use core::f64::consts::PI;

use crate::math::{abs, powf, sqrt};

/// `π - 6/π`, the shared denominator of the starter's blending factors.
const PI_MINUS_SIX_OVER_PI: f64 = PI - 6.0 / PI;

/// Constant term of the starter's `alpha` blending coefficient.
pub(crate) const FACTOR1: f64 = 3.0 * PI / PI_MINUS_SIX_OVER_PI;

/// Slope of the starter's `alpha` blending coefficient in `π - M`.
pub(crate) const FACTOR2: f64 = 1.6 / PI_MINUS_SIX_OVER_PI;

/// Get an initial guess for the elliptic eccentric anomaly.
///
/// This replaces `sin(E)` in Kepler's equation with a rational
/// approximation, which turns the equation into a cubic in `E`.
/// The real root of that cubic is the starter.
///
/// `one_minus_ecc` must be `1 - eccentricity`. It is passed in rather than
/// recomputed so that the caller and the [corrector][crate::refine_estimate]
/// share the exact same value.
///
/// # Unchecked Operation
/// The mean anomaly must already be reduced into `[0, π)`, and the
/// eccentricity must be in `[0, 1)`. Neither is checked.
///
/// The quantity under the inner square root is non-negative in exact
/// arithmetic. It is not clamped, so a rounding failure there yields NaN
/// instead of a silently wrong guess.
///
/// # Accuracy
/// The relative error is around `1e-3` across the domain. The guess gets
/// ill-conditioned as the eccentricity approaches 1 and the mean anomaly
/// approaches 0 at the same time.
///
/// # Source
/// From the paper
/// "Kepler Equation Solver"
/// by F. Landis Markley
/// <https://doi.org/10.1007/BF00691917>
#[inline]
#[must_use]
pub fn markley_starter(mean_anomaly: f64, eccentricity: f64, one_minus_ecc: f64) -> f64 {
    let mean_anom_sq = mean_anomaly * mean_anomaly;

    let alpha = FACTOR1 + FACTOR2 * (PI - mean_anomaly) / (1.0 + eccentricity);
    let d = 3.0 * one_minus_ecc + alpha * eccentricity;
    let alpha_d = alpha * d;

    let r = (3.0 * alpha_d * (d - one_minus_ecc) + mean_anom_sq) * mean_anomaly;
    let q = 2.0 * alpha_d * one_minus_ecc - mean_anom_sq;
    let q_sq = q * q;

    let w = powf(abs(r) + sqrt(q_sq * q + r * r), 2.0 / 3.0);

    (2.0 * r * w / (w * w + w * q + q_sq) + mean_anomaly) / d
}
