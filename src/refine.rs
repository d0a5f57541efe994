use crate::math::{cos, sin};

/// Refine an estimate of the elliptic eccentric anomaly with a single
/// high-order Newton-type step.
///
/// Writes Kepler's equation as
/// `f(E) = e(E - sin E) + (1 - e)E - M`
/// and corrects the estimate using `f` and its first three derivatives.
/// Three nested corrections are computed, each one plugging the previous
/// correction back into the denominator as a higher-order Taylor term.
/// The last of them is the step that gets applied.
///
/// Given a starter accurate to about `1e-3`, one call is enough to reach
/// machine precision. There is no loop and no convergence test.
///
/// `one_minus_ecc` must be `1 - eccentricity`.
///
/// # Unchecked Operation
/// This function does not check that the eccentricity is in `[0, 1)`.
/// Outside of that range the denominators may vanish, producing infinities
/// or NaN.
///
/// # Source
/// From the paper
/// "Solving Kepler's equation with high efficiency and accuracy"
/// by Albert Nijenhuis
/// <https://doi.org/10.1007/BF00051686>
#[inline]
#[must_use]
pub fn refine_estimate(
    mean_anomaly: f64,
    eccentricity: f64,
    one_minus_ecc: f64,
    eccentric_anomaly: f64,
) -> f64 {
    // 1 - cos(E) rather than cos(E), to avoid cancellation near E = 0
    let s_e = eccentric_anomaly - sin(eccentric_anomaly);
    let c_e = 1.0 - cos(eccentric_anomaly);

    let f_0 = eccentricity * s_e + eccentric_anomaly * one_minus_ecc - mean_anomaly;
    let f_1 = eccentricity * c_e + one_minus_ecc;
    let f_2 = eccentricity * (eccentric_anomaly - s_e);
    let f_3 = 1.0 - f_1;

    // Halley
    let d_3 = -f_0 / (f_1 - 0.5 * f_0 * f_2 / f_1);
    let d_4 = -f_0 / (f_1 + 0.5 * d_3 * f_2 + (d_3 * d_3) * f_3 / 6.0);
    let d_4_sq = d_4 * d_4;
    let delta =
        -f_0 / (f_1 + 0.5 * d_4 * f_2 + d_4_sq * f_3 / 6.0 - d_4_sq * d_4 * f_2 / 24.0);

    eccentric_anomaly + delta
}
