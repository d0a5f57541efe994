use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    math::{atan2, cos, sin, sqrt},
    solve, EccentricityError,
};

/// The default value of [`TrueAnomalyOptions::tolerance`].
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Options for deriving the true anomaly from the eccentric anomaly.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrueAnomalyOptions {
    /// How close `1 + cos(E)` may get to zero before the eccentric anomaly
    /// is treated as exactly apoapsis.
    ///
    /// The half-angle formula for the true anomaly divides by `1 + cos(E)`,
    /// which vanishes at `E = π`. Below this tolerance the true anomaly is
    /// taken to be `π` directly.
    ///
    /// This is **not** a convergence tolerance: the solver is not iterative,
    /// and you shouldn't need to change the default.
    pub tolerance: f64,
}

impl Default for TrueAnomalyOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// The solution of Kepler's equation at one mean anomaly.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeplerSolution {
    /// The eccentric anomaly, in radians, in the range `[0, 2π]`.
    pub eccentric_anomaly: f64,

    /// The cosine and sine of the true anomaly, as the `x` and `y`
    /// components respectively.
    ///
    /// This is the unit vector pointing from the focus towards the orbiting
    /// body, in the perifocal frame.
    pub true_anomaly_direction: DVec2,
}

impl KeplerSolution {
    /// The cosine of the true anomaly.
    #[inline]
    pub fn cos_true_anomaly(&self) -> f64 {
        self.true_anomaly_direction.x
    }

    /// The sine of the true anomaly.
    #[inline]
    pub fn sin_true_anomaly(&self) -> f64 {
        self.true_anomaly_direction.y
    }

    /// The true anomaly itself, in radians, in the range `(-π, π]`.
    ///
    /// # Performance
    /// This uses `atan2`. If you only need the sine and cosine, use
    /// [`true_anomaly_direction`][KeplerSolution::true_anomaly_direction] directly.
    pub fn true_anomaly(&self) -> f64 {
        atan2(self.true_anomaly_direction.y, self.true_anomaly_direction.x)
    }
}

/// Checks that an eccentricity describes an elliptic orbit, i.e. that it
/// is in the range `[0, 1)`.
///
/// Returns the eccentricity back on success.
///
/// # Example
/// ```
/// use kepler_solver::{validate_eccentricity, EccentricityError};
///
/// assert_eq!(validate_eccentricity(0.5), Ok(0.5));
/// assert_eq!(validate_eccentricity(1.0), Err(EccentricityError::NotElliptic));
/// assert_eq!(validate_eccentricity(-0.1), Err(EccentricityError::Negative));
/// ```
pub fn validate_eccentricity(eccentricity: f64) -> Result<f64, EccentricityError> {
    if !eccentricity.is_finite() {
        Err(EccentricityError::NotFinite)
    } else if eccentricity < 0.0 {
        Err(EccentricityError::Negative)
    } else if eccentricity >= 1.0 {
        Err(EccentricityError::NotElliptic)
    } else {
        Ok(eccentricity)
    }
}

/// Gets the cosine and sine of the true anomaly at a given eccentric anomaly.
///
/// Uses the half-angle relation
/// `tan(f/2) = sqrt((1 + e) / (1 - e)) * tan(E/2)`,
/// with `tan(E/2)` computed as `sin(E) / (1 + cos(E))`, and then
/// `cos(f)` and `sin(f)` from `tan(f/2)`.
///
/// When `1 + cos(E)` is not above `tolerance`, the body is at apoapsis and
/// `(-1, 0)` is returned.
///
/// # Unchecked Operation
/// This function does not check that the eccentricity is in `[0, 1)`.
pub fn true_anomaly_direction(eccentric_anomaly: f64, eccentricity: f64, tolerance: f64) -> DVec2 {
    let denom = 1.0 + cos(eccentric_anomaly);

    if denom > tolerance {
        let tan_half_f =
            sqrt((1.0 + eccentricity) / (1.0 - eccentricity)) * sin(eccentric_anomaly) / denom;
        let tan_half_f_sq = tan_half_f * tan_half_f;

        let recip = 1.0 / (1.0 + tan_half_f_sq);

        DVec2::new((1.0 - tan_half_f_sq) * recip, 2.0 * tan_half_f * recip)
    } else {
        DVec2::new(-1.0, 0.0)
    }
}

/// Solves Kepler's equation, and also derives the true anomaly.
///
/// Unlike [`solve`], this checks the eccentricity first.
///
/// # Example
/// ```
/// use kepler_solver::kepler;
///
/// let solution = kepler(1.0, 0.5).unwrap();
/// let ecc_anom = solution.eccentric_anomaly;
///
/// assert!((ecc_anom - 0.5 * ecc_anom.sin() - 1.0).abs() < 1e-12);
/// assert!((solution.true_anomaly_direction.length() - 1.0).abs() < 1e-12);
///
/// assert!(kepler(1.0, 1.5).is_err());
/// ```
pub fn kepler(mean_anomaly: f64, eccentricity: f64) -> Result<KeplerSolution, EccentricityError> {
    kepler_with_options(mean_anomaly, eccentricity, &TrueAnomalyOptions::default())
}

/// Solves Kepler's equation, and also derives the true anomaly,
/// using the given options.
///
/// See [`kepler`] for details.
pub fn kepler_with_options(
    mean_anomaly: f64,
    eccentricity: f64,
    options: &TrueAnomalyOptions,
) -> Result<KeplerSolution, EccentricityError> {
    let eccentricity = validate_eccentricity(eccentricity)?;
    let eccentric_anomaly = solve(mean_anomaly, eccentricity);

    Ok(KeplerSolution {
        eccentric_anomaly,
        true_anomaly_direction: true_anomaly_direction(
            eccentric_anomaly,
            eccentricity,
            options.tolerance,
        ),
    })
}
