//! # Elliptic Kepler Equation Solver
//! This library crate solves Kepler's equation,
//!
//! ```text
//! M = E - e sin(E)
//! ```
//!
//! for the eccentric anomaly `E`, given a mean anomaly `M` and an
//! eccentricity `e` in `[0, 1)`.
//!
//! Kepler's equation has no closed-form solution, and it sits in the inner
//! loop of orbit propagation and orbit fitting, where it is evaluated
//! millions of times. Most solvers iterate Newton's method (or a relative)
//! until some convergence criterion is met. This one doesn't iterate at all:
//! a closed-form starter that is already accurate to about `1e-3` is
//! followed by a single fifth-order correction, which brings it down to
//! machine precision. Every call costs the same, whatever the inputs.
//!
//! ## Getting started
//! - [`solve`]: The core, unchecked solver. Takes one mean anomaly and one
//!   eccentricity, returns one eccentric anomaly.
//! - [`kepler`]: Checks the eccentricity, solves, and also derives the
//!   true anomaly.
//! - [`batch`]: Applies the solver element-wise over slices and
//!   N-dimensional arrays, optionally in parallel with the `rayon` feature.
//!
//! The building blocks of the solver, [`floor_rem`], [`markley_starter`]
//! and [`refine_estimate`], are exposed as well.
//!
//! ## Features
//! - `std` (default): Use the standard library for float math.
//! - `libm`: Use the `libm` crate for float math, for `no_std` targets.
//! - `serde`: Derive `Serialize` and `Deserialize` on the public structs.
//! - `rayon`: Parallel batch functions.
//!
//! ## Example
//!
//! ```rust
//! use kepler_solver::solve;
//!
//! # fn main() {
//! let mean_anomaly = 1.0;
//! let eccentricity = 0.5;
//!
//! let ecc_anom = solve(mean_anomaly, eccentricity);
//!
//! assert!((ecc_anom - eccentricity * ecc_anom.sin() - mean_anomaly).abs() < 1e-12);
//! # }
//! ```
//!
//! ## Sources
//! The starter comes from "Kepler Equation Solver" by F. Landis Markley,
//! and the refinement step from "Solving Kepler's equation with high
//! efficiency and accuracy" by Albert Nijenhuis.

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod batch;
mod error;
mod math;
mod refine;
mod remainder;
mod starter;
mod true_anomaly;

use core::f64::consts::{PI, TAU};

pub use error::{BatchError, BroadcastError, EccentricityError};
pub use refine::refine_estimate;
pub use remainder::floor_rem;
pub use starter::markley_starter;
pub use true_anomaly::{
    kepler, kepler_with_options, true_anomaly_direction, validate_eccentricity, KeplerSolution,
    TrueAnomalyOptions, DEFAULT_TOLERANCE,
};

/// Gets the eccentric anomaly at a given mean anomaly, for an elliptic orbit.
///
/// The mean anomaly may be any finite number, and is first wrapped into
/// `[0, 2π)`. The returned eccentric anomaly is in `[0, 2π]`.
///
/// # Unchecked Operation
/// This function does not check that the eccentricity is in `[0, 1)`.
/// For eccentricities of 1 or more, the result is meaningless.
/// Use [`kepler`] or [`validate_eccentricity`] if you need the check.
///
/// Non-finite inputs produce NaN.
///
/// # Performance
/// This function doesn't iterate. It costs one `pow`, one `sqrt`, one `sin`,
/// one `cos` and a handful of divisions, whatever the inputs.
///
/// # Example
/// ```
/// use core::f64::consts::PI;
/// use kepler_solver::solve;
///
/// assert_eq!(solve(0.0, 0.9), 0.0);
/// assert!((solve(PI, 0.9) - PI).abs() < 1e-14);
///
/// // Circular orbits have no distinction between mean and eccentric anomalies
/// assert!((solve(-1.0, 0.0) - (2.0 * PI - 1.0)).abs() < 1e-12);
/// ```
#[inline]
#[must_use]
pub fn solve(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let mut mean_anomaly = floor_rem(mean_anomaly, TAU);

    // Kepler's equation is odd about pi, so fold the upper
    // half-circle onto [0, pi] where the starter is valid
    let high = mean_anomaly > PI;
    if high {
        mean_anomaly = TAU - mean_anomaly;
    }

    let one_minus_ecc = 1.0 - eccentricity;
    let starter = markley_starter(mean_anomaly, eccentricity, one_minus_ecc);
    let ecc_anom = refine_estimate(mean_anomaly, eccentricity, one_minus_ecc, starter);

    if high {
        TAU - ecc_anom
    } else {
        ecc_anom
    }
}
