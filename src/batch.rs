//! Element-wise application of the solver over arrays.
//!
//! Every function in this module produces, for each element, exactly the
//! value [`solve`] would produce for the corresponding pair of inputs.
//! Nothing is computed across elements.
//!
//! # Broadcasting
//! The inputs follow NumPy's broadcasting rules. For the slice functions,
//! this means that the two slices must either have the same length, or one
//! of them must have a length of 1, in which case its single value is used
//! for every element.
//!
//! [`solve_broadcast`] extends this to N-dimensional, row-major arrays.

use alloc::{vec, vec::Vec};
use log::debug;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::{
    solve, true_anomaly_direction, validate_eccentricity, BatchError, BroadcastError,
    KeplerSolution, TrueAnomalyOptions,
};

/// Get the length of two 1-dimensional arrays broadcast together.
fn broadcast_len(left: usize, right: usize) -> Result<usize, BroadcastError> {
    if left == right || right == 1 {
        Ok(left)
    } else if left == 1 {
        Ok(right)
    } else {
        debug!("cannot broadcast arrays of lengths {left} and {right}");
        Err(BroadcastError::IncompatibleShapes {
            axis: 0,
            left,
            right,
        })
    }
}

#[inline]
fn pick(values: &[f64], index: usize) -> f64 {
    if values.len() == 1 {
        values[0]
    } else {
        values[index]
    }
}

fn check_output_len(expected: usize, found: usize) -> Result<(), BroadcastError> {
    if expected == found {
        Ok(())
    } else {
        debug!("output buffer of length {found} given for a batch of {expected}");
        Err(BroadcastError::OutputLength { expected, found })
    }
}

/// Solves Kepler's equation for every pair of mean anomaly and eccentricity.
///
/// # Unchecked Operation
/// Like [`solve`], this does not check the eccentricities.
/// Use [`kepler_slice`] if you need them checked.
///
/// # Example
/// ```
/// use kepler_solver::{batch::solve_slice, solve};
///
/// let mean_anomalies = [0.0, 1.0, 2.0, 3.0];
/// let eccentric_anomalies = solve_slice(&mean_anomalies, &[0.5]).unwrap();
///
/// for (m, e) in mean_anomalies.iter().zip(&eccentric_anomalies) {
///     assert_eq!(*e, solve(*m, 0.5));
/// }
///
/// assert!(solve_slice(&[0.0, 1.0], &[0.1, 0.2, 0.3]).is_err());
/// ```
pub fn solve_slice(
    mean_anomalies: &[f64],
    eccentricities: &[f64],
) -> Result<Vec<f64>, BroadcastError> {
    let len = broadcast_len(mean_anomalies.len(), eccentricities.len())?;
    let mut out = vec![0.0; len];
    fill(mean_anomalies, eccentricities, &mut out);
    Ok(out)
}

/// Solves Kepler's equation for every pair of mean anomaly and eccentricity,
/// writing the eccentric anomalies into `out`.
///
/// `out` must be exactly as long as the broadcast length of the inputs.
///
/// # Unchecked Operation
/// Like [`solve`], this does not check the eccentricities.
pub fn solve_into(
    mean_anomalies: &[f64],
    eccentricities: &[f64],
    out: &mut [f64],
) -> Result<(), BroadcastError> {
    let len = broadcast_len(mean_anomalies.len(), eccentricities.len())?;
    check_output_len(len, out.len())?;
    fill(mean_anomalies, eccentricities, out);
    Ok(())
}

fn fill(mean_anomalies: &[f64], eccentricities: &[f64], out: &mut [f64]) {
    for (i, ecc_anom) in out.iter_mut().enumerate() {
        *ecc_anom = solve(pick(mean_anomalies, i), pick(eccentricities, i));
    }
}

/// Parallel version of [`solve_slice`].
///
/// The elements are split across rayon's global thread pool.
/// The results are bit-for-bit identical to [`solve_slice`].
#[cfg(feature = "rayon")]
pub fn par_solve_slice(
    mean_anomalies: &[f64],
    eccentricities: &[f64],
) -> Result<Vec<f64>, BroadcastError> {
    let len = broadcast_len(mean_anomalies.len(), eccentricities.len())?;
    let mut out = vec![0.0; len];
    par_fill(mean_anomalies, eccentricities, &mut out);
    Ok(out)
}

/// Parallel version of [`solve_into`].
#[cfg(feature = "rayon")]
pub fn par_solve_into(
    mean_anomalies: &[f64],
    eccentricities: &[f64],
    out: &mut [f64],
) -> Result<(), BroadcastError> {
    let len = broadcast_len(mean_anomalies.len(), eccentricities.len())?;
    check_output_len(len, out.len())?;
    par_fill(mean_anomalies, eccentricities, out);
    Ok(())
}

#[cfg(feature = "rayon")]
fn par_fill(mean_anomalies: &[f64], eccentricities: &[f64], out: &mut [f64]) {
    out.par_iter_mut().enumerate().for_each(|(i, ecc_anom)| {
        *ecc_anom = solve(pick(mean_anomalies, i), pick(eccentricities, i));
    });
}

/// Solves Kepler's equation and derives the true anomaly for every pair
/// of mean anomaly and eccentricity.
///
/// Every eccentricity is checked before anything is solved. If any one of
/// them is out of range, the whole batch is rejected, and the error holds the
/// index of the first offending eccentricity. A batch that broadcasts to
/// zero elements is never rejected for its eccentricities.
pub fn kepler_slice(
    mean_anomalies: &[f64],
    eccentricities: &[f64],
    options: &TrueAnomalyOptions,
) -> Result<Vec<KeplerSolution>, BatchError> {
    let len = broadcast_len(mean_anomalies.len(), eccentricities.len())?;
    if len == 0 {
        return Ok(Vec::new());
    }

    for (index, &eccentricity) in eccentricities.iter().enumerate() {
        if let Err(error) = validate_eccentricity(eccentricity) {
            debug!("rejecting batch: eccentricity {eccentricity} at index {index}: {error}");
            return Err(BatchError::Eccentricity { index, error });
        }
    }

    Ok((0..len)
        .map(|i| {
            let eccentricity = pick(eccentricities, i);
            let eccentric_anomaly = solve(pick(mean_anomalies, i), eccentricity);

            KeplerSolution {
                eccentric_anomaly,
                true_anomaly_direction: true_anomaly_direction(
                    eccentric_anomaly,
                    eccentricity,
                    options.tolerance,
                ),
            }
        })
        .collect())
}

/// Broadcasts two array shapes together, following NumPy's rules.
///
/// The shapes are aligned at their last dimension. Each pair of dimensions
/// must either be equal, or one of them must be 1. Missing leading dimensions
/// are treated as 1.
///
/// # Example
/// ```
/// use kepler_solver::batch::broadcast_shapes;
///
/// assert_eq!(broadcast_shapes(&[3, 1], &[4]).unwrap(), vec![3, 4]);
/// assert_eq!(broadcast_shapes(&[], &[2, 5]).unwrap(), vec![2, 5]);
/// assert!(broadcast_shapes(&[3], &[4]).is_err());
/// ```
pub fn broadcast_shapes(left: &[usize], right: &[usize]) -> Result<Vec<usize>, BroadcastError> {
    let ndim = left.len().max(right.len());
    let mut shape = Vec::with_capacity(ndim);

    for axis in 0..ndim {
        let l = dim_from_end(left, axis);
        let r = dim_from_end(right, axis);

        let dim = if l == r || r == 1 {
            l
        } else if l == 1 {
            r
        } else {
            debug!("cannot broadcast shapes {left:?} and {right:?} at axis -{}", axis + 1);
            return Err(BroadcastError::IncompatibleShapes {
                axis,
                left: l,
                right: r,
            });
        };

        shape.push(dim);
    }

    shape.reverse();
    Ok(shape)
}

#[inline]
fn dim_from_end(shape: &[usize], axis: usize) -> usize {
    if axis < shape.len() {
        shape[shape.len() - 1 - axis]
    } else {
        1
    }
}

/// Row-major strides of `shape` once it's broadcast to `ndim` dimensions.
///
/// Broadcast axes (of size 1) get a stride of zero.
fn broadcast_strides(shape: &[usize], ndim: usize) -> Vec<usize> {
    let mut strides = vec![0; ndim];
    let mut stride: usize = 1;

    for axis in 0..shape.len() {
        let dim = dim_from_end(shape, axis);
        if dim != 1 {
            strides[ndim - 1 - axis] = stride;
        }
        // Only saturates when the shape holds no elements, and then no stride is used
        stride = stride.saturating_mul(dim);
    }

    strides
}

/// The number of elements in `shape`, or an error if it doesn't fit in a `usize`.
fn shape_len(shape: &[usize]) -> Result<usize, BroadcastError> {
    if shape.contains(&0) {
        return Ok(0);
    }

    shape
        .iter()
        .try_fold(1usize, |len, &dim| len.checked_mul(dim))
        .ok_or_else(|| {
            debug!("shape {shape:?} holds more than usize::MAX elements");
            BroadcastError::ShapeOverflow
        })
}

fn check_data_len(data: &[f64], shape: &[usize]) -> Result<(), BroadcastError> {
    let expected = shape_len(shape)?;
    if data.len() == expected {
        Ok(())
    } else {
        debug!(
            "array of shape {shape:?} given {} elements instead of {expected}",
            data.len()
        );
        Err(BroadcastError::DataLength {
            expected,
            found: data.len(),
        })
    }
}

/// Solves Kepler's equation element-wise over two N-dimensional arrays,
/// broadcasting them together.
///
/// Both arrays are given as flat row-major data along with their shape.
/// An empty shape describes a scalar.
///
/// Returns the broadcast shape along with the row-major eccentric anomalies.
///
/// # Unchecked Operation
/// Like [`solve`], this does not check the eccentricities.
///
/// # Example
/// ```
/// use kepler_solver::{batch::solve_broadcast, solve};
///
/// // A column of mean anomalies against a row of eccentricities
/// let mean_anomalies = [0.5, 1.5, 2.5];
/// let eccentricities = [0.0, 0.3];
///
/// let (shape, grid) =
///     solve_broadcast(&mean_anomalies, &[3, 1], &eccentricities, &[2]).unwrap();
///
/// assert_eq!(shape, vec![3, 2]);
/// assert_eq!(grid[2 * 2 + 1], solve(2.5, 0.3));
/// ```
pub fn solve_broadcast(
    mean_anomalies: &[f64],
    mean_anomaly_shape: &[usize],
    eccentricities: &[f64],
    eccentricity_shape: &[usize],
) -> Result<(Vec<usize>, Vec<f64>), BroadcastError> {
    check_data_len(mean_anomalies, mean_anomaly_shape)?;
    check_data_len(eccentricities, eccentricity_shape)?;

    let shape = broadcast_shapes(mean_anomaly_shape, eccentricity_shape)?;
    let ndim = shape.len();
    let len = shape_len(&shape)?;

    let mean_anom_strides = broadcast_strides(mean_anomaly_shape, ndim);
    let ecc_strides = broadcast_strides(eccentricity_shape, ndim);

    let mut out = Vec::with_capacity(len);

    for flat in 0..len {
        let mut rem = flat;
        let mut mean_anom_index = 0;
        let mut ecc_index = 0;

        for axis in (0..ndim).rev() {
            let index = rem % shape[axis];
            rem /= shape[axis];
            mean_anom_index += index * mean_anom_strides[axis];
            ecc_index += index * ecc_strides[axis];
        }

        out.push(solve(
            mean_anomalies[mean_anom_index],
            eccentricities[ecc_index],
        ));
    }

    Ok((shape, out))
}
