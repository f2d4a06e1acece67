//! Parallel design verification.
//!
//! This module provides parallel versions of the pairwise column checks
//! using Rayon. Enable with the `parallel` feature flag.
//!
//! # Usage
//!
//! ```ignore
//! use pbdesign::generate_pbdesign;
//! use pbdesign::parallel::par_is_orthogonal;
//!
//! let design = generate_pbdesign(63).unwrap();
//! assert!(par_is_orthogonal(design.data()).unwrap());
//! ```
//!
//! # Performance
//!
//! Both checks do O(k²) column products for k factors. Splitting the pairs
//! across threads pays off for wide designs (hundreds of factors); for small
//! designs the sequential versions are faster.

use ndarray::{Array2, ArrayBase, Data, Dimension};
use rayon::prelude::*;

use crate::design::{co_occurrence_entry, column_dot, is_close_to_zero, to_levels, MatrixElement};
use crate::error::Result;

/// Parallel version of [`is_orthogonal`](crate::is_orthogonal).
///
/// # Errors
///
/// Returns an error if `matrix` fails [`assert_matrix`](crate::assert_matrix).
pub fn par_is_orthogonal<A, S, D>(matrix: &ArrayBase<S, D>) -> Result<bool>
where
    A: MatrixElement,
    S: Data<Elem = A>,
    D: Dimension,
{
    let levels = to_levels(matrix)?;
    let view = levels.view();
    let k = levels.ncols();

    Ok((0..k).into_par_iter().all(|i| {
        ((i + 1)..k).all(|j| is_close_to_zero(column_dot(&view, i, j)))
    }))
}

/// Parallel version of [`calculate_co_occurrence`](crate::calculate_co_occurrence).
///
/// Rows of the upper triangle are computed in parallel, then mirrored.
///
/// # Errors
///
/// Returns an error if `matrix` fails [`assert_matrix`](crate::assert_matrix).
pub fn par_calculate_co_occurrence<A, S, D>(matrix: &ArrayBase<S, D>) -> Result<Array2<usize>>
where
    A: MatrixElement,
    S: Data<Elem = A>,
    D: Dimension,
{
    let levels = to_levels(matrix)?;
    let binary = levels.mapv(|v| usize::from(v == 1));
    let view = binary.view();
    let k = binary.ncols();

    let upper: Vec<Vec<usize>> = (0..k)
        .into_par_iter()
        .map(|i| (i..k).map(|j| co_occurrence_entry(&view, i, j)).collect())
        .collect();

    let mut co = Array2::zeros((k, k));
    for (i, row) in upper.into_iter().enumerate() {
        for (offset, count) in row.into_iter().enumerate() {
            let j = i + offset;
            co[[i, j]] = count;
            co[[j, i]] = count;
        }
    }

    Ok(co)
}
