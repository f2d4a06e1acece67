//! Cyclic (Toeplitz and Hankel) matrix constructions.
//!
//! The cores of the 12- and 20-run seeds are generated by sliding a pair of
//! defining sequences across an n×n grid. Both helpers work directly on
//! index arithmetic.
//!
//! ## Example
//!
//! ```
//! use pbdesign::construct::{hankel, toeplitz};
//!
//! let t = toeplitz(&[1, 2, 3], &[1, 4, 5]).unwrap();
//! assert_eq!(t.row(0).to_vec(), vec![1, 4, 5]);
//! assert_eq!(t.column(0).to_vec(), vec![1, 2, 3]);
//!
//! let h = hankel(&[1, 2, 3], &[3, 4, 5]).unwrap();
//! assert_eq!(h.column(0).to_vec(), vec![1, 2, 3]);
//! assert_eq!(h.row(2).to_vec(), vec![3, 4, 5]);
//! ```

use ndarray::Array2;

use crate::error::{Error, Result};

/// Build the n×n Toeplitz matrix with the given first column and first row.
///
/// Entry (i, j) is `first_col[i - j]` on and below the diagonal and
/// `first_row[j - i]` above it. `first_row[0]` is ignored; the diagonal
/// comes from `first_col[0]`.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if the two sequences differ in length.
pub fn toeplitz(first_col: &[i8], first_row: &[i8]) -> Result<Array2<i8>> {
    check_lengths(first_col, first_row)?;

    let n = first_col.len();
    Ok(Array2::from_shape_fn((n, n), |(i, j)| {
        if i >= j {
            first_col[i - j]
        } else {
            first_row[j - i]
        }
    }))
}

/// Build the n×n Hankel matrix with the given first column and last row.
///
/// Entry (i, j) depends only on `i + j`: it is `first_col[i + j]` while
/// `i + j < n`, and `last_row[i + j - n + 1]` after that. `last_row[0]` is
/// ignored; the anti-diagonal comes from `first_col[n - 1]`.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if the two sequences differ in length.
pub fn hankel(first_col: &[i8], last_row: &[i8]) -> Result<Array2<i8>> {
    check_lengths(first_col, last_row)?;

    let n = first_col.len();
    Ok(Array2::from_shape_fn((n, n), |(i, j)| {
        let k = i + j;
        if k < n {
            first_col[k]
        } else {
            last_row[k + 1 - n]
        }
    }))
}

fn check_lengths(a: &[i8], b: &[i8]) -> Result<()> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: format!("defining sequences of equal length {}", a.len()),
            actual: format!("length {}", b.len()),
        });
    }
    Ok(())
}
