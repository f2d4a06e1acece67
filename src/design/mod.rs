//! Design matrix core type and structural checks.
//!
//! This module provides the [`DesignMatrix`] type returned by the
//! generators, and the validators that can be applied to any ±1 matrix.
//!
//! ## Overview
//!
//! - [`DesignMatrix`]: an immutable matrix of -1/+1 levels, rows are runs and
//!   columns are factors
//! - [`assert_matrix`]: the structural precondition shared by all validators
//! - [`is_orthogonal`], [`is_balanced`], [`calculate_co_occurrence`]: checks
//!   and derivations over arbitrary `ndarray` arrays
//! - [`BalanceReport`]: per-column level counts

mod stats;
mod verify;

pub use stats::BalanceReport;
pub use verify::{
    assert_matrix, calculate_co_occurrence, is_balanced, is_orthogonal, MatrixElement,
    ORTHOGONALITY_TOLERANCE,
};

use verify::{levels_co_occurrence, levels_orthogonal};
#[cfg(feature = "parallel")]
pub(crate) use verify::{co_occurrence_entry, column_dot, is_close_to_zero, to_levels};

use ndarray::{Array2, ArrayView1};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, MatrixDefect, Result};

/// A two-level design matrix.
///
/// Every entry is -1 or +1. The matrix cannot be modified after
/// construction; use [`DesignMatrix::into_data`] to take ownership of the
/// underlying array.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Array2<i8>", into = "Array2<i8>")
)]
pub struct DesignMatrix {
    /// The level data, shape (runs, factors).
    data: Array2<i8>,
}

impl DesignMatrix {
    /// Create a design matrix, validating that every entry is -1 or +1.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] naming the first out-of-range entry.
    ///
    /// # Example
    ///
    /// ```
    /// use ndarray::array;
    /// use pbdesign::DesignMatrix;
    ///
    /// let d = DesignMatrix::try_new(array![[1, 1], [1, -1]]).unwrap();
    /// assert_eq!(d.runs(), 2);
    ///
    /// assert!(DesignMatrix::try_new(array![[1, 0], [1, -1]]).is_err());
    /// ```
    pub fn try_new(data: Array2<i8>) -> Result<Self> {
        assert_matrix(&data)?;
        Ok(Self { data })
    }

    /// Wrap data the caller has already established to be ±1.
    pub(crate) fn from_levels(data: Array2<i8>) -> Self {
        debug_assert!(data.iter().all(|&v| v == 1 || v == -1));
        Self { data }
    }

    /// Create a design matrix from a flat row-major vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `values` does not hold exactly
    /// `runs * factors` entries, or [`Error::InvalidInput`] if any entry is
    /// not -1 or +1.
    pub fn from_shape_vec(shape: (usize, usize), values: Vec<i8>) -> Result<Self> {
        let (runs, factors) = shape;
        let len = values.len();
        let data = Array2::from_shape_vec(shape, values).map_err(|_| {
            let expected = match runs.checked_mul(factors) {
                Some(total) => format!("{total} values for a {runs}x{factors} matrix"),
                None => format!("{runs} x {factors} values, which overflows usize"),
            };
            Error::DimensionMismatch {
                expected,
                actual: format!("{len} values"),
            }
        })?;
        Self::try_new(data)
    }

    /// Create a design matrix from nested rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] with [`MatrixDefect::NotAnArray`] if
    /// the rows have different lengths, or with
    /// [`MatrixDefect::ValueOutOfRange`] if any entry is not -1 or +1.
    ///
    /// # Example
    ///
    /// ```
    /// use pbdesign::{DesignMatrix, MatrixDefect};
    ///
    /// let d = DesignMatrix::from_rows(&[vec![1, 1], vec![1, -1]]).unwrap();
    /// assert_eq!(d.factors(), 2);
    ///
    /// let err = DesignMatrix::from_rows(&[vec![1, 1], vec![1]]).unwrap_err();
    /// assert!(matches!(err.defect(), Some(MatrixDefect::NotAnArray { .. })));
    /// ```
    pub fn from_rows(rows: &[Vec<i8>]) -> Result<Self> {
        let factors = rows.first().map_or(0, Vec::len);

        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != factors) {
            return Err(MatrixDefect::NotAnArray {
                detail: format!(
                    "ragged rows (row 0 has {} entries, row {} has {})",
                    factors,
                    idx,
                    row.len()
                ),
            }
            .into());
        }

        let values: Vec<i8> = rows.iter().flatten().copied().collect();
        Self::from_shape_vec((rows.len(), factors), values)
    }

    /// Get the number of runs (rows).
    #[must_use]
    pub fn runs(&self) -> usize {
        self.data.nrows()
    }

    /// Get the number of factors (columns).
    #[must_use]
    pub fn factors(&self) -> usize {
        self.data.ncols()
    }

    /// Get the (runs, factors) shape.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Get a reference to the underlying data.
    #[must_use]
    pub fn data(&self) -> &Array2<i8> {
        &self.data
    }

    /// Consume the design and return the underlying data.
    #[must_use]
    pub fn into_data(self) -> Array2<i8> {
        self.data
    }

    /// Get the level at a specific position.
    ///
    /// # Panics
    ///
    /// Panics if the indices are out of bounds.
    #[must_use]
    pub fn get(&self, run: usize, factor: usize) -> i8 {
        self.data[[run, factor]]
    }

    /// Get a run (row) of the design.
    #[must_use]
    pub fn row(&self, idx: usize) -> ArrayView1<'_, i8> {
        self.data.row(idx)
    }

    /// Get a factor (column) of the design.
    #[must_use]
    pub fn column(&self, idx: usize) -> ArrayView1<'_, i8> {
        self.data.column(idx)
    }

    /// Iterate over runs.
    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, i8>> {
        self.data.rows().into_iter()
    }

    /// Check whether every pair of distinct columns has zero dot product.
    #[must_use]
    pub fn is_orthogonal(&self) -> bool {
        levels_orthogonal(&self.data.view())
    }

    /// Check whether every column has as many +1 as -1 entries.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.balance_report().is_balanced()
    }

    /// Compute the pairwise co-occurrence of +1 levels between factors.
    #[must_use]
    pub fn co_occurrence(&self) -> Array2<usize> {
        levels_co_occurrence(&self.data.view())
    }

    /// Map levels to 0-based symbols: +1 becomes 0 and -1 becomes 1.
    ///
    /// # Example
    ///
    /// ```
    /// use pbdesign::generate_pbdesign;
    ///
    /// let d = generate_pbdesign(3).unwrap();
    /// let symbols = d.to_level_indices();
    /// assert!(symbols.row(0).iter().all(|&s| s == 0));
    /// ```
    #[must_use]
    pub fn to_level_indices(&self) -> Array2<u32> {
        self.data.mapv(|v| if v == 1 { 0 } else { 1 })
    }
}

impl TryFrom<Array2<i8>> for DesignMatrix {
    type Error = Error;

    fn try_from(data: Array2<i8>) -> Result<Self> {
        Self::try_new(data)
    }
}

impl From<DesignMatrix> for Array2<i8> {
    fn from(design: DesignMatrix) -> Self {
        design.data
    }
}

impl fmt::Debug for DesignMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DesignMatrix({}x{}) with data {:?}",
            self.runs(),
            self.factors(),
            self.data
        )
    }
}

impl fmt::Display for DesignMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} runs x {} factors", self.runs(), self.factors())?;
        for row in self.data.rows() {
            let row_str: Vec<String> = row.iter().map(|v| format!("{v:>2}")).collect();
            writeln!(f, "  {}", row_str.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_design_creation() {
        let d = DesignMatrix::try_new(array![[1, 1, 1], [1, -1, -1], [-1, 1, -1], [-1, -1, 1]])
            .unwrap();
        assert_eq!(d.runs(), 4);
        assert_eq!(d.factors(), 3);
        assert_eq!(d.shape(), (4, 3));
        assert_eq!(d.get(1, 2), -1);
        assert_eq!(d.row(2).to_vec(), vec![-1, 1, -1]);
        assert_eq!(d.column(0).to_vec(), vec![1, 1, -1, -1]);
        assert_eq!(d.rows().count(), 4);
    }

    #[test]
    fn test_design_rejects_bad_values() {
        let err = DesignMatrix::try_new(array![[1, 2], [1, -1]]).unwrap_err();
        assert_eq!(
            err.defect(),
            Some(&MatrixDefect::ValueOutOfRange {
                row: 0,
                col: 1,
                value: "2".to_string(),
            })
        );
    }

    #[test]
    fn test_from_shape_vec_mismatch() {
        let err = DesignMatrix::from_shape_vec((2, 2), vec![1, 1, 1]).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { .. }));
    }

    #[test]
    fn test_from_shape_vec_oversized_shape() {
        let err = DesignMatrix::from_shape_vec((usize::MAX, 2), vec![1]).unwrap_err();
        match err {
            Error::DimensionMismatch { expected, actual } => {
                assert!(expected.contains("overflows"));
                assert_eq!(actual, "1 values");
            }
            other => panic!("expected DimensionMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_methods_agree_with_free_functions() {
        let fixtures = [
            array![[1i8, 1, 1], [1, -1, -1], [-1, 1, -1], [-1, -1, 1]],
            array![[1i8, 1, -1], [-1, 1, -1], [-1, -1, 1]],
            array![[1i8, 1, -1], [1, -1, 1], [1, -1, -1], [1, 1, 1]],
        ];
        for data in fixtures {
            let d = DesignMatrix::try_new(data.clone()).unwrap();
            assert_eq!(d.is_orthogonal(), is_orthogonal(&data).unwrap());
            assert_eq!(d.is_balanced(), is_balanced(&data).unwrap());
            assert_eq!(d.co_occurrence(), calculate_co_occurrence(&data).unwrap());
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_revalidates_levels() {
        let d = DesignMatrix::try_new(array![[1, 1], [1, -1]]).unwrap();
        let json = serde_json::to_string(&d).unwrap();
        let back: DesignMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);

        let bad = json.replacen("-1", "0", 1);
        assert_ne!(bad, json);
        let err = serde_json::from_str::<DesignMatrix>(&bad).unwrap_err();
        assert!(err.to_string().contains("only -1 and 1"));
    }

    #[test]
    fn test_from_rows() {
        let d = DesignMatrix::from_rows(&[vec![1, -1], vec![-1, 1]]).unwrap();
        assert_eq!(d.data(), &array![[1, -1], [-1, 1]]);

        let empty = DesignMatrix::from_rows(&[]).unwrap();
        assert_eq!(empty.shape(), (0, 0));
    }

    #[test]
    fn test_orthogonal_and_balanced_methods() {
        let d = DesignMatrix::try_new(array![[1, 1, 1], [1, -1, -1], [-1, 1, -1], [-1, -1, 1]])
            .unwrap();
        assert!(d.is_orthogonal());
        assert!(d.is_balanced());

        let d = DesignMatrix::try_new(array![[1, 1, -1], [-1, 1, -1], [-1, -1, 1]]).unwrap();
        assert!(!d.is_orthogonal());
        assert!(!d.is_balanced());
    }

    #[test]
    fn test_co_occurrence_method() {
        let d = DesignMatrix::try_new(array![[1, 1, -1], [1, -1, 1], [1, -1, -1], [1, 1, 1]])
            .unwrap();
        assert_eq!(d.co_occurrence(), array![[4, 2, 2], [2, 2, 1], [2, 1, 2]]);
    }

    #[test]
    fn test_level_indices() {
        let d = DesignMatrix::try_new(array![[1, -1], [-1, 1]]).unwrap();
        assert_eq!(d.to_level_indices(), array![[0u32, 1], [1, 0]]);
    }

    #[test]
    fn test_display() {
        let d = DesignMatrix::try_new(array![[1, -1], [-1, 1]]).unwrap();
        let s = d.to_string();
        assert!(s.starts_with("2 runs x 2 factors"));
        assert!(s.contains(" 1 -1"));
    }

    #[test]
    fn test_into_data_round_trip() {
        let data = array![[1i8, 1], [1, -1]];
        let d = DesignMatrix::try_from(data.clone()).unwrap();
        let back: Array2<i8> = d.into();
        assert_eq!(back, data);
    }
}
