//! Structural validators for two-level design matrices.
//!
//! Every public function here first runs [`assert_matrix`], which rejects
//! anything that is not a two-dimensional integer array of -1/+1 entries.
//! The checks then work on arbitrary `ndarray` arrays, so matrices that were
//! not produced by this crate can be verified as well.

use ndarray::{Array2, ArrayBase, ArrayView2, Data, Dimension, Ix2};

use crate::error::{MatrixDefect, Result};

/// Absolute tolerance used when comparing column dot products with zero.
pub const ORTHOGONALITY_TOLERANCE: f64 = 1e-8;

/// Element types accepted by the validators.
///
/// Integer types pass the element-type check; floating-point types and
/// `bool` are rejected with [`MatrixDefect::NonIntegerElements`] even when every value
/// happens to be ±1.
pub trait MatrixElement: Copy + std::fmt::Display {
    /// Name of the type, reported in errors.
    const TYPE_NAME: &'static str;

    /// Whether this is an integer type.
    const IS_INTEGER: bool;

    /// Return the level if the value is exactly -1 or +1.
    fn to_level(self) -> Option<i8>;
}

macro_rules! impl_integer_element {
    ($($t:ty),*) => {
        $(
            impl MatrixElement for $t {
                const TYPE_NAME: &'static str = stringify!($t);
                const IS_INTEGER: bool = true;

                #[allow(clippy::cast_lossless, clippy::cast_possible_wrap)]
                fn to_level(self) -> Option<i8> {
                    match self as i128 {
                        1 => Some(1),
                        -1 => Some(-1),
                        _ => None,
                    }
                }
            }
        )*
    };
}

macro_rules! impl_float_element {
    ($($t:ty),*) => {
        $(
            impl MatrixElement for $t {
                const TYPE_NAME: &'static str = stringify!($t);
                const IS_INTEGER: bool = false;

                #[allow(clippy::float_cmp)]
                fn to_level(self) -> Option<i8> {
                    if self == 1.0 {
                        Some(1)
                    } else if self == -1.0 {
                        Some(-1)
                    } else {
                        None
                    }
                }
            }
        )*
    };
}

impl_integer_element!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);
impl_float_element!(f32, f64);

impl MatrixElement for bool {
    const TYPE_NAME: &'static str = "bool";
    const IS_INTEGER: bool = false;

    fn to_level(self) -> Option<i8> {
        None
    }
}

/// Check that `matrix` is a valid design matrix.
///
/// The checks run in order and stop at the first failure:
/// 1. the array has exactly two axes ([`MatrixDefect::NotTwoDimensional`])
/// 2. the element type is an integer type ([`MatrixDefect::NonIntegerElements`])
/// 3. every entry is -1 or +1 ([`MatrixDefect::ValueOutOfRange`])
///
/// The remaining defect, [`MatrixDefect::NotAnArray`], is reported by the
/// entry points that accept untyped or nested input.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) carrying the
/// defect.
///
/// # Example
///
/// ```
/// use ndarray::{array, arr1};
/// use pbdesign::{assert_matrix, MatrixDefect};
///
/// assert!(assert_matrix(&array![[1, -1], [-1, 1]]).is_ok());
///
/// let err = assert_matrix(&arr1(&[1, -1, 1, -1])).unwrap_err();
/// assert_eq!(err.defect(), Some(&MatrixDefect::NotTwoDimensional { ndim: 1 }));
///
/// let err = assert_matrix(&array![[1.0, -1.0], [-1.0, 1.0]]).unwrap_err();
/// assert!(matches!(err.defect(), Some(MatrixDefect::NonIntegerElements { .. })));
/// ```
pub fn assert_matrix<A, S, D>(matrix: &ArrayBase<S, D>) -> Result<()>
where
    A: MatrixElement,
    S: Data<Elem = A>,
    D: Dimension,
{
    to_levels(matrix).map(|_| ())
}

/// Check whether every pair of distinct columns is orthogonal.
///
/// Column dot products are accumulated in `f64` and compared with zero
/// using [`ORTHOGONALITY_TOLERANCE`]. A matrix with fewer than two columns
/// is trivially orthogonal.
///
/// # Errors
///
/// Returns an error if `matrix` fails [`assert_matrix`].
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use pbdesign::is_orthogonal;
///
/// let m = array![[1, 1, 1], [1, -1, -1], [-1, 1, -1], [-1, -1, 1]];
/// assert!(is_orthogonal(&m).unwrap());
///
/// let m = array![[1, 1, -1], [-1, 1, -1], [-1, -1, 1]];
/// assert!(!is_orthogonal(&m).unwrap());
/// ```
pub fn is_orthogonal<A, S, D>(matrix: &ArrayBase<S, D>) -> Result<bool>
where
    A: MatrixElement,
    S: Data<Elem = A>,
    D: Dimension,
{
    let levels = to_levels(matrix)?;
    Ok(levels_orthogonal(&levels.view()))
}

/// Check whether every column has as many +1 entries as -1 entries.
///
/// A column of odd length can never be balanced.
///
/// # Errors
///
/// Returns an error if `matrix` fails [`assert_matrix`].
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use pbdesign::is_balanced;
///
/// let m = array![[1, -1], [-1, 1], [1, -1], [-1, 1]];
/// assert!(is_balanced(&m).unwrap());
/// ```
pub fn is_balanced<A, S, D>(matrix: &ArrayBase<S, D>) -> Result<bool>
where
    A: MatrixElement,
    S: Data<Elem = A>,
    D: Dimension,
{
    let levels = to_levels(matrix)?;

    for column in levels.columns() {
        let plus = column.iter().filter(|&&v| v == 1).count();
        let minus = column.len() - plus;
        if plus != minus {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Count, for every pair of factors, the runs in which both are at +1.
///
/// The result is a full symmetric `factors × factors` matrix. The diagonal
/// holds the number of +1 entries in each column.
///
/// # Errors
///
/// Returns an error if `matrix` fails [`assert_matrix`].
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use pbdesign::calculate_co_occurrence;
///
/// let m = array![[1, -1, 1], [-1, 1, -1], [1, -1, 1], [-1, 1, -1]];
/// let co = calculate_co_occurrence(&m).unwrap();
/// assert_eq!(co, array![[2, 0, 2], [0, 2, 0], [2, 0, 2]]);
/// ```
pub fn calculate_co_occurrence<A, S, D>(matrix: &ArrayBase<S, D>) -> Result<Array2<usize>>
where
    A: MatrixElement,
    S: Data<Elem = A>,
    D: Dimension,
{
    let levels = to_levels(matrix)?;
    Ok(levels_co_occurrence(&levels.view()))
}

/// Run the structural checks and return the matrix as `i8` levels.
pub(crate) fn to_levels<A, S, D>(matrix: &ArrayBase<S, D>) -> Result<Array2<i8>>
where
    A: MatrixElement,
    S: Data<Elem = A>,
    D: Dimension,
{
    let ndim = matrix.ndim();
    if ndim != 2 {
        return Err(MatrixDefect::NotTwoDimensional { ndim }.into());
    }

    if !A::IS_INTEGER {
        return Err(MatrixDefect::NonIntegerElements {
            element_type: A::TYPE_NAME,
        }
        .into());
    }

    let view = matrix
        .view()
        .into_dimensionality::<Ix2>()
        .map_err(|_| MatrixDefect::NotTwoDimensional { ndim })?;

    let mut levels = Array2::zeros(view.dim());
    for ((row, col), &value) in view.indexed_iter() {
        levels[[row, col]] = value
            .to_level()
            .ok_or_else(|| MatrixDefect::ValueOutOfRange {
                row,
                col,
                value: value.to_string(),
            })?;
    }

    Ok(levels)
}

/// Pairwise orthogonality of columns already known to hold -1/+1 levels.
pub(crate) fn levels_orthogonal(levels: &ArrayView2<'_, i8>) -> bool {
    let k = levels.ncols();
    (0..k).all(|i| ((i + 1)..k).all(|j| is_close_to_zero(column_dot(levels, i, j))))
}

/// Co-occurrence of +1 levels for columns already known to hold -1/+1 levels.
pub(crate) fn levels_co_occurrence(levels: &ArrayView2<'_, i8>) -> Array2<usize> {
    // -1 -> 0 so only positive levels contribute
    let binary = levels.mapv(|v| usize::from(v == 1));
    let view = binary.view();
    let k = binary.ncols();
    let mut co = Array2::zeros((k, k));

    for i in 0..k {
        for j in i..k {
            let count = co_occurrence_entry(&view, i, j);
            co[[i, j]] = count;
            co[[j, i]] = count;
        }
    }

    co
}

/// Dot product of columns `i` and `j`, accumulated in `f64`.
pub(crate) fn column_dot(levels: &ArrayView2<'_, i8>, i: usize, j: usize) -> f64 {
    levels
        .column(i)
        .iter()
        .zip(levels.column(j).iter())
        .map(|(&a, &b)| f64::from(a) * f64::from(b))
        .sum()
}

pub(crate) fn is_close_to_zero(value: f64) -> bool {
    value.abs() <= ORTHOGONALITY_TOLERANCE
}

/// Number of rows where binary columns `i` and `j` are both 1.
pub(crate) fn co_occurrence_entry(binary: &ArrayView2<'_, usize>, i: usize, j: usize) -> usize {
    binary.column(i).dot(&binary.column(j))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use ndarray::{arr1, array, Array3};

    #[test]
    fn test_is_orthogonal_true() {
        let m = array![[1, 1, 1], [1, -1, -1], [-1, 1, -1], [-1, -1, 1]];
        assert!(is_orthogonal(&m).unwrap());
    }

    #[test]
    fn test_is_orthogonal_false() {
        let m = array![[1, 1, -1], [-1, 1, -1], [-1, -1, 1]];
        assert!(!is_orthogonal(&m).unwrap());
    }

    #[test]
    fn test_is_orthogonal_single_column() {
        let m = array![[1i64], [1], [1]];
        assert!(is_orthogonal(&m).unwrap());
    }

    #[test]
    fn test_is_orthogonal_on_view() {
        let m = array![[1, 1, 1, 1], [1, -1, 1, -1], [1, 1, -1, -1], [1, -1, -1, 1]];
        assert!(is_orthogonal(&m.view()).unwrap());
        assert!(is_orthogonal(&m.t()).unwrap());
    }

    #[test]
    fn test_is_balanced_true() {
        let m = array![[1, -1, 1, -1], [-1, 1, -1, 1], [1, -1, 1, -1], [-1, 1, -1, 1]];
        assert!(is_balanced(&m).unwrap());
    }

    #[test]
    fn test_is_balanced_false() {
        let m = array![[1, 1, 1, -1], [1, -1, -1, 1], [1, -1, 1, 1], [-1, 1, -1, 1]];
        assert!(!is_balanced(&m).unwrap());
    }

    #[test]
    fn test_is_balanced_odd_rows() {
        let m = array![[1], [-1], [1]];
        assert!(!is_balanced(&m).unwrap());
    }

    #[test]
    fn test_calculate_co_occurrence() {
        let m = array![[1, -1, 1], [-1, 1, -1], [1, -1, 1], [-1, 1, -1]];
        let expected = array![[2, 0, 2], [0, 2, 0], [2, 0, 2]];
        assert_eq!(calculate_co_occurrence(&m).unwrap(), expected);
    }

    #[test]
    fn test_calculate_co_occurrence_non_symmetric_input() {
        let m = array![[1, 1, -1], [1, -1, 1], [1, -1, -1], [1, 1, 1]];
        let expected = array![[4, 2, 2], [2, 2, 1], [2, 1, 2]];
        let co = calculate_co_occurrence(&m).unwrap();
        assert_eq!(co, expected);
        assert_eq!(co, co.t());
    }

    #[test]
    fn test_assert_matrix_valid() {
        let m = array![[1, -1, 1], [-1, 1, -1], [1, -1, 1], [-1, 1, -1]];
        assert!(assert_matrix(&m).is_ok());

        let m = array![[1u8, 1], [1, 1]];
        assert!(assert_matrix(&m).is_ok());
    }

    #[test]
    fn test_assert_matrix_invalid_dimensions() {
        let err = assert_matrix(&arr1(&[1, -1, 1, -1])).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidInput(MatrixDefect::NotTwoDimensional { ndim: 1 })
        );

        let cube = Array3::<i32>::ones((2, 2, 2));
        let err = assert_matrix(&cube).unwrap_err();
        assert_eq!(
            err.defect(),
            Some(&MatrixDefect::NotTwoDimensional { ndim: 3 })
        );
    }

    #[test]
    fn test_assert_matrix_invalid_dtype() {
        let m = array![[1.0, -1.0, 1.0], [-1.0, 1.0, -1.0], [1.0, -1.0, 1.0], [-1.0, 1.0, -1.0]];
        let err = assert_matrix(&m).unwrap_err();
        assert_eq!(
            err.defect(),
            Some(&MatrixDefect::NonIntegerElements {
                element_type: "f64"
            })
        );

        let m = array![[1.0f32]];
        assert!(matches!(
            assert_matrix(&m).unwrap_err().defect(),
            Some(MatrixDefect::NonIntegerElements { element_type: "f32" })
        ));
    }

    #[test]
    fn test_assert_matrix_rejects_bool_matrix() {
        let err = assert_matrix(&array![[true, true], [true, true]]).unwrap_err();
        assert_eq!(
            err.defect(),
            Some(&MatrixDefect::NonIntegerElements {
                element_type: "bool"
            })
        );
        assert!(is_orthogonal(&array![[true, false], [false, true]]).is_err());
    }

    #[test]
    fn test_assert_matrix_invalid_values() {
        let m = array![[1, -1, 1], [-1, 0, -1], [1, -1, 1], [-1, 1, -1]];
        let err = assert_matrix(&m).unwrap_err();
        assert_eq!(
            err.defect(),
            Some(&MatrixDefect::ValueOutOfRange {
                row: 1,
                col: 1,
                value: "0".to_string(),
            })
        );

        let m = array![[1, -1, 2], [-1, 1, -1]];
        assert!(matches!(
            assert_matrix(&m).unwrap_err().defect(),
            Some(MatrixDefect::ValueOutOfRange { row: 0, col: 2, .. })
        ));
    }

    #[test]
    fn test_validators_reject_invalid_input() {
        let m = array![[1, 2], [1, -1]];
        assert!(is_orthogonal(&m).is_err());
        assert!(is_balanced(&m).is_err());
        assert!(calculate_co_occurrence(&m).is_err());
    }

    #[test]
    fn test_empty_matrix() {
        let m = Array2::<i32>::zeros((0, 3));
        assert!(is_orthogonal(&m).unwrap());
        assert!(is_balanced(&m).unwrap());
        assert_eq!(calculate_co_occurrence(&m).unwrap(), Array2::<usize>::zeros((3, 3)));
    }

    #[test]
    fn test_integer_element_levels() {
        assert_eq!(1u64.to_level(), Some(1));
        assert_eq!(u64::MAX.to_level(), None);
        assert_eq!((-1i128).to_level(), Some(-1));
        assert_eq!(0i8.to_level(), None);
    }
}
