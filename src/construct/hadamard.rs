//! Hadamard block doubling.
//!
//! A ±1 matrix M of shape r×c is replaced by the block matrix
//!
//! ```text
//! [[M,  M],
//!  [M, -M]]
//! ```
//!
//! of shape 2r×2c. Column dot products between the two halves cancel and each
//! new column repeats an old column once as-is and once either as-is or
//! negated, so orthogonality and column balance of M carry over to the
//! result. Starting from the 2×2 kernel this is the Sylvester construction.
//!
//! ## Example
//!
//! ```
//! use ndarray::array;
//! use pbdesign::construct::double;
//!
//! let h2 = array![[1i8, 1], [1, -1]];
//! let h4 = double(&h2);
//!
//! assert_eq!(h4.dim(), (4, 4));
//! assert_eq!(h4.row(3).to_vec(), vec![1, -1, -1, 1]);
//! ```

use ndarray::{s, Array2};

/// Apply one Hadamard doubling step to `m`.
#[must_use]
pub fn double(m: &Array2<i8>) -> Array2<i8> {
    let (rows, cols) = m.dim();
    let mut h = Array2::zeros((2 * rows, 2 * cols));

    // Top-left, top-right and bottom-left: copies of M
    h.slice_mut(s![..rows, ..cols]).assign(m);
    h.slice_mut(s![..rows, cols..]).assign(m);
    h.slice_mut(s![rows.., ..cols]).assign(m);

    // Bottom-right: negation of M
    h.slice_mut(s![rows.., cols..]).assign(&m.mapv(|v| -v));

    h
}

/// Double `m` until it has at least `runs` rows.
///
/// Returns the expanded matrix and the number of doublings applied. A matrix
/// that already has `runs` rows or more is returned unchanged.
#[must_use]
pub fn double_until(m: Array2<i8>, runs: usize) -> (Array2<i8>, u32) {
    let mut h = m;
    let mut doublings = 0;

    // An empty matrix never grows.
    if h.nrows() == 0 {
        return (h, doublings);
    }

    while h.nrows() < runs {
        h = double(&h);
        doublings += 1;
        tracing::trace!(rows = h.nrows(), cols = h.ncols(), "doubled design matrix");
    }

    (h, doublings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn gram(m: &Array2<i8>) -> Array2<i32> {
        let f = m.mapv(i32::from);
        f.t().dot(&f)
    }

    #[test]
    fn test_double_kernel() {
        let h2 = array![[1i8, 1], [1, -1]];
        let h4 = double(&h2);

        let expected = array![
            [1i8, 1, 1, 1],
            [1, -1, 1, -1],
            [1, 1, -1, -1],
            [1, -1, -1, 1],
        ];
        assert_eq!(h4, expected);
    }

    #[test]
    fn test_double_preserves_orthogonality() {
        let mut h = array![[1i8, 1], [1, -1]];
        for _ in 0..4 {
            h = double(&h);
            let n = h.nrows() as i32;
            let g = gram(&h);

            for i in 0..h.ncols() {
                for j in 0..h.ncols() {
                    let expected = if i == j { n } else { 0 };
                    assert_eq!(g[[i, j]], expected, "H{} entry ({}, {})", n, i, j);
                }
            }
        }
    }

    #[test]
    fn test_double_rectangular() {
        let m = array![[1i8, -1, 1], [1, 1, -1]];
        let d = double(&m);

        assert_eq!(d.dim(), (4, 6));
        assert_eq!(d.row(2).to_vec(), vec![1, -1, 1, -1, 1, -1]);
        assert_eq!(d.row(3).to_vec(), vec![1, 1, -1, -1, -1, 1]);
    }

    #[test]
    fn test_double_until() {
        let h2 = array![[1i8, 1], [1, -1]];

        let (h, k) = double_until(h2.clone(), 16);
        assert_eq!(h.dim(), (16, 16));
        assert_eq!(k, 3);

        let (h, k) = double_until(h2.clone(), 2);
        assert_eq!(h, h2);
        assert_eq!(k, 0);
    }

    #[test]
    fn test_double_until_empty() {
        let (h, k) = double_until(Array2::zeros((0, 0)), 8);
        assert_eq!(h.dim(), (0, 0));
        assert_eq!(k, 0);
    }
}
