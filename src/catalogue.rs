//! Catalogue of Plackett–Burman seed matrices.
//!
//! Every generated design starts from one of four fixed seeds, looked up by
//! run count:
//!
//! | Runs | Construction |
//! |------|--------------|
//! | 4    | 2×2 kernel `[[1, 1], [1, -1]]`, doubled once |
//! | 8    | 7×7 cyclic core, bordered with ones |
//! | 12   | 11×11 Toeplitz core, bordered with ones |
//! | 20   | 19×19 Hankel core, bordered with ones |
//!
//! "Bordered with ones" means an all-ones first row stacked on an all-ones
//! first column joined to the core, giving a square seed whose order equals
//! the run count.
//!
//! # Example
//!
//! ```
//! use pbdesign::catalogue::{get_by_runs, list_seed_runs};
//!
//! let seed = get_by_runs(12).unwrap();
//! assert_eq!(seed.dim(), (12, 12));
//! assert_eq!(list_seed_runs(), vec![4, 8, 12, 20]);
//!
//! assert!(get_by_runs(16).is_err());
//! ```

use std::fmt;

use ndarray::{s, Array2};

use crate::construct::{double, hankel, toeplitz};
use crate::error::{Error, Result};

/// Kernel of the 4-run seed.
const KERNEL_2: [[i8; 2]; 2] = [[1, 1], [1, -1]];

/// Cyclic core of the 8-run seed: row i is the generator
/// `- - - + - + +` rotated right by i places.
const CORE_8: [[i8; 7]; 7] = [
    [-1, -1, -1, 1, -1, 1, 1],
    [1, -1, -1, -1, 1, -1, 1],
    [1, 1, -1, -1, -1, 1, -1],
    [-1, 1, 1, -1, -1, -1, 1],
    [1, -1, 1, 1, -1, -1, -1],
    [-1, 1, -1, 1, 1, -1, -1],
    [-1, -1, 1, -1, 1, 1, -1],
];

/// First column of the 12-run Toeplitz core.
const CORE_12_FIRST_COL: [i8; 11] = [-1, -1, 1, -1, -1, -1, 1, 1, 1, -1, 1];

/// First row of the 12-run Toeplitz core.
const CORE_12_FIRST_ROW: [i8; 11] = [-1, 1, -1, 1, 1, 1, -1, -1, -1, 1, -1];

/// First column of the 20-run Hankel core.
const CORE_20_FIRST_COL: [i8; 19] = [
    -1, -1, 1, 1, -1, -1, -1, -1, 1, -1, 1, -1, 1, 1, 1, 1, -1, -1, 1,
];

/// Last row of the 20-run Hankel core.
const CORE_20_LAST_ROW: [i8; 19] = [
    1, -1, -1, 1, 1, -1, -1, -1, -1, 1, -1, 1, -1, 1, 1, 1, 1, -1, -1,
];

/// The supported seed sizes, in ascending order of runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeedSize {
    /// 4 runs.
    Four,
    /// 8 runs.
    Eight,
    /// 12 runs.
    Twelve,
    /// 20 runs.
    Twenty,
}

impl SeedSize {
    /// All seed sizes, smallest first.
    pub const ALL: [SeedSize; 4] = [Self::Four, Self::Eight, Self::Twelve, Self::Twenty];

    /// Number of runs (rows) of this seed.
    #[must_use]
    pub fn runs(self) -> usize {
        match self {
            Self::Four => 4,
            Self::Eight => 8,
            Self::Twelve => 12,
            Self::Twenty => 20,
        }
    }

    /// Assemble the square seed matrix for this size.
    ///
    /// # Errors
    ///
    /// Only fails if a defining sequence pair has mismatched lengths, which
    /// the constant tables rule out.
    pub fn matrix(self) -> Result<Array2<i8>> {
        match self {
            Self::Four => Ok(double(&from_table(&KERNEL_2))),
            Self::Eight => Ok(border(&from_table(&CORE_8))),
            Self::Twelve => Ok(border(&toeplitz(
                &CORE_12_FIRST_COL,
                &CORE_12_FIRST_ROW,
            )?)),
            Self::Twenty => Ok(border(&hankel(&CORE_20_FIRST_COL, &CORE_20_LAST_ROW)?)),
        }
    }
}

impl TryFrom<usize> for SeedSize {
    type Error = Error;

    fn try_from(runs: usize) -> Result<Self> {
        match runs {
            4 => Ok(Self::Four),
            8 => Ok(Self::Eight),
            12 => Ok(Self::Twelve),
            20 => Ok(Self::Twenty),
            _ => Err(Error::UnsupportedSize { runs }),
        }
    }
}

impl fmt::Display for SeedSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PB{}", self.runs())
    }
}

/// Retrieve the seed matrix for an exact run count.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSize`] unless `runs` is 4, 8, 12 or 20.
pub fn get_by_runs(runs: usize) -> Result<Array2<i8>> {
    SeedSize::try_from(runs)?.matrix()
}

/// List the run counts of all catalogued seeds.
#[must_use]
pub fn list_seed_runs() -> Vec<usize> {
    SeedSize::ALL.iter().map(|s| s.runs()).collect()
}

fn from_table<const N: usize>(table: &[[i8; N]; N]) -> Array2<i8> {
    Array2::from_shape_fn((N, N), |(i, j)| table[i][j])
}

/// Put an all-ones row on top and an all-ones column on the left of `core`.
fn border(core: &Array2<i8>) -> Array2<i8> {
    let (rows, cols) = core.dim();
    let mut m = Array2::ones((rows + 1, cols + 1));
    m.slice_mut(s![1.., 1..]).assign(core);
    m
}
