//! Plackett–Burman construction for two-level screening designs.
//!
//! A design for F factors has N = 4·⌈F/4⌉ runs. The generator picks a seed
//! from the [catalogue](crate::catalogue) whose order reaches N by repeated
//! Hadamard doubling, expands it to N×N and keeps the first F columns.
//!
//! ## Example
//!
//! ```
//! use pbdesign::construct::{DesignGenerator, PlackettBurman};
//!
//! // 11 factors screened in 12 runs
//! let pb = PlackettBurman::new();
//! let design = pb.generate(11).unwrap();
//!
//! assert_eq!(design.shape(), (12, 11));
//! assert!(design.is_orthogonal());
//! ```

use ndarray::s;

use super::{double_until, DesignGenerator, FactorCount};
use crate::catalogue::SeedSize;
use crate::design::DesignMatrix;
use crate::error::{Error, Result};

/// Plackett–Burman design generator.
///
/// Produces designs with N runs for F factors, where N is the smallest
/// multiple of 4 that is at least F (and at least the configured minimum
/// run count). Supported run counts are 4, 8, 12 and 20 times a power of
/// two.
///
/// # Properties
///
/// - Entries: -1 and +1
/// - First row and first column: all +1
/// - Columns: pairwise orthogonal
/// - Every column but the first: balanced
///
/// # Example
///
/// ```
/// use pbdesign::construct::{DesignGenerator, PlackettBurman};
///
/// let pb = PlackettBurman::new();
/// assert_eq!(pb.runs_for(13).unwrap(), 16);
/// assert!(pb.runs_for(25).is_err()); // 28 runs: no seed doubles to 28
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlackettBurman {
    /// Lower bound on the number of runs.
    min_runs: usize,
}

impl PlackettBurman {
    /// Create a generator with no minimum run count.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator that never produces fewer than `min_runs` runs.
    ///
    /// The run count is still rounded up to a multiple of 4.
    #[must_use]
    pub fn with_min_runs(min_runs: usize) -> Self {
        Self { min_runs }
    }

    /// Get the configured minimum run count.
    #[must_use]
    pub fn min_runs(&self) -> usize {
        self.min_runs
    }

    /// Find the seed that reaches `runs` by doubling, and how many doublings
    /// that takes.
    ///
    /// When more than one seed qualifies, the one needing the fewest
    /// doublings is chosen, so exact catalogue sizes use their own seed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedSize`] if `runs` is not 4, 8, 12 or 20
    /// times a power of two.
    ///
    /// # Example
    ///
    /// ```
    /// use pbdesign::catalogue::SeedSize;
    /// use pbdesign::construct::PlackettBurman;
    ///
    /// assert_eq!(PlackettBurman::resolve_seed(12).unwrap(), (SeedSize::Twelve, 0));
    /// assert_eq!(PlackettBurman::resolve_seed(48).unwrap(), (SeedSize::Twelve, 2));
    /// assert!(PlackettBurman::resolve_seed(28).is_err());
    /// ```
    pub fn resolve_seed(runs: usize) -> Result<(SeedSize, u32)> {
        SeedSize::ALL
            .iter()
            .rev()
            .find_map(|&seed| {
                let n = seed.runs();
                (runs % n == 0 && (runs / n).is_power_of_two())
                    .then(|| (seed, (runs / n).trailing_zeros()))
            })
            .ok_or(Error::UnsupportedSize { runs })
    }

    /// Check whether a design for `factors` factors can be generated.
    #[must_use]
    pub fn is_supported(&self, factors: usize) -> bool {
        self.runs_for(factors).is_ok()
    }

    /// Number of runs for a validated factor count, before seed resolution.
    fn required_runs(&self, factors: FactorCount) -> Result<usize> {
        let runs = factors.runs()?;
        if self.min_runs <= runs {
            return Ok(runs);
        }

        self.min_runs
            .checked_add(3)
            .map(|n| n / 4 * 4)
            .ok_or_else(|| Error::invalid_argument(format!("min runs {} is too large", self.min_runs)))
    }

    /// Generate a design for a validated factor count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedSize`] if no seed reaches the run count.
    pub fn generate_for(&self, factors: FactorCount) -> Result<DesignMatrix> {
        let k = factors.get();
        let runs = self.required_runs(factors)?;
        let (seed, doublings) = Self::resolve_seed(runs)?;

        tracing::debug!(
            factors = k,
            runs,
            seed = %seed,
            doublings,
            "generating Plackett-Burman design"
        );

        let (full, applied) = double_until(seed.matrix()?, runs);
        debug_assert_eq!(applied, doublings);
        debug_assert_eq!(full.dim(), (runs, runs));

        let data = full.slice(s![..runs, ..k]).to_owned();
        Ok(DesignMatrix::from_levels(data))
    }
}

impl DesignGenerator for PlackettBurman {
    fn name(&self) -> &'static str {
        "PlackettBurman"
    }

    fn runs_for(&self, factors: usize) -> Result<usize> {
        let runs = self.required_runs(FactorCount::try_from(factors)?)?;
        Self::resolve_seed(runs)?;
        Ok(runs)
    }

    fn generate(&self, factors: usize) -> Result<DesignMatrix> {
        self.generate_for(FactorCount::try_from(factors)?)
    }
}

/// Generate a Plackett–Burman design for `num_factors` factors.
///
/// The result has `4 * ceil(num_factors / 4)` runs and `num_factors`
/// columns, with every entry -1 or +1. Identical inputs always give
/// identical designs.
///
/// # Errors
///
/// - [`Error::InvalidArgument`] if `num_factors` is zero
/// - [`Error::UnsupportedSize`] if the run count is not reachable from a
///   catalogue seed by doubling (for example 28 runs)
///
/// # Example
///
/// ```
/// use pbdesign::{generate_pbdesign, is_orthogonal};
///
/// let design = generate_pbdesign(7).unwrap();
/// assert_eq!(design.shape(), (8, 7));
/// assert!(is_orthogonal(design.data()).unwrap());
/// ```
pub fn generate_pbdesign(num_factors: usize) -> Result<DesignMatrix> {
    PlackettBurman::new().generate(num_factors)
}
