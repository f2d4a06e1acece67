//! Builder pattern for generating Plackett–Burman designs.
//!
//! The builder collects the factor count and an optional minimum run count,
//! then hands them to [`PlackettBurman`].
//!
//! # Example
//!
//! ```
//! use pbdesign::PBBuilder;
//!
//! let design = PBBuilder::new()
//!     .factors(5)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(design.runs(), 8);
//! assert_eq!(design.factors(), 5);
//! ```
//!
//! # Run Count Selection
//!
//! The run count is the smallest multiple of 4 that is at least both the
//! factor count and the requested minimum. It must be 4, 8, 12 or 20 times a
//! power of two; other run counts (28, 36, 44, ...) are rejected.

use crate::catalogue::SeedSize;
use crate::construct::{DesignGenerator, PlackettBurman};
use crate::design::DesignMatrix;
use crate::error::{Error, Result};

/// Builder for Plackett–Burman designs.
///
/// # Example
///
/// ```
/// use pbdesign::PBBuilder;
///
/// // Ask for extra runs
/// let design = PBBuilder::new()
///     .factors(3)
///     .min_runs(16)
///     .build()
///     .unwrap();
///
/// assert_eq!(design.runs(), 16);
/// assert!(design.is_orthogonal());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PBBuilder {
    factors: Option<usize>,
    min_runs: Option<usize>,
}

impl PBBuilder {
    /// Create a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of factors.
    #[must_use]
    pub fn factors(mut self, factors: usize) -> Self {
        self.factors = Some(factors);
        self
    }

    /// Set a minimum number of runs.
    ///
    /// Useful when the screening experiment needs more replication than the
    /// factor count alone calls for.
    #[must_use]
    pub fn min_runs(mut self, min_runs: usize) -> Self {
        self.min_runs = Some(min_runs);
        self
    }

    /// Get the run count the design would have, without generating it.
    ///
    /// # Errors
    ///
    /// Same as [`PBBuilder::build`].
    pub fn runs(&self) -> Result<usize> {
        self.generator().runs_for(self.required_factors()?)
    }

    /// Generate the design.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - factors was never set, or is zero
    /// - the resulting run count is not reachable from a catalogue seed
    pub fn build(self) -> Result<DesignMatrix> {
        let factors = self.required_factors()?;
        self.generator().generate(factors)
    }

    fn required_factors(&self) -> Result<usize> {
        self.factors
            .ok_or_else(|| Error::invalid_argument("factors must be specified"))
    }

    fn generator(&self) -> PlackettBurman {
        PlackettBurman::with_min_runs(self.min_runs.unwrap_or(0))
    }
}

/// List the supported run counts up to `max_runs`.
///
/// Each entry is `(runs, seed, doublings)`, sorted by run count.
///
/// # Example
///
/// ```
/// use pbdesign::available_run_counts;
///
/// let runs: Vec<usize> = available_run_counts(40).into_iter().map(|(n, _, _)| n).collect();
/// assert_eq!(runs, vec![4, 8, 12, 16, 20, 24, 32, 40]);
/// ```
#[must_use]
pub fn available_run_counts(max_runs: usize) -> Vec<(usize, SeedSize, u32)> {
    (1..=max_runs / 4)
        .map(|m| m * 4)
        .filter_map(|runs| {
            PlackettBurman::resolve_seed(runs)
                .ok()
                .map(|(seed, doublings)| (runs, seed, doublings))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let design = PBBuilder::new().factors(11).build().unwrap();
        assert_eq!(design.shape(), (12, 11));
        assert!(design.is_orthogonal());
    }

    #[test]
    fn test_builder_min_runs() {
        let design = PBBuilder::new().factors(7).min_runs(20).build().unwrap();
        assert_eq!(design.shape(), (20, 7));

        // Minimum below the natural run count has no effect
        let design = PBBuilder::new().factors(7).min_runs(2).build().unwrap();
        assert_eq!(design.shape(), (8, 7));

        // Rounded up to a multiple of 4
        assert_eq!(PBBuilder::new().factors(2).min_runs(13).runs().unwrap(), 16);
    }

    #[test]
    fn test_builder_missing_factors() {
        assert!(matches!(
            PBBuilder::new().build(),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(PBBuilder::new().runs().is_err());
    }

    #[test]
    fn test_builder_zero_factors() {
        assert!(matches!(
            PBBuilder::new().factors(0).build(),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_builder_unsupported() {
        assert_eq!(
            PBBuilder::new().factors(3).min_runs(28).build(),
            Err(Error::UnsupportedSize { runs: 28 })
        );
    }

    #[test]
    fn test_builder_matches_generate() {
        for factors in [3, 9, 17, 23] {
            let a = PBBuilder::new().factors(factors).build().unwrap();
            let b = crate::generate_pbdesign(factors).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_available_run_counts() {
        let options = available_run_counts(80);
        let runs: Vec<usize> = options.iter().map(|&(n, _, _)| n).collect();
        assert_eq!(runs, vec![4, 8, 12, 16, 20, 24, 32, 40, 48, 64, 80]);

        assert!(options.contains(&(16, SeedSize::Eight, 1)));
        assert!(options.contains(&(80, SeedSize::Twenty, 2)));
        assert!(available_run_counts(3).is_empty());
    }
}
