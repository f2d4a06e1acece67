//! Design matrix construction.
//!
//! This module provides the Plackett–Burman generator and the building
//! blocks it is made of.
//!
//! ## Available Pieces
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`PlackettBurman`] | Two-level screening designs with 4·⌈F/4⌉ runs |
//! | [`double`] | One Hadamard doubling step `[[M, M], [M, -M]]` |
//! | [`toeplitz`], [`hankel`] | Cyclic cores of the 12- and 20-run seeds |
//! | [`FactorCount`] | Positive factor count, checked before any arithmetic |
//!
//! ## Usage
//!
//! All generators implement the [`DesignGenerator`] trait:
//!
//! ```
//! use pbdesign::construct::{DesignGenerator, PlackettBurman};
//!
//! let pb = PlackettBurman::new();
//! let design = pb.generate(7).expect("generation failed");
//!
//! assert_eq!(design.runs(), 8);
//! assert_eq!(design.factors(), 7);
//! ```

mod cyclic;
mod factors;
mod hadamard;
mod plackett_burman;

pub use cyclic::{hankel, toeplitz};
pub use factors::FactorCount;
pub use hadamard::{double, double_until};
pub use plackett_burman::{generate_pbdesign, PlackettBurman};

use crate::design::DesignMatrix;
use crate::error::Result;

/// Trait for two-level design generators.
///
/// A generator maps a factor count to a design matrix with one column per
/// factor. Implementations must be deterministic.
pub trait DesignGenerator: Send + Sync {
    /// Get the name of this design family.
    fn name(&self) -> &'static str;

    /// Get the number of runs a design for `factors` factors would have.
    ///
    /// # Errors
    ///
    /// Returns an error if `factors` is not a positive integer or no design
    /// of this family exists for it.
    fn runs_for(&self, factors: usize) -> Result<usize>;

    /// Generate a design with the specified number of factors.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - factors is zero
    /// - no design of this family exists for that many factors
    fn generate(&self, factors: usize) -> Result<DesignMatrix>;
}
