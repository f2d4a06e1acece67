//! # pbdesign
//!
//! Plackett–Burman screening designs for two-level experiments.
//!
//! ## Overview
//!
//! A Plackett–Burman design screens up to N-1 two-level factors in N runs,
//! with N a multiple of 4. Every pair of factor columns is orthogonal, so
//! main effects can be estimated independently.
//!
//! This library provides:
//! - A catalogue of seed matrices for 4, 8, 12 and 20 runs
//! - Hadamard doubling to reach 16, 24, 32, 40, 48, ... runs
//! - Validators for orthogonality, balance and pairwise co-occurrence of any
//!   ±1 matrix
//!
//! ## Quick Start
//!
//! ```rust
//! use pbdesign::generate_pbdesign;
//!
//! let design = generate_pbdesign(7).unwrap();
//!
//! assert_eq!(design.runs(), 8);
//! assert_eq!(design.factors(), 7);
//! assert!(design.is_orthogonal());
//! ```
//!
//! The validators accept any `ndarray` array:
//!
//! ```rust
//! use ndarray::array;
//! use pbdesign::{calculate_co_occurrence, is_balanced, is_orthogonal};
//!
//! let m = array![[1, 1, 1], [1, -1, -1], [-1, 1, -1], [-1, -1, 1]];
//! assert!(is_orthogonal(&m).unwrap());
//! assert!(is_balanced(&m).unwrap());
//!
//! let co = calculate_co_occurrence(&m).unwrap();
//! assert_eq!(co[[0, 0]], 2);
//! ```
//!
//! ## Notation
//!
//! - **Run**: a row of the design, one combination of factor levels
//! - **Factor**: a column of the design
//! - **Level**: -1 or +1
//!
//! ## Features
//!
//! - `serde`: Enable serialization/deserialization of designs and reports
//! - `parallel`: Enable parallel validators using rayon
//! - `python`: Enable Python bindings via PyO3

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod builder;
pub mod catalogue;
pub mod construct;
pub mod design;
pub mod error;
#[cfg(feature = "python")]
pub mod python;

#[cfg(feature = "parallel")]
pub mod parallel;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::builder::{available_run_counts, PBBuilder};
    pub use crate::catalogue::{get_by_runs, list_seed_runs, SeedSize};
    pub use crate::construct::{
        double, hankel, toeplitz, DesignGenerator, FactorCount, PlackettBurman,
    };
    pub use crate::design::{
        assert_matrix, calculate_co_occurrence, is_balanced, is_orthogonal, BalanceReport,
        DesignMatrix, MatrixElement,
    };
    pub use crate::error::{Error, MatrixDefect, Result};
    pub use crate::generate_pbdesign;

    #[cfg(feature = "parallel")]
    pub use crate::parallel::{par_calculate_co_occurrence, par_is_orthogonal};
}

// Re-export commonly used items at crate root
pub use builder::{available_run_counts, PBBuilder};
pub use construct::{generate_pbdesign, DesignGenerator, FactorCount, PlackettBurman};
pub use design::{
    assert_matrix, calculate_co_occurrence, is_balanced, is_orthogonal, BalanceReport,
    DesignMatrix,
};
pub use error::{Error, MatrixDefect, Result};

#[cfg(feature = "parallel")]
pub use parallel::{par_calculate_co_occurrence, par_is_orthogonal};
