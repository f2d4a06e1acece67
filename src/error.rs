//! Error types for the pbdesign library.
//!
//! This module provides error handling using the `thiserror` crate, with
//! specific variants for argument validation, seed resolution and the
//! structural checks applied to design matrices.

use std::fmt;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::Serialize;

/// The main error type for the pbdesign library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ============ Argument Errors ============
    /// The requested factor count is not a positive integer.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of what is invalid.
        message: String,
    },

    // ============ Construction Errors ============
    /// No catalogue seed reaches the required run count by doubling.
    #[error("unsupported run count {runs}: not a power-of-two multiple of 4, 8, 12 or 20")]
    UnsupportedSize {
        /// The run count that could not be resolved.
        runs: usize,
    },

    // ============ Validation Errors ============
    /// A matrix failed the structural precondition shared by all validators.
    #[error("invalid input matrix: {0}")]
    InvalidInput(MatrixDefect),

    // ============ Dimension Errors ============
    /// Array dimensions are inconsistent.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension description.
        expected: String,
        /// Actual dimension description.
        actual: String,
    },
}

/// The reason a matrix was rejected by [`assert_matrix`](crate::assert_matrix).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum MatrixDefect {
    /// The input is not an array at all (wrong container or ragged rows).
    NotAnArray {
        /// What was received instead.
        detail: String,
    },
    /// The array does not have exactly two axes.
    NotTwoDimensional {
        /// The number of axes found.
        ndim: usize,
    },
    /// The array element type is not an integer type.
    NonIntegerElements {
        /// Name of the element type.
        element_type: &'static str,
    },
    /// An element is something other than -1 or +1.
    ValueOutOfRange {
        /// Row of the offending element.
        row: usize,
        /// Column of the offending element.
        col: usize,
        /// The offending value, rendered as text.
        value: String,
    },
}

impl fmt::Display for MatrixDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnArray { detail } => write!(f, "input must be an array, got {detail}"),
            Self::NotTwoDimensional { ndim } => {
                write!(f, "input must be 2-dimensional, got {ndim} dimension(s)")
            }
            Self::NonIntegerElements { element_type } => {
                write!(f, "input must contain integers, got elements of type {element_type}")
            }
            Self::ValueOutOfRange { row, col, value } => write!(
                f,
                "input must contain only -1 and 1, found {value} at ({row}, {col})"
            ),
        }
    }
}

/// A specialized `Result` type for pbdesign operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Create a new `InvalidArgument` error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Get the matrix defect, if this error came from a structural check.
    #[must_use]
    pub fn defect(&self) -> Option<&MatrixDefect> {
        match self {
            Self::InvalidInput(defect) => Some(defect),
            _ => None,
        }
    }
}

impl From<MatrixDefect> for Error {
    fn from(defect: MatrixDefect) -> Self {
        Self::InvalidInput(defect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedSize { runs: 28 };
        assert!(err.to_string().contains("28"));
        assert!(err.to_string().contains("unsupported"));

        let err = Error::invalid_argument("factors must be positive, got 0");
        assert!(err.to_string().contains("invalid argument"));
        assert!(err.to_string().contains("got 0"));

        let err = Error::from(MatrixDefect::ValueOutOfRange {
            row: 1,
            col: 2,
            value: "0".to_string(),
        });
        assert!(err.to_string().contains("only -1 and 1"));
        assert!(err.to_string().contains("(1, 2)"));
    }

    #[test]
    fn test_defect_messages_are_distinct() {
        let messages = [
            MatrixDefect::NotAnArray {
                detail: "str".to_string(),
            },
            MatrixDefect::NotTwoDimensional { ndim: 1 },
            MatrixDefect::NonIntegerElements {
                element_type: "f64",
            },
            MatrixDefect::ValueOutOfRange {
                row: 0,
                col: 0,
                value: "2".to_string(),
            },
        ]
        .map(|d| d.to_string());

        for i in 0..messages.len() {
            for j in (i + 1)..messages.len() {
                assert_ne!(messages[i], messages[j]);
            }
        }
    }

    #[test]
    fn test_error_equality() {
        let err1 = Error::UnsupportedSize { runs: 28 };
        let err2 = Error::UnsupportedSize { runs: 28 };
        let err3 = Error::UnsupportedSize { runs: 36 };

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
        assert!(err1.defect().is_none());
    }
}
