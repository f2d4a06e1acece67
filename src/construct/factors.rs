//! Validated factor counts.
//!
//! A factor count must be a positive integer. [`FactorCount`] is the single
//! gate for that rule: every generator entry point converts its argument
//! into one before doing any arithmetic, and the `TryFrom`/`FromStr`
//! impls let loosely typed callers (parsed text, floating-point input,
//! optional values) be rejected with the same error.
//!
//! ```
//! use pbdesign::construct::FactorCount;
//!
//! assert_eq!(FactorCount::try_from(7usize).unwrap().get(), 7);
//! assert_eq!("12".parse::<FactorCount>().unwrap().get(), 12);
//!
//! assert!(FactorCount::try_from(0usize).is_err());
//! assert!(FactorCount::try_from(-1i64).is_err());
//! assert!(FactorCount::try_from(1.5f64).is_err());
//! assert!("a".parse::<FactorCount>().is_err());
//! assert!(FactorCount::try_from(None::<i64>).is_err());
//! ```

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A positive number of factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FactorCount(NonZeroUsize);

impl FactorCount {
    /// Get the count as a `usize`.
    #[must_use]
    pub fn get(self) -> usize {
        self.0.get()
    }

    /// Number of runs for this many factors: the smallest multiple of 4 that
    /// is at least the factor count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the run count overflows `usize`.
    pub fn runs(self) -> Result<usize> {
        self.get()
            .checked_add(3)
            .map(|n| n / 4 * 4)
            .ok_or_else(|| Error::invalid_argument(format!("factor count {} is too large", self)))
    }
}

impl fmt::Display for FactorCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for FactorCount {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        NonZeroUsize::new(value).map(Self).ok_or_else(|| {
            Error::invalid_argument("number of factors must be a positive integer, got 0")
        })
    }
}

impl TryFrom<i64> for FactorCount {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        if value <= 0 {
            return Err(Error::invalid_argument(format!(
                "number of factors must be a positive integer, got {value}"
            )));
        }
        let value = usize::try_from(value).map_err(|_| {
            Error::invalid_argument(format!("number of factors {value} does not fit in usize"))
        })?;
        Self::try_from(value)
    }
}

impl TryFrom<i32> for FactorCount {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        Self::try_from(i64::from(value))
    }
}

impl TryFrom<f64> for FactorCount {
    type Error = Error;

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn try_from(value: f64) -> Result<Self> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(Error::invalid_argument(format!(
                "number of factors must be a positive integer, got {value}"
            )));
        }
        if value <= 0.0 || value > i64::MAX as f64 {
            return Err(Error::invalid_argument(format!(
                "number of factors must be a positive integer, got {value}"
            )));
        }
        Self::try_from(value as i64)
    }
}

impl TryFrom<Option<i64>> for FactorCount {
    type Error = Error;

    fn try_from(value: Option<i64>) -> Result<Self> {
        value
            .ok_or_else(|| Error::invalid_argument("number of factors is missing"))
            .and_then(<Self as TryFrom<i64>>::try_from)
    }
}

impl FromStr for FactorCount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value: i64 = s.trim().parse().map_err(|_| {
            Error::invalid_argument(format!(
                "number of factors must be a positive integer, got {s:?}"
            ))
        })?;
        Self::try_from(value)
    }
}
