//! Level-count statistics for design matrices.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::DesignMatrix;

/// A report on the balance of a design matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BalanceReport {
    /// Number of +1 entries in each factor.
    pub plus_counts: Vec<usize>,
    /// Number of -1 entries in each factor.
    pub minus_counts: Vec<usize>,
    /// Whether each factor has equal +1 and -1 counts.
    pub factor_balance: Vec<bool>,
}

impl BalanceReport {
    /// Whether every factor is balanced.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.factor_balance.iter().all(|&b| b)
    }

    /// Whether every factor except the first is balanced.
    ///
    /// Generated designs keep an all-ones reference column in position 0.
    #[must_use]
    pub fn is_balanced_except_first(&self) -> bool {
        self.factor_balance.iter().skip(1).all(|&b| b)
    }

    /// Indices of the unbalanced factors.
    #[must_use]
    pub fn unbalanced_factors(&self) -> Vec<usize> {
        self.factor_balance
            .iter()
            .enumerate()
            .filter(|(_, &b)| !b)
            .map(|(i, _)| i)
            .collect()
    }
}

impl DesignMatrix {
    /// Count the levels of every factor.
    #[must_use]
    pub fn balance_report(&self) -> BalanceReport {
        let k = self.factors();
        let mut plus_counts = Vec::with_capacity(k);
        let mut minus_counts = Vec::with_capacity(k);
        let mut factor_balance = Vec::with_capacity(k);

        for column in self.data().columns() {
            let plus = column.iter().filter(|&&v| v == 1).count();
            let minus = column.len() - plus;

            plus_counts.push(plus);
            minus_counts.push(minus);
            factor_balance.push(plus == minus);
        }

        BalanceReport {
            plus_counts,
            minus_counts,
            factor_balance,
        }
    }
}
