//! Per-category sums.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::ledger::{LedgerKind, TotalCategory};

/// Sum of every total category, scoped to one period or a whole ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TotalsSnapshot {
    totals: BTreeMap<TotalCategory, Decimal>,
}

impl TotalsSnapshot {
    /// Returns a snapshot with every category at zero.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            totals: TotalCategory::ALL
                .iter()
                .map(|c| (*c, Decimal::ZERO))
                .collect(),
        }
    }

    /// Returns the sum for `category`.
    #[must_use]
    pub fn get(&self, category: TotalCategory) -> Decimal {
        self.totals.get(&category).copied().unwrap_or(Decimal::ZERO)
    }

    /// Sets the sum for `category`.
    pub fn set(&mut self, category: TotalCategory, amount: Decimal) {
        self.totals.insert(category, amount);
    }

    /// Adds `other` category by category.
    pub fn add(&mut self, other: &Self) {
        for category in TotalCategory::ALL {
            let sum = self.get(category) + other.get(category);
            self.set(category, sum);
        }
    }

    /// Iterates categories in display order.
    pub fn entries(&self) -> impl Iterator<Item = (TotalCategory, Decimal)> + '_ {
        self.totals.iter().map(|(c, v)| (*c, *v))
    }

    /// Returns `(label, sum)` pairs using `ledger`'s labels.
    #[must_use]
    pub fn labelled(&self, ledger: LedgerKind) -> Vec<(&'static str, Decimal)> {
        self.entries().map(|(c, v)| (c.label(ledger), v)).collect()
    }
}

impl Default for TotalsSnapshot {
    fn default() -> Self {
        Self::zero()
    }
}

impl<'s> std::iter::Sum<&'s TotalsSnapshot> for TotalsSnapshot {
    fn sum<I: Iterator<Item = &'s TotalsSnapshot>>(iter: I) -> Self {
        iter.fold(Self::zero(), |mut acc, s| {
            acc.add(s);
            acc
        })
    }
}
