//! The fixed set of VAT rates an operator may choose.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::LedgerError;

/// A recognised VAT rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VatRate {
    /// 23% standard rate.
    Standard,
    /// 13.5% reduced rate.
    Reduced,
    /// 9% second reduced rate.
    SecondReduced,
    /// 4.8% livestock rate.
    Livestock,
    /// 0% rate, recorded in the exempt column.
    Zero,
}

impl VatRate {
    /// All rates in display order.
    pub const ALL: [Self; 5] = [
        Self::Standard,
        Self::Reduced,
        Self::SecondReduced,
        Self::Livestock,
        Self::Zero,
    ];

    /// Returns the rate as a percentage, e.g. `13.5`.
    #[must_use]
    pub fn percent(&self) -> Decimal {
        match self {
            Self::Standard => Decimal::new(23, 0),
            Self::Reduced => Decimal::new(135, 1),
            Self::SecondReduced => Decimal::new(9, 0),
            Self::Livestock => Decimal::new(48, 1),
            Self::Zero => Decimal::ZERO,
        }
    }

    /// Finds the rate equal to `percent`, ignoring trailing zeros.
    #[must_use]
    pub fn from_percent(percent: Decimal) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.percent() == percent)
    }

    /// Parses operator input such as `"23"`, `"13.5%"` or `"9.0"`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidRate` for anything outside the five rates.
    pub fn parse(raw: &str) -> Result<Self, LedgerError> {
        let trimmed = raw.trim();
        let digits = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();

        Decimal::from_str(digits)
            .ok()
            .and_then(Self::from_percent)
            .ok_or_else(|| LedgerError::InvalidRate(trimmed.to_string()))
    }
}

impl std::fmt::Display for VatRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.percent().normalize())
    }
}

impl FromStr for VatRate {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
