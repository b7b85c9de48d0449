//! Monetary amount parsing and formatting.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` end to end and are written to the
//! ledger with exactly two decimal places.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Decimal places kept for every persisted amount.
pub const AMOUNT_DECIMAL_PLACES: u32 = 2;

/// Reasons an operator-supplied amount is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Nothing was entered.
    #[error("amount is empty")]
    Empty,

    /// Input is not a decimal number.
    #[error("'{0}' is not a number")]
    NotNumeric(String),

    /// Amount is below zero.
    #[error("amount cannot be negative: {0}")]
    Negative(Decimal),

    /// More than two decimal places.
    #[error("amount '{0}' has more than 2 decimal places")]
    TooPrecise(String),
}

/// Parses a gross amount typed by the operator.
///
/// Accepts surrounding whitespace and an optional leading euro sign.
///
/// # Errors
///
/// Returns `AmountError` if the input is empty, not numeric, negative,
/// or carries more than two decimal places.
pub fn parse_amount(raw: &str) -> Result<Decimal, AmountError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('€').unwrap_or(trimmed).trim();
    if digits.is_empty() {
        return Err(AmountError::Empty);
    }

    let amount =
        Decimal::from_str(digits).map_err(|_| AmountError::NotNumeric(trimmed.to_string()))?;

    if amount < Decimal::ZERO {
        return Err(AmountError::Negative(amount));
    }
    if amount.scale() > AMOUNT_DECIMAL_PLACES {
        return Err(AmountError::TooPrecise(digits.to_string()));
    }

    // "-0" parses as a negative zero
    Ok(if amount.is_zero() { Decimal::ZERO } else { amount })
}

/// Rounds to two decimal places using banker's rounding.
#[must_use]
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(AMOUNT_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven)
}

/// Formats an amount for a ledger cell, e.g. `28.29` or `0.00`.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", round_amount(amount))
}
