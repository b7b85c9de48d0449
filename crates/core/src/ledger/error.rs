//! Ledger error types for validation, period, and store failures.
//!
//! This module defines every error the engine returns to the menu layer.
//! Store-specific failures are translated into these kinds at the store
//! boundary and never surface in their raw form.

use thiserror::Error;

use super::types::{Column, LedgerKind};
use crate::rates::VatRate;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Input Errors ==========
    /// Gross total is not a valid non-negative amount.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Rate is not one of the recognised VAT rates.
    #[error("Invalid VAT rate: '{0}'. Valid rates are 23, 13.5, 9, 4.8 and 0")]
    InvalidRate(String),

    /// Rate is recognised but has no column in the ledger schema.
    #[error("VAT rate {0} has no column in the ledger schema")]
    UnsupportedRateForSchema(VatRate),

    /// Input does not name a calendar month.
    #[error("Invalid month: '{0}'")]
    InvalidMonth(String),

    /// Manually supplied invoice number is not a positive integer.
    #[error("Invalid invoice number: '{0}'")]
    InvalidInvoiceNumber(String),

    /// Operator abandoned input.
    #[error("Input cancelled")]
    InputCancelled,

    /// Operator exhausted the allowed attempts for a field.
    #[error("No valid {field} after {attempts} attempts")]
    RetryLimitExceeded {
        /// Field being prompted for.
        field: String,
        /// Attempts made.
        attempts: u32,
    },

    // ========== Period Errors ==========
    /// No period with this title exists in the ledger.
    #[error("No {ledger} period found for {period}")]
    PeriodNotFound {
        /// Ledger searched.
        ledger: LedgerKind,
        /// Requested period title.
        period: String,
    },

    /// A period with this title already exists in the ledger.
    #[error("A {ledger} period already exists for {period}")]
    PeriodAlreadyExists {
        /// Ledger searched.
        ledger: LedgerKind,
        /// Existing period title.
        period: String,
    },

    // ========== Invoice Errors ==========
    /// No period holds a numeric trailing invoice number.
    #[error("No invoice number available for the {0} ledger, enter one manually")]
    InvoiceNumberUnavailable(LedgerKind),

    // ========== Data Errors ==========
    /// A stored cell could not be read as the value its column requires.
    #[error("Malformed {column} value '{value}' in {period} row {row}")]
    MalformedCell {
        /// Period title.
        period: String,
        /// 1-based row number, header included.
        row: usize,
        /// Column holding the value.
        column: Column,
        /// Raw cell text.
        value: String,
    },

    // ========== Store Errors ==========
    /// The external store could not complete the operation.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl LedgerError {
    /// Returns the error code for the menu layer.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::InvalidRate(_) => "INVALID_RATE",
            Self::UnsupportedRateForSchema(_) => "UNSUPPORTED_RATE_FOR_SCHEMA",
            Self::InvalidMonth(_) => "INVALID_MONTH",
            Self::InvalidInvoiceNumber(_) => "INVALID_INVOICE_NUMBER",
            Self::InputCancelled => "INPUT_CANCELLED",
            Self::RetryLimitExceeded { .. } => "RETRY_LIMIT_EXCEEDED",
            Self::PeriodNotFound { .. } => "PERIOD_NOT_FOUND",
            Self::PeriodAlreadyExists { .. } => "PERIOD_ALREADY_EXISTS",
            Self::InvoiceNumberUnavailable(_) => "INVOICE_NUMBER_UNAVAILABLE",
            Self::MalformedCell { .. } => "MALFORMED_CELL",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }

    /// Returns true if the operator should be asked for the value again.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_) | Self::InvalidRate(_) | Self::InvalidInvoiceNumber(_)
        )
    }

    /// Returns true if re-invoking the same action may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}
