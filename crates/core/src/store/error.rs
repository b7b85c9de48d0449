//! Store error types and their translation into ledger errors.

use thiserror::Error;

use crate::ledger::{LedgerError, LedgerKind};

/// Failures reported by a tabular store binding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Ledger or period does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A period with the requested title already exists.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Store could not be reached.
    #[error("store unreachable: {0}")]
    Unavailable(String),

    /// Credentials were rejected.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Request quota exhausted.
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),
}

impl StoreError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Create an already exists error.
    #[must_use]
    pub fn already_exists(what: impl Into<String>) -> Self {
        Self::AlreadyExists(what.into())
    }

    /// Create an unavailable error.
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Translates a failure of an operation on one period.
    ///
    /// `NotFound` and `AlreadyExists` keep their meaning for the period;
    /// every other failure is `StoreUnavailable`.
    #[must_use]
    pub fn for_period(self, ledger: LedgerKind, period: &str) -> LedgerError {
        match self {
            Self::NotFound(_) => LedgerError::PeriodNotFound {
                ledger,
                period: period.to_string(),
            },
            Self::AlreadyExists(_) => LedgerError::PeriodAlreadyExists {
                ledger,
                period: period.to_string(),
            },
            other => LedgerError::StoreUnavailable(other.to_string()),
        }
    }

    /// Translates a failure of a ledger-wide operation.
    #[must_use]
    pub fn for_ledger(self, ledger: LedgerKind) -> LedgerError {
        LedgerError::StoreUnavailable(format!("{ledger} ledger: {self}"))
    }
}
