//! Injected store failures.

use vatbook_core::store::StoreError;

/// A store operation that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `open_ledger`.
    OpenLedger,
    /// `list_periods`.
    ListPeriods,
    /// `get_period`.
    GetPeriod,
    /// `create_period`.
    CreatePeriod,
    /// `append_row`.
    AppendRow,
    /// `read_column`.
    ReadColumn,
    /// `read_row`.
    ReadRow,
    /// `set_header_style`.
    SetHeaderStyle,
}

/// A failure returned by the next matching calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    operation: Operation,
    error: StoreError,
    remaining: Option<u32>,
}

impl Fault {
    /// Fails the next call of `operation` only.
    #[must_use]
    pub fn once(operation: Operation, error: StoreError) -> Self {
        Self::times(operation, error, 1)
    }

    /// Fails the next `count` calls of `operation`.
    #[must_use]
    pub fn times(operation: Operation, error: StoreError, count: u32) -> Self {
        Self {
            operation,
            error,
            remaining: Some(count),
        }
    }

    /// Fails every call of `operation` until faults are cleared.
    #[must_use]
    pub fn always(operation: Operation, error: StoreError) -> Self {
        Self {
            operation,
            error,
            remaining: None,
        }
    }

    /// Returns the targeted operation.
    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Consumes one use of the fault, returning its error.
    ///
    /// Returns `None` once a counted fault is spent.
    pub(crate) fn trigger(&mut self) -> Option<StoreError> {
        match &mut self.remaining {
            None => Some(self.error.clone()),
            Some(0) => None,
            Some(n) => {
                *n -= 1;
                Some(self.error.clone())
            }
        }
    }

    pub(crate) fn is_spent(&self) -> bool {
        self.remaining == Some(0)
    }
}
