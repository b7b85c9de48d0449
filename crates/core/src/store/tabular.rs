//! The `TabularStore` trait and the handles it hands out.

use super::error::StoreError;

/// Handle to an opened ledger (a spreadsheet of period sheets).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LedgerHandle {
    name: String,
}

impl LedgerHandle {
    /// Creates a handle for the ledger stored under `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the store name of the ledger.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Handle to one period sheet inside a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PeriodHandle {
    ledger: String,
    title: String,
}

impl PeriodHandle {
    /// Creates a handle for the period `title` of `ledger`.
    #[must_use]
    pub fn new(ledger: &LedgerHandle, title: impl Into<String>) -> Self {
        Self {
            ledger: ledger.name.clone(),
            title: title.into(),
        }
    }

    /// Returns the store name of the owning ledger.
    #[must_use]
    pub fn ledger(&self) -> &str {
        &self.ledger
    }

    /// Returns the period title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Blocking row/column access to a spreadsheet-like store.
///
/// Row and column indices are 1-based. Row 1 is the header.
/// Implementations own their timeouts; the engine never cancels a call.
/// Shared references to a store are stores too, so several engines can
/// work on one store.
#[cfg_attr(test, mockall::automock)]
pub trait TabularStore {
    /// Opens the ledger stored under `name`.
    fn open_ledger(&self, name: &str) -> Result<LedgerHandle, StoreError>;

    /// Lists period titles in the order the store returns them (creation order).
    fn list_periods(&self, ledger: &LedgerHandle) -> Result<Vec<String>, StoreError>;

    /// Looks up a period by title. Fails with `NotFound`.
    fn get_period(&self, ledger: &LedgerHandle, title: &str) -> Result<PeriodHandle, StoreError>;

    /// Adds an empty period. Fails with `AlreadyExists`.
    fn create_period(
        &self,
        ledger: &LedgerHandle,
        title: &str,
        row_capacity: u32,
        column_capacity: u32,
    ) -> Result<PeriodHandle, StoreError>;

    /// Appends one row after the last non-empty row.
    fn append_row(&self, period: &PeriodHandle, values: &[String]) -> Result<(), StoreError>;

    /// Reads every cell of a column, header included at position 0.
    fn read_column(&self, period: &PeriodHandle, column: usize) -> Result<Vec<String>, StoreError>;

    /// Reads one row. An empty vector means the row holds nothing.
    fn read_row(&self, period: &PeriodHandle, row: usize) -> Result<Vec<String>, StoreError>;

    /// Applies the header style to an A1-notation range. Purely cosmetic.
    fn set_header_style(&self, period: &PeriodHandle, range: &str) -> Result<(), StoreError>;
}

impl<T: TabularStore + ?Sized> TabularStore for &T {
    fn open_ledger(&self, name: &str) -> Result<LedgerHandle, StoreError> {
        (**self).open_ledger(name)
    }

    fn list_periods(&self, ledger: &LedgerHandle) -> Result<Vec<String>, StoreError> {
        (**self).list_periods(ledger)
    }

    fn get_period(&self, ledger: &LedgerHandle, title: &str) -> Result<PeriodHandle, StoreError> {
        (**self).get_period(ledger, title)
    }

    fn create_period(
        &self,
        ledger: &LedgerHandle,
        title: &str,
        row_capacity: u32,
        column_capacity: u32,
    ) -> Result<PeriodHandle, StoreError> {
        (**self).create_period(ledger, title, row_capacity, column_capacity)
    }

    fn append_row(&self, period: &PeriodHandle, values: &[String]) -> Result<(), StoreError> {
        (**self).append_row(period, values)
    }

    fn read_column(&self, period: &PeriodHandle, column: usize) -> Result<Vec<String>, StoreError> {
        (**self).read_column(period, column)
    }

    fn read_row(&self, period: &PeriodHandle, row: usize) -> Result<Vec<String>, StoreError> {
        (**self).read_row(period, row)
    }

    fn set_header_style(&self, period: &PeriodHandle, range: &str) -> Result<(), StoreError> {
        (**self).set_header_style(period, range)
    }
}
