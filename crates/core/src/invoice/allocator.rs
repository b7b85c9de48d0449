//! Next-invoice-number allocation from the most recent numeric row.
//!
//! Periods are scanned newest first. The last data row of each period is
//! read and its invoice cell parsed; the first numeric value wins and the
//! next number is that value plus one. Periods whose last row is the header
//! or holds a non-numeric invoice are skipped.

use tracing::{debug, warn};

use crate::ledger::{Column, Ledger, LedgerError};
use crate::period::PeriodRegistry;
use crate::store::{StoreError, TabularStore};

/// Allocates invoice numbers per ledger.
pub struct InvoiceAllocator<'a, S: TabularStore + ?Sized> {
    registry: PeriodRegistry<'a, S>,
}

impl<'a, S: TabularStore + ?Sized> InvoiceAllocator<'a, S> {
    /// Creates an allocator reading through `registry`.
    #[must_use]
    pub fn new(registry: PeriodRegistry<'a, S>) -> Self {
        Self { registry }
    }

    /// Returns the next invoice number for `ledger`.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceNumberUnavailable` if no period ends in a numeric
    /// invoice, or `StoreUnavailable` if the store fails.
    pub fn next_invoice_number(&self, ledger: &Ledger) -> Result<u64, LedgerError> {
        let store = self.registry.store();
        let titles = self.registry.list_periods(ledger)?;

        for title in titles.iter().rev() {
            let period = self.registry.find_period(ledger, title)?;
            let translate = |e: StoreError| e.for_period(ledger.kind(), title);

            let last_row = store
                .read_column(period.handle(), Column::Date.index())
                .map_err(translate)?
                .len();
            if last_row <= 1 {
                debug!(ledger = %ledger.kind(), period = %title, "Period has no data rows");
                continue;
            }

            let row = store.read_row(period.handle(), last_row).map_err(translate)?;
            let cell = row
                .get(Column::Invoice.index() - 1)
                .map_or("", String::as_str);

            match parse_invoice_number(cell).and_then(|n| n.checked_add(1)) {
                Some(next) => {
                    debug!(
                        ledger = %ledger.kind(),
                        period = %title,
                        invoice = next,
                        "Allocated invoice number"
                    );
                    return Ok(next);
                }
                None => {
                    debug!(
                        ledger = %ledger.kind(),
                        period = %title,
                        value = cell,
                        "Trailing invoice is not numeric"
                    );
                }
            }
        }

        warn!(ledger = %ledger.kind(), "No numeric invoice found in any period");
        Err(LedgerError::InvoiceNumberUnavailable(ledger.kind()))
    }
}

/// Parses a stored invoice cell.
#[must_use]
pub fn parse_invoice_number(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

/// Parses an operator-supplied invoice number.
///
/// # Errors
///
/// Returns `InvalidInvoiceNumber` unless the text is a positive integer.
pub fn parse_manual_invoice(raw: &str) -> Result<u64, LedgerError> {
    let trimmed = raw.trim();
    match trimmed.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(LedgerError::InvalidInvoiceNumber(trimmed.to_string())),
    }
}
