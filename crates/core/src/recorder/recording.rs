//! Appends validated transactions to the current period.

use tracing::{debug, error, info, warn};
use vatbook_shared::PeriodTitle;

use super::input::{RetryPolicy, TransactionDraft};
use crate::invoice::{InvoiceAllocator, parse_manual_invoice};
use crate::ledger::{Clock, Ledger, LedgerError, Transaction};
use crate::period::PeriodRegistry;
use crate::store::TabularStore;
use crate::vat::VatCalculator;

/// Records transactions into the period of the current month.
pub struct TransactionRecorder<'a, S: TabularStore + ?Sized> {
    registry: PeriodRegistry<'a, S>,
    clock: &'a dyn Clock,
    policy: RetryPolicy,
}

impl<'a, S: TabularStore + ?Sized> TransactionRecorder<'a, S> {
    /// Creates a recorder dating transactions with `clock`.
    ///
    /// Manual invoice numbers are asked until valid or cancelled.
    #[must_use]
    pub fn new(registry: PeriodRegistry<'a, S>, clock: &'a dyn Clock) -> Self {
        Self {
            registry,
            clock,
            policy: RetryPolicy::unbounded(),
        }
    }

    /// Bounds how many manual invoice numbers may be rejected.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Records `draft` in `ledger`.
    ///
    /// The VAT breakdown is computed before the store is touched, so an
    /// invalid draft changes nothing. When no invoice number can be
    /// allocated, `manual_invoice` is asked for one, with the previous
    /// rejection attached, until it returns a positive integer. Uniqueness
    /// of manual numbers is not checked. Exactly one row is appended on
    /// success.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` or `UnsupportedRateForSchema` for an invalid
    /// draft, `InputCancelled` when `manual_invoice` returns nothing,
    /// `RetryLimitExceeded` when the retry policy runs out, and
    /// `StoreUnavailable` or `PeriodNotFound` if the store fails. Nothing
    /// is recorded on error.
    pub fn record<F>(
        &self,
        ledger: &Ledger,
        draft: &TransactionDraft,
        manual_invoice: F,
    ) -> Result<Transaction, LedgerError>
    where
        F: FnMut(Option<&LedgerError>) -> Option<String>,
    {
        let breakdown = VatCalculator::compute(draft.gross_total, draft.rate)?;

        let date = self.clock.today();
        let period = self
            .registry
            .ensure_period(ledger, PeriodTitle::from_date(date))?;

        let invoice_number = match InvoiceAllocator::new(self.registry).next_invoice_number(ledger)
        {
            Ok(number) => number,
            Err(LedgerError::InvoiceNumberUnavailable(_)) => {
                warn!(ledger = %ledger.kind(), "Asking for a manual invoice number");
                self.ask_invoice_number(manual_invoice)?
            }
            Err(e) => return Err(e),
        };

        let transaction = Transaction {
            period: period.title().to_string(),
            date,
            details: draft.details.clone(),
            invoice_number,
            gross_total: draft.gross_total,
            rate: draft.rate,
            breakdown,
        };

        self.registry
            .store()
            .append_row(period.handle(), &transaction.to_row())
            .map_err(|e| {
                error!(
                    ledger = %ledger.kind(),
                    period = %period.title(),
                    invoice = invoice_number,
                    error = %e,
                    "Failed to append transaction"
                );
                e.for_period(ledger.kind(), period.title())
            })?;

        info!(
            ledger = %ledger.kind(),
            period = %period.title(),
            invoice = invoice_number,
            rate = %draft.rate,
            "Recorded transaction"
        );
        Ok(transaction)
    }

    fn ask_invoice_number<F>(&self, mut manual_invoice: F) -> Result<u64, LedgerError>
    where
        F: FnMut(Option<&LedgerError>) -> Option<String>,
    {
        let mut attempts = 0;
        let mut rejection: Option<LedgerError> = None;

        loop {
            if self.policy.exhausted(attempts) {
                return Err(LedgerError::RetryLimitExceeded {
                    field: "invoice number".to_string(),
                    attempts,
                });
            }

            let raw = manual_invoice(rejection.as_ref()).ok_or(LedgerError::InputCancelled)?;
            attempts += 1;

            match parse_manual_invoice(&raw) {
                Ok(number) => return Ok(number),
                Err(e) => {
                    debug!(attempts, error = %e, "Rejected invoice number");
                    rejection = Some(e);
                }
            }
        }
    }
}
