//! The engine facade used by the menu layer.
//!
//! Every operation opens the ledger it needs, delegates to the component
//! owning the behavior, and returns a typed result. Store failures arrive
//! already translated into [`LedgerError`].

use rust_decimal::Decimal;
use vatbook_shared::{AppConfig, PeriodTitle};

use crate::invoice::InvoiceAllocator;
use crate::ledger::{
    Clock, Ledger, LedgerError, LedgerKind, SystemClock, TotalCategory, Transaction,
};
use crate::period::{Period, PeriodRegistry};
use crate::rates::{RateEntry, RateTable};
use crate::recorder::{
    RetryPolicy, TransactionDraft, TransactionPrompt, TransactionRecorder, collect_transaction,
};
use crate::store::TabularStore;
use crate::totals::{ReadPacer, TotalsAggregator, TotalsSnapshot};

/// VAT ledger engine over a tabular store.
pub struct VatEngine<S: TabularStore> {
    store: S,
    config: AppConfig,
    clock: Box<dyn Clock>,
}

impl<S: TabularStore> VatEngine<S> {
    /// Creates an engine dating transactions with the system clock.
    #[must_use]
    pub fn new(store: S, config: AppConfig) -> Self {
        Self::with_clock(store, config, SystemClock)
    }

    /// Creates an engine dating transactions with `clock`.
    #[must_use]
    pub fn with_clock(store: S, config: AppConfig, clock: impl Clock + 'static) -> Self {
        Self {
            store,
            config,
            clock: Box::new(clock),
        }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the configuration in use.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the valid rates in display order.
    #[must_use]
    pub fn rate_table(&self) -> &'static [RateEntry] {
        RateTable::entries()
    }

    /// Opens `kind`'s ledger.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the store cannot open it.
    pub fn ledger(&self, kind: LedgerKind) -> Result<Ledger, LedgerError> {
        Ledger::open(&self.store, kind, &self.config.ledgers)
    }

    /// Lists period titles in creation order.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the store fails.
    pub fn list_periods(&self, kind: LedgerKind) -> Result<Vec<String>, LedgerError> {
        self.registry().list_periods(&self.ledger(kind)?)
    }

    /// Returns the period for `month`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the store fails.
    pub fn ensure_period(
        &self,
        kind: LedgerKind,
        month: PeriodTitle,
    ) -> Result<Period, LedgerError> {
        self.registry().ensure_period(&self.ledger(kind)?, month)
    }

    /// Returns the period of the current month, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the store fails.
    pub fn ensure_current_period(&self, kind: LedgerKind) -> Result<Period, LedgerError> {
        self.ensure_period(kind, PeriodTitle::from_date(self.clock.today()))
    }

    /// Creates the period for the month named by `month` (e.g. "mar").
    ///
    /// # Errors
    ///
    /// Returns `InvalidMonth` for input that is not a month name and
    /// `PeriodAlreadyExists` if the period exists.
    pub fn create_period(&self, kind: LedgerKind, month: &str) -> Result<Period, LedgerError> {
        let title = PeriodTitle::parse(month).map_err(|e| LedgerError::InvalidMonth(e.0))?;
        self.registry().create_period(&self.ledger(kind)?, title)
    }

    /// Returns the next invoice number of `kind`'s ledger.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceNumberUnavailable` if the operator must supply one.
    pub fn next_invoice_number(&self, kind: LedgerKind) -> Result<u64, LedgerError> {
        InvoiceAllocator::new(self.registry()).next_invoice_number(&self.ledger(kind)?)
    }

    /// Collects a draft from `prompt` using the configured retry policy.
    ///
    /// # Errors
    ///
    /// Returns `InputCancelled`, `RetryLimitExceeded` or
    /// `UnsupportedRateForSchema`.
    pub fn collect_transaction<P: TransactionPrompt + ?Sized>(
        &self,
        prompt: &mut P,
    ) -> Result<TransactionDraft, LedgerError> {
        collect_transaction(prompt, RetryPolicy::from_config(&self.config.input))
    }

    /// Records `draft` in the current month's period of `kind`'s ledger.
    ///
    /// `manual_invoice` is asked only when no invoice number can be allocated,
    /// and is asked again with the rejection after an invalid answer, up to
    /// the configured `input.max_attempts`.
    ///
    /// # Errors
    ///
    /// See [`TransactionRecorder::record`].
    pub fn record_transaction<F>(
        &self,
        kind: LedgerKind,
        draft: &TransactionDraft,
        manual_invoice: F,
    ) -> Result<Transaction, LedgerError>
    where
        F: FnMut(Option<&LedgerError>) -> Option<String>,
    {
        let ledger = self.ledger(kind)?;
        TransactionRecorder::new(self.registry(), self.clock.as_ref())
            .with_retry_policy(RetryPolicy::from_config(&self.config.input))
            .record(&ledger, draft, manual_invoice)
    }

    /// Sums every category of the period named `month`.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` if the ledger has no such period.
    pub fn monthly_totals(
        &self,
        kind: LedgerKind,
        month: &str,
    ) -> Result<TotalsSnapshot, LedgerError> {
        self.totals().monthly_totals(&self.ledger(kind)?, month)
    }

    /// Sums one category of the period named `month`.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` if the ledger has no such period.
    pub fn monthly_total(
        &self,
        kind: LedgerKind,
        month: &str,
        category: TotalCategory,
    ) -> Result<Decimal, LedgerError> {
        self.totals()
            .monthly_total(&self.ledger(kind)?, month, category)
    }

    /// Returns every period's totals in list order.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the store fails.
    pub fn monthly_breakdown(
        &self,
        kind: LedgerKind,
    ) -> Result<Vec<(String, TotalsSnapshot)>, LedgerError> {
        self.totals().monthly_breakdown(&self.ledger(kind)?)
    }

    /// Sums every category across all periods.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the store fails.
    pub fn year_to_date_totals(&self, kind: LedgerKind) -> Result<TotalsSnapshot, LedgerError> {
        self.totals().year_to_date_totals(&self.ledger(kind)?)
    }

    /// Sums one category across all periods.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the store fails.
    pub fn year_to_date_total(
        &self,
        kind: LedgerKind,
        category: TotalCategory,
    ) -> Result<Decimal, LedgerError> {
        self.totals()
            .year_to_date_total(&self.ledger(kind)?, category)
    }

    /// Reads back the transactions of the period named `month`.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` if the ledger has no such period.
    pub fn period_transactions(
        &self,
        kind: LedgerKind,
        month: &str,
    ) -> Result<Vec<Transaction>, LedgerError> {
        self.totals()
            .period_transactions(&self.ledger(kind)?, month)
    }

    fn registry(&self) -> PeriodRegistry<'_, S> {
        PeriodRegistry::new(&self.store, &self.config.periods)
    }

    fn totals(&self) -> TotalsAggregator<'_, S> {
        TotalsAggregator::new(self.registry(), ReadPacer::from_config(&self.config.pacing))
    }
}
