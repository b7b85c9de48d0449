//! Column sums over period sheets.
//!
//! CRITICAL: Each category is one column read. Cells are parsed as
//! decimals (blank cells count as zero), summed exactly, and the sum is
//! rounded to 2 decimal places with banker's rounding. Year-to-date totals
//! are the sum of the rounded monthly totals.

use std::cell::Cell;
use std::time::Duration;

use rust_decimal::Decimal;
use tracing::debug;
use vatbook_shared::config::PacingConfig;
use vatbook_shared::{PeriodTitle, round_amount};

use super::snapshot::TotalsSnapshot;
use crate::ledger::{
    Column, Ledger, LedgerError, TotalCategory, Transaction, parse_cell_amount,
};
use crate::period::{Period, PeriodRegistry};
use crate::store::{StoreError, TabularStore};

/// Fixed delay between consecutive store reads.
#[derive(Debug, Default)]
pub struct ReadPacer {
    delay: Duration,
    reads: Cell<u64>,
}

impl ReadPacer {
    /// Creates a pacer waiting `delay` before every read but the first.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            reads: Cell::new(0),
        }
    }

    /// Creates a pacer that never waits.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Reads the delay from configuration.
    #[must_use]
    pub fn from_config(config: &PacingConfig) -> Self {
        Self::new(Duration::from_millis(config.read_delay_ms))
    }

    /// Blocks for the configured delay unless this is the first read.
    pub fn pace(&self) {
        if self.reads.get() > 0 && !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        self.reads.set(self.reads.get() + 1);
    }

    /// Returns the number of reads paced so far.
    #[must_use]
    pub fn reads(&self) -> u64 {
        self.reads.get()
    }
}

/// Computes totals and reads transactions back from period sheets.
pub struct TotalsAggregator<'a, S: TabularStore + ?Sized> {
    registry: PeriodRegistry<'a, S>,
    pacer: ReadPacer,
}

impl<'a, S: TabularStore + ?Sized> TotalsAggregator<'a, S> {
    /// Creates an aggregator reading through `registry`.
    #[must_use]
    pub fn new(registry: PeriodRegistry<'a, S>, pacer: ReadPacer) -> Self {
        Self { registry, pacer }
    }

    /// Returns the pacer, for inspecting read counts.
    #[must_use]
    pub fn pacer(&self) -> &ReadPacer {
        &self.pacer
    }

    /// Sums one category column of `period`, header excluded.
    ///
    /// # Errors
    ///
    /// Returns `MalformedCell` for a non-numeric cell, or
    /// `StoreUnavailable` if the store fails.
    pub fn column_total(
        &self,
        period: &Period,
        category: TotalCategory,
    ) -> Result<Decimal, LedgerError> {
        let column = category.column();
        self.pacer.pace();
        let cells = self
            .registry
            .store()
            .read_column(period.handle(), column.index())
            .map_err(|e| e.for_period(period.ledger(), period.title()))?;

        let mut sum = Decimal::ZERO;
        for (i, cell) in cells.iter().enumerate().skip(1) {
            let amount = parse_cell_amount(cell).ok_or_else(|| LedgerError::MalformedCell {
                period: period.title().to_string(),
                row: i + 1,
                column,
                value: cell.clone(),
            })?;
            sum += amount;
        }

        debug!(
            ledger = %period.ledger(),
            period = %period.title(),
            column = %column,
            rows = cells.len().saturating_sub(1),
            "Summed column"
        );
        Ok(round_amount(sum))
    }

    /// Sums every category of one period.
    ///
    /// # Errors
    ///
    /// See [`Self::column_total`].
    pub fn period_totals(&self, period: &Period) -> Result<TotalsSnapshot, LedgerError> {
        let mut snapshot = TotalsSnapshot::zero();
        for category in TotalCategory::ALL {
            snapshot.set(category, self.column_total(period, category)?);
        }
        Ok(snapshot)
    }

    /// Sums every category of the period named `month`.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` if the ledger has no such period.
    pub fn monthly_totals(
        &self,
        ledger: &Ledger,
        month: &str,
    ) -> Result<TotalsSnapshot, LedgerError> {
        let period = self.resolve(ledger, month)?;
        self.period_totals(&period)
    }

    /// Sums one category of the period named `month`.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` if the ledger has no such period.
    pub fn monthly_total(
        &self,
        ledger: &Ledger,
        month: &str,
        category: TotalCategory,
    ) -> Result<Decimal, LedgerError> {
        let period = self.resolve(ledger, month)?;
        self.column_total(&period, category)
    }

    /// Returns every period's totals in list order.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the store fails.
    pub fn monthly_breakdown(
        &self,
        ledger: &Ledger,
    ) -> Result<Vec<(String, TotalsSnapshot)>, LedgerError> {
        let titles = self.registry.list_periods(ledger)?;
        let mut breakdown = Vec::with_capacity(titles.len());
        for title in titles {
            let period = self.registry.find_period(ledger, &title)?;
            let totals = self.period_totals(&period)?;
            breakdown.push((title, totals));
        }
        Ok(breakdown)
    }

    /// Sums every category across all periods. An empty ledger is all zeros.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the store fails.
    pub fn year_to_date_totals(&self, ledger: &Ledger) -> Result<TotalsSnapshot, LedgerError> {
        let breakdown = self.monthly_breakdown(ledger)?;
        Ok(breakdown.iter().map(|(_, totals)| totals).sum())
    }

    /// Sums one category across all periods.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the store fails.
    pub fn year_to_date_total(
        &self,
        ledger: &Ledger,
        category: TotalCategory,
    ) -> Result<Decimal, LedgerError> {
        let mut total = Decimal::ZERO;
        for title in self.registry.list_periods(ledger)? {
            let period = self.registry.find_period(ledger, &title)?;
            total += self.column_total(&period, category)?;
        }
        Ok(total)
    }

    /// Reads the data rows of the period named `month`.
    ///
    /// Blank rows are skipped.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` for an unknown month and `MalformedCell`
    /// for a row that cannot be read back as a transaction.
    pub fn period_transactions(
        &self,
        ledger: &Ledger,
        month: &str,
    ) -> Result<Vec<Transaction>, LedgerError> {
        let period = self.resolve(ledger, month)?;
        let store = self.registry.store();
        let translate = |e: StoreError| e.for_period(period.ledger(), period.title());

        self.pacer.pace();
        let rows = store
            .read_column(period.handle(), Column::Date.index())
            .map_err(translate)?
            .len();

        let mut transactions = Vec::with_capacity(rows.saturating_sub(1));
        for row in 2..=rows {
            self.pacer.pace();
            let cells = store.read_row(period.handle(), row).map_err(translate)?;
            if cells.iter().all(|c| c.trim().is_empty()) {
                continue;
            }
            transactions.push(Transaction::from_row(period.title(), row, &cells)?);
        }
        Ok(transactions)
    }

    fn resolve(&self, ledger: &Ledger, month: &str) -> Result<Period, LedgerError> {
        let title = PeriodTitle::parse(month)
            .map_or_else(|_| month.trim().to_string(), |t| t.as_str().to_string());
        self.registry.find_period(ledger, &title)
    }
}
