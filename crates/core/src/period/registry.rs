//! Period registry: listing, lookup, creation, and header repair.

use tracing::{debug, error, info, warn};
use vatbook_shared::PeriodTitle;
use vatbook_shared::config::PeriodConfig;

use crate::ledger::{Ledger, LedgerError, LedgerKind};
use crate::store::{PeriodHandle, TabularStore};

/// A period sheet of one ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    ledger: LedgerKind,
    handle: PeriodHandle,
}

impl Period {
    /// Pairs a store handle with the ledger owning it.
    #[must_use]
    pub fn new(ledger: LedgerKind, handle: PeriodHandle) -> Self {
        Self { ledger, handle }
    }

    /// Returns the owning ledger.
    #[must_use]
    pub fn ledger(&self) -> LedgerKind {
        self.ledger
    }

    /// Returns the period title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.handle.title()
    }

    /// Returns the store handle.
    #[must_use]
    pub fn handle(&self) -> &PeriodHandle {
        &self.handle
    }
}

/// Lists, finds, and creates the periods of a ledger.
///
/// Creation is two store calls (add period, append header) and is not
/// transactional. A period left without a header is repaired by
/// [`PeriodRegistry::ensure_period`].
pub struct PeriodRegistry<'a, S: TabularStore + ?Sized> {
    store: &'a S,
    layout: &'a PeriodConfig,
}

impl<S: TabularStore + ?Sized> Clone for PeriodRegistry<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: TabularStore + ?Sized> Copy for PeriodRegistry<'_, S> {}

impl<'a, S: TabularStore + ?Sized> PeriodRegistry<'a, S> {
    /// Creates a registry over `store` using `layout` for new periods.
    #[must_use]
    pub fn new(store: &'a S, layout: &'a PeriodConfig) -> Self {
        Self { store, layout }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &'a S {
        self.store
    }

    /// Lists period titles in creation order.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the store cannot list the ledger.
    pub fn list_periods(&self, ledger: &Ledger) -> Result<Vec<String>, LedgerError> {
        let titles = self
            .store
            .list_periods(ledger.handle())
            .map_err(|e| e.for_ledger(ledger.kind()))?;
        debug!(ledger = %ledger.kind(), count = titles.len(), "Listed periods");
        Ok(titles)
    }

    /// Looks up the period titled `title`.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` if no such period exists.
    pub fn find_period(&self, ledger: &Ledger, title: &str) -> Result<Period, LedgerError> {
        let handle = self
            .store
            .get_period(ledger.handle(), title)
            .map_err(|e| e.for_period(ledger.kind(), title))?;
        Ok(Period::new(ledger.kind(), handle))
    }

    /// Returns the period for `month`, creating it if it does not exist.
    ///
    /// Calling this twice for the same month yields one period. An existing
    /// period with no header row gets its header appended.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the store fails.
    pub fn ensure_period(
        &self,
        ledger: &Ledger,
        month: PeriodTitle,
    ) -> Result<Period, LedgerError> {
        let title = month.as_str();
        let titles = self.list_periods(ledger)?;

        if titles.iter().any(|t| t == title) {
            let period = self.find_period(ledger, title)?;
            self.repair_header(&period)?;
            return Ok(period);
        }

        match self.create_in_store(ledger, title) {
            Ok(period) => Ok(period),
            // Created by someone else between the listing and the create call
            Err(LedgerError::PeriodAlreadyExists { .. }) => {
                let period = self.find_period(ledger, title)?;
                self.repair_header(&period)?;
                Ok(period)
            }
            Err(e) => Err(e),
        }
    }

    /// Creates the period for `month`.
    ///
    /// # Errors
    ///
    /// Returns `PeriodAlreadyExists` if the ledger already has it, or
    /// `StoreUnavailable` if the store fails.
    pub fn create_period(
        &self,
        ledger: &Ledger,
        month: PeriodTitle,
    ) -> Result<Period, LedgerError> {
        let title = month.as_str();
        if self.list_periods(ledger)?.iter().any(|t| t == title) {
            return Err(LedgerError::PeriodAlreadyExists {
                ledger: ledger.kind(),
                period: title.to_string(),
            });
        }
        self.create_in_store(ledger, title)
    }

    /// Appends the header row if the period's first row is empty.
    ///
    /// Returns true if the header was written.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the store fails.
    pub fn repair_header(&self, period: &Period) -> Result<bool, LedgerError> {
        let first = self
            .store
            .read_row(period.handle(), 1)
            .map_err(|e| e.for_period(period.ledger(), period.title()))?;

        if first.iter().any(|cell| !cell.trim().is_empty()) {
            return Ok(false);
        }

        warn!(
            ledger = %period.ledger(),
            period = %period.title(),
            "Period has no header row, appending it"
        );
        self.write_header(period)?;
        Ok(true)
    }

    fn create_in_store(&self, ledger: &Ledger, title: &str) -> Result<Period, LedgerError> {
        let handle = self
            .store
            .create_period(
                ledger.handle(),
                title,
                self.layout.row_capacity,
                self.layout.column_capacity,
            )
            .map_err(|e| e.for_period(ledger.kind(), title))?;
        let period = Period::new(ledger.kind(), handle);

        self.write_header(&period)?;

        if let Err(e) = self
            .store
            .set_header_style(period.handle(), &self.layout.header_range)
        {
            warn!(
                ledger = %ledger.kind(),
                period = %title,
                error = %e,
                "Failed to style header row"
            );
        }

        info!(ledger = %ledger.kind(), period = %title, "Created period");
        Ok(period)
    }

    fn write_header(&self, period: &Period) -> Result<(), LedgerError> {
        let header = period.ledger().header_row();
        self.store
            .append_row(period.handle(), &header)
            .map_err(|e| {
                error!(
                    ledger = %period.ledger(),
                    period = %period.title(),
                    error = %e,
                    "Failed to append header row"
                );
                e.for_period(period.ledger(), period.title())
            })
    }
}
