//! `MemoryStore`: ledgers as in-memory lists of period sheets.
//!
//! Reads follow spreadsheet conventions: a column or row is returned up to
//! its last non-empty cell, and an empty row reads as an empty vector.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, trace};
use vatbook_core::store::{LedgerHandle, PeriodHandle, StoreError, TabularStore};

use crate::fault::{Fault, Operation};

#[derive(Debug, Clone)]
struct Sheet {
    title: String,
    rows: Vec<Vec<String>>,
    header_style: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    // Sheets are kept in creation order.
    ledgers: HashMap<String, Vec<Sheet>>,
    faults: Vec<Fault>,
    calls: HashMap<Operation, usize>,
}

impl State {
    fn enter(&mut self, operation: Operation) -> Result<(), StoreError> {
        *self.calls.entry(operation).or_default() += 1;

        let injected = self
            .faults
            .iter_mut()
            .filter(|f| f.operation() == operation)
            .find_map(Fault::trigger);
        self.faults.retain(|f| !f.is_spent());

        match injected {
            Some(error) => {
                debug!(?operation, error = %error, "Injected store failure");
                Err(error)
            }
            None => Ok(()),
        }
    }

    fn sheets(&self, ledger: &str) -> Result<&Vec<Sheet>, StoreError> {
        self.ledgers
            .get(ledger)
            .ok_or_else(|| StoreError::not_found(format!("ledger {ledger}")))
    }

    fn sheet(&self, period: &PeriodHandle) -> Result<&Sheet, StoreError> {
        self.sheets(period.ledger())?
            .iter()
            .find(|s| s.title == period.title())
            .ok_or_else(|| StoreError::not_found(format!("period {}", period.title())))
    }

    fn sheet_mut(&mut self, period: &PeriodHandle) -> Result<&mut Sheet, StoreError> {
        self.ledgers
            .get_mut(period.ledger())
            .ok_or_else(|| StoreError::not_found(format!("ledger {}", period.ledger())))?
            .iter_mut()
            .find(|s| s.title == period.title())
            .ok_or_else(|| StoreError::not_found(format!("period {}", period.title())))
    }
}

/// In-process [`TabularStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Creates a store with no ledgers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding an empty ledger for each name.
    #[must_use]
    pub fn with_ledgers<I, T>(names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let ledgers = names
            .into_iter()
            .map(|name| (name.into(), Vec::new()))
            .collect();
        Self {
            state: Mutex::new(State {
                ledgers,
                ..State::default()
            }),
        }
    }

    /// Adds a period with the given rows, bypassing the engine.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown ledger and `AlreadyExists` for a
    /// duplicate title.
    pub fn seed_period(
        &self,
        ledger: &str,
        title: &str,
        rows: Vec<Vec<String>>,
    ) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let sheets = state
            .ledgers
            .get_mut(ledger)
            .ok_or_else(|| StoreError::not_found(format!("ledger {ledger}")))?;
        if sheets.iter().any(|s| s.title == title) {
            return Err(StoreError::already_exists(format!("period {title}")));
        }
        sheets.push(Sheet {
            title: title.to_string(),
            rows,
            header_style: None,
        });
        Ok(())
    }

    /// Returns a copy of every row of a period, or `None` if it is missing.
    #[must_use]
    pub fn rows(&self, ledger: &str, title: &str) -> Option<Vec<Vec<String>>> {
        let state = self.lock().ok()?;
        let sheet = state.sheets(ledger).ok()?.iter().find(|s| s.title == title)?;
        Some(sheet.rows.clone())
    }

    /// Returns the range styled as a period's header, if any.
    #[must_use]
    pub fn header_style(&self, ledger: &str, title: &str) -> Option<String> {
        let state = self.lock().ok()?;
        let sheet = state.sheets(ledger).ok()?.iter().find(|s| s.title == title)?;
        sheet.header_style.clone()
    }

    /// Queues an injected failure.
    pub fn inject(&self, fault: Fault) {
        if let Ok(mut state) = self.lock() {
            state.faults.push(fault);
        }
    }

    /// Drops every queued failure.
    pub fn clear_faults(&self) {
        if let Ok(mut state) = self.lock() {
            state.faults.clear();
        }
    }

    /// Returns how many times `operation` was called, failed calls included.
    #[must_use]
    pub fn calls(&self, operation: Operation) -> usize {
        self.lock()
            .map(|state| state.calls.get(&operation).copied().unwrap_or_default())
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::unavailable("store state poisoned"))
    }
}

fn trim_trailing_empty(mut cells: Vec<String>) -> Vec<String> {
    while cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells
}

impl TabularStore for MemoryStore {
    fn open_ledger(&self, name: &str) -> Result<LedgerHandle, StoreError> {
        let mut state = self.lock()?;
        state.enter(Operation::OpenLedger)?;
        state.sheets(name)?;
        Ok(LedgerHandle::new(name))
    }

    fn list_periods(&self, ledger: &LedgerHandle) -> Result<Vec<String>, StoreError> {
        let mut state = self.lock()?;
        state.enter(Operation::ListPeriods)?;
        Ok(state
            .sheets(ledger.name())?
            .iter()
            .map(|s| s.title.clone())
            .collect())
    }

    fn get_period(&self, ledger: &LedgerHandle, title: &str) -> Result<PeriodHandle, StoreError> {
        let mut state = self.lock()?;
        state.enter(Operation::GetPeriod)?;
        let handle = PeriodHandle::new(ledger, title);
        state.sheet(&handle)?;
        Ok(handle)
    }

    fn create_period(
        &self,
        ledger: &LedgerHandle,
        title: &str,
        row_capacity: u32,
        column_capacity: u32,
    ) -> Result<PeriodHandle, StoreError> {
        let mut state = self.lock()?;
        state.enter(Operation::CreatePeriod)?;
        let sheets = state
            .ledgers
            .get_mut(ledger.name())
            .ok_or_else(|| StoreError::not_found(format!("ledger {}", ledger.name())))?;
        if sheets.iter().any(|s| s.title == title) {
            return Err(StoreError::already_exists(format!("period {title}")));
        }
        sheets.push(Sheet {
            title: title.to_string(),
            rows: Vec::with_capacity(row_capacity as usize),
            header_style: None,
        });
        trace!(ledger = ledger.name(), title, row_capacity, column_capacity, "Created sheet");
        Ok(PeriodHandle::new(ledger, title))
    }

    fn append_row(&self, period: &PeriodHandle, values: &[String]) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        state.enter(Operation::AppendRow)?;
        let sheet = state.sheet_mut(period)?;
        while sheet
            .rows
            .last()
            .is_some_and(|row| row.iter().all(String::is_empty))
        {
            sheet.rows.pop();
        }
        sheet.rows.push(values.to_vec());
        Ok(())
    }

    fn read_column(&self, period: &PeriodHandle, column: usize) -> Result<Vec<String>, StoreError> {
        let mut state = self.lock()?;
        state.enter(Operation::ReadColumn)?;
        let sheet = state.sheet(period)?;
        let cells = sheet
            .rows
            .iter()
            .map(|row| {
                column
                    .checked_sub(1)
                    .and_then(|i| row.get(i))
                    .cloned()
                    .unwrap_or_default()
            })
            .collect();
        Ok(trim_trailing_empty(cells))
    }

    fn read_row(&self, period: &PeriodHandle, row: usize) -> Result<Vec<String>, StoreError> {
        let mut state = self.lock()?;
        state.enter(Operation::ReadRow)?;
        let sheet = state.sheet(period)?;
        let cells = row
            .checked_sub(1)
            .and_then(|i| sheet.rows.get(i))
            .cloned()
            .unwrap_or_default();
        Ok(trim_trailing_empty(cells))
    }

    fn set_header_style(&self, period: &PeriodHandle, range: &str) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        state.enter(Operation::SetHeaderStyle)?;
        state.sheet_mut(period)?.header_style = Some(range.to_string());
        Ok(())
    }
}
