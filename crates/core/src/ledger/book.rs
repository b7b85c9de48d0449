//! An opened ledger: its kind paired with the store handle.

use tracing::debug;
use vatbook_shared::config::LedgerConfig;

use super::error::LedgerError;
use super::types::LedgerKind;
use crate::store::{LedgerHandle, TabularStore};

/// A ledger opened in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    kind: LedgerKind,
    handle: LedgerHandle,
}

impl Ledger {
    /// Opens the store ledger configured for `kind`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::StoreUnavailable` if the store cannot open it.
    pub fn open<S: TabularStore + ?Sized>(
        store: &S,
        kind: LedgerKind,
        config: &LedgerConfig,
    ) -> Result<Self, LedgerError> {
        let name = kind.store_name(config);
        let handle = store.open_ledger(name).map_err(|e| e.for_ledger(kind))?;
        debug!(ledger = %kind, store_name = name, "Opened ledger");
        Ok(Self { kind, handle })
    }

    /// Pairs an existing handle with its kind.
    #[must_use]
    pub fn from_handle(kind: LedgerKind, handle: LedgerHandle) -> Self {
        Self { kind, handle }
    }

    /// Returns the ledger kind.
    #[must_use]
    pub fn kind(&self) -> LedgerKind {
        self.kind
    }

    /// Returns the store handle.
    #[must_use]
    pub fn handle(&self) -> &LedgerHandle {
        &self.handle
    }
}
