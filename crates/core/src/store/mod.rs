//! Tabular store capability consumed by the engine.
//!
//! The engine never talks to a concrete spreadsheet service. It reaches
//! storage through [`TabularStore`], a minimal key/row surface:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      TabularStore                             │
//! ├──────────────────────────────────────────────────────────────┤
//! │ open_ledger(name)            │ append_row(period, values)     │
//! │ list_periods(ledger)         │ read_column(period, index)     │
//! │ get_period(ledger, title)    │ read_row(period, index)        │
//! │ create_period(ledger, ...)   │ set_header_style(period, range)│
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bindings report failures as [`StoreError`]; the engine translates them
//! into `LedgerError` with period context and never returns them raw.

mod error;
mod tabular;

pub use error::StoreError;
pub use tabular::{LedgerHandle, PeriodHandle, TabularStore};

#[cfg(test)]
pub use tabular::MockTabularStore;
