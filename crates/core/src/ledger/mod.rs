//! Ledger kinds, period schema, transactions, and the engine error type.
//!
//! This module implements the shared vocabulary of the engine:
//! - Ledger kinds and the fixed nine-column period schema
//! - Opened ledgers bound to a store handle
//! - Transaction rows and the day-first date convention
//! - Error types for every engine operation

pub mod book;
pub mod date;
pub mod error;
pub mod transaction;
pub mod types;

pub use book::Ledger;
pub use date::{Clock, DATE_FORMAT, FixedClock, SystemClock, format_date, parse_date};
pub use error::LedgerError;
pub use transaction::{Transaction, parse_cell_amount};
pub use types::{Column, LedgerKind, TotalCategory};
