//! VAT ledger engine for Vatbook.
//!
//! This crate contains the business logic of the sales and purchases VAT
//! ledgers with ZERO storage dependencies. Storage is reached through the
//! [`store::TabularStore`] trait.
//!
//! # Modules
//!
//! - `rates` - Valid VAT rates and their ledger columns
//! - `vat` - VAT computation with banker's rounding
//! - `ledger` - Ledger kinds, period schema, transactions, errors
//! - `store` - The tabular store trait and its error translation
//! - `period` - Month-scoped period sheets
//! - `invoice` - Invoice number allocation
//! - `recorder` - Operator input loop and transaction recording
//! - `totals` - Monthly and year-to-date totals
//! - `engine` - Facade exposing the operations to the menu layer

pub mod engine;
pub mod invoice;
pub mod ledger;
pub mod period;
pub mod rates;
pub mod recorder;
pub mod store;
pub mod totals;
pub mod vat;

pub use engine::VatEngine;
pub use ledger::{LedgerError, LedgerKind, TotalCategory, Transaction};
pub use rates::VatRate;
pub use recorder::{ScriptedPrompt, TransactionDraft, TransactionPrompt};
pub use totals::TotalsSnapshot;
