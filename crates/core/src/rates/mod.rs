//! VAT rates and their mapping onto ledger columns.

pub mod rate;
pub mod table;

pub use rate::VatRate;
pub use table::{RateColumn, RateEntry, RateTable};
