//! VAT computation.
//!
//! Turns a gross total and a rate into the five amount cells of a ledger
//! row: one per VAT rate column, the combined VAT column, and the exempt
//! column.

pub mod calculator;

#[cfg(test)]
mod props;

pub use calculator::{VatBreakdown, VatCalculator};
