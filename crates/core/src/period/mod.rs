//! Month-scoped period sheets.
//!
//! Each ledger holds one period per calendar month, titled with the month's
//! full English name. The first row of a period is the header row of its
//! ledger; data rows follow in the order they were appended.

pub mod registry;

pub use registry::{Period, PeriodRegistry};
