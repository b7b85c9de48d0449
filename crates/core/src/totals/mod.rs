//! Monthly and year-to-date totals.
//!
//! Totals are recomputed on demand from the stored cells and never
//! persisted. Reads are paced with a fixed delay to stay under the
//! store's request quota.

pub mod aggregator;
pub mod snapshot;

#[cfg(test)]
mod props;

pub use aggregator::{ReadPacer, TotalsAggregator};
pub use snapshot::TotalsSnapshot;
