//! In-process tabular store for Vatbook.
//!
//! This crate provides:
//! - `MemoryStore`, a [`TabularStore`] keeping ledgers in memory
//! - Fault injection for exercising the engine's failure paths
//!
//! Nothing is written to disk.
//!
//! [`TabularStore`]: vatbook_core::store::TabularStore

pub mod fault;
pub mod memory;

pub use fault::{Fault, Operation};
pub use memory::MemoryStore;
