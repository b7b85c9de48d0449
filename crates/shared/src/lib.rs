//! Shared configuration and value types for Vatbook.
//!
//! This crate provides common types used across all other crates:
//! - Calendar month titles naming ledger periods
//! - Monetary amount parsing and formatting with decimal precision
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
pub use types::{
    AMOUNT_DECIMAL_PLACES, AmountError, PeriodTitle, UnknownMonth, format_amount, parse_amount,
    round_amount,
};
