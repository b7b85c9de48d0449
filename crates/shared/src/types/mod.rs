//! Common types used across the application.

pub mod amount;
pub mod month;

pub use amount::{AMOUNT_DECIMAL_PLACES, AmountError, format_amount, parse_amount, round_amount};
pub use month::{PeriodTitle, UnknownMonth};
