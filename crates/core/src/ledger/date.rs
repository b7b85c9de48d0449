//! Transaction dates and the clock that supplies them.
//!
//! Dates are persisted day-first (`DD/MM/YYYY`) and parsed back with the
//! same format. No other convention is written or accepted.

use chrono::{Local, NaiveDate};

/// The one date format written to and read from period sheets.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Formats a date for a ledger cell.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a ledger date cell.
///
/// # Errors
///
/// Returns an error if the cell is not a `DD/MM/YYYY` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
}

/// Source of "today" for new transactions.
pub trait Clock {
    /// Returns the current local date.
    fn today(&self) -> NaiveDate;
}

/// Clock reading the local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
