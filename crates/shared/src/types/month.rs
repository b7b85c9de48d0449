//! Calendar month titles used to name ledger periods.
//!
//! A period sheet is titled with the capitalised English month name
//! ("January" .. "December"). Operator input is matched case-insensitively
//! against the full name or its three-letter abbreviation.

use chrono::{Datelike, Month, NaiveDate};
use thiserror::Error;

/// Months in calendar order.
const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Input that does not name a calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a calendar month")]
pub struct UnknownMonth(pub String);

/// Title of a month-scoped period sheet (e.g. "March").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeriodTitle(Month);

impl PeriodTitle {
    /// Creates a title for the given month.
    #[must_use]
    pub const fn new(month: Month) -> Self {
        Self(month)
    }

    /// Returns the title of the month containing `date`.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        // month0() is always in 0..12
        Self(MONTHS[date.month0() as usize])
    }

    /// Parses operator input such as "march", " MAR " or "March".
    ///
    /// # Errors
    ///
    /// Returns `UnknownMonth` if the input is not a month name or abbreviation.
    pub fn parse(raw: &str) -> Result<Self, UnknownMonth> {
        let needle = raw.trim().to_lowercase();
        MONTHS
            .iter()
            .find(|m| {
                let name = m.name().to_lowercase();
                name == needle || (needle.len() == 3 && name.starts_with(&needle))
            })
            .map(|m| Self(*m))
            .ok_or_else(|| UnknownMonth(raw.trim().to_string()))
    }

    /// Returns the underlying month.
    #[must_use]
    pub const fn month(&self) -> Month {
        self.0
    }

    /// Returns the canonical title, e.g. "September".
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.0.name()
    }
}

impl std::fmt::Display for PeriodTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PeriodTitle {
    type Err = UnknownMonth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("March", Month::March)]
    #[case("march", Month::March)]
    #[case("  MARCH ", Month::March)]
    #[case("mar", Month::March)]
    #[case("Sep", Month::September)]
    #[case("december", Month::December)]
    fn test_parse_month(#[case] raw: &str, #[case] expected: Month) {
        assert_eq!(PeriodTitle::parse(raw).unwrap().month(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("Marc")]
    #[case("Smarch")]
    #[case("13")]
    fn test_parse_rejects_non_months(#[case] raw: &str) {
        assert!(PeriodTitle::parse(raw).is_err());
    }

    #[test]
    fn test_title_from_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(PeriodTitle::from_date(date).as_str(), "October");
    }

    #[test]
    fn test_display_is_capitalised_full_name() {
        assert_eq!(PeriodTitle::new(Month::February).to_string(), "February");
    }

    #[test]
    fn test_unknown_month_message() {
        let err = PeriodTitle::parse(" Smarch ").unwrap_err();
        assert_eq!(err.to_string(), "'Smarch' is not a calendar month");
    }
}
