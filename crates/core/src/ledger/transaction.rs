//! Recorded transactions and their row representation.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vatbook_shared::format_amount;

use super::date::{format_date, parse_date};
use super::error::LedgerError;
use super::types::Column;
use crate::rates::VatRate;
use crate::vat::VatBreakdown;

/// One row of a period sheet.
///
/// Created by the recorder and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Title of the period holding the row.
    pub period: String,
    /// Date the transaction was recorded.
    pub date: NaiveDate,
    /// Free-text details.
    pub details: String,
    /// Invoice number.
    pub invoice_number: u64,
    /// Gross total including VAT.
    pub gross_total: Decimal,
    /// Rate applied.
    pub rate: VatRate,
    /// Per-column VAT amounts.
    pub breakdown: VatBreakdown,
}

impl Transaction {
    /// Returns the row written to the store, in column order.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        let mut row = vec![
            format_date(self.date),
            self.details.clone(),
            self.invoice_number.to_string(),
            format_amount(self.gross_total),
        ];
        row.extend(self.breakdown.cells().into_iter().map(format_amount));
        row
    }

    /// Reads a transaction back from a stored row.
    ///
    /// The rate is inferred from whichever VAT column is non-zero.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::MalformedCell` for the first cell that does
    /// not hold a value of its column's type.
    pub fn from_row(period: &str, row: usize, cells: &[String]) -> Result<Self, LedgerError> {
        let cell = |column: Column| {
            cells
                .get(column.index() - 1)
                .map_or("", String::as_str)
        };
        let malformed = |column: Column| LedgerError::MalformedCell {
            period: period.to_string(),
            row,
            column,
            value: cell(column).to_string(),
        };
        let amount = |column: Column| parse_cell_amount(cell(column)).ok_or_else(|| malformed(column));

        let date = parse_date(cell(Column::Date)).map_err(|_| malformed(Column::Date))?;
        let invoice_number = cell(Column::Invoice)
            .trim()
            .parse::<u64>()
            .map_err(|_| malformed(Column::Invoice))?;

        let breakdown = VatBreakdown {
            standard_vat: amount(Column::StandardVat)?,
            reduced_vat: amount(Column::ReducedVat)?,
            second_reduced_vat: amount(Column::SecondReducedVat)?,
            combined_vat: amount(Column::CombinedVat)?,
            exempt: amount(Column::Exempt)?,
        };

        Ok(Self {
            period: period.to_string(),
            date,
            details: cell(Column::Details).to_string(),
            invoice_number,
            gross_total: amount(Column::Total)?,
            rate: breakdown.inferred_rate(),
            breakdown,
        })
    }
}

/// Parses an amount cell. Blank cells count as zero.
///
/// Returns `None` for text that is not a decimal number.
#[must_use]
pub fn parse_cell_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('€').unwrap_or(trimmed).trim();
    if digits.is_empty() {
        return Some(Decimal::ZERO);
    }
    Decimal::from_str(digits).ok()
}
