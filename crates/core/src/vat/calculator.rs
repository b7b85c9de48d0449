//! VAT calculator.
//!
//! CRITICAL: Rounding strategy:
//! - VAT = gross * rate / 100, rounded to 2 decimal places
//! - Use banker's rounding (round half to even)
//! - The gross total is never rounded; it is validated to have at most 2 places

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vatbook_shared::{AMOUNT_DECIMAL_PLACES, parse_amount, round_amount};

use crate::ledger::{Column, LedgerError};
use crate::rates::{RateColumn, RateTable, VatRate};

/// Amounts for the five VAT-related columns of a ledger row.
///
/// Exactly one of the rate columns or the exempt column is non-zero for a
/// non-zero gross total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VatBreakdown {
    /// VAT at 23%.
    pub standard_vat: Decimal,
    /// VAT at 13.5%.
    pub reduced_vat: Decimal,
    /// VAT at 9%.
    pub second_reduced_vat: Decimal,
    /// VAT of the applied rate.
    pub combined_vat: Decimal,
    /// Gross total of a zero-rated transaction.
    pub exempt: Decimal,
}

impl VatBreakdown {
    /// Columns covered by a breakdown, in persisted order.
    pub const COLUMNS: [Column; 5] = [
        Column::StandardVat,
        Column::ReducedVat,
        Column::SecondReducedVat,
        Column::CombinedVat,
        Column::Exempt,
    ];

    /// Returns the amount for `column`, or `None` for non-VAT columns.
    #[must_use]
    pub fn get(&self, column: Column) -> Option<Decimal> {
        match column {
            Column::StandardVat => Some(self.standard_vat),
            Column::ReducedVat => Some(self.reduced_vat),
            Column::SecondReducedVat => Some(self.second_reduced_vat),
            Column::CombinedVat => Some(self.combined_vat),
            Column::Exempt => Some(self.exempt),
            Column::Date | Column::Details | Column::Invoice | Column::Total => None,
        }
    }

    /// Returns the amounts aligned with [`Self::COLUMNS`].
    #[must_use]
    pub fn cells(&self) -> [Decimal; 5] {
        [
            self.standard_vat,
            self.reduced_vat,
            self.second_reduced_vat,
            self.combined_vat,
            self.exempt,
        ]
    }

    /// Infers the rate that produced this breakdown.
    ///
    /// A breakdown with no VAT is reported as zero-rated. This includes a
    /// rated row whose VAT rounded to 0.00, such as 0.01 at 23%: nothing in
    /// the persisted cells records which rated column it belonged to. The
    /// amounts themselves are unaffected, so totals stay exact.
    #[must_use]
    pub fn inferred_rate(&self) -> VatRate {
        if !self.standard_vat.is_zero() {
            VatRate::Standard
        } else if !self.reduced_vat.is_zero() {
            VatRate::Reduced
        } else if !self.second_reduced_vat.is_zero() {
            VatRate::SecondReduced
        } else {
            VatRate::Zero
        }
    }
}

/// Pure VAT computation.
pub struct VatCalculator;

impl VatCalculator {
    /// Returns `round(gross * rate / 100, 2)` with banker's rounding.
    #[must_use]
    pub fn vat_amount(gross_total: Decimal, rate: VatRate) -> Decimal {
        round_amount(gross_total * rate.percent() / Decimal::ONE_HUNDRED)
    }

    /// Checks that a gross total is non-negative with at most 2 decimal places.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` otherwise.
    pub fn validate_gross(gross_total: Decimal) -> Result<Decimal, LedgerError> {
        if gross_total < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(format!(
                "amount cannot be negative: {gross_total}"
            )));
        }
        if gross_total.scale() > AMOUNT_DECIMAL_PLACES {
            return Err(LedgerError::InvalidAmount(format!(
                "amount '{gross_total}' has more than 2 decimal places"
            )));
        }
        Ok(gross_total)
    }

    /// Parses and validates a gross total typed by the operator.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` if the text is not a valid amount.
    pub fn parse_gross(raw: &str) -> Result<Decimal, LedgerError> {
        parse_amount(raw).map_err(|e| LedgerError::InvalidAmount(e.to_string()))
    }

    /// Computes the per-column breakdown of a transaction.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `gross_total` is negative or too precise.
    /// - `UnsupportedRateForSchema` for a rate without a ledger column (4.8%).
    pub fn compute(gross_total: Decimal, rate: VatRate) -> Result<VatBreakdown, LedgerError> {
        let gross_total = Self::validate_gross(gross_total)?;
        let column = RateTable::column_for(rate)
            .ok_or(LedgerError::UnsupportedRateForSchema(rate))?;

        let mut breakdown = VatBreakdown::default();
        let vat = Self::vat_amount(gross_total, rate);
        match column {
            RateColumn::StandardVat => breakdown.standard_vat = vat,
            RateColumn::ReducedVat => breakdown.reduced_vat = vat,
            RateColumn::SecondReducedVat => breakdown.second_reduced_vat = vat,
            RateColumn::Exempt => {
                breakdown.exempt = gross_total;
                return Ok(breakdown);
            }
        }
        breakdown.combined_vat = vat;
        Ok(breakdown)
    }

    /// Computes a breakdown from a numeric percentage.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRate` if `percent` is not one of the five rates,
    /// otherwise as [`Self::compute`].
    pub fn compute_percent(
        gross_total: Decimal,
        percent: Decimal,
    ) -> Result<VatBreakdown, LedgerError> {
        let rate = VatRate::from_percent(percent)
            .ok_or_else(|| LedgerError::InvalidRate(percent.to_string()))?;
        Self::compute(gross_total, rate)
    }
}
