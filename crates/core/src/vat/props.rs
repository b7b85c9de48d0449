//! Property-based tests for VAT computation.
//!
//! - Rated transactions fill exactly one rate column and mirror it as combined VAT
//! - Zero-rated transactions carry the gross total in the exempt column only

use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

use super::calculator::VatCalculator;
use crate::ledger::Column;
use crate::rates::{RateTable, VatRate};

/// Strategy to generate gross totals (0.00 to 1,000,000.00).
fn gross_total() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate the rates that have a VAT column.
fn rated() -> impl Strategy<Value = VatRate> {
    prop_oneof![
        Just(VatRate::Standard),
        Just(VatRate::Reduced),
        Just(VatRate::SecondReduced),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The designated column holds round(gross * rate / 100, 2) and is mirrored
    /// by the combined column; the exempt column stays zero.
    #[test]
    fn prop_rated_breakdown(gross in gross_total(), rate in rated()) {
        let breakdown = VatCalculator::compute(gross, rate).unwrap();
        let expected = (gross * rate.percent() / Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);

        let designated = RateTable::column_for(rate).unwrap().column();
        prop_assert_eq!(breakdown.get(designated), Some(expected));
        prop_assert_eq!(breakdown.combined_vat, expected);
        prop_assert_eq!(breakdown.exempt, Decimal::ZERO);

        for column in [Column::StandardVat, Column::ReducedVat, Column::SecondReducedVat] {
            if column != designated {
                prop_assert_eq!(breakdown.get(column), Some(Decimal::ZERO));
            }
        }
    }

    /// Zero-rated: every VAT column is zero and exempt equals the gross total.
    #[test]
    fn prop_zero_rated_breakdown(gross in gross_total()) {
        let breakdown = VatCalculator::compute(gross, VatRate::Zero).unwrap();
        prop_assert_eq!(breakdown.exempt, gross);
        prop_assert_eq!(breakdown.standard_vat, Decimal::ZERO);
        prop_assert_eq!(breakdown.reduced_vat, Decimal::ZERO);
        prop_assert_eq!(breakdown.second_reduced_vat, Decimal::ZERO);
        prop_assert_eq!(breakdown.combined_vat, Decimal::ZERO);
    }

    /// The livestock rate always fails, whatever the amount.
    #[test]
    fn prop_livestock_unsupported(gross in gross_total()) {
        prop_assert!(VatCalculator::compute(gross, VatRate::Livestock).is_err());
    }

    /// Integer percentages outside the rate set are rejected.
    #[test]
    fn prop_unknown_percent_rejected(percent in 0i64..100, gross in gross_total()) {
        prop_assume!(![0, 9, 23].contains(&percent));
        let err = VatCalculator::compute_percent(gross, Decimal::from(percent)).unwrap_err();
        prop_assert_eq!(err.error_code(), "INVALID_RATE");
    }

    /// VAT never exceeds the gross total.
    #[test]
    fn prop_vat_bounded_by_gross(gross in gross_total(), rate in rated()) {
        let breakdown = VatCalculator::compute(gross, rate).unwrap();
        prop_assert!(breakdown.combined_vat <= gross);
        prop_assert!(breakdown.combined_vat >= Decimal::ZERO);
    }
}
