//! Property-based tests for totals aggregation.
//!
//! - Year-to-date totals equal the element-wise sum of the monthly totals
//! - Single-category totals agree with the full snapshots

use std::collections::HashMap;

use proptest::prelude::*;
use rust_decimal::Decimal;
use vatbook_shared::config::PeriodConfig;
use vatbook_shared::format_amount;

use super::aggregator::{ReadPacer, TotalsAggregator};
use super::snapshot::TotalsSnapshot;
use crate::ledger::{Ledger, LedgerKind, TotalCategory};
use crate::period::PeriodRegistry;
use crate::store::{LedgerHandle, MockTabularStore, PeriodHandle};

const TITLES: [&str; 4] = ["January", "February", "March", "April"];

/// Strategy to generate the cells of one period: 6 columns of 0-8 amounts.
fn period_cells() -> impl Strategy<Value = Vec<Vec<Decimal>>> {
    prop::collection::vec(
        prop::collection::vec((0i64..10_000_000i64).prop_map(|c| Decimal::new(c, 2)), 0..8),
        6,
    )
}

/// Builds a store whose periods hold `data[period][category]` below a header.
fn store_for(data: Vec<Vec<Vec<Decimal>>>) -> MockTabularStore {
    let titles: Vec<String> = TITLES[..data.len()].iter().map(|t| (*t).to_string()).collect();
    let mut columns: HashMap<(String, usize), Vec<String>> = HashMap::new();
    for (title, period) in titles.iter().zip(&data) {
        for (category, cells) in TotalCategory::ALL.iter().zip(period) {
            let mut column = vec!["header".to_string()];
            column.extend(cells.iter().map(|d| format_amount(*d)));
            columns.insert((title.clone(), category.column().index()), column);
        }
    }

    let mut store = MockTabularStore::new();
    store
        .expect_list_periods()
        .returning(move |_| Ok(titles.clone()));
    store
        .expect_get_period()
        .returning(|ledger, title| Ok(PeriodHandle::new(ledger, title)));
    store.expect_read_column().returning(move |period, index| {
        Ok(columns[&(period.title().to_string(), index)].clone())
    });
    store
}

fn sales() -> Ledger {
    Ledger::from_handle(LedgerKind::Sales, LedgerHandle::new("vat_sales"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_ytd_is_sum_of_months(data in prop::collection::vec(period_cells(), 0..4)) {
        let months = data.len();
        let store = store_for(data);
        let layout = PeriodConfig::default();
        let totals = TotalsAggregator::new(PeriodRegistry::new(&store, &layout), ReadPacer::disabled());
        let ledger = sales();

        let mut expected = TotalsSnapshot::zero();
        for title in &TITLES[..months] {
            expected.add(&totals.monthly_totals(&ledger, title).unwrap());
        }

        prop_assert_eq!(totals.year_to_date_totals(&ledger).unwrap(), expected);
    }

    #[test]
    fn prop_single_category_matches_snapshot(data in prop::collection::vec(period_cells(), 1..4)) {
        let store = store_for(data);
        let layout = PeriodConfig::default();
        let totals = TotalsAggregator::new(PeriodRegistry::new(&store, &layout), ReadPacer::disabled());
        let ledger = sales();

        let ytd = totals.year_to_date_totals(&ledger).unwrap();
        let january = totals.monthly_totals(&ledger, "January").unwrap();
        for category in TotalCategory::ALL {
            prop_assert_eq!(totals.year_to_date_total(&ledger, category).unwrap(), ytd.get(category));
            prop_assert_eq!(
                totals.monthly_total(&ledger, "January", category).unwrap(),
                january.get(category)
            );
        }
    }
}
