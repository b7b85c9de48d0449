//! Integration tests for the engine against `MemoryStore`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use rstest::rstest;

use vatbook_core::ledger::{Column, FixedClock};
use vatbook_core::recorder::InputField;
use vatbook_core::{
    LedgerError, LedgerKind, ScriptedPrompt, TotalCategory, TotalsSnapshot, TransactionDraft,
    VatEngine, VatRate,
};
use vatbook_shared::AppConfig;
use vatbook_shared::config::PacingConfig;
use vatbook_store::{MemoryStore, Operation};

fn october() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn config() -> AppConfig {
    AppConfig {
        pacing: PacingConfig { read_delay_ms: 0 },
        ..AppConfig::default()
    }
}

fn engine_on(date: NaiveDate) -> VatEngine<MemoryStore> {
    let store = MemoryStore::with_ledgers(["vat_sales", "vat_purchases"]);
    VatEngine::with_clock(store, config(), FixedClock(date))
}

fn cells(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

// ============================================================================
// Recording
// ============================================================================

#[test]
fn test_first_sales_transactions() {
    let engine = engine_on(october());

    // An empty ledger has no number to continue from, so the operator starts at 1
    let mut asked = false;
    let draft = TransactionDraft::new("Consulting", dec!(123.00), VatRate::Standard);
    let first = engine
        .record_transaction(LedgerKind::Sales, &draft, |_| {
            asked = true;
            Some("1".into())
        })
        .expect("first transaction");

    assert!(asked);
    assert_eq!(first.invoice_number, 1);
    assert_eq!(first.period, "October");
    assert_eq!(first.breakdown.standard_vat, dec!(28.29));
    assert_eq!(first.breakdown.combined_vat, dec!(28.29));
    assert_eq!(first.breakdown.exempt, Decimal::ZERO);

    let draft = TransactionDraft::new("Books", dec!(50.00), VatRate::Zero);
    let second = engine
        .record_transaction(LedgerKind::Sales, &draft, |_| panic!("allocator had a number"))
        .expect("second transaction");

    assert_eq!(second.invoice_number, 2);
    assert_eq!(second.breakdown.combined_vat, Decimal::ZERO);
    assert_eq!(second.breakdown.exempt, dec!(50.00));

    let rows = engine.store().rows("vat_sales", "October").unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], LedgerKind::Sales.header_row());
    assert_eq!(
        rows[1],
        cells(&[
            "19/10/2026",
            "Consulting",
            "1",
            "123.00",
            "28.29",
            "0.00",
            "0.00",
            "28.29",
            "0.00"
        ])
    );
    assert_eq!(
        rows[2],
        cells(&[
            "19/10/2026",
            "Books",
            "2",
            "50.00",
            "0.00",
            "0.00",
            "0.00",
            "0.00",
            "50.00"
        ])
    );
    assert_eq!(
        engine.store().header_style("vat_sales", "October").as_deref(),
        Some("A1:I1")
    );
}

#[test]
fn test_empty_ledger_uses_manual_invoice() {
    let engine = engine_on(october());
    assert_eq!(
        engine.next_invoice_number(LedgerKind::Sales),
        Err(LedgerError::InvoiceNumberUnavailable(LedgerKind::Sales))
    );

    // The menu layer asks for a number and the engine continues from it
    let mut asked = false;
    let draft = TransactionDraft::new("Hotel", dec!(109.00), VatRate::SecondReduced);
    let tx = engine
        .record_transaction(LedgerKind::Purchases, &draft, |_| {
            asked = true;
            Some("1001".into())
        })
        .expect("recorded");

    assert!(asked);
    assert_eq!(tx.invoice_number, 1001);
    assert_eq!(tx.breakdown.second_reduced_vat, dec!(9.81));
    assert_eq!(engine.next_invoice_number(LedgerKind::Purchases), Ok(1002));
}

#[test]
fn test_manual_invoice_is_asked_again_until_valid() {
    let engine = engine_on(october());
    let draft = TransactionDraft::new("Import", dec!(10.00), VatRate::Zero);

    let mut answers = vec!["INV-1", "7"].into_iter();
    let mut rejections = Vec::new();
    let tx = engine
        .record_transaction(LedgerKind::Sales, &draft, |previous| {
            rejections.push(previous.map(LedgerError::error_code));
            answers.next().map(String::from)
        })
        .expect("recorded");

    assert_eq!(tx.invoice_number, 7);
    assert_eq!(rejections, vec![None, Some("INVALID_INVOICE_NUMBER")]);
    assert_eq!(engine.store().rows("vat_sales", "October").unwrap().len(), 2);
}

#[test]
fn test_manual_invoice_honours_max_attempts() {
    let mut config = config();
    config.input.max_attempts = 2;
    let store = MemoryStore::with_ledgers(["vat_sales", "vat_purchases"]);
    let engine = VatEngine::with_clock(store, config, FixedClock(october()));
    let draft = TransactionDraft::new("Import", dec!(10.00), VatRate::Zero);

    let err = engine
        .record_transaction(LedgerKind::Sales, &draft, |_| Some("0".into()))
        .unwrap_err();

    assert_eq!(
        err,
        LedgerError::RetryLimitExceeded {
            field: "invoice number".into(),
            attempts: 2,
        }
    );
    assert_eq!(engine.store().rows("vat_sales", "October").unwrap().len(), 1);
}

#[test]
fn test_invoice_numbers_continue_across_months() {
    let store = MemoryStore::with_ledgers(["vat_sales", "vat_purchases"]);
    store
        .seed_period(
            "vat_sales",
            "September",
            vec![
                LedgerKind::Sales.header_row(),
                cells(&["30/09/2026", "Audit", "17", "100.00", "23.00", "0.00", "0.00", "23.00", "0.00"]),
            ],
        )
        .unwrap();
    let engine = VatEngine::with_clock(store, config(), FixedClock(october()));

    let draft = TransactionDraft::new("Audit", dec!(200.00), VatRate::Standard);
    let tx = engine
        .record_transaction(LedgerKind::Sales, &draft, |_| None)
        .expect("recorded");

    // October is created empty, so September's last row decides
    assert_eq!(tx.invoice_number, 18);
    assert_eq!(
        engine.list_periods(LedgerKind::Sales).unwrap(),
        vec!["September", "October"]
    );
}

#[test]
fn test_collected_draft_is_recorded() {
    let engine = engine_on(october());
    let mut prompt = ScriptedPrompt::new(["Dinner", "€ 45,00", "45.00", "13.5"]);

    let draft = engine.collect_transaction(&mut prompt).expect("collected");
    assert_eq!(prompt.rejections(), ["INVALID_AMOUNT"]);
    assert_eq!(&prompt.asked()[1..3], [InputField::GrossTotal, InputField::GrossTotal]);

    let tx = engine
        .record_transaction(LedgerKind::Purchases, &draft, |_| Some("1".into()))
        .expect("recorded");
    // 45.00 * 13.5% = 6.075, half to even
    assert_eq!(tx.breakdown.reduced_vat, dec!(6.08));
}

// ============================================================================
// Periods
// ============================================================================

#[test]
fn test_ensure_period_twice_creates_once() {
    let engine = engine_on(october());

    let first = engine.ensure_current_period(LedgerKind::Sales).unwrap();
    let second = engine.ensure_current_period(LedgerKind::Sales).unwrap();

    assert_eq!(first, second);
    assert_eq!(engine.list_periods(LedgerKind::Sales).unwrap(), vec!["October"]);
    assert_eq!(engine.store().calls(Operation::CreatePeriod), 1);
    assert_eq!(engine.store().rows("vat_sales", "October").unwrap().len(), 1);
}

#[test]
fn test_create_period_for_other_month() {
    let engine = engine_on(october());

    let period = engine.create_period(LedgerKind::Purchases, "mar").unwrap();
    assert_eq!(period.title(), "March");
    assert_eq!(
        engine.store().rows("vat_purchases", "March").unwrap(),
        vec![LedgerKind::Purchases.header_row()]
    );

    assert_eq!(
        engine.create_period(LedgerKind::Purchases, "March"),
        Err(LedgerError::PeriodAlreadyExists {
            ledger: LedgerKind::Purchases,
            period: "March".into(),
        })
    );
    assert_eq!(
        engine.create_period(LedgerKind::Purchases, "Marchember"),
        Err(LedgerError::InvalidMonth("Marchember".into()))
    );
}

#[test]
fn test_headerless_period_is_repaired() {
    let store = MemoryStore::with_ledgers(["vat_sales", "vat_purchases"]);
    store.seed_period("vat_sales", "October", vec![]).unwrap();
    let engine = VatEngine::with_clock(store, config(), FixedClock(october()));

    engine.ensure_current_period(LedgerKind::Sales).unwrap();

    assert_eq!(
        engine.store().rows("vat_sales", "October").unwrap(),
        vec![LedgerKind::Sales.header_row()]
    );
    assert_eq!(engine.store().calls(Operation::CreatePeriod), 0);
}

// ============================================================================
// Totals
// ============================================================================

/// Records purchases in January and February, dating each with its own clock.
fn seeded_purchases(store: &MemoryStore) {
    let entries = [
        (NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(), dec!(123.00), VatRate::Standard),
        (NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(), dec!(20.00), VatRate::Zero),
        (NaiveDate::from_ymd_opt(2026, 2, 3).unwrap(), dec!(113.50), VatRate::Reduced),
        (NaiveDate::from_ymd_opt(2026, 2, 4).unwrap(), dec!(0.50), VatRate::SecondReduced),
    ];
    for (date, gross, rate) in entries {
        let engine = VatEngine::with_clock(store, config(), FixedClock(date));
        let draft = TransactionDraft::new("Supplies", gross, rate);
        engine
            .record_transaction(LedgerKind::Purchases, &draft, |_| Some("1".into()))
            .expect("seeded");
    }
}

#[test]
fn test_monthly_totals() {
    let store = MemoryStore::with_ledgers(["vat_sales", "vat_purchases"]);
    seeded_purchases(&store);
    let engine = VatEngine::with_clock(&store, config(), FixedClock(october()));

    let january = engine.monthly_totals(LedgerKind::Purchases, "January").unwrap();
    assert_eq!(january.get(TotalCategory::Total), dec!(143.00));
    assert_eq!(january.get(TotalCategory::StandardVat), dec!(28.29));
    assert_eq!(january.get(TotalCategory::CombinedVat), dec!(28.29));
    assert_eq!(january.get(TotalCategory::Exempt), dec!(20.00));

    let february = engine.monthly_totals(LedgerKind::Purchases, "feb").unwrap();
    // 113.50 * 13.5% = 15.3225; 0.50 * 9% = 0.045, half to even
    assert_eq!(february.get(TotalCategory::ReducedVat), dec!(15.32));
    assert_eq!(february.get(TotalCategory::SecondReducedVat), dec!(0.04));
    assert_eq!(february.get(TotalCategory::CombinedVat), dec!(15.36));
}

#[test]
fn test_year_to_date_is_sum_of_months() {
    let store = MemoryStore::with_ledgers(["vat_sales", "vat_purchases"]);
    seeded_purchases(&store);
    let engine = VatEngine::with_clock(&store, config(), FixedClock(october()));

    let breakdown = engine.monthly_breakdown(LedgerKind::Purchases).unwrap();
    let titles: Vec<&str> = breakdown.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(titles, vec!["January", "February"]);

    let expected: TotalsSnapshot = breakdown.iter().map(|(_, totals)| totals).sum();
    let ytd = engine.year_to_date_totals(LedgerKind::Purchases).unwrap();
    assert_eq!(ytd, expected);
    assert_eq!(ytd.get(TotalCategory::Total), dec!(257.00));
    assert_eq!(ytd.get(TotalCategory::CombinedVat), dec!(43.65));
}

#[rstest]
#[case(TotalCategory::Total, dec!(257.00))]
#[case(TotalCategory::StandardVat, dec!(28.29))]
#[case(TotalCategory::ReducedVat, dec!(15.32))]
#[case(TotalCategory::SecondReducedVat, dec!(0.04))]
#[case(TotalCategory::Exempt, dec!(20.00))]
fn test_year_to_date_single_category(#[case] category: TotalCategory, #[case] expected: Decimal) {
    let store = MemoryStore::with_ledgers(["vat_sales", "vat_purchases"]);
    seeded_purchases(&store);
    let engine = VatEngine::with_clock(&store, config(), FixedClock(october()));

    assert_eq!(
        engine.year_to_date_total(LedgerKind::Purchases, category).unwrap(),
        expected
    );
}

#[test]
fn test_empty_ledger_totals_are_zero() {
    let engine = engine_on(october());
    assert_eq!(
        engine.year_to_date_totals(LedgerKind::Sales).unwrap(),
        TotalsSnapshot::zero()
    );
    assert!(engine.monthly_breakdown(LedgerKind::Sales).unwrap().is_empty());
}

#[test]
fn test_unknown_month_totals() {
    let engine = engine_on(october());
    assert_eq!(
        engine.monthly_totals(LedgerKind::Sales, "March"),
        Err(LedgerError::PeriodNotFound {
            ledger: LedgerKind::Sales,
            period: "March".into(),
        })
    );
}

#[test]
fn test_malformed_total_cell_is_reported() {
    let store = MemoryStore::with_ledgers(["vat_sales", "vat_purchases"]);
    store
        .seed_period(
            "vat_sales",
            "May",
            vec![
                LedgerKind::Sales.header_row(),
                cells(&["02/05/2026", "Typo", "4", "1O.00", "0.00", "0.00", "0.00", "0.00", "1O.00"]),
            ],
        )
        .unwrap();
    let engine = VatEngine::with_clock(store, config(), FixedClock(october()));

    let err = engine
        .monthly_total(LedgerKind::Sales, "May", TotalCategory::Total)
        .unwrap_err();
    assert_eq!(
        err,
        LedgerError::MalformedCell {
            period: "May".into(),
            row: 2,
            column: Column::Total,
            value: "1O.00".into(),
        }
    );
}

// ============================================================================
// Reading transactions back
// ============================================================================

#[test]
fn test_period_transactions_round_trip() {
    let store = MemoryStore::with_ledgers(["vat_sales", "vat_purchases"]);
    seeded_purchases(&store);
    let engine = VatEngine::with_clock(&store, config(), FixedClock(october()));

    let february = engine
        .period_transactions(LedgerKind::Purchases, "February")
        .unwrap();
    assert_eq!(february.len(), 2);
    assert_eq!(february[0].date, NaiveDate::from_ymd_opt(2026, 2, 3).unwrap());
    assert_eq!(february[0].rate, VatRate::Reduced);
    assert_eq!(february[1].rate, VatRate::SecondReduced);
    assert_eq!(february[1].invoice_number, february[0].invoice_number + 1);
}
