//! Demo ledger seeder for Vatbook development.
//!
//! Records a quarter of sales and purchases into an in-memory store and
//! prints the monthly and year-to-date totals of both ledgers as JSON.
//!
//! Usage: cargo run --bin seeder

use std::collections::BTreeMap;

use anyhow::Context;
use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vatbook_core::ledger::FixedClock;
use vatbook_core::{LedgerKind, ScriptedPrompt, TotalsSnapshot, TransactionDraft, VatEngine, VatRate};
use vatbook_shared::AppConfig;
use vatbook_store::MemoryStore;

/// One seeded transaction: (month, day, details, gross in cents, rate).
type Seed = (u32, u32, &'static str, i64, VatRate);

const SALES: [Seed; 5] = [
    (1, 9, "Consulting", 12_300, VatRate::Standard),
    (1, 23, "Training day", 61_500, VatRate::Standard),
    (2, 6, "Catering", 22_700, VatRate::Reduced),
    (2, 20, "Books", 5_000, VatRate::Zero),
    (3, 14, "Guest rooms", 43_600, VatRate::SecondReduced),
];

const PURCHASES: [Seed; 4] = [
    (1, 4, "Laptop", 147_600, VatRate::Standard),
    (2, 11, "Electricity", 9_080, VatRate::Reduced),
    (3, 2, "Software licence (EU)", 30_000, VatRate::Zero),
    (3, 27, "Hotel", 21_800, VatRate::SecondReduced),
];

#[derive(Serialize)]
struct LedgerReport {
    /// Periods in ledger order, not alphabetical.
    months: Vec<(String, BTreeMap<&'static str, Decimal>)>,
    year_to_date: BTreeMap<&'static str, Decimal>,
}

fn labelled(kind: LedgerKind, totals: &TotalsSnapshot) -> BTreeMap<&'static str, Decimal> {
    totals.labelled(kind).into_iter().collect()
}

fn seed(
    store: &MemoryStore,
    config: &AppConfig,
    kind: LedgerKind,
    year: i32,
    seeds: &[Seed],
) -> anyhow::Result<()> {
    for &(month, day, details, cents, rate) in seeds {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .with_context(|| format!("invalid seed date {day}/{month}/{year}"))?;
        let engine = VatEngine::with_clock(store, config.clone(), FixedClock(date));
        let draft = TransactionDraft::new(details, Decimal::new(cents, 2), rate);

        // The first transaction of a ledger has nothing to continue from
        let tx = engine.record_transaction(kind, &draft, |_| Some("1".to_string()))?;
        info!(ledger = %kind, invoice = tx.invoice_number, details, "Seeded transaction");
    }
    Ok(())
}

fn report(engine: &VatEngine<&MemoryStore>, kind: LedgerKind) -> anyhow::Result<LedgerReport> {
    let months = engine
        .monthly_breakdown(kind)?
        .into_iter()
        .map(|(title, totals)| (title, labelled(kind, &totals)))
        .collect();
    let year_to_date = labelled(kind, &engine.year_to_date_totals(kind)?);
    Ok(LedgerReport {
        months,
        year_to_date,
    })
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // MemoryStore has no read quota to respect
    config.pacing.read_delay_ms = 0;

    let store = MemoryStore::with_ledgers([
        config.ledgers.sales.clone(),
        config.ledgers.purchases.clone(),
    ]);
    let year = Local::now().year();

    info!("Seeding sales ledger...");
    seed(&store, &config, LedgerKind::Sales, year, &SALES)?;
    info!("Seeding purchases ledger...");
    seed(&store, &config, LedgerKind::Purchases, year, &PURCHASES)?;

    let engine = VatEngine::new(&store, config.clone());

    // One more sale through the operator prompt, with a typo corrected
    let mut prompt = ScriptedPrompt::new(["Workshop", "1,230", "1230.00", "23%"]);
    let draft = engine.collect_transaction(&mut prompt)?;
    let tx = engine.record_transaction(LedgerKind::Sales, &draft, |_| Some("1".to_string()))?;
    info!(
        invoice = tx.invoice_number,
        period = %tx.period,
        rejected = prompt.rejections().len(),
        "Recorded prompted transaction"
    );

    for entry in engine.rate_table() {
        info!(rate = %entry.rate, "{}", entry.description);
    }

    let mut output = BTreeMap::new();
    for kind in LedgerKind::ALL {
        output.insert(kind.as_str(), report(&engine, kind)?);
    }
    println!("{}", serde_json::to_string_pretty(&output)?);

    info!("Seeding complete!");
    Ok(())
}
