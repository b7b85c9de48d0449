//! Ledger kinds and the fixed period column schema.
//!
//! Both ledgers share one nine-column layout. Only the labels differ: the
//! total column reads "Sales" or "Purchases" in summaries, and the last
//! column is "Exempt" for sales and "Intra-EU" for purchases.

use serde::{Deserialize, Serialize};

use vatbook_shared::config::LedgerConfig;

/// One of the two transaction streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerKind {
    /// Sales ledger.
    Sales,
    /// Purchases ledger.
    Purchases,
}

impl LedgerKind {
    /// Both ledgers in menu order.
    pub const ALL: [Self; 2] = [Self::Sales, Self::Purchases];

    /// Returns the lowercase ledger name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Purchases => "purchases",
        }
    }

    /// Returns the name under which this ledger is opened in the store.
    #[must_use]
    pub fn store_name<'c>(&self, config: &'c LedgerConfig) -> &'c str {
        match self {
            Self::Sales => &config.sales,
            Self::Purchases => &config.purchases,
        }
    }

    /// Label of the gross total in summaries.
    #[must_use]
    pub const fn total_label(&self) -> &'static str {
        match self {
            Self::Sales => "Sales",
            Self::Purchases => "Purchases",
        }
    }

    /// Label of the zero-rated column.
    #[must_use]
    pub const fn exempt_label(&self) -> &'static str {
        match self {
            Self::Sales => "Exempt",
            Self::Purchases => "Intra-EU",
        }
    }

    /// Header row written to every new period of this ledger.
    #[must_use]
    pub fn header_row(&self) -> Vec<String> {
        Column::ALL.iter().map(|c| c.header(*self).to_string()).collect()
    }
}

impl std::fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LedgerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sales" => Ok(Self::Sales),
            "purchases" => Ok(Self::Purchases),
            _ => Err(format!("Unknown ledger: {s}")),
        }
    }
}

/// Columns of a period sheet, in persisted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    /// Transaction date, `DD/MM/YYYY`.
    Date,
    /// Free-text details.
    Details,
    /// Invoice number.
    Invoice,
    /// Gross total including VAT.
    Total,
    /// VAT at 23%.
    StandardVat,
    /// VAT at 13.5%.
    ReducedVat,
    /// VAT at 9%.
    SecondReducedVat,
    /// VAT of whichever rate applied.
    CombinedVat,
    /// Zero-rated gross total.
    Exempt,
}

impl Column {
    /// All columns in persisted order.
    pub const ALL: [Self; 9] = [
        Self::Date,
        Self::Details,
        Self::Invoice,
        Self::Total,
        Self::StandardVat,
        Self::ReducedVat,
        Self::SecondReducedVat,
        Self::CombinedVat,
        Self::Exempt,
    ];

    /// Returns the 1-based column index used by the store.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Date => 1,
            Self::Details => 2,
            Self::Invoice => 3,
            Self::Total => 4,
            Self::StandardVat => 5,
            Self::ReducedVat => 6,
            Self::SecondReducedVat => 7,
            Self::CombinedVat => 8,
            Self::Exempt => 9,
        }
    }

    /// Returns the header text for this column in the given ledger.
    #[must_use]
    pub const fn header(&self, ledger: LedgerKind) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Details => "Details",
            Self::Invoice => "Invoice",
            Self::Total => "Total",
            Self::StandardVat => "VAT 23%",
            Self::ReducedVat => "VAT 13.5%",
            Self::SecondReducedVat => "VAT 9%",
            Self::CombinedVat => "VAT",
            Self::Exempt => ledger.exempt_label(),
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exempt => f.write_str("Exempt/Intra-EU"),
            other => f.write_str(other.header(LedgerKind::Sales)),
        }
    }
}

/// A summable category requested from the totals screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalCategory {
    /// Gross totals including VAT.
    Total,
    /// VAT at 23%.
    StandardVat,
    /// VAT at 13.5%.
    ReducedVat,
    /// VAT at 9%.
    SecondReducedVat,
    /// All VAT combined.
    CombinedVat,
    /// Exempt or intra-EU totals.
    Exempt,
}

impl TotalCategory {
    /// All categories in display order.
    pub const ALL: [Self; 6] = [
        Self::Total,
        Self::StandardVat,
        Self::ReducedVat,
        Self::SecondReducedVat,
        Self::CombinedVat,
        Self::Exempt,
    ];

    /// Returns the column summed for this category.
    #[must_use]
    pub const fn column(&self) -> Column {
        match self {
            Self::Total => Column::Total,
            Self::StandardVat => Column::StandardVat,
            Self::ReducedVat => Column::ReducedVat,
            Self::SecondReducedVat => Column::SecondReducedVat,
            Self::CombinedVat => Column::CombinedVat,
            Self::Exempt => Column::Exempt,
        }
    }

    /// Returns the summary label for this category in the given ledger.
    #[must_use]
    pub const fn label(&self, ledger: LedgerKind) -> &'static str {
        match self {
            Self::Total => ledger.total_label(),
            Self::StandardVat => "23% VAT",
            Self::ReducedVat => "13.5% VAT",
            Self::SecondReducedVat => "9% VAT",
            Self::CombinedVat => "VAT",
            Self::Exempt => ledger.exempt_label(),
        }
    }
}
