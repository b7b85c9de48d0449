//! Static registry of valid rates, their ledger column, and where they apply.

use crate::ledger::Column;

use super::rate::VatRate;

/// Ledger column a rate's amount is written to.
///
/// Only the four columns a rate can own are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateColumn {
    /// VAT at 23%.
    StandardVat,
    /// VAT at 13.5%.
    ReducedVat,
    /// VAT at 9%.
    SecondReducedVat,
    /// Gross total of a zero-rated transaction.
    Exempt,
}

impl RateColumn {
    /// Returns the ledger column.
    #[must_use]
    pub const fn column(self) -> Column {
        match self {
            Self::StandardVat => Column::StandardVat,
            Self::ReducedVat => Column::ReducedVat,
            Self::SecondReducedVat => Column::SecondReducedVat,
            Self::Exempt => Column::Exempt,
        }
    }
}

/// One row of the rate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateEntry {
    /// The rate.
    pub rate: VatRate,
    /// Column receiving this rate's VAT. `None` when the schema has no slot.
    pub column: Option<RateColumn>,
    /// What the rate covers.
    pub description: &'static str,
}

static ENTRIES: [RateEntry; 5] = [
    RateEntry {
        rate: VatRate::Standard,
        column: Some(RateColumn::StandardVat),
        description: "Standard rate. Applies to most goods and services, including \
                      electronics, household appliances, clothing and professional services.",
    },
    RateEntry {
        rate: VatRate::Reduced,
        column: Some(RateColumn::ReducedVat),
        description: "Reduced rate. Applies to electricity, gas, restaurant services and \
                      building services such as renovation and repair of residential property.",
    },
    RateEntry {
        rate: VatRate::SecondReduced,
        column: Some(RateColumn::SecondReducedVat),
        description: "Second reduced rate for tourism and hospitality: hotel accommodation, \
                      restaurant meals, and admission to cinemas, theatres, museums and \
                      certain sports facilities.",
    },
    RateEntry {
        rate: VatRate::Livestock,
        column: None,
        description: "Livestock rate. Applies exclusively to the supply of livestock such as \
                      cattle and sheep.",
    },
    RateEntry {
        rate: VatRate::Zero,
        column: Some(RateColumn::Exempt),
        description: "Zero rate for essential goods and services: most food, children's \
                      clothing and footwear, oral medicines, and exports.",
    },
];

/// Rate registry.
pub struct RateTable;

impl RateTable {
    /// Returns every entry in display order.
    #[must_use]
    pub fn entries() -> &'static [RateEntry] {
        &ENTRIES
    }

    /// Returns the entry for `rate`.
    #[must_use]
    pub fn entry(rate: VatRate) -> &'static RateEntry {
        let index = match rate {
            VatRate::Standard => 0,
            VatRate::Reduced => 1,
            VatRate::SecondReduced => 2,
            VatRate::Livestock => 3,
            VatRate::Zero => 4,
        };
        &ENTRIES[index]
    }

    /// Returns the column receiving `rate`, if the schema has one.
    #[must_use]
    pub fn column_for(rate: VatRate) -> Option<RateColumn> {
        Self::entry(rate).column
    }
}
