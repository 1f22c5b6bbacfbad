//! Exchange rate types.

use std::collections::BTreeMap;

use meridian_shared::types::{CurrencyCode, EntityId, FiscalYearId, RateRecordId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Composite key an exchange rate record is configured under.
///
/// A proper struct key rather than a concatenated string, so two spellings
/// of the same period can never collide or diverge.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RateKey {
    /// Entity the rate applies to.
    pub entity: EntityId,
    /// Currency being converted from.
    pub currency: CurrencyCode,
    /// Financial year the rate is scoped to.
    pub fiscal_year: FiscalYearId,
}

impl std::fmt::Display for RateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "entity {} currency {} financial year {}",
            self.entity, self.currency, self.fiscal_year
        )
    }
}

/// Configured exchange rates for one (entity, currency, financial year).
///
/// Rates are expressed as local-currency units per one unit of the common
/// reporting currency. Opening and closing bracket the period; monthly
/// overrides pin the rate actually observed in a given month and stay
/// stable even as the closing rate moves over the life of the period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRateRecord {
    /// Unique identifier.
    pub id: RateRecordId,
    /// The (entity, currency, financial year) this record belongs to.
    pub key: RateKey,
    /// Rate at the start of the period.
    pub opening_rate: Option<Decimal>,
    /// Rate at the end of the period.
    pub closing_rate: Option<Decimal>,
    /// Per-month overrides, keyed by month position within the period (1-12).
    pub monthly: BTreeMap<u32, Decimal>,
}

impl ExchangeRateRecord {
    /// Creates a record with the given endpoint rates and no overrides.
    #[must_use]
    pub fn new(
        id: RateRecordId,
        key: RateKey,
        opening_rate: Option<Decimal>,
        closing_rate: Option<Decimal>,
    ) -> Self {
        Self {
            id,
            key,
            opening_rate,
            closing_rate,
            monthly: BTreeMap::new(),
        }
    }

    /// Sets a monthly override, replacing any previous value for the month.
    pub fn set_monthly(&mut self, month: u32, rate: Decimal) {
        self.monthly.insert(month, rate);
    }

    /// Builder-style variant of [`set_monthly`](Self::set_monthly).
    #[must_use]
    pub fn with_monthly(mut self, month: u32, rate: Decimal) -> Self {
        self.set_monthly(month, rate);
        self
    }
}

/// How a resolved rate was selected, kept for audit trails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateBasis {
    /// A monthly override was configured for the record's month.
    MonthlyOverride,
    /// The period's closing rate (Balance Sheet).
    Closing,
    /// Arithmetic mean of opening and closing (Profit & Loss).
    OpeningClosingAverage,
    /// Record already denominated in the reporting currency; rate is 1.
    Parity,
}

/// A successfully resolved rate together with its selection basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRate {
    /// Local-currency units per one unit of the reporting currency.
    pub rate: Decimal,
    /// How the rate was selected.
    pub basis: RateBasis,
}

/// Maps an English month name (or its three-letter form) to its calendar
/// number.
///
/// Monthly override rows arrive from the rate-management collaborator with
/// month names like "April"; the core keys overrides by number.
#[must_use]
pub fn month_number_from_name(name: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];
    let normalized = name.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return None;
    }
    MONTHS
        .iter()
        .position(|m| *m == normalized || (normalized.len() == 3 && m.starts_with(&normalized)))
        .and_then(|i| u32::try_from(i + 1).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[rstest]
    #[case("April", Some(4))]
    #[case("april", Some(4))]
    #[case(" December ", Some(12))]
    #[case("jan", Some(1))]
    #[case("Sep", Some(9))]
    #[case("", None)]
    #[case("Smarch", None)]
    fn test_month_number_from_name(#[case] name: &str, #[case] expected: Option<u32>) {
        assert_eq!(month_number_from_name(name), expected);
    }

    #[test]
    fn test_set_monthly_replaces_same_month() {
        let key = RateKey {
            entity: EntityId::from_uuid(Uuid::from_u128(1)),
            currency: CurrencyCode::new("USD"),
            fiscal_year: FiscalYearId::from_uuid(Uuid::from_u128(2)),
        };
        let mut record = ExchangeRateRecord::new(RateRecordId::new(), key, None, None);
        record.set_monthly(3, dec!(81.00));
        record.set_monthly(3, dec!(81.50));
        assert_eq!(record.monthly.get(&3), Some(&dec!(81.50)));
        assert_eq!(record.monthly.len(), 1);
    }
}
