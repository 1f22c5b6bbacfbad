//! Exchange rate store.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::debug;

use super::error::RateError;
use super::types::{ExchangeRateRecord, RateKey};

/// Request-scoped lookup over configured exchange rates.
///
/// Built once per conversion or consolidation batch from freshly fetched
/// configuration and discarded afterward; an in-flight computation always
/// sees a consistent snapshot. No fallback or interpolation happens here.
#[derive(Debug, Clone, Default)]
pub struct RateStore {
    records: HashMap<RateKey, ExchangeRateRecord>,
}

impl RateStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from configured records, enforcing key uniqueness.
    pub fn from_records(records: Vec<ExchangeRateRecord>) -> Result<Self, RateError> {
        let mut store = Self::new();
        for record in records {
            store.insert(record)?;
        }
        debug!(entries = store.len(), "rate store built");
        Ok(store)
    }

    /// Inserts a rate record.
    ///
    /// Rejects a duplicate (entity, currency, financial year) key, any
    /// non-positive rate, and override months outside 1-12.
    pub fn insert(&mut self, record: ExchangeRateRecord) -> Result<(), RateError> {
        for rate in record
            .opening_rate
            .iter()
            .chain(record.closing_rate.iter())
            .chain(record.monthly.values())
        {
            if *rate <= Decimal::ZERO {
                return Err(RateError::InvalidRate {
                    key: record.key.clone(),
                    rate: *rate,
                });
            }
        }
        for month in record.monthly.keys() {
            if !(1..=12).contains(month) {
                return Err(RateError::InvalidMonth {
                    key: record.key.clone(),
                    month: *month,
                });
            }
        }
        if self.records.contains_key(&record.key) {
            return Err(RateError::DuplicateRate {
                key: record.key.clone(),
            });
        }
        self.records.insert(record.key.clone(), record);
        Ok(())
    }

    /// Returns the record configured for the key, if any.
    #[must_use]
    pub fn get(&self, key: &RateKey) -> Option<&ExchangeRateRecord> {
        self.records.get(key)
    }

    /// Returns the monthly override for (key, month), if configured.
    #[must_use]
    pub fn monthly_override(&self, key: &RateKey, month: u32) -> Option<Decimal> {
        self.records
            .get(key)
            .and_then(|record| record.monthly.get(&month))
            .copied()
    }

    /// Number of configured records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_shared::types::{CurrencyCode, EntityId, FiscalYearId, RateRecordId};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn key(entity: u128, currency: &str, fy: u128) -> RateKey {
        RateKey {
            entity: EntityId::from_uuid(Uuid::from_u128(entity)),
            currency: CurrencyCode::new(currency),
            fiscal_year: FiscalYearId::from_uuid(Uuid::from_u128(fy)),
        }
    }

    fn record(k: RateKey, opening: Decimal, closing: Decimal) -> ExchangeRateRecord {
        ExchangeRateRecord::new(RateRecordId::new(), k, Some(opening), Some(closing))
    }

    #[test]
    fn test_get_after_insert() {
        let store =
            RateStore::from_records(vec![record(key(1, "USD", 1), dec!(80), dec!(85))]).unwrap();
        let found = store.get(&key(1, "USD", 1)).unwrap();
        assert_eq!(found.opening_rate, Some(dec!(80)));
        assert!(store.get(&key(1, "USD", 2)).is_none());
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let result = RateStore::from_records(vec![
            record(key(1, "USD", 1), dec!(80), dec!(85)),
            record(key(1, "USD", 1), dec!(81), dec!(86)),
        ]);
        assert!(matches!(result, Err(RateError::DuplicateRate { .. })));
    }

    #[test]
    fn test_same_entity_different_periods_allowed() {
        let store = RateStore::from_records(vec![
            record(key(1, "USD", 1), dec!(80), dec!(85)),
            record(key(1, "USD", 2), dec!(85), dec!(88)),
        ])
        .unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_non_positive_rate_rejected() {
        let result = RateStore::from_records(vec![record(key(1, "USD", 1), dec!(0), dec!(85))]);
        assert!(matches!(result, Err(RateError::InvalidRate { .. })));
    }

    #[test]
    fn test_invalid_override_month_rejected() {
        let bad = record(key(1, "USD", 1), dec!(80), dec!(85)).with_monthly(13, dec!(82));
        let result = RateStore::from_records(vec![bad]);
        assert!(matches!(result, Err(RateError::InvalidMonth { .. })));
    }

    #[test]
    fn test_monthly_override_lookup() {
        let store = RateStore::from_records(vec![
            record(key(1, "USD", 1), dec!(80), dec!(85)).with_monthly(3, dec!(81)),
        ])
        .unwrap();
        assert_eq!(store.monthly_override(&key(1, "USD", 1), 3), Some(dec!(81)));
        assert_eq!(store.monthly_override(&key(1, "USD", 1), 4), None);
    }
}
