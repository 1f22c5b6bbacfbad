//! Exchange rate resolution policy.

use rust_decimal::Decimal;

use crate::records::Statement;

use super::error::RateError;
use super::store::RateStore;
use super::types::{RateBasis, RateKey, ResolvedRate};

/// Resolves the rate for a record's exact (entity, currency, financial year).
///
/// Selection runs in strict priority order with no cross-period fallback of
/// any kind; a record for one period never uses a rate configured for an
/// adjacent period.
///
/// 1. A monthly override for the record's month applies to both statements:
///    it is the rate actually observed in that month.
/// 2. Balance Sheet items are point-in-time snapshots and use the closing
///    rate.
/// 3. Profit & Loss items accrue across the period and use the arithmetic
///    mean of opening and closing; both endpoints must be present.
/// 4. Anything else is a missing rate, carrying the key for diagnostics.
pub fn resolve_rate(
    store: &RateStore,
    key: &RateKey,
    month: Option<u32>,
    statement: Statement,
) -> Result<ResolvedRate, RateError> {
    if let Some(month) = month
        && let Some(rate) = store.monthly_override(key, month)
    {
        return Ok(ResolvedRate {
            rate,
            basis: RateBasis::MonthlyOverride,
        });
    }

    let record = store.get(key).ok_or_else(|| RateError::MissingRate {
        key: key.clone(),
    })?;

    match statement {
        Statement::BalanceSheet => record
            .closing_rate
            .map(|rate| ResolvedRate {
                rate,
                basis: RateBasis::Closing,
            })
            .ok_or_else(|| RateError::MissingRate { key: key.clone() }),
        Statement::ProfitAndLoss => match (record.opening_rate, record.closing_rate) {
            (Some(opening), Some(closing)) => Ok(ResolvedRate {
                rate: (opening + closing) / Decimal::TWO,
                basis: RateBasis::OpeningClosingAverage,
            }),
            _ => Err(RateError::MissingRate { key: key.clone() }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::types::ExchangeRateRecord;
    use meridian_shared::types::{CurrencyCode, EntityId, FiscalYearId, RateRecordId};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn key(fy: u128) -> RateKey {
        RateKey {
            entity: EntityId::from_uuid(Uuid::from_u128(1)),
            currency: CurrencyCode::new("USD"),
            fiscal_year: FiscalYearId::from_uuid(Uuid::from_u128(fy)),
        }
    }

    fn store_with(records: Vec<ExchangeRateRecord>) -> RateStore {
        RateStore::from_records(records).unwrap()
    }

    #[test]
    fn test_balance_sheet_uses_closing() {
        let store = store_with(vec![ExchangeRateRecord::new(
            RateRecordId::new(),
            key(1),
            Some(dec!(80.00)),
            Some(dec!(85.00)),
        )]);
        let resolved = resolve_rate(&store, &key(1), Some(5), Statement::BalanceSheet).unwrap();
        assert_eq!(resolved.rate, dec!(85.00));
        assert_eq!(resolved.basis, RateBasis::Closing);
    }

    #[test]
    fn test_profit_and_loss_uses_average() {
        let store = store_with(vec![ExchangeRateRecord::new(
            RateRecordId::new(),
            key(1),
            Some(dec!(80.00)),
            Some(dec!(85.00)),
        )]);
        let resolved = resolve_rate(&store, &key(1), Some(5), Statement::ProfitAndLoss).unwrap();
        assert_eq!(resolved.rate, dec!(82.50));
        assert_eq!(resolved.basis, RateBasis::OpeningClosingAverage);
    }

    #[test]
    fn test_monthly_override_wins_for_both_statements() {
        let record = ExchangeRateRecord::new(
            RateRecordId::new(),
            key(1),
            Some(dec!(80.00)),
            Some(dec!(85.00)),
        )
        .with_monthly(3, dec!(81.00));
        let store = store_with(vec![record]);

        for statement in [Statement::BalanceSheet, Statement::ProfitAndLoss] {
            let resolved = resolve_rate(&store, &key(1), Some(3), statement).unwrap();
            assert_eq!(resolved.rate, dec!(81.00));
            assert_eq!(resolved.basis, RateBasis::MonthlyOverride);
        }
    }

    #[test]
    fn test_override_only_applies_to_its_month() {
        let record = ExchangeRateRecord::new(
            RateRecordId::new(),
            key(1),
            Some(dec!(80.00)),
            Some(dec!(85.00)),
        )
        .with_monthly(3, dec!(81.00));
        let store = store_with(vec![record]);

        let resolved = resolve_rate(&store, &key(1), Some(4), Statement::ProfitAndLoss).unwrap();
        assert_eq!(resolved.rate, dec!(82.50));
    }

    #[test]
    fn test_average_requires_both_endpoints() {
        let store = store_with(vec![ExchangeRateRecord::new(
            RateRecordId::new(),
            key(1),
            None,
            Some(dec!(85.00)),
        )]);
        let result = resolve_rate(&store, &key(1), None, Statement::ProfitAndLoss);
        assert!(matches!(result, Err(RateError::MissingRate { .. })));
    }

    #[test]
    fn test_balance_sheet_missing_closing() {
        let store = store_with(vec![ExchangeRateRecord::new(
            RateRecordId::new(),
            key(1),
            Some(dec!(80.00)),
            None,
        )]);
        let result = resolve_rate(&store, &key(1), None, Statement::BalanceSheet);
        assert!(matches!(result, Err(RateError::MissingRate { .. })));
    }

    #[test]
    fn test_no_cross_period_fallback() {
        // Rates exist only for period 2; period 1 must resolve to missing.
        let store = store_with(vec![ExchangeRateRecord::new(
            RateRecordId::new(),
            key(2),
            Some(dec!(80.00)),
            Some(dec!(85.00)),
        )]);
        for statement in [Statement::BalanceSheet, Statement::ProfitAndLoss] {
            let result = resolve_rate(&store, &key(1), Some(3), statement);
            assert!(matches!(result, Err(RateError::MissingRate { .. })));
        }
    }

    #[test]
    fn test_missing_rate_carries_key() {
        let store = RateStore::new();
        let Err(RateError::MissingRate { key: reported }) =
            resolve_rate(&store, &key(7), None, Statement::BalanceSheet)
        else {
            panic!("expected MissingRate");
        };
        assert_eq!(reported, key(7));
    }

    #[test]
    fn test_no_month_skips_override_lookup() {
        let record = ExchangeRateRecord::new(
            RateRecordId::new(),
            key(1),
            Some(dec!(80.00)),
            Some(dec!(85.00)),
        )
        .with_monthly(3, dec!(81.00));
        let store = store_with(vec![record]);

        let resolved = resolve_rate(&store, &key(1), None, Statement::BalanceSheet).unwrap();
        assert_eq!(resolved.basis, RateBasis::Closing);
    }
}
