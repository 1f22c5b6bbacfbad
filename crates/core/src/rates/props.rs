//! Property-based tests for rate resolution.

use meridian_shared::types::{CurrencyCode, EntityId, FiscalYearId, RateRecordId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::records::Statement;

use super::resolver::resolve_rate;
use super::store::RateStore;
use super::types::{ExchangeRateRecord, RateBasis, RateKey};
use uuid::Uuid;

fn key(fy: u128) -> RateKey {
    RateKey {
        entity: EntityId::from_uuid(Uuid::from_u128(1)),
        currency: CurrencyCode::new("USD"),
        fiscal_year: FiscalYearId::from_uuid(Uuid::from_u128(fy)),
    }
}

/// Strategy for positive rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

fn statement_strategy() -> impl Strategy<Value = Statement> {
    prop_oneof![Just(Statement::BalanceSheet), Just(Statement::ProfitAndLoss)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Resolution for period P is unaffected by whatever is configured for
    /// any other period Q.
    #[test]
    fn prop_strict_period_isolation(
        opening in positive_rate(),
        closing in positive_rate(),
        other_opening in positive_rate(),
        other_closing in positive_rate(),
        other_override in positive_rate(),
        month in 1u32..=12,
        statement in statement_strategy(),
    ) {
        let base = RateStore::from_records(vec![ExchangeRateRecord::new(
            RateRecordId::new(),
            key(1),
            Some(opening),
            Some(closing),
        )])
        .unwrap();

        let with_other_period = RateStore::from_records(vec![
            ExchangeRateRecord::new(RateRecordId::new(), key(1), Some(opening), Some(closing)),
            ExchangeRateRecord::new(
                RateRecordId::new(),
                key(2),
                Some(other_opening),
                Some(other_closing),
            )
            .with_monthly(month, other_override),
        ])
        .unwrap();

        let before = resolve_rate(&base, &key(1), Some(month), statement).unwrap();
        let after = resolve_rate(&with_other_period, &key(1), Some(month), statement).unwrap();
        prop_assert_eq!(before, after);
    }

    /// With only another period configured, resolution is always missing,
    /// whatever that other period holds.
    #[test]
    fn prop_adjacent_period_is_never_borrowed(
        other_opening in positive_rate(),
        other_closing in positive_rate(),
        month in 1u32..=12,
        statement in statement_strategy(),
    ) {
        let store = RateStore::from_records(vec![ExchangeRateRecord::new(
            RateRecordId::new(),
            key(2),
            Some(other_opening),
            Some(other_closing),
        )])
        .unwrap();

        let result = resolve_rate(&store, &key(1), Some(month), statement);
        prop_assert!(result.is_err());
    }

    /// A monthly override dominates both statements regardless of the
    /// endpoint rates.
    #[test]
    fn prop_override_dominates(
        opening in positive_rate(),
        closing in positive_rate(),
        override_rate in positive_rate(),
        month in 1u32..=12,
        statement in statement_strategy(),
    ) {
        let store = RateStore::from_records(vec![
            ExchangeRateRecord::new(RateRecordId::new(), key(1), Some(opening), Some(closing))
                .with_monthly(month, override_rate),
        ])
        .unwrap();

        let resolved = resolve_rate(&store, &key(1), Some(month), statement).unwrap();
        prop_assert_eq!(resolved.rate, override_rate);
        prop_assert_eq!(resolved.basis, RateBasis::MonthlyOverride);
    }

    /// Without an override, P&L resolves to exactly (opening + closing) / 2
    /// and Balance Sheet to exactly the closing rate.
    #[test]
    fn prop_endpoint_selection(
        opening in positive_rate(),
        closing in positive_rate(),
    ) {
        let store = RateStore::from_records(vec![ExchangeRateRecord::new(
            RateRecordId::new(),
            key(1),
            Some(opening),
            Some(closing),
        )])
        .unwrap();

        let pl = resolve_rate(&store, &key(1), None, Statement::ProfitAndLoss).unwrap();
        prop_assert_eq!(pl.rate, (opening + closing) / Decimal::TWO);

        let bs = resolve_rate(&store, &key(1), None, Statement::BalanceSheet).unwrap();
        prop_assert_eq!(bs.rate, closing);
    }
}
