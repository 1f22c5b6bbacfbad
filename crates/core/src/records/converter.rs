//! Currency conversion of financial records.

use meridian_shared::types::CurrencyCode;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::fiscal::FiscalCalendar;
use crate::rates::{RateBasis, RateKey, RateStore, resolve_rate};

use super::classifier::classify;
use super::types::FinancialRecord;

/// Default decimal places for converted amounts.
const DEFAULT_PRECISION: u32 = 4;

/// What happened to a single record during conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// Converted; carries the applied rate.
    Converted {
        /// Local-currency units per reporting-currency unit.
        rate: Decimal,
    },
    /// No rate configured for the record's exact key.
    MissingRate(RateKey),
    /// Category mapping absent; conversion refused rather than guessed.
    Unclassified,
    /// No configured financial year covers the record's date.
    NoPeriod,
}

/// Aggregate result of a batch conversion run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionSummary {
    /// Records successfully converted.
    pub converted: usize,
    /// Records skipped for lack of a configured rate.
    pub missing_rate: usize,
    /// Records skipped for lack of a classification.
    pub unclassified: usize,
    /// Records whose date falls outside every configured period.
    pub no_period: usize,
    /// Deduplicated keys that need rate configuration, in first-seen order.
    pub missing_keys: Vec<RateKey>,
}

impl ConversionSummary {
    /// Returns true if every record converted cleanly.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.missing_rate == 0 && self.unclassified == 0 && self.no_period == 0
    }
}

/// Converts local-currency amounts into the common reporting currency.
///
/// Holds request-scoped snapshots of the calendar and rate store; build one
/// per batch and discard it afterward. Conversion never guesses: a record
/// without an exact-period rate or a classification is flagged and excluded
/// from downstream totals.
pub struct AmountConverter<'a> {
    reporting_currency: CurrencyCode,
    precision: u32,
    calendar: &'a FiscalCalendar,
    store: &'a RateStore,
}

impl<'a> AmountConverter<'a> {
    /// Creates a converter targeting the given reporting currency.
    #[must_use]
    pub fn new(
        reporting_currency: CurrencyCode,
        calendar: &'a FiscalCalendar,
        store: &'a RateStore,
    ) -> Self {
        Self {
            reporting_currency,
            precision: DEFAULT_PRECISION,
            calendar,
            store,
        }
    }

    /// Overrides the decimal precision of converted amounts.
    #[must_use]
    pub const fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Converts one record, rewriting its annotations in place.
    ///
    /// Idempotent: previous annotations are cleared first, so re-running
    /// after a rate update replaces rather than appends. Records already in
    /// the reporting currency convert at rate 1 without a rate lookup.
    pub fn convert(&self, record: &mut FinancialRecord) -> ConversionOutcome {
        record.clear_annotations();
        self.attach_period(record);

        if record.currency == self.reporting_currency {
            record.resolved_rate = Some(Decimal::ONE);
            record.rate_basis = Some(RateBasis::Parity);
            record.converted_amount = Some(record.amount);
            return ConversionOutcome::Converted { rate: Decimal::ONE };
        }

        let Some(fiscal_year) = record.fiscal_year else {
            record.missing_rate = true;
            warn!(
                record = %record.id,
                date = %record.record_date,
                "no financial year covers record date; excluding from totals"
            );
            return ConversionOutcome::NoPeriod;
        };
        let Some(statement) = classify(record).statement() else {
            record.missing_rate = true;
            return ConversionOutcome::Unclassified;
        };

        let key = RateKey {
            entity: record.entity_id,
            currency: record.currency.clone(),
            fiscal_year,
        };
        match resolve_rate(self.store, &key, record.month, statement) {
            Ok(resolved) => {
                record.resolved_rate = Some(resolved.rate);
                record.rate_basis = Some(resolved.basis);
                record.converted_amount = Some(self.round(record.amount / resolved.rate));
                ConversionOutcome::Converted {
                    rate: resolved.rate,
                }
            }
            Err(_) => {
                record.missing_rate = true;
                warn!(
                    entity = %key.entity,
                    currency = %key.currency,
                    fiscal_year = %key.fiscal_year,
                    "no exchange rate configured; excluding record from totals"
                );
                ConversionOutcome::MissingRate(key)
            }
        }
    }

    /// Converts a batch of records, returning aggregate diagnostics.
    pub fn convert_batch(&self, records: &mut [FinancialRecord]) -> ConversionSummary {
        let mut summary = ConversionSummary::default();
        for record in records {
            match self.convert(record) {
                ConversionOutcome::Converted { .. } => summary.converted += 1,
                ConversionOutcome::MissingRate(key) => {
                    summary.missing_rate += 1;
                    if !summary.missing_keys.contains(&key) {
                        summary.missing_keys.push(key);
                    }
                }
                ConversionOutcome::Unclassified => summary.unclassified += 1,
                ConversionOutcome::NoPeriod => summary.no_period += 1,
            }
        }
        summary
    }

    /// Best-effort period and month annotation from the record's date.
    ///
    /// Leaves pre-attached values untouched. Failure to resolve is not an
    /// error here: same-currency records convert regardless, and the
    /// cross-currency path reports `NoPeriod` itself.
    fn attach_period(&self, record: &mut FinancialRecord) {
        if record.fiscal_year.is_none() {
            record.fiscal_year = self
                .calendar
                .resolve(record.record_date)
                .ok()
                .map(|year| year.id);
        }
        if record.month.is_none()
            && let Some(fiscal_year) = record.fiscal_year
        {
            record.month = self
                .calendar
                .get(fiscal_year)
                .map(|year| year.month_within(record.record_date));
        }
    }

    fn round(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.precision, RoundingStrategy::MidpointNearestEven)
    }
}
