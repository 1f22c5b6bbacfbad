//! Exchange rate error types.

use rust_decimal::Decimal;
use thiserror::Error;

use super::types::RateKey;

/// Errors that can occur during rate configuration and resolution.
#[derive(Debug, Error)]
pub enum RateError {
    /// No rate is configured for the record's exact period.
    ///
    /// This is an expected, recoverable condition: the record is excluded
    /// from totals and the key is surfaced so an administrator can
    /// configure the missing rate. A rate from an adjacent period is never
    /// substituted.
    #[error("no exchange rate configured for {key}")]
    MissingRate {
        /// The (entity, currency, financial year) the lookup was for.
        key: RateKey,
    },

    /// A rate record already exists for the key.
    #[error("duplicate exchange rate record for {key}")]
    DuplicateRate {
        /// The conflicting key.
        key: RateKey,
    },

    /// A configured rate is zero or negative.
    #[error("invalid exchange rate {rate} for {key}: rates must be positive")]
    InvalidRate {
        /// The offending key.
        key: RateKey,
        /// The rejected value.
        rate: Decimal,
    },

    /// A monthly override month is outside 1-12.
    #[error("invalid override month {month} for {key}: must be 1-12")]
    InvalidMonth {
        /// The offending key.
        key: RateKey,
        /// The rejected month.
        month: u32,
    },
}
