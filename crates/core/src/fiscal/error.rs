//! Fiscal calendar error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during fiscal calendar operations.
#[derive(Debug, Error)]
pub enum FiscalError {
    /// No active financial year covers the given date.
    #[error("no financial year configured for date {0}")]
    NoPeriodForDate(NaiveDate),

    /// A date range overlaps an existing active financial year.
    #[error("date range overlaps financial year {label}")]
    OverlappingPeriods {
        /// Label of the period already covering part of the range.
        label: String,
    },

    /// Invalid date range.
    #[error("invalid date range: start {start} is not before end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// A year/month/day combination does not form a valid calendar date.
    #[error("invalid calendar date {year}-{month:02}-{day:02}")]
    InvalidDate {
        /// Calendar year.
        year: i32,
        /// Calendar month.
        month: u32,
        /// Day of month.
        day: u32,
    },
}
