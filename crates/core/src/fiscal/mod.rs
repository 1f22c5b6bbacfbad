//! Financial year calendar and date resolution.
//!
//! Every financial record is reported under exactly one financial year
//! period. This module maps calendar dates to configured periods, derives
//! the month position within a period, and validates upload dates.

pub mod calendar;
pub mod error;
pub mod types;

pub use calendar::{FiscalCalendar, entity_period_dates, format_label, parse_label, suggest_label};
pub use error::FiscalError;
pub use types::{DateValidation, FinancialYear};
