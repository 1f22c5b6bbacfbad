//! Financial year period types.

use chrono::{Datelike, NaiveDate};
use meridian_shared::types::FiscalYearId;
use serde::{Deserialize, Serialize};

/// A configured financial year period.
///
/// Periods are inclusive date ranges. Active periods are expected not to
/// overlap; the calendar tolerates misconfiguration by resolving to the most
/// recently created match rather than failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialYear {
    /// Unique identifier.
    pub id: FiscalYearId,
    /// Period label (e.g., "2024-25").
    pub label: String,
    /// Start date of the period (inclusive).
    pub start_date: NaiveDate,
    /// End date of the period (inclusive).
    pub end_date: NaiveDate,
    /// Whether this period participates in date resolution.
    pub is_active: bool,
}

impl FinancialYear {
    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Month position of `date` within this period (1 = first month, 12 = last).
    ///
    /// Assumes `date` falls inside the period; out-of-range inputs are
    /// clamped to the valid 1..=12 window.
    #[must_use]
    pub fn month_within(&self, date: NaiveDate) -> u32 {
        let months = (i64::from(date.year()) - i64::from(self.start_date.year())) * 12
            + (i64::from(date.month()) - i64::from(self.start_date.month()));
        u32::try_from((months + 1).clamp(1, 12)).unwrap_or(1)
    }

    /// Converts a calendar month (1-12) to its position within this period.
    ///
    /// For an April-start period, April maps to 1 and March maps to 12.
    #[must_use]
    pub fn month_within_for_calendar_month(&self, calendar_month: u32) -> u32 {
        ((calendar_month + 12 - self.start_date.month()) % 12) + 1
    }
}

/// Result of validating an upload date against the calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateValidation {
    /// Whether the date falls inside a configured active period.
    pub valid: bool,
    /// Label of the covering period, when valid.
    pub period_label: Option<String>,
    /// Suggested period label to configure, when invalid.
    pub suggested_label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn april_start_year() -> FinancialYear {
        FinancialYear {
            id: FiscalYearId::from_uuid(Uuid::from_u128(1)),
            label: "2024-25".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            is_active: true,
        }
    }

    #[test]
    fn test_contains_date_inclusive_bounds() {
        let year = april_start_year();
        assert!(year.contains_date(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
        assert!(year.contains_date(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()));
        assert!(!year.contains_date(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
        assert!(!year.contains_date(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()));
    }

    #[test]
    fn test_month_within() {
        let year = april_start_year();
        assert_eq!(
            year.month_within(NaiveDate::from_ymd_opt(2024, 4, 15).unwrap()),
            1
        );
        assert_eq!(
            year.month_within(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()),
            9
        );
        assert_eq!(
            year.month_within(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()),
            12
        );
    }

    #[test]
    fn test_month_within_for_calendar_month() {
        let year = april_start_year();
        assert_eq!(year.month_within_for_calendar_month(4), 1);
        assert_eq!(year.month_within_for_calendar_month(12), 9);
        assert_eq!(year.month_within_for_calendar_month(3), 12);
    }
}
