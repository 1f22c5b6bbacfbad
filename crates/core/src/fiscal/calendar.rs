//! Financial year calendar.

use chrono::{Datelike, Months, NaiveDate};
use meridian_shared::types::FiscalYearId;
use tracing::warn;

use crate::entity::Entity;

use super::error::FiscalError;
use super::types::{DateValidation, FinancialYear};

/// Formats a period label from its starting calendar year.
///
/// `format_label(2024)` returns `"2024-25"`, the period running from 2024
/// into 2025.
#[must_use]
pub fn format_label(start_year: i32) -> String {
    format!("{}-{:02}", start_year, (start_year + 1).rem_euclid(100))
}

/// Parses a period label back to its starting calendar year.
///
/// Accepts `"2024-25"` and plain `"2024"`; returns `None` for anything else.
#[must_use]
pub fn parse_label(label: &str) -> Option<i32> {
    let head = label.trim().split('-').next()?;
    head.parse().ok()
}

/// Request-scoped view over the configured financial year master.
///
/// Periods are held in creation order so that overlap resolution can prefer
/// the most recently created period.
#[derive(Debug, Clone)]
pub struct FiscalCalendar {
    years: Vec<FinancialYear>,
}

impl FiscalCalendar {
    /// Builds a calendar from the financial-year master, in creation order.
    #[must_use]
    pub fn new(years: Vec<FinancialYear>) -> Self {
        Self { years }
    }

    /// Returns the configured period with the given id.
    #[must_use]
    pub fn get(&self, id: FiscalYearId) -> Option<&FinancialYear> {
        self.years.iter().find(|y| y.id == id)
    }

    /// Returns the configured period with the given label.
    #[must_use]
    pub fn get_by_label(&self, label: &str) -> Option<&FinancialYear> {
        self.years.iter().find(|y| y.label == label)
    }

    /// Resolves the active period containing `date`.
    ///
    /// Active periods should not overlap. If they do (a configuration
    /// error), the most recently created match wins and a warning is
    /// emitted; resolution is never ambiguous.
    pub fn resolve(&self, date: NaiveDate) -> Result<&FinancialYear, FiscalError> {
        let mut matches = self
            .years
            .iter()
            .filter(|y| y.is_active && y.contains_date(date));

        let Some(first) = matches.next() else {
            return Err(FiscalError::NoPeriodForDate(date));
        };

        let mut chosen = first;
        let mut overlapping = false;
        for candidate in matches {
            overlapping = true;
            chosen = candidate;
        }
        if overlapping {
            warn!(
                %date,
                period = %chosen.label,
                "overlapping active financial years; resolving to most recently created"
            );
        }
        Ok(chosen)
    }

    /// Returns the active period containing `today`, if any.
    #[must_use]
    pub fn current(&self, today: NaiveDate) -> Option<&FinancialYear> {
        self.resolve(today).ok()
    }

    /// Validates an upload date against the configured periods.
    ///
    /// Invalid dates carry a suggested label so the caller can tell the
    /// user which period to configure.
    #[must_use]
    pub fn validate(&self, date: NaiveDate) -> DateValidation {
        match self.resolve(date) {
            Ok(year) => DateValidation {
                valid: true,
                period_label: Some(year.label.clone()),
                suggested_label: None,
            },
            Err(_) => DateValidation {
                valid: false,
                period_label: None,
                suggested_label: Some(suggest_label(date)),
            },
        }
    }

    /// Returns true if `date` precedes every configured active period.
    #[must_use]
    pub fn precedes_configured(&self, date: NaiveDate) -> bool {
        self.years
            .iter()
            .filter(|y| y.is_active)
            .map(|y| y.start_date)
            .min()
            .is_none_or(|earliest| date < earliest)
    }

    /// Checks a candidate date range against existing active periods.
    ///
    /// Used by the management write path before accepting a new or updated
    /// period. `exclude` skips the period being updated.
    pub fn check_overlap(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<FiscalYearId>,
    ) -> Result<(), FiscalError> {
        if start >= end {
            return Err(FiscalError::InvalidDateRange { start, end });
        }
        for year in self.years.iter().filter(|y| y.is_active) {
            if Some(year.id) == exclude {
                continue;
            }
            if start <= year.end_date && end >= year.start_date {
                return Err(FiscalError::OverlappingPeriods {
                    label: year.label.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Suggests a period label for an out-of-range date.
///
/// Uses the April-start convention: January through March belong to the
/// period that started the previous calendar year.
#[must_use]
pub fn suggest_label(date: NaiveDate) -> String {
    let start_year = if date.month() <= 3 {
        date.year() - 1
    } else {
        date.year()
    };
    format_label(start_year)
}

/// Derives an entity's financial-year date range for a starting year.
///
/// The range begins on the entity's configured start month/day and runs
/// twelve months, e.g. 2024-04-01 through 2025-03-31.
pub fn entity_period_dates(
    entity: &Entity,
    start_year: i32,
) -> Result<(NaiveDate, NaiveDate), FiscalError> {
    let start = NaiveDate::from_ymd_opt(start_year, entity.fy_start_month, entity.fy_start_day)
        .ok_or(FiscalError::InvalidDate {
            year: start_year,
            month: entity.fy_start_month,
            day: entity.fy_start_day,
        })?;
    let end = start
        .checked_add_months(Months::new(12))
        .and_then(|d| d.pred_opt())
        .ok_or(FiscalError::InvalidDate {
            year: start_year + 1,
            month: entity.fy_start_month,
            day: entity.fy_start_day,
        })?;
    Ok((start, end))
}
