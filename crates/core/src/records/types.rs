//! Financial record types.

use chrono::NaiveDate;
use meridian_shared::types::{CurrencyCode, EntityId, FinancialRecordId, FiscalYearId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rates::RateBasis;

/// Which financial statement a record reports under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    /// Point-in-time balances; converted at the closing rate.
    BalanceSheet,
    /// Period-long flows; converted at the opening/closing average.
    ProfitAndLoss,
}

/// Outcome of classifying a record's category labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Recognized as a Balance Sheet record.
    BalanceSheet,
    /// Recognized as a Profit & Loss record.
    ProfitAndLoss,
    /// Category mapping absent or unrecognized; never converted.
    Unclassified,
}

impl Classification {
    /// The statement this classification maps to, if any.
    #[must_use]
    pub const fn statement(self) -> Option<Statement> {
        match self {
            Self::BalanceSheet => Some(Statement::BalanceSheet),
            Self::ProfitAndLoss => Some(Statement::ProfitAndLoss),
            Self::Unclassified => None,
        }
    }
}

/// One line of financial data.
///
/// Master fields are produced by ingestion; the core owns only the
/// annotation fields (`resolved_rate`, `rate_basis`, `converted_amount`,
/// `missing_rate`), which conversion rewrites in full on every run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialRecord {
    /// Unique identifier.
    pub id: FinancialRecordId,
    /// Entity that owns this record.
    pub entity_id: EntityId,
    /// Currency the amount is denominated in.
    pub currency: CurrencyCode,
    /// Signed local-currency amount (positive = debit, negative = credit).
    pub amount: Decimal,
    /// Main category from the external mapping.
    pub main_category: Option<String>,
    /// First sub-category level.
    pub category1: Option<String>,
    /// Second sub-category level.
    pub category2: Option<String>,
    /// Third sub-category level.
    pub category3: Option<String>,
    /// Fourth sub-category level.
    pub category4: Option<String>,
    /// Fifth sub-category level.
    pub category5: Option<String>,
    /// Transaction or reporting date.
    pub record_date: NaiveDate,
    /// Financial year the record belongs to; resolved from the date when absent.
    pub fiscal_year: Option<FiscalYearId>,
    /// Month position within the financial year (1-12).
    pub month: Option<u32>,
    /// Rate applied during conversion.
    pub resolved_rate: Option<Decimal>,
    /// How the applied rate was selected.
    pub rate_basis: Option<RateBasis>,
    /// Amount in the common reporting currency.
    pub converted_amount: Option<Decimal>,
    /// True when no applicable rate exists; such records are excluded from
    /// totals, never converted at a guessed rate.
    pub missing_rate: bool,
}

impl FinancialRecord {
    /// Creates an unannotated record with empty category fields.
    #[must_use]
    pub fn new(
        id: FinancialRecordId,
        entity_id: EntityId,
        currency: CurrencyCode,
        amount: Decimal,
        record_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            entity_id,
            currency,
            amount,
            main_category: None,
            category1: None,
            category2: None,
            category3: None,
            category4: None,
            category5: None,
            record_date,
            fiscal_year: None,
            month: None,
            resolved_rate: None,
            rate_basis: None,
            converted_amount: None,
            missing_rate: false,
        }
    }

    /// Clears all conversion annotations.
    ///
    /// Conversion is idempotent: it clears before it writes, so re-running
    /// after a rate update replaces the previous annotation.
    pub fn clear_annotations(&mut self) {
        self.resolved_rate = None;
        self.rate_basis = None;
        self.converted_amount = None;
        self.missing_rate = false;
    }
}
