//! Record classification.

use super::types::{Classification, FinancialRecord};

/// Classifies a record into its statement bucket.
///
/// The external mapping assigns category labels at ingestion time; this
/// only normalizes them. `category1` is checked before the main category,
/// matching the precedence the rate-management collaborator uses when it
/// labels rows. Empty or unrecognized labels classify as `Unclassified`,
/// and unclassified records are never converted.
#[must_use]
pub fn classify(record: &FinancialRecord) -> Classification {
    for label in [record.category1.as_deref(), record.main_category.as_deref()] {
        if let Some(label) = label
            && let Some(classification) = match_label(label)
        {
            return classification;
        }
    }
    Classification::Unclassified
}

fn match_label(label: &str) -> Option<Classification> {
    let normalized = label.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return None;
    }
    if normalized.contains("balance sheet") {
        return Some(Classification::BalanceSheet);
    }
    if normalized.contains("profit and loss")
        || normalized.contains("profit & loss")
        || normalized.contains("p&l")
    {
        return Some(Classification::ProfitAndLoss);
    }
    None
}
