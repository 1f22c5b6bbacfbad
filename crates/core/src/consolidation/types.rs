//! Consolidation report types.
//!
//! All maps are `BTreeMap` so category and entity ordering is stable and
//! repeated consolidations over unchanged input serialize byte-identically,
//! which matters for export and diffing.

use std::collections::BTreeMap;

use meridian_shared::types::{EntityId, FiscalYearId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rates::RateKey;

/// Entity identification for report consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySummary {
    /// Entity ID.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Short code.
    pub code: String,
}

/// One subcategory row: converted amount per entity plus the row total.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubcategoryRow {
    /// Converted amount per entity column.
    pub amounts: BTreeMap<EntityId, Decimal>,
    /// Sum across entity columns.
    pub total: Decimal,
}

/// All rows under one main category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryRows {
    /// Rows keyed by subcategory label.
    pub subcategories: BTreeMap<String, SubcategoryRow>,
    /// Sum of all row totals under this category.
    pub total: Decimal,
}

/// One statement bucket (Balance Sheet or Profit & Loss).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatementTree {
    /// Categories keyed by main-category label.
    pub categories: BTreeMap<String, CategoryRows>,
    /// Per-entity sum across every row in this bucket.
    pub column_totals: BTreeMap<EntityId, Decimal>,
    /// Sum of everything in this bucket.
    pub grand_total: Decimal,
}

/// Bottom-line totals spanning both statements.
///
/// Reporting convention: the overall figure adds the Balance Sheet and
/// Profit & Loss totals per entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverallTotals {
    /// Per-entity Balance Sheet + P&L column totals.
    pub column_totals: BTreeMap<EntityId, Decimal>,
    /// Balance Sheet grand total + P&L grand total.
    pub grand_total: Decimal,
}

/// Records excluded from totals, surfaced rather than silently dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsolidationDiagnostics {
    /// Count of in-scope records excluded from totals.
    pub excluded_record_count: usize,
    /// Deduplicated rate keys that need configuration, in first-seen order.
    pub missing_rate_keys: Vec<RateKey>,
}

/// Consolidated view over a root entity and its descendants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidationReport {
    /// Root entity the subtree was walked from.
    pub root: EntityId,
    /// Period filter applied, if any.
    pub period: Option<FiscalYearId>,
    /// Balance Sheet bucket.
    pub balance_sheet: StatementTree,
    /// Profit & Loss bucket.
    pub profit_loss: StatementTree,
    /// Bottom line spanning both statements.
    pub overall: OverallTotals,
    /// Entities in scope, in traversal order.
    pub entities: Vec<EntitySummary>,
    /// Excluded-record accounting.
    pub diagnostics: ConsolidationDiagnostics,
}
