//! Consolidation aggregation.

use std::collections::HashSet;

use meridian_shared::types::{EntityId, FiscalYearId};
use rust_decimal::Decimal;
use tracing::debug;

use crate::entity::EntityHierarchy;
use crate::rates::RateKey;
use crate::records::{FinancialRecord, Statement, classify};

use super::error::ConsolidationError;
use super::types::{
    ConsolidationDiagnostics, ConsolidationReport, EntitySummary, OverallTotals, StatementTree,
};

/// Service for building consolidated reports.
pub struct ConsolidationService;

impl ConsolidationService {
    /// Consolidates converted records for `root` and all of its descendants.
    ///
    /// Records flagged missing-rate, lacking a converted amount, lacking a
    /// classification, or lacking a main category are excluded from totals
    /// and counted in the diagnostics block instead. The computation either
    /// completes fully or errors; partial totals are never returned.
    pub fn consolidate(
        hierarchy: &EntityHierarchy,
        records: &[FinancialRecord],
        root: EntityId,
        period: Option<FiscalYearId>,
    ) -> Result<ConsolidationReport, ConsolidationError> {
        let scope = hierarchy
            .subtree(root)
            .map_err(|_| ConsolidationError::EntityNotFound(root))?;
        let scope_set: HashSet<EntityId> = scope.iter().copied().collect();

        let mut balance_sheet = StatementTree::default();
        let mut profit_loss = StatementTree::default();
        let mut diagnostics = ConsolidationDiagnostics::default();

        for record in records {
            if !scope_set.contains(&record.entity_id) {
                continue;
            }
            if let Some(period) = period
                && record.fiscal_year != Some(period)
            {
                continue;
            }

            let statement = classify(record).statement();
            let main_category = record
                .main_category
                .as_deref()
                .map(str::trim)
                .unwrap_or_default();

            let (Some(statement), Some(amount), false) =
                (statement, record.converted_amount, record.missing_rate)
            else {
                Self::record_exclusion(&mut diagnostics, record);
                continue;
            };
            if main_category.is_empty() {
                Self::record_exclusion(&mut diagnostics, record);
                continue;
            }

            let tree = match statement {
                Statement::BalanceSheet => &mut balance_sheet,
                Statement::ProfitAndLoss => &mut profit_loss,
            };
            let subcategory = record
                .category1
                .as_deref()
                .map(str::trim)
                .unwrap_or_default();
            let row = tree
                .categories
                .entry(main_category.to_string())
                .or_default()
                .subcategories
                .entry(subcategory.to_string())
                .or_default();
            *row.amounts.entry(record.entity_id).or_default() += amount;
        }

        Self::derive_totals(&mut balance_sheet);
        Self::derive_totals(&mut profit_loss);
        let overall = Self::overall_totals(&balance_sheet, &profit_loss, &scope);

        let entities = scope
            .iter()
            .filter_map(|id| hierarchy.get(*id))
            .map(|entity| EntitySummary {
                id: entity.id,
                name: entity.name.clone(),
                code: entity.code.clone(),
            })
            .collect();

        debug!(
            root = %root,
            entities = scope.len(),
            excluded = diagnostics.excluded_record_count,
            "consolidation complete"
        );

        Ok(ConsolidationReport {
            root,
            period,
            balance_sheet,
            profit_loss,
            overall,
            entities,
            diagnostics,
        })
    }

    fn record_exclusion(diagnostics: &mut ConsolidationDiagnostics, record: &FinancialRecord) {
        diagnostics.excluded_record_count += 1;
        // Only a genuine rate miss yields an actionable configuration key.
        if record.missing_rate
            && classify(record).statement().is_some()
            && let Some(fiscal_year) = record.fiscal_year
        {
            let key = RateKey {
                entity: record.entity_id,
                currency: record.currency.clone(),
                fiscal_year,
            };
            if !diagnostics.missing_rate_keys.contains(&key) {
                diagnostics.missing_rate_keys.push(key);
            }
        }
    }

    fn derive_totals(tree: &mut StatementTree) {
        tree.column_totals.clear();
        tree.grand_total = Decimal::ZERO;
        for category in tree.categories.values_mut() {
            category.total = Decimal::ZERO;
            for row in category.subcategories.values_mut() {
                row.total = row.amounts.values().copied().sum();
                category.total += row.total;
                for (entity, amount) in &row.amounts {
                    *tree.column_totals.entry(*entity).or_default() += *amount;
                }
            }
            tree.grand_total += category.total;
        }
    }

    fn overall_totals(
        balance_sheet: &StatementTree,
        profit_loss: &StatementTree,
        scope: &[EntityId],
    ) -> OverallTotals {
        let mut overall = OverallTotals {
            column_totals: scope
                .iter()
                .map(|id| {
                    let bs = balance_sheet
                        .column_totals
                        .get(id)
                        .copied()
                        .unwrap_or_default();
                    let pl = profit_loss
                        .column_totals
                        .get(id)
                        .copied()
                        .unwrap_or_default();
                    (*id, bs + pl)
                })
                .collect(),
            grand_total: Decimal::ZERO,
        };
        overall.grand_total = balance_sheet.grand_total + profit_loss.grand_total;
        overall
    }
}
