//! Multi-entity consolidated reporting.
//!
//! Rolls converted records for a root entity's subtree into category-keyed
//! statement trees with row, column, and grand totals. Built fresh per
//! request and never persisted.

pub mod error;
pub mod service;
pub mod types;


pub use error::ConsolidationError;
pub use service::ConsolidationService;
pub use types::{
    CategoryRows, ConsolidationDiagnostics, ConsolidationReport, EntitySummary, OverallTotals,
    StatementTree, SubcategoryRow,
};
