//! Consolidation error types.

use meridian_shared::types::EntityId;
use thiserror::Error;

/// Errors that can occur during consolidation.
#[derive(Debug, Error)]
pub enum ConsolidationError {
    /// The requested root entity does not exist.
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),
}
