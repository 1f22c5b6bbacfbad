//! Entity hierarchy error types.

use meridian_shared::types::EntityId;
use thiserror::Error;

/// Errors that can occur during hierarchy operations.
#[derive(Debug, Error)]
pub enum HierarchyError {
    /// Entity not found in the hierarchy.
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    /// Assigning the requested parent would close a cycle.
    #[error("assigning parent {parent} to entity {child} would create a cycle")]
    CycleDetected {
        /// Entity whose parent would change.
        child: EntityId,
        /// Proposed parent.
        parent: EntityId,
    },
}
