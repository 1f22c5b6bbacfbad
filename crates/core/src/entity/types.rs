//! Entity types.

use meridian_shared::types::{CurrencyCode, EntityId};
use serde::{Deserialize, Serialize};

/// Default financial-year start month (April).
pub const DEFAULT_FY_START_MONTH: u32 = 4;

/// Default financial-year start day.
pub const DEFAULT_FY_START_DAY: u32 = 1;

/// A reporting unit.
///
/// Entities are created and updated by the external entity-management
/// collaborator; the core reads them and never mutates master data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Short code (e.g., "ACIN").
    pub code: String,
    /// Local currency all of this entity's records are denominated in.
    pub currency: CurrencyCode,
    /// Parent entity, if this entity is owned by another.
    pub parent_id: Option<EntityId>,
    /// City, if known.
    pub city: Option<String>,
    /// Country, if known.
    pub country: Option<String>,
    /// Financial-year start month (1-12).
    pub fy_start_month: u32,
    /// Financial-year start day of month.
    pub fy_start_day: u32,
}

impl Entity {
    /// Creates an entity with no parent and the default April 1 fiscal start.
    #[must_use]
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        code: impl Into<String>,
        currency: CurrencyCode,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            code: code.into(),
            currency,
            parent_id: None,
            city: None,
            country: None,
            fy_start_month: DEFAULT_FY_START_MONTH,
            fy_start_day: DEFAULT_FY_START_DAY,
        }
    }

    /// Sets the parent entity.
    #[must_use]
    pub const fn with_parent(mut self, parent_id: EntityId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}
