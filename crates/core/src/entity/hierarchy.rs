//! Entity hierarchy traversal.

use std::collections::{HashMap, HashSet, VecDeque};

use meridian_shared::types::EntityId;

use super::error::HierarchyError;
use super::types::Entity;

/// Request-scoped view over the entity master with parent links reversed
/// into a child index.
///
/// Traversal visits each entity at most once, so a misconfigured cycle
/// (A's parent is B, B's parent is A) terminates instead of looping.
#[derive(Debug, Clone)]
pub struct EntityHierarchy {
    entities: HashMap<EntityId, Entity>,
    children: HashMap<EntityId, Vec<EntityId>>,
}

impl EntityHierarchy {
    /// Builds the hierarchy from the entity master.
    ///
    /// Child lists preserve master order, keeping traversal deterministic.
    #[must_use]
    pub fn new(entities: Vec<Entity>) -> Self {
        let mut children: HashMap<EntityId, Vec<EntityId>> = HashMap::new();
        for entity in &entities {
            if let Some(parent_id) = entity.parent_id {
                children.entry(parent_id).or_default().push(entity.id);
            }
        }
        let entities = entities.into_iter().map(|e| (e.id, e)).collect();
        Self { entities, children }
    }

    /// Returns the entity with the given id.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Direct children of an entity.
    #[must_use]
    pub fn children(&self, id: EntityId) -> &[EntityId] {
        self.children.get(&id).map_or(&[], |c| c.as_slice())
    }

    /// Parent of an entity, if configured.
    #[must_use]
    pub fn parent(&self, id: EntityId) -> Option<&Entity> {
        self.entities
            .get(&id)
            .and_then(|e| e.parent_id)
            .and_then(|parent_id| self.entities.get(&parent_id))
    }

    /// All descendants of `root` (children, grandchildren, ...), breadth-first.
    ///
    /// Does not include `root` itself. Each entity appears at most once even
    /// when the configured links contain a cycle.
    #[must_use]
    pub fn descendants(&self, root: EntityId) -> Vec<EntityId> {
        let mut visited = HashSet::from([root]);
        let mut queue = VecDeque::from([root]);
        let mut result = Vec::new();

        while let Some(current) = queue.pop_front() {
            for &child in self.children(current) {
                if visited.insert(child) {
                    result.push(child);
                    queue.push_back(child);
                }
            }
        }
        result
    }

    /// The root together with all of its descendants.
    pub fn subtree(&self, root: EntityId) -> Result<Vec<EntityId>, HierarchyError> {
        if !self.entities.contains_key(&root) {
            return Err(HierarchyError::EntityNotFound(root));
        }
        let mut scope = vec![root];
        scope.extend(self.descendants(root));
        Ok(scope)
    }

    /// Returns true if assigning `candidate_parent` as `candidate_child`'s
    /// parent would close a cycle.
    ///
    /// A cycle forms when the proposed parent is the child itself or already
    /// among the child's descendants. The entity-management collaborator must
    /// reject such assignments before they reach the master data.
    #[must_use]
    pub fn would_create_cycle(
        &self,
        candidate_child: EntityId,
        candidate_parent: EntityId,
    ) -> bool {
        candidate_child == candidate_parent
            || self.descendants(candidate_child).contains(&candidate_parent)
    }

    /// Write-boundary guard for parent assignment.
    ///
    /// Rejects unknown entities and cycle-closing assignments so master
    /// data never reaches the read paths in an inconsistent state.
    pub fn ensure_can_assign_parent(
        &self,
        candidate_child: EntityId,
        candidate_parent: EntityId,
    ) -> Result<(), HierarchyError> {
        for id in [candidate_child, candidate_parent] {
            if !self.entities.contains_key(&id) {
                return Err(HierarchyError::EntityNotFound(id));
            }
        }
        if self.would_create_cycle(candidate_child, candidate_parent) {
            return Err(HierarchyError::CycleDetected {
                child: candidate_child,
                parent: candidate_parent,
            });
        }
        Ok(())
    }
}
