//! Property-based tests for hierarchy traversal.

use meridian_shared::types::{CurrencyCode, EntityId};
use proptest::prelude::*;
use uuid::Uuid;

use super::hierarchy::EntityHierarchy;
use super::types::Entity;

fn id(n: usize) -> EntityId {
    EntityId::from_uuid(Uuid::from_u128(n as u128 + 1))
}

fn entity(n: usize, parent: Option<usize>) -> Entity {
    let mut e = Entity::new(
        id(n),
        format!("Entity {n}"),
        format!("E{n}"),
        CurrencyCode::new("USD"),
    );
    e.parent_id = parent.map(id);
    e
}

/// Strategy for arbitrary parent assignments over `n` entities, allowing
/// self-references and cycles.
fn arbitrary_forest(max_size: usize) -> impl Strategy<Value = Vec<Option<usize>>> {
    (1..=max_size).prop_flat_map(|n| {
        prop::collection::vec(prop::option::of(0..n), n)
    })
}

/// Builds a strict parent chain: entity 0 is the root, entity i's parent is i-1.
fn chain(depth: usize) -> EntityHierarchy {
    let entities = (0..=depth)
        .map(|n| entity(n, if n == 0 { None } else { Some(n - 1) }))
        .collect();
    EntityHierarchy::new(entities)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Traversal terminates and yields a duplicate-free subset of the
    /// configured entities, for any parent wiring including cycles.
    #[test]
    fn prop_descendants_terminates_and_is_a_set(
        parents in arbitrary_forest(12),
        root_index in 0usize..12,
    ) {
        let n = parents.len();
        let root = root_index % n;
        let entities: Vec<Entity> = parents
            .iter()
            .enumerate()
            .map(|(i, parent)| entity(i, *parent))
            .collect();
        let hierarchy = EntityHierarchy::new(entities);

        let descendants = hierarchy.descendants(id(root));

        prop_assert!(descendants.len() < n, "descendants must exclude the root");
        let mut deduped = descendants.clone();
        deduped.sort_unstable();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), descendants.len(), "no entity may appear twice");
        for d in &descendants {
            prop_assert!((0..n).map(id).any(|candidate| candidate == *d));
        }
    }

    /// On a chain of depth 1..=5, re-parenting the root under any of its
    /// descendants is rejected, while re-parenting a leaf under any of its
    /// ancestors is allowed.
    #[test]
    fn prop_would_create_cycle_on_chains(depth in 1usize..=5) {
        let hierarchy = chain(depth);

        for descendant in 1..=depth {
            prop_assert!(
                hierarchy.would_create_cycle(id(0), id(descendant)),
                "root under descendant {descendant} must be rejected"
            );
        }
        for ancestor in 0..depth {
            prop_assert!(
                !hierarchy.would_create_cycle(id(depth), id(ancestor)),
                "leaf under ancestor {ancestor} must be allowed"
            );
        }
    }

    /// Self-parenting is always a cycle.
    #[test]
    fn prop_self_parent_is_cycle(depth in 1usize..=5, index in 0usize..=5) {
        let hierarchy = chain(depth);
        let index = index % (depth + 1);
        prop_assert!(hierarchy.would_create_cycle(id(index), id(index)));
    }
}
