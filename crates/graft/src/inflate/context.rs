use super::Entity;

use graft_core::schema::mapping::JoinNodeId;
use graft_core::stmt::Key;
use graft_core::Result;

use indexmap::IndexMap;

use std::any::TypeId;
use std::collections::HashSet;

/// State scoped to exactly one row-set traversal.
///
/// Holds the identity map (one entity instance per entity type and decoded
/// identifier) and the set of relation wirings already performed. Both are
/// what collapse the fan-out a one-to-many join produces back into a proper
/// graph: repeated rows resolve to the already-materialized instance, and a
/// child is wired to a given parent at most once.
///
/// A context must not outlive its traversal; drop it when the row set is
/// consumed.
#[derive(Default)]
pub struct InflationContext {
    /// Identity map, in first-seen order
    entities: IndexMap<(TypeId, Key), Entity>,

    /// (node, parent identity, child identity) triples already wired
    wired: HashSet<(JoinNodeId, Key, Key)>,
}

impl InflationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the instance for `(ty, key)`, inflating it on first sight.
    /// The boolean is true when the instance was created by this call.
    ///
    /// For a fixed context, the same pair always resolves to the same
    /// instance, however many rows contain it.
    pub fn get_or_inflate(
        &mut self,
        ty: TypeId,
        key: &Key,
        inflate: impl FnOnce() -> Result<Entity>,
    ) -> Result<(Entity, bool)> {
        if let Some(existing) = self.entities.get(&(ty, key.clone())) {
            return Ok((existing.clone(), false));
        }

        let fresh = inflate()?;
        self.entities.insert((ty, key.clone()), fresh.clone());
        Ok((fresh, true))
    }

    /// Record a wiring. True the first time this (node, parent, child)
    /// triple is seen; false on every repetition.
    pub fn mark_wired(&mut self, node: JoinNodeId, parent: &Key, child: &Key) -> bool {
        self.wired.insert((node, parent.clone(), child.clone()))
    }

    /// Number of distinct instances materialized so far.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
