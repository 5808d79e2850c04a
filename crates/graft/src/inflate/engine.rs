use super::{Entity, EntityInflater, InflationContext, RelationWirer};

use graft_core::driver::Row;
use graft_core::graft_trace_rows;
use graft_core::schema::mapping::{JoinNodeId, JoinTree};
use graft_core::stmt::Key;
use graft_core::{Error, Result};

struct NodeBinding {
    inflater: Box<dyn EntityInflater>,
    /// Absent on the root, present on every child node
    wirer: Option<Box<dyn RelationWirer>>,
}

/// Turns a flat join result back into an object graph in one linear pass.
///
/// Pairs a [`JoinTree`] with per-node [`EntityInflater`]s and
/// [`RelationWirer`]s. Each row is walked in parent-before-children order;
/// identifiers resolve through a per-traversal identity map, so the row
/// duplication a one-to-many join produces folds back into a single parent
/// instance with an accumulated collection, without a second query per
/// relation and without duplicate instances.
pub struct TreeInflater<'a> {
    tree: &'a JoinTree,
    bindings: Vec<Option<NodeBinding>>,
}

impl<'a> TreeInflater<'a> {
    pub fn new(tree: &'a JoinTree) -> Self {
        Self {
            tree,
            bindings: (0..tree.len()).map(|_| None).collect(),
        }
    }

    /// Bind the root node's inflater.
    pub fn root(mut self, inflater: Box<dyn EntityInflater>) -> Self {
        self.bindings[0] = Some(NodeBinding {
            inflater,
            wirer: None,
        });
        self
    }

    /// Bind a child node's inflater and the wirer that attaches its
    /// entities to the parent's.
    pub fn child(
        mut self,
        node: JoinNodeId,
        inflater: Box<dyn EntityInflater>,
        wirer: Box<dyn RelationWirer>,
    ) -> Result<Self> {
        let Some(binding) = self.bindings.get_mut(node.0) else {
            return Err(Error::invalid_mapping(format!("{node} is not in the tree")));
        };
        if self.tree.node(node).parent().is_none() {
            return Err(Error::invalid_mapping(
                "the root node takes no relation wirer",
            ));
        }
        if binding.is_some() {
            return Err(Error::invalid_mapping(format!("{node} is bound twice")));
        }

        *binding = Some(NodeBinding {
            inflater,
            wirer: Some(wirer),
        });
        Ok(self)
    }

    /// Consume a row set, returning the root entities deduplicated in
    /// first-seen row order.
    ///
    /// The traversal context, identity map included, lives exactly as long
    /// as this call; a second call starts from a fresh context.
    pub fn inflate(&self, rows: &[Row]) -> Result<Vec<Entity>> {
        for (index, binding) in self.bindings.iter().enumerate() {
            if binding.is_none() {
                return Err(Error::invalid_mapping(format!(
                    "{} has no inflater bound",
                    JoinNodeId(index)
                )));
            }
        }

        let mut cx = InflationContext::new();
        let mut roots = vec![];

        for (ordinal, row) in rows.iter().enumerate() {
            self.inflate_row(row, Some(ordinal), &mut cx, &mut roots)?;
        }

        graft_trace_rows!(rows.len(), roots.len());

        Ok(roots)
    }

    fn inflate_row(
        &self,
        row: &Row,
        ordinal: Option<usize>,
        cx: &mut InflationContext,
        roots: &mut Vec<Entity>,
    ) -> Result<()> {
        // Resolution state for this row, one slot per node. A node whose
        // identifier decodes to null stays unresolved, which transitively
        // skips its whole subtree.
        let mut resolved: Vec<Option<(Key, Entity)>> = (0..self.tree.len()).map(|_| None).collect();

        for node in self.tree.nodes() {
            let index = node.id().0;

            let parent = match node.parent() {
                Some(parent) => match &resolved[parent.0] {
                    Some((key, entity)) => Some((key.clone(), entity.clone())),
                    None => continue,
                },
                None => None,
            };

            let binding = self.bindings[index].as_ref().expect("checked above");

            let Some(key) = binding.inflater.key(row, ordinal)? else {
                continue;
            };

            let (entity, fresh) = cx.get_or_inflate(binding.inflater.entity_type(), &key, || {
                binding.inflater.inflate(row, ordinal)
            })?;

            match parent {
                Some((parent_key, parent_entity)) => {
                    if cx.mark_wired(node.id(), &parent_key, &key) {
                        let wirer = binding.wirer.as_ref().expect("child nodes carry a wirer");
                        wirer.wire(&parent_entity, &entity)?;
                    }
                }
                None if fresh => roots.push(entity.clone()),
                None => {}
            }

            resolved[index] = Some((key, entity));
        }

        Ok(())
    }
}
