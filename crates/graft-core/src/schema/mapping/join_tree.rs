use crate::schema::db::{Column, ColumnId, Schema, TableId};
use crate::{Error, Result};

use std::collections::HashSet;
use std::fmt;

/// How a child node's entities relate to its parent's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// At most one child entity per parent (singular reference)
    One,

    /// Any number of child entities per parent (collection)
    Many,
}

/// An equi-join column pair between a node and its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoinPredicate {
    pub parent_column: ColumnId,
    pub child_column: ColumnId,
}

/// Identifies a node within one [`JoinTree`]. The root is always node 0 and a
/// parent's id is always smaller than its children's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JoinNodeId(pub usize);

/// One table's place in a join tree: the table, the columns selected from it,
/// its rendered alias, and the predicate joining it to its parent.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinNode {
    id: JoinNodeId,
    parent: Option<JoinNodeId>,
    table: TableId,
    columns: Vec<ColumnId>,
    alias: Option<String>,
    relation: Relation,
    predicates: Vec<JoinPredicate>,
}

/// A rooted, acyclic description of the tables joined to build one SELECT and
/// of how each table's rows map back to entities.
///
/// Built once at mapping-configuration time and immutable thereafter. Nodes
/// are stored in insertion order, which the builder guarantees places every
/// parent before its children, so iterating [`JoinTree::nodes`] is a valid
/// inflation traversal order.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinTree {
    nodes: Vec<JoinNode>,
}

impl JoinTree {
    pub fn builder(schema: &Schema) -> JoinTreeBuilder<'_> {
        JoinTreeBuilder {
            schema,
            nodes: vec![],
        }
    }

    pub fn root(&self) -> &JoinNode {
        &self.nodes[0]
    }

    pub fn node(&self, id: JoinNodeId) -> &JoinNode {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &JoinNode> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// True when the statement spans more than one table position; every
    /// table and column reference is then rendered alias-qualified.
    pub fn is_multi_table(&self) -> bool {
        self.nodes.len() > 1
    }
}

impl JoinNode {
    pub fn id(&self) -> JoinNodeId {
        self.id
    }

    pub fn parent(&self) -> Option<JoinNodeId> {
        self.parent
    }

    pub fn table(&self) -> TableId {
        self.table
    }

    pub fn columns(&self) -> &[ColumnId] {
        &self.columns
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    pub fn predicates(&self) -> &[JoinPredicate] {
        &self.predicates
    }

    /// The node's rendered alias, absent only in a single-node tree with no
    /// explicit alias.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// The label a selected column carries in the result set, and under which
    /// the row reader finds it again.
    pub fn column_label(&self, column: &Column) -> String {
        match &self.alias {
            Some(alias) => format!("{}_{}", alias, column.name),
            None => column.name.clone(),
        }
    }
}

pub struct JoinTreeBuilder<'a> {
    schema: &'a Schema,
    nodes: Vec<NodeDraft>,
}

struct NodeDraft {
    parent: Option<JoinNodeId>,
    table: TableId,
    columns: Vec<ColumnId>,
    alias: Option<String>,
    relation: Relation,
    predicates: Vec<JoinPredicate>,
}

impl<'a> JoinTreeBuilder<'a> {
    /// Declare the root node. Must be called exactly once, before any join.
    pub fn root(&mut self, table: TableId, columns: &[ColumnId]) -> Result<JoinNodeId> {
        if !self.nodes.is_empty() {
            return Err(Error::invalid_mapping("join tree already has a root"));
        }
        self.push(None, table, columns, Relation::One, vec![])
    }

    /// Join a child table whose rows attach to the parent as a singular
    /// reference.
    pub fn join_one(
        &mut self,
        parent: JoinNodeId,
        table: TableId,
        columns: &[ColumnId],
        on: &[(ColumnId, ColumnId)],
    ) -> Result<JoinNodeId> {
        self.join(parent, Relation::One, table, columns, on)
    }

    /// Join a child table whose rows accumulate into a collection on the
    /// parent.
    pub fn join_many(
        &mut self,
        parent: JoinNodeId,
        table: TableId,
        columns: &[ColumnId],
        on: &[(ColumnId, ColumnId)],
    ) -> Result<JoinNodeId> {
        self.join(parent, Relation::Many, table, columns, on)
    }

    fn join(
        &mut self,
        parent: JoinNodeId,
        relation: Relation,
        table: TableId,
        columns: &[ColumnId],
        on: &[(ColumnId, ColumnId)],
    ) -> Result<JoinNodeId> {
        let Some(parent_draft) = self.nodes.get(parent.0) else {
            return Err(Error::invalid_mapping("unknown parent node"));
        };
        if on.is_empty() {
            return Err(Error::invalid_mapping(
                "a joined node needs at least one predicate column pair",
            ));
        }

        let parent_table = parent_draft.table;
        let mut predicates = Vec::with_capacity(on.len());
        for (parent_column, child_column) in on {
            if parent_column.table != parent_table {
                return Err(Error::invalid_mapping(format!(
                    "predicate column `{}` does not belong to the parent table `{}`",
                    self.schema.column(*parent_column).name,
                    self.schema.table(parent_table).name,
                )));
            }
            if child_column.table != table {
                return Err(Error::invalid_mapping(format!(
                    "predicate column `{}` does not belong to the joined table `{}`",
                    self.schema.column(*child_column).name,
                    self.schema.table(table).name,
                )));
            }
            let parent_ty = self.schema.column(*parent_column).ty;
            let child_ty = self.schema.column(*child_column).ty;
            if parent_ty != child_ty {
                return Err(Error::invalid_mapping(format!(
                    "predicate joins {} column to {} column",
                    parent_ty, child_ty,
                )));
            }
            predicates.push(JoinPredicate {
                parent_column: *parent_column,
                child_column: *child_column,
            });
        }

        self.push(Some(parent), table, columns, relation, predicates)
    }

    /// Give a node an explicit alias instead of the generated `t{index}`.
    pub fn alias(&mut self, node: JoinNodeId, alias: impl Into<String>) -> Result<()> {
        let alias = alias.into();
        if alias.is_empty() {
            return Err(Error::invalid_mapping("alias must not be empty"));
        }
        match self.nodes.get_mut(node.0) {
            Some(draft) => {
                draft.alias = Some(alias);
                Ok(())
            }
            None => Err(Error::invalid_mapping("unknown node")),
        }
    }

    pub fn build(self) -> Result<JoinTree> {
        if self.nodes.is_empty() {
            return Err(Error::invalid_mapping("join tree has no root"));
        }

        let multi_table = self.nodes.len() > 1;
        let mut aliases = HashSet::new();
        let mut nodes = Vec::with_capacity(self.nodes.len());

        for (index, draft) in self.nodes.into_iter().enumerate() {
            let alias = match draft.alias {
                Some(alias) => Some(alias),
                None if multi_table => Some(format!("t{index}")),
                None => None,
            };
            if let Some(alias) = &alias {
                if !aliases.insert(alias.clone()) {
                    return Err(Error::invalid_mapping(format!(
                        "duplicate alias `{alias}`"
                    )));
                }
            }

            nodes.push(JoinNode {
                id: JoinNodeId(index),
                parent: draft.parent,
                table: draft.table,
                columns: draft.columns,
                alias,
                relation: draft.relation,
                predicates: draft.predicates,
            });
        }

        Ok(JoinTree { nodes })
    }

    fn push(
        &mut self,
        parent: Option<JoinNodeId>,
        table: TableId,
        columns: &[ColumnId],
        relation: Relation,
        predicates: Vec<JoinPredicate>,
    ) -> Result<JoinNodeId> {
        let table_def = self.schema.table(table);

        if columns.is_empty() {
            return Err(Error::invalid_mapping(format!(
                "no columns selected from `{}`",
                table_def.name
            )));
        }
        for column in columns {
            if column.table != table {
                return Err(Error::invalid_mapping(format!(
                    "selected column `{}` does not belong to `{}`",
                    self.schema.column(*column).name,
                    table_def.name,
                )));
            }
        }

        let Some(pk) = &table_def.primary_key else {
            return Err(Error::invalid_mapping(format!(
                "table `{}` has no primary key",
                table_def.name
            )));
        };
        for pk_column in &pk.columns {
            if !columns.contains(pk_column) {
                return Err(Error::invalid_mapping(format!(
                    "selected columns of `{}` must include primary-key column `{}`",
                    table_def.name,
                    self.schema.column(*pk_column).name,
                )));
            }
        }

        let id = JoinNodeId(self.nodes.len());
        self.nodes.push(NodeDraft {
            parent,
            table,
            columns: columns.to_vec(),
            alias: None,
            relation,
            predicates,
        });
        Ok(id)
    }
}

impl fmt::Display for JoinNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt::Type;

    fn schema() -> Schema {
        Schema::builder()
            .table("users", |t| {
                t.column("id", Type::I64).primary_key();
                t.column("name", Type::Text);
            })
            .table("orders", |t| {
                t.column("id", Type::I64).primary_key();
                t.column("user_id", Type::I64);
                t.column("total", Type::I64);
            })
            .build()
            .unwrap()
    }

    #[test]
    fn single_node_tree_stays_unaliased() {
        let schema = schema();
        let users = schema.table_named("users").unwrap();

        let mut builder = JoinTree::builder(&schema);
        builder
            .root(users.id, &[users.columns[0].id, users.columns[1].id])
            .unwrap();
        let tree = builder.build().unwrap();

        assert!(!tree.is_multi_table());
        assert_eq!(None, tree.root().alias());
        assert_eq!("name", tree.root().column_label(&users.columns[1]));
    }

    #[test]
    fn joined_nodes_are_aliased() {
        let schema = schema();
        let users = schema.table_named("users").unwrap();
        let orders = schema.table_named("orders").unwrap();

        let mut builder = JoinTree::builder(&schema);
        let root = builder
            .root(users.id, &[users.columns[0].id, users.columns[1].id])
            .unwrap();
        let child = builder
            .join_many(
                root,
                orders.id,
                &[orders.columns[0].id, orders.columns[1].id],
                &[(users.columns[0].id, orders.columns[1].id)],
            )
            .unwrap();
        let tree = builder.build().unwrap();

        assert!(tree.is_multi_table());
        assert_eq!(Some("t0"), tree.root().alias());
        assert_eq!(Some("t1"), tree.node(child).alias());
        assert_eq!("t1_total", tree.node(child).column_label(&orders.columns[2]));
        assert_eq!(Some(root), tree.node(child).parent());
        assert_eq!(Relation::Many, tree.node(child).relation());
    }

    #[test]
    fn predicate_columns_must_belong_to_their_tables() {
        let schema = schema();
        let users = schema.table_named("users").unwrap();
        let orders = schema.table_named("orders").unwrap();

        let mut builder = JoinTree::builder(&schema);
        let root = builder
            .root(users.id, &[users.columns[0].id])
            .unwrap();
        let err = builder
            .join_many(
                root,
                orders.id,
                &[orders.columns[0].id],
                // both sides name columns of `orders`
                &[(orders.columns[1].id, orders.columns[1].id)],
            )
            .unwrap_err();

        assert!(err.is_configuration());
    }

    #[test]
    fn selected_columns_must_cover_the_primary_key() {
        let schema = schema();
        let orders = schema.table_named("orders").unwrap();

        let mut builder = JoinTree::builder(&schema);
        let err = builder
            .root(orders.id, &[orders.columns[2].id])
            .unwrap_err();

        assert!(err.is_configuration());
    }
}
