use super::validate_criteria;
use crate::serializer::TableNames;

use graft_core::driver::BinderRegistry;
use graft_core::schema::db::Schema;
use graft_core::schema::mapping::JoinTree;
use graft_core::stmt::Criteria;
use graft_core::{Error, Result};

/// A multi-table SELECT assembled from a join tree: one select-list entry
/// per node column, the root in FROM, one LEFT JOIN per further node.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub tree: JoinTree,
    pub filter: Criteria,
}

impl Select {
    pub fn new(tree: JoinTree) -> Self {
        Self {
            tree,
            filter: Criteria::new(),
        }
    }

    pub fn filter(mut self, filter: impl Into<Criteria>) -> Self {
        self.filter = filter.into();
        self
    }

    pub(crate) fn scan(&self, schema: &Schema, binders: &BinderRegistry) -> Result<TableNames> {
        validate_criteria(&self.filter, schema, binders)?;

        for column in self.filter.referenced_columns() {
            let in_tree = self
                .tree
                .nodes()
                .any(|node| node.table() == column.table);
            if !in_tree {
                return Err(Error::invalid_statement(format!(
                    "criteria reference `{}`, which the join tree does not include",
                    schema.table(column.table).name,
                )));
            }
        }

        if self.tree.is_multi_table() || self.tree.root().alias().is_some() {
            // First occurrence wins when the same table appears at several
            // tree positions; criteria then resolve against that occurrence.
            let mut qualifiers = vec![];
            for node in self.tree.nodes() {
                let alias = node.alias().expect("aliased in multi-table mode");
                if !qualifiers.iter().any(|(table, _)| *table == node.table()) {
                    qualifiers.push((node.table(), alias.to_string()));
                }
            }
            Ok(TableNames::multi_table(qualifiers))
        } else {
            Ok(TableNames::single_table())
        }
    }
}
