use super::{referenced_tables, table_names_for, validate_criteria};
use crate::serializer::TableNames;

use graft_core::driver::BinderRegistry;
use graft_core::schema::db::{Schema, TableId};
use graft_core::stmt::Criteria;
use graft_core::Result;

/// `DELETE FROM <target>[, <additional...>] [WHERE ...]`
///
/// The additional tables are those the criteria reference beyond the target;
/// their presence switches the whole statement to qualified column
/// rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    /// The table rows are deleted from
    pub from: TableId,

    /// Restricts which rows are deleted. May reference foreign columns.
    pub filter: Criteria,
}

impl Delete {
    pub fn new(from: TableId) -> Self {
        Self {
            from,
            filter: Criteria::new(),
        }
    }

    pub fn filter(mut self, filter: impl Into<Criteria>) -> Self {
        self.filter = filter.into();
        self
    }

    pub(crate) fn scan(&self, schema: &Schema, binders: &BinderRegistry) -> Result<TableNames> {
        validate_criteria(&self.filter, schema, binders)?;
        Ok(table_names_for(
            schema,
            referenced_tables(self.from, &self.filter),
        ))
    }
}
