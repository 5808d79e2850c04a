use super::{qualified_name, referenced_tables, table_names_for, validate_criteria};
use crate::serializer::TableNames;

use graft_core::driver::BinderRegistry;
use graft_core::schema::db::{ColumnId, Schema, TableId};
use graft_core::stmt::{Criteria, Value};
use graft_core::{Error, Result};

/// `UPDATE <target>[, <additional...>] SET ... [WHERE ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    /// The table whose rows are updated
    pub table: TableId,

    /// Column/value assignments, in emission order
    pub assignments: Vec<Assignment>,

    /// Restricts which rows are updated. May reference foreign columns.
    pub filter: Criteria,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: ColumnId,
    pub value: Value,
}

impl Update {
    pub fn new(table: TableId) -> Self {
        Self {
            table,
            assignments: vec![],
            filter: Criteria::new(),
        }
    }

    pub fn assign(mut self, column: ColumnId, value: impl Into<Value>) -> Self {
        self.assignments.push(Assignment {
            column,
            value: value.into(),
        });
        self
    }

    pub fn filter(mut self, filter: impl Into<Criteria>) -> Self {
        self.filter = filter.into();
        self
    }

    pub(crate) fn scan(&self, schema: &Schema, binders: &BinderRegistry) -> Result<TableNames> {
        if self.assignments.is_empty() {
            return Err(Error::invalid_statement(
                "UPDATE requires at least one assignment",
            ));
        }

        for assignment in &self.assignments {
            let column = schema.column(assignment.column);
            if column.id.table != self.table {
                return Err(Error::invalid_statement(format!(
                    "assigned column `{}` does not belong to `{}`",
                    qualified_name(schema, column),
                    schema.table(self.table).name,
                )));
            }
            let binder = binders.get(column.ty)?;
            binder.bind(&qualified_name(schema, column), &assignment.value)?;
        }

        validate_criteria(&self.filter, schema, binders)?;
        Ok(table_names_for(
            schema,
            referenced_tables(self.table, &self.filter),
        ))
    }
}
