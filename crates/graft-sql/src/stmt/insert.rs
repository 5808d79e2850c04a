use super::qualified_name;
use crate::serializer::TableNames;

use graft_core::driver::BinderRegistry;
use graft_core::schema::db::{ColumnId, Schema, TableId};
use graft_core::stmt::Value;
use graft_core::{Error, Result};

use std::collections::HashSet;

/// `INSERT INTO <table> (<columns>) VALUES (..), (..)`
///
/// Always single-table; every value row binds positionally against the
/// column list.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: TableId,
    pub columns: Vec<ColumnId>,
    pub rows: Vec<Vec<Value>>,
}

impl Insert {
    pub fn new(table: TableId, columns: impl Into<Vec<ColumnId>>) -> Self {
        Self {
            table,
            columns: columns.into(),
            rows: vec![],
        }
    }

    pub fn row(mut self, values: impl Into<Vec<Value>>) -> Self {
        self.rows.push(values.into());
        self
    }

    pub(crate) fn scan(&self, schema: &Schema, binders: &BinderRegistry) -> Result<TableNames> {
        if self.columns.is_empty() {
            return Err(Error::invalid_statement("INSERT requires a column list"));
        }
        if self.rows.is_empty() {
            return Err(Error::invalid_statement("INSERT requires at least one row"));
        }

        let mut seen = HashSet::new();
        for column_id in &self.columns {
            let column = schema.column(*column_id);
            if column.id.table != self.table {
                return Err(Error::invalid_statement(format!(
                    "inserted column `{}` does not belong to `{}`",
                    qualified_name(schema, column),
                    schema.table(self.table).name,
                )));
            }
            if !seen.insert(*column_id) {
                return Err(Error::invalid_statement(format!(
                    "column `{}` listed twice",
                    qualified_name(schema, column),
                )));
            }
        }

        for row in &self.rows {
            if row.len() != self.columns.len() {
                return Err(Error::invalid_statement(format!(
                    "row has {} values but {} columns are listed",
                    row.len(),
                    self.columns.len(),
                )));
            }
            for (column_id, value) in self.columns.iter().zip(row) {
                let column = schema.column(*column_id);
                let binder = binders.get(column.ty)?;
                binder.bind(&qualified_name(schema, column), value)?;
            }
        }

        Ok(TableNames::single_table())
    }
}
