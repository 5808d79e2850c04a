mod delete;
pub use delete::Delete;

mod insert;
pub use insert::Insert;

mod select;
pub use select::Select;

mod update;
pub use update::{Assignment, Update};

use crate::serializer::TableNames;

use graft_core::driver::BinderRegistry;
use graft_core::schema::db::{Column, Schema, TableId};
use graft_core::stmt::{Criteria, Criterion, Operand};
use graft_core::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Delete(Delete),
    Insert(Insert),
    Select(Select),
    Update(Update),
}

impl Statement {
    /// The scan phase: validate the statement against the schema and the
    /// binder registry and decide how table names are rendered, before any
    /// text is emitted.
    pub(crate) fn scan(&self, schema: &Schema, binders: &BinderRegistry) -> Result<TableNames> {
        match self {
            Self::Delete(stmt) => stmt.scan(schema, binders),
            Self::Insert(stmt) => stmt.scan(schema, binders),
            Self::Select(stmt) => stmt.scan(schema, binders),
            Self::Update(stmt) => stmt.scan(schema, binders),
        }
    }
}

impl From<Delete> for Statement {
    fn from(stmt: Delete) -> Self {
        Self::Delete(stmt)
    }
}

impl From<Insert> for Statement {
    fn from(stmt: Insert) -> Self {
        Self::Insert(stmt)
    }
}

impl From<Select> for Statement {
    fn from(stmt: Select) -> Self {
        Self::Select(stmt)
    }
}

impl From<Update> for Statement {
    fn from(stmt: Update) -> Self {
        Self::Update(stmt)
    }
}

/// `table.column`, for diagnostics.
fn qualified_name(schema: &Schema, column: &Column) -> String {
    format!("{}.{}", schema.table(column.id.table).name, column.name)
}

fn validate_criterion(criterion: &Criterion, schema: &Schema, binders: &BinderRegistry) -> Result<()> {
    match criterion {
        Criterion::Compare(compare) => {
            let column = schema.column(compare.column);
            let binder = binders.get(column.ty)?;

            match &compare.rhs {
                Operand::Value(value) => {
                    binder.bind(&qualified_name(schema, column), value)?;
                }
                Operand::Column(rhs) => {
                    let rhs = schema.column(*rhs);
                    if rhs.ty != column.ty {
                        return Err(Error::invalid_statement(format!(
                            "cannot compare `{}` ({}) to `{}` ({})",
                            qualified_name(schema, column),
                            column.ty,
                            qualified_name(schema, rhs),
                            rhs.ty,
                        )));
                    }
                }
            }
            Ok(())
        }
        Criterion::IsNull(_) => Ok(()),
        Criterion::Not(inner) => validate_criterion(inner, schema, binders),
    }
}

fn validate_criteria(criteria: &Criteria, schema: &Schema, binders: &BinderRegistry) -> Result<()> {
    for (_, criterion) in criteria.iter() {
        validate_criterion(criterion, schema, binders)?;
    }
    Ok(())
}

/// The set of tables a filtered single-target statement references: the
/// target first, then every other table in criteria discovery order, without
/// duplicates.
fn referenced_tables(target: TableId, criteria: &Criteria) -> Vec<TableId> {
    let mut tables = vec![target];
    for column in criteria.referenced_columns() {
        if !tables.contains(&column.table) {
            tables.push(column.table);
        }
    }
    tables
}

/// Table-name mode for DELETE and UPDATE: bare names when only the target is
/// referenced, table-name qualifiers otherwise.
fn table_names_for(schema: &Schema, tables: Vec<TableId>) -> TableNames {
    if tables.len() == 1 {
        TableNames::single_table()
    } else {
        TableNames::multi_table(
            tables
                .into_iter()
                .map(|id| (id, schema.table(id).name.clone())),
        )
    }
}
