use super::{Column, ColumnId, PrimaryKey, Schema, Table, TableId};
use crate::{stmt::Type, Error, Result};

use std::collections::HashSet;

/// Declares a [`Schema`] at mapping-configuration time.
///
/// The builder is the only way to mint table and column ids; the schema it
/// produces is immutable.
#[derive(Default)]
pub struct SchemaBuilder {
    tables: Vec<TableBuilder>,
}

pub struct TableBuilder {
    name: String,
    columns: Vec<ColumnBuilder>,
}

pub struct ColumnBuilder {
    name: String,
    ty: Type,
    nullable: bool,
    primary_key: bool,
    auto_increment: bool,
}

impl SchemaBuilder {
    pub fn table(mut self, name: impl Into<String>, f: impl FnOnce(&mut TableBuilder)) -> Self {
        let mut table = TableBuilder {
            name: name.into(),
            columns: vec![],
        };
        f(&mut table);
        self.tables.push(table);
        self
    }

    pub fn build(self) -> Result<Schema> {
        let mut names = HashSet::new();
        let mut tables = Vec::with_capacity(self.tables.len());

        for (index, table) in self.tables.into_iter().enumerate() {
            if table.name.is_empty() {
                return Err(Error::invalid_schema("table name must not be empty"));
            }
            if !names.insert(table.name.clone()) {
                return Err(Error::invalid_schema(format!(
                    "duplicate table name `{}`",
                    table.name
                )));
            }

            tables.push(table.build(TableId(index))?);
        }

        Ok(Schema { tables })
    }
}

impl TableBuilder {
    /// Declare a column. Further flags are set on the returned builder.
    pub fn column(&mut self, name: impl Into<String>, ty: Type) -> &mut ColumnBuilder {
        self.columns.push(ColumnBuilder {
            name: name.into(),
            ty,
            nullable: false,
            primary_key: false,
            auto_increment: false,
        });
        self.columns.last_mut().unwrap()
    }

    fn build(self, id: TableId) -> Result<Table> {
        if self.columns.is_empty() {
            return Err(Error::invalid_schema(format!(
                "table `{}` has no columns",
                self.name
            )));
        }

        let mut names = HashSet::new();
        let mut columns = Vec::with_capacity(self.columns.len());
        let mut pk_columns = vec![];

        for (index, column) in self.columns.into_iter().enumerate() {
            if column.name.is_empty() {
                return Err(Error::invalid_schema(format!(
                    "table `{}` has a column with an empty name",
                    self.name
                )));
            }
            if !names.insert(column.name.clone()) {
                return Err(Error::invalid_schema(format!(
                    "duplicate column `{}.{}`",
                    self.name, column.name
                )));
            }
            if column.primary_key && column.nullable {
                return Err(Error::invalid_schema(format!(
                    "primary-key column `{}.{}` must not be nullable",
                    self.name, column.name
                )));
            }

            let column_id = ColumnId { table: id, index };
            if column.primary_key {
                pk_columns.push(column_id);
            }

            columns.push(Column {
                id: column_id,
                name: column.name,
                ty: column.ty,
                nullable: column.nullable,
                primary_key: column.primary_key,
                auto_increment: column.auto_increment,
            });
        }

        let auto_increment: Vec<_> = columns.iter().filter(|c| c.auto_increment).collect();
        if let [column] = &auto_increment[..] {
            if !matches!(column.ty, Type::I32 | Type::I64) {
                return Err(Error::invalid_schema(format!(
                    "auto-increment column `{}.{}` must be an integer",
                    self.name, column.name
                )));
            }
            if pk_columns != [column.id] {
                return Err(Error::invalid_schema(format!(
                    "auto-increment column `{}.{}` must be the sole primary-key column",
                    self.name, column.name
                )));
            }
        } else if auto_increment.len() > 1 {
            return Err(Error::invalid_schema(format!(
                "table `{}` has more than one auto-increment column",
                self.name
            )));
        }

        let primary_key = if pk_columns.is_empty() {
            None
        } else {
            Some(PrimaryKey {
                columns: pk_columns,
            })
        };

        Ok(Table {
            id,
            name: self.name,
            columns,
            primary_key,
        })
    }
}

impl ColumnBuilder {
    pub fn nullable(&mut self) -> &mut Self {
        self.nullable = true;
        self
    }

    pub fn primary_key(&mut self) -> &mut Self {
        self.primary_key = true;
        self
    }

    pub fn auto_increment(&mut self) -> &mut Self {
        self.auto_increment = true;
        self
    }
}
