#[macro_use]
mod fmt;
use fmt::ToSql;

mod criteria;

mod delim;
use delim::Comma;

mod flavor;
pub use flavor::Flavor;

mod ident;
use ident::Ident;

mod name;
pub use name::TableNames;

mod params;
pub use params::{Literal, Params, Placeholder};

mod statement;

mod value;

use crate::stmt::Statement;

use graft_core::{
    driver::{BinderRegistry, PreparedStatement},
    graft_trace_query,
    schema::db::{self, Column, Table},
    stmt::TypedValue,
    Result,
};

/// Serialize a statement to a SQL string.
///
/// Serialization is two-phase: a scan pass walks the statement, validates
/// every column and value against the schema and the binder registry, and
/// decides how table names are rendered; the render pass then emits text and
/// never fails. A statement that survives the scan cannot produce invalid
/// SQL.
#[derive(Debug)]
pub struct Serializer<'a> {
    /// Schema against which the statement is to be serialized
    schema: &'a db::Schema,

    /// The database flavor handles placeholder spelling differences between
    /// SQL dialects.
    flavor: Flavor,

    /// Binders for every declared type the statement may bind
    binders: BinderRegistry,
}

struct Formatter<'a, T> {
    /// Handle to the serializer
    serializer: &'a Serializer<'a>,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,

    /// How table and column references are rendered, decided by the scan
    /// phase before any text is emitted
    names: &'a TableNames,
}

impl<'a> Serializer<'a> {
    pub fn mysql(schema: &'a db::Schema) -> Self {
        Self::new(schema, Flavor::Mysql)
    }

    pub fn postgresql(schema: &'a db::Schema) -> Self {
        Self::new(schema, Flavor::Postgresql)
    }

    pub fn sqlite(schema: &'a db::Schema) -> Self {
        Self::new(schema, Flavor::Sqlite)
    }

    pub fn new(schema: &'a db::Schema, flavor: Flavor) -> Self {
        Self {
            schema,
            flavor,
            binders: BinderRegistry::standard(),
        }
    }

    /// Replace the standard binder registry.
    pub fn with_binders(mut self, binders: BinderRegistry) -> Self {
        self.binders = binders;
        self
    }

    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> Result<String> {
        let names = stmt.scan(self.schema, &self.binders)?;

        let mut ret = String::new();
        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
            names: &names,
        };

        stmt.to_sql(&mut fmt);

        ret.push(';');
        Ok(ret)
    }

    /// Build a ready-to-execute prepared statement: SQL text with positional
    /// placeholders plus the bound values and their declared types, in
    /// emission order.
    pub fn prepare(&self, stmt: &Statement) -> Result<PreparedStatement> {
        let mut params = Vec::<TypedValue>::new();
        let sql = self.serialize(stmt, &mut params)?;
        graft_trace_query!(&sql, params.len());
        Ok(PreparedStatement::new(sql, params))
    }

    /// Render the statement as literal SQL text, values inlined. Intended
    /// for display and debugging, not for execution.
    pub fn to_sql_string(&self, stmt: &Statement) -> Result<String> {
        self.serialize(stmt, &mut Literal)
    }

    fn table(&self, id: impl Into<db::TableId>) -> &'a Table {
        self.schema.table(id.into())
    }

    fn column(&self, id: impl Into<db::ColumnId>) -> &'a Column {
        self.schema.column(id.into())
    }
}
