use super::criteria::{ColumnRef, Filter};
use super::value::TypedValueRef;
use super::{Comma, Formatter, Ident, Params, ToSql};

use crate::stmt::{Assignment, Delete, Insert, Select, Statement, Update};

use graft_core::schema::db::{ColumnId, TableId};
use graft_core::stmt::Value;

impl ToSql for &Statement {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Statement::Delete(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Select(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
        }
    }
}

/// A table in the statement's table list: its name, plus `AS <qualifier>`
/// when the qualifier differs from the name.
struct TableRef(TableId);

impl ToSql for TableRef {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = f.serializer.table(self.0);

        match f.names.qualifier(table.id) {
            Some(qualifier) if qualifier != table.name => {
                fmt!(f, Ident(&table.name), " AS ", Ident(qualifier));
            }
            _ => fmt!(f, Ident(&table.name)),
        }
    }
}

impl ToSql for &Delete {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if f.names.is_multi_table() {
            // The scan phase put the target table first.
            let tables: Vec<_> = f.names.tables().map(|(id, _)| TableRef(id)).collect();
            fmt!(f, "DELETE FROM ", Comma(tables), Filter(&self.filter));
        } else {
            let table = f.serializer.table(self.from);
            fmt!(f, "DELETE FROM ", Ident(&table.name), Filter(&self.filter));
        }
    }
}

impl ToSql for &Update {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let assignments = Comma(self.assignments.iter());

        if f.names.is_multi_table() {
            let tables: Vec<_> = f.names.tables().map(|(id, _)| TableRef(id)).collect();
            fmt!(f, "UPDATE ", Comma(tables), " SET ", assignments, Filter(&self.filter));
        } else {
            let table = f.serializer.table(self.table);
            fmt!(f, "UPDATE ", Ident(&table.name), " SET ", assignments, Filter(&self.filter));
        }
    }
}

impl ToSql for &Assignment {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let ty = f.serializer.column(self.column).ty;
        let value = TypedValueRef {
            value: &self.value,
            ty,
        };
        fmt!(f, ColumnRef(self.column), " = ", value);
    }
}

/// One `(..)` row of an INSERT's VALUES list; each value binds with its
/// column's declared type.
struct InsertRow<'a> {
    columns: &'a [ColumnId],
    values: &'a [Value],
}

impl ToSql for InsertRow<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        f.dst.push('(');
        for (i, (column, value)) in self.columns.iter().zip(self.values).enumerate() {
            if i > 0 {
                f.dst.push_str(", ");
            }
            let ty = f.serializer.column(*column).ty;
            fmt!(f, TypedValueRef { value, ty });
        }
        f.dst.push(')');
    }
}

impl ToSql for &Insert {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let serializer = f.serializer;
        let table = serializer.table(self.table);
        let columns = Comma(
            self.columns
                .iter()
                .map(|column| Ident(&serializer.column(*column).name)),
        );
        let rows = Comma(self.rows.iter().map(|row| InsertRow {
            columns: &self.columns,
            values: row,
        }));

        fmt!(
            f,
            "INSERT INTO ",
            Ident(&table.name),
            " (",
            columns,
            ") VALUES ",
            rows,
        );
    }
}

impl ToSql for &Select {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let serializer = f.serializer;
        let tree = &self.tree;

        f.dst.push_str("SELECT ");

        let mut first = true;
        for node in tree.nodes() {
            for column_id in node.columns() {
                if !first {
                    f.dst.push_str(", ");
                }
                first = false;

                let column = serializer.column(*column_id);
                match node.alias() {
                    Some(alias) => {
                        let label = node.column_label(column);
                        fmt!(f, Ident(alias), ".", Ident(&column.name), " AS ", Ident(label));
                    }
                    None => fmt!(f, Ident(&column.name)),
                }
            }
        }

        let root = tree.root();
        let root_table = serializer.table(root.table());
        f.dst.push_str(" FROM ");
        match root.alias() {
            Some(alias) => fmt!(f, Ident(&root_table.name), " AS ", Ident(alias)),
            None => fmt!(f, Ident(&root_table.name)),
        }

        for node in tree.nodes().skip(1) {
            let table = serializer.table(node.table());
            let alias = node.alias().expect("joined nodes are always aliased");
            let parent = tree.node(node.parent().expect("non-root node has a parent"));
            let parent_alias = parent.alias().expect("joined nodes are always aliased");

            fmt!(f, " LEFT JOIN ", Ident(&table.name), " AS ", Ident(alias), " ON ");

            for (i, predicate) in node.predicates().iter().enumerate() {
                if i > 0 {
                    f.dst.push_str(" AND ");
                }
                let parent_column = serializer.column(predicate.parent_column);
                let child_column = serializer.column(predicate.child_column);
                fmt!(
                    f,
                    Ident(alias),
                    ".",
                    Ident(&child_column.name),
                    " = ",
                    Ident(parent_alias),
                    ".",
                    Ident(&parent_column.name),
                );
            }
        }

        fmt!(f, Filter(&self.filter));
    }
}
