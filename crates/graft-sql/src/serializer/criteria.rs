use super::{Formatter, Ident, Params, ToSql};

use graft_core::schema::db::ColumnId;
use graft_core::stmt::{BinaryOp, Connective, Criteria, Criterion, Operand};

/// A column reference, rendered bare or qualifier-prefixed per the
/// statement's [`TableNames`](super::TableNames) mode.
pub(super) struct ColumnRef(pub(super) ColumnId);

impl ToSql for ColumnRef {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let column = f.serializer.column(self.0);

        match f.names.qualifier(column.id.table) {
            Some(qualifier) => {
                let qualifier = qualifier.to_string();
                fmt!(f, Ident(qualifier), ".", Ident(&column.name));
            }
            None => fmt!(f, Ident(&column.name)),
        }
    }
}

impl ToSql for &Criteria {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        for (i, (connective, criterion)) in self.iter().enumerate() {
            if i > 0 {
                f.dst.push_str(match connective {
                    Connective::And => " AND ",
                    Connective::Or => " OR ",
                });
            }
            criterion.to_sql(f);
        }
    }
}

impl ToSql for &Criterion {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Criterion::Compare(compare) => {
                let column = f.serializer.column(compare.column);

                fmt!(f, ColumnRef(compare.column), " ", compare.op, " ");

                match &compare.rhs {
                    Operand::Column(rhs) => fmt!(f, ColumnRef(*rhs)),
                    Operand::Value(value) => {
                        let placeholder = f.params.push(value, column.ty);
                        fmt!(f, placeholder);
                    }
                }
            }
            Criterion::IsNull(is_null) => {
                if is_null.negate {
                    fmt!(f, ColumnRef(is_null.column), " IS NOT NULL");
                } else {
                    fmt!(f, ColumnRef(is_null.column), " IS NULL");
                }
            }
            Criterion::Not(inner) => {
                fmt!(f, "NOT (", &**inner, ")");
            }
        }
    }
}

impl ToSql for BinaryOp {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        f.dst.push_str(match self {
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "<>",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
        });
    }
}

/// Renders ` WHERE <criteria>` when any criteria exist.
pub(super) struct Filter<'a>(pub(super) &'a Criteria);

impl ToSql for Filter<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if !self.0.is_empty() {
            fmt!(f, " WHERE ", self.0);
        }
    }
}
