use super::{BinaryOp, Operand};
use crate::schema::db::ColumnId;

/// A single comparison over a column.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    /// Binary comparison against a literal or another column
    Compare(Compare),

    /// `IS NULL` / `IS NOT NULL`
    IsNull(IsNull),

    /// Negation of a nested criterion
    Not(Box<Criterion>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Compare {
    pub column: ColumnId,
    pub op: BinaryOp,
    pub rhs: Operand,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IsNull {
    pub column: ColumnId,
    pub negate: bool,
}

impl Criterion {
    pub fn eq(column: ColumnId, rhs: impl Into<Operand>) -> Self {
        Self::compare(column, BinaryOp::Eq, rhs)
    }

    pub fn ne(column: ColumnId, rhs: impl Into<Operand>) -> Self {
        Self::compare(column, BinaryOp::Ne, rhs)
    }

    pub fn gt(column: ColumnId, rhs: impl Into<Operand>) -> Self {
        Self::compare(column, BinaryOp::Gt, rhs)
    }

    pub fn ge(column: ColumnId, rhs: impl Into<Operand>) -> Self {
        Self::compare(column, BinaryOp::Ge, rhs)
    }

    pub fn lt(column: ColumnId, rhs: impl Into<Operand>) -> Self {
        Self::compare(column, BinaryOp::Lt, rhs)
    }

    pub fn le(column: ColumnId, rhs: impl Into<Operand>) -> Self {
        Self::compare(column, BinaryOp::Le, rhs)
    }

    pub fn compare(column: ColumnId, op: BinaryOp, rhs: impl Into<Operand>) -> Self {
        Self::Compare(Compare {
            column,
            op,
            rhs: rhs.into(),
        })
    }

    pub fn is_null(column: ColumnId) -> Self {
        Self::IsNull(IsNull {
            column,
            negate: false,
        })
    }

    pub fn is_not_null(column: ColumnId) -> Self {
        Self::IsNull(IsNull {
            column,
            negate: true,
        })
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(criterion: Criterion) -> Self {
        Self::Not(Box::new(criterion))
    }

    /// Visit every column referenced by this criterion, left operand first.
    pub fn for_each_column(&self, f: &mut impl FnMut(ColumnId)) {
        match self {
            Self::Compare(compare) => {
                f(compare.column);
                if let Operand::Column(rhs) = &compare.rhs {
                    f(*rhs);
                }
            }
            Self::IsNull(is_null) => f(is_null.column),
            Self::Not(inner) => inner.for_each_column(f),
        }
    }
}
