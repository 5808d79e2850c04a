use crate::stmt::TypedValue;

use std::fmt;

/// A fully-rendered SQL statement plus its bound parameters in emission
/// order, ready to hand to a [`Connection`](super::Connection).
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedStatement {
    /// The SQL text, with positional placeholders
    pub sql: String,

    /// One entry per placeholder, in placeholder order
    pub params: Vec<TypedValue>,

    /// True when the caller needs the database-generated keys of the
    /// inserted rows returned, one per submitted row, in submission order.
    pub want_generated_keys: bool,
}

impl PreparedStatement {
    pub fn new(sql: String, params: Vec<TypedValue>) -> Self {
        Self {
            sql,
            params,
            want_generated_keys: false,
        }
    }
}

impl fmt::Display for PreparedStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
