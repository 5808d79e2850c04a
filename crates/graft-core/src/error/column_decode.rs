use crate::stmt::{Type, Value};

/// Error when a value read back from a row does not match the column's
/// declared type.
#[derive(Debug)]
pub(super) struct ColumnDecodeError {
    pub(super) column: String,
    pub(super) expected: Type,
    pub(super) actual: Value,
    pub(super) row: Option<usize>,
}

impl std::error::Error for ColumnDecodeError {}

impl core::fmt::Display for ColumnDecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "cannot decode column `{}`: expected {}, got {}",
            self.column,
            self.expected,
            self.actual.type_name(),
        )?;
        if let Some(row) = self.row {
            write!(f, " (row {row})")?;
        }
        Ok(())
    }
}
