/// Error when a row does not carry a column label the reader expected.
#[derive(Debug)]
pub(super) struct MissingColumnError {
    pub(super) label: String,
    pub(super) row: Option<usize>,
}

impl std::error::Error for MissingColumnError {}

impl core::fmt::Display for MissingColumnError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "row has no column labeled `{}`", self.label)?;
        if let Some(row) = self.row {
            write!(f, " (row {row})")?;
        }
        Ok(())
    }
}
