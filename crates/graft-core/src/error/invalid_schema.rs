/// Error when a schema definition is inconsistent.
#[derive(Debug)]
pub(super) struct InvalidSchemaError {
    pub(super) detail: String,
}

impl std::error::Error for InvalidSchemaError {}

impl core::fmt::Display for InvalidSchemaError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.detail)
    }
}
