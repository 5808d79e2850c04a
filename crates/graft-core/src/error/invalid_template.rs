/// Error when a SQL template cannot be parsed.
#[derive(Debug)]
pub(super) struct InvalidTemplateError {
    pub(super) detail: String,
}

impl std::error::Error for InvalidTemplateError {}

impl core::fmt::Display for InvalidTemplateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "invalid template: {}", self.detail)
    }
}
