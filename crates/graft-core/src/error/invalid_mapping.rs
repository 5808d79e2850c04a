/// Error when a join tree or inflater configuration is inconsistent.
#[derive(Debug)]
pub(super) struct InvalidMappingError {
    pub(super) detail: String,
}

impl std::error::Error for InvalidMappingError {}

impl core::fmt::Display for InvalidMappingError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "invalid mapping: {}", self.detail)
    }
}
