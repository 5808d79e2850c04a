/// Error when an empty collection is bound to an expandable parameter.
#[derive(Debug)]
pub(super) struct EmptyListBindingError {
    pub(super) name: String,
}

impl std::error::Error for EmptyListBindingError {}

impl core::fmt::Display for EmptyListBindingError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "parameter `{}` is bound to an empty collection; at least one value is required",
            self.name
        )
    }
}
