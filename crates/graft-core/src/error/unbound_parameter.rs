/// Error when a template parameter has no binding.
#[derive(Debug)]
pub(super) struct UnboundParameterError {
    pub(super) name: String,
}

impl std::error::Error for UnboundParameterError {}

impl core::fmt::Display for UnboundParameterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "no value bound for parameter `{}`", self.name)
    }
}
