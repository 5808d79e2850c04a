use crate::stmt::{Type, Value};

/// Error when a value does not match the declared type of the column or
/// parameter it is bound to.
#[derive(Debug)]
pub(super) struct InvalidBindingError {
    pub(super) target: String,
    pub(super) expected: Type,
    pub(super) actual: Value,
}

impl std::error::Error for InvalidBindingError {}

impl core::fmt::Display for InvalidBindingError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "cannot bind {} to `{}`: expected {}",
            self.actual.type_name(),
            self.target,
            self.expected,
        )
    }
}
