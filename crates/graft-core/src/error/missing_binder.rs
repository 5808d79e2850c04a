use crate::stmt::Type;

/// Error when no binder is registered for a column's declared type.
#[derive(Debug)]
pub(super) struct MissingBinderError {
    pub(super) ty: Type,
}

impl std::error::Error for MissingBinderError {}

impl core::fmt::Display for MissingBinderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "no binder registered for type {}", self.ty)
    }
}
