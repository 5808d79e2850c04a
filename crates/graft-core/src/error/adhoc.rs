/// Free-form error used by the `bail!` and `err!` macros.
#[derive(Debug)]
pub(super) struct AdhocError(pub(super) String);

impl std::error::Error for AdhocError {}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
