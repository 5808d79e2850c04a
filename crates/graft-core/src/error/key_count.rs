/// Error when the number of generated keys returned by the driver does not
/// match the number of submitted rows.
#[derive(Debug)]
pub(super) struct KeyCountError {
    pub(super) expected: usize,
    pub(super) actual: usize,
}

impl std::error::Error for KeyCountError {}

impl core::fmt::Display for KeyCountError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "expected {} generated keys, driver returned {}",
            self.expected, self.actual
        )
    }
}
