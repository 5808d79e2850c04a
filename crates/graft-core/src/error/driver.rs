/// Error surfaced by the statement-execution boundary.
#[derive(Debug)]
pub(super) struct DriverError(pub(super) Box<dyn std::error::Error + Send + Sync>);

impl std::error::Error for DriverError {}

impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "driver operation failed: {}", self.0)
    }
}
