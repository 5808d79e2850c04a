//! Tracing hooks for statement construction and row inflation.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate. The
//! macros no-op when the feature is disabled, avoiding `#[cfg]` boilerplate at
//! every call site.

/// Emit a debug-level tracing event with the SQL text and parameter count.
///
/// ```ignore
/// graft_trace_query!(&sql, params.len());
/// ```
#[macro_export]
macro_rules! graft_trace_query {
    ($sql:expr, $param_count:expr) => {
        #[cfg(feature = "tracing")]
        tracing::debug!(sql = %$sql, params = $param_count, "graft.query");
    };
}

/// Emit a debug-level tracing event after a row-set has been inflated.
///
/// ```ignore
/// graft_trace_rows!(rows.len(), roots.len());
/// ```
#[macro_export]
macro_rules! graft_trace_rows {
    ($rows:expr, $entities:expr) => {
        #[cfg(feature = "tracing")]
        tracing::debug!(rows = $rows, entities = $entities, "graft.inflate");
    };
}
