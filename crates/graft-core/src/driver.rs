mod binder;
pub use binder::{Binder, BinderRegistry};

mod operation;
pub use operation::PreparedStatement;

mod response;
pub use response::{Response, Rows};

mod row;
pub use row::Row;

use crate::Result;

/// The statement-execution boundary.
///
/// Implementations accept a fully-rendered SQL statement with its ordered
/// bound parameters and return an update count, generated keys, or a row set.
/// The core treats every call as opaque and possibly failing; cancellation
/// and timeouts live behind this trait.
pub trait Connection {
    fn execute(&mut self, stmt: &PreparedStatement) -> Result<Response>;
}
