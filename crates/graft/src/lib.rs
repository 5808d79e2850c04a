pub mod inflate;
pub use inflate::{downcast, entity, inflater, wirer, Entity, TreeInflater};

pub mod key;
pub use key::{BatchInsert, KeyAssembler, KeyStrategy, Sequence};

pub use graft_core::{driver, schema, stmt, Connection, Error, Result, Schema};
pub use graft_sql as sql;
