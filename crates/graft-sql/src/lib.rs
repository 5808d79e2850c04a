mod serializer;
pub use serializer::{Flavor, Literal, Params, Placeholder, Serializer, TableNames};

pub mod stmt;
pub use stmt::{Assignment, Delete, Insert, Select, Statement, Update};

mod template;
pub use template::{Binding, Bindings, ExpandedSql, SqlTemplate};

pub use graft_core::stmt::TypedValue;
