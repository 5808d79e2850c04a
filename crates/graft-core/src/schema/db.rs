mod builder;
pub use builder::{ColumnBuilder, SchemaBuilder, TableBuilder};

mod column;
pub use column::{Column, ColumnId};

mod pk;
pub use pk::PrimaryKey;

mod schema;
pub use schema::Schema;

mod table;
pub use table::{Table, TableId};
