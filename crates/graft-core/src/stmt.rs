mod criteria;
pub use criteria::{Connective, Criteria};

mod criterion;
pub use criterion::{Compare, Criterion, IsNull};

mod key;
pub use key::Key;

mod op_binary;
pub use op_binary::BinaryOp;

mod operand;
pub use operand::Operand;

mod ty;
pub use ty::Type;

mod typed_value;
pub use typed_value::TypedValue;

mod value;
pub use value::Value;
