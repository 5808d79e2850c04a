use super::{Type, Value};

/// A bound parameter value paired with the declared type of the column or
/// parameter it binds, in statement emission order.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedValue {
    pub value: Value,
    pub ty: Type,
}

impl TypedValue {
    pub fn new(value: Value, ty: Type) -> Self {
        Self { value, ty }
    }
}
