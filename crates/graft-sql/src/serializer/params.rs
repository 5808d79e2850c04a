use super::{Formatter, ToSql};

use graft_core::stmt::{Type, TypedValue, Value};

/// Sink for bound parameter values, in emission order.
///
/// One implementation records typed values and yields positional
/// placeholders; [`Literal`] renders values inline, producing displayable
/// SQL text. A statement serialized through either sink goes through the
/// identical render pass.
pub trait Params {
    fn push(&mut self, value: &Value, ty: Type) -> Placeholder;
}

pub enum Placeholder {
    /// The 1-based positional placeholder the value occupies
    Positional(usize),

    /// The value rendered as SQL literal text
    Literal(String),
}

impl Params for Vec<TypedValue> {
    fn push(&mut self, value: &Value, ty: Type) -> Placeholder {
        self.push(TypedValue::new(value.clone(), ty));
        Placeholder::Positional(self.len())
    }
}

/// Renders bound values inline as SQL literal text.
pub struct Literal;

impl Params for Literal {
    fn push(&mut self, value: &Value, _ty: Type) -> Placeholder {
        Placeholder::Literal(literal_text(value))
    }
}

fn literal_text(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        Value::I32(v) => v.to_string(),
        Value::I64(v) => v.to_string(),
        Value::String(v) => format!("'{}'", v.replace('\'', "''")),
        Value::List(items) => {
            let items: Vec<_> = items.iter().map(literal_text).collect();
            items.join(", ")
        }
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Self::Positional(index) => f.serializer.flavor.push_placeholder(f.dst, index),
            Self::Literal(text) => f.dst.push_str(&text),
        }
    }
}
