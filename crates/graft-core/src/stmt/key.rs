use super::Value;

use std::fmt;

/// The decoded identifier of one entity.
///
/// A single-column key holds one value; a composite key holds one value per
/// primary-key column, in primary-key order. Keys are hashable so they can
/// index an identity map.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Key(Vec<Value>);

impl Key {
    pub fn new(values: Vec<Value>) -> Self {
        debug_assert!(!values.is_empty(), "a key needs at least one value");
        Self(values)
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The sole value of a single-column key.
    pub fn as_scalar(&self) -> Option<&Value> {
        match &self.0[..] {
            [value] => Some(value),
            _ => None,
        }
    }
}

impl From<Value> for Key {
    fn from(value: Value) -> Self {
        Self(vec![value])
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Self(vec![Value::I64(value)])
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tuple = f.debug_tuple("Key");
        for value in &self.0 {
            tuple.field(value);
        }
        tuple.finish()
    }
}
