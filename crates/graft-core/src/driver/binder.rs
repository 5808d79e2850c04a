use crate::stmt::{Type, TypedValue, Value};
use crate::{Error, Result};

use std::collections::HashMap;

/// The set-parameter / read-column pair for one declared type.
///
/// `bind` verifies a value on its way into a statement; `read` verifies a
/// value on its way out of a row. Neither coerces: a mismatch is surfaced as
/// a typed failure naming the offending column or parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binder {
    ty: Type,
}

impl Binder {
    pub const fn new(ty: Type) -> Self {
        Self { ty }
    }

    pub const fn ty(&self) -> Type {
        self.ty
    }

    /// Verify a value for binding. Null passes; nullability is a schema
    /// concern, not a binder concern.
    pub fn bind(&self, target: &str, value: &Value) -> Result<TypedValue> {
        if value.is_a(self.ty) && !value.is_list() {
            Ok(TypedValue::new(value.clone(), self.ty))
        } else {
            Err(Error::invalid_binding(target, self.ty, value.clone()))
        }
    }

    /// Verify a value read back from a row.
    pub fn read(&self, label: &str, value: &Value, row: Option<usize>) -> Result<Value> {
        if value.is_a(self.ty) && !value.is_list() {
            Ok(value.clone())
        } else {
            Err(Error::column_decode(label, self.ty, value.clone(), row))
        }
    }
}

/// Maps declared types to their binders. Lookup failure is a configuration
/// error raised at statement-build time, never at execution time.
#[derive(Debug, Clone)]
pub struct BinderRegistry {
    binders: HashMap<Type, Binder>,
}

impl BinderRegistry {
    /// A registry with a binder for every declared type.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for ty in [Type::Bool, Type::I32, Type::I64, Type::Text] {
            registry.register(Binder::new(ty));
        }
        registry
    }

    pub fn empty() -> Self {
        Self {
            binders: HashMap::new(),
        }
    }

    pub fn register(&mut self, binder: Binder) {
        self.binders.insert(binder.ty(), binder);
    }

    pub fn get(&self, ty: Type) -> Result<&Binder> {
        self.binders.get(&ty).ok_or_else(|| Error::missing_binder(ty))
    }
}

impl Default for BinderRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_rejects_mismatched_values() {
        let binder = Binder::new(Type::I64);

        assert!(binder.bind("orders.total", &Value::from(10i64)).is_ok());
        assert!(binder.bind("orders.total", &Value::Null).is_ok());

        let err = binder
            .bind("orders.total", &Value::from("ten"))
            .unwrap_err();
        assert!(err.is_binding());
        assert!(err.to_string().contains("orders.total"));
    }

    #[test]
    fn read_failure_carries_the_row_ordinal() {
        let binder = Binder::new(Type::Text);
        let err = binder
            .read("t0_name", &Value::from(1i64), Some(4))
            .unwrap_err();
        assert!(err.is_decode());
        assert!(err.to_string().contains("row 4"));
    }

    #[test]
    fn missing_binder_is_a_configuration_error() {
        let registry = BinderRegistry::empty();
        let err = registry.get(Type::Bool).unwrap_err();
        assert!(err.is_configuration());
    }
}
