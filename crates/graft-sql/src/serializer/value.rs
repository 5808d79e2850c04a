use super::{Formatter, Params, ToSql};

use graft_core::stmt::{Type, Value};

/// A bound value carrying the declared type of the column it binds.
pub(super) struct TypedValueRef<'a> {
    pub(super) value: &'a Value,
    pub(super) ty: Type,
}

impl ToSql for TypedValueRef<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let placeholder = f.params.push(self.value, self.ty);
        fmt!(f, placeholder);
    }
}
