use super::Sequence;

use graft_core::stmt::Value;

/// How an entity type's identifiers are produced, fixed per entity type at
/// mapping-configuration time.
///
/// A closed set of variants: an entity type gets exactly one, so
/// before-insert and after-insert generation cannot mix on one type.
pub enum KeyStrategy<T> {
    /// Identifiers are already set on the entities by the caller.
    Assigned,

    /// Identifiers are drawn from a sequence and fixed on each entity
    /// immediately before its parameter row joins the batch.
    BeforeInsert {
        sequence: Box<dyn Sequence>,
        set: Box<dyn Fn(&mut T, Value)>,
    },

    /// Identifiers are generated by the database; the executed batch's keys
    /// are read back and assigned in submission order.
    AfterInsert { set: Box<dyn Fn(&mut T, Value)> },
}

impl<T> KeyStrategy<T> {
    pub fn assigned() -> Self {
        Self::Assigned
    }

    pub fn before_insert(
        sequence: impl Sequence + 'static,
        set: impl Fn(&mut T, Value) + 'static,
    ) -> Self {
        Self::BeforeInsert {
            sequence: Box::new(sequence),
            set: Box::new(set),
        }
    }

    pub fn after_insert(set: impl Fn(&mut T, Value) + 'static) -> Self {
        Self::AfterInsert { set: Box::new(set) }
    }

    pub fn is_after_insert(&self) -> bool {
        matches!(self, Self::AfterInsert { .. })
    }
}
