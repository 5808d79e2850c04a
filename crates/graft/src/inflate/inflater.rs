use super::{downcast, entity, Entity};

use graft_core::driver::Row;
use graft_core::stmt::Key;
use graft_core::Result;

use std::any::TypeId;
use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

/// Per-node inflation behavior: the entity type produced at a join node, how
/// to decode that entity's identifier from a row, and how to construct an
/// instance from a row.
///
/// The reflection-based accessor layer of a full mapping stack sits behind
/// this trait; [`inflater`] builds an implementation from plain closures.
pub trait EntityInflater {
    /// Tag of the entity type produced at this node. Keys the identity map
    /// together with the decoded identifier.
    fn entity_type(&self) -> TypeId;

    /// Name of the entity type, for diagnostics.
    fn entity_name(&self) -> &'static str;

    /// Decode the node's identifier from the row. `None` marks an
    /// outer-join miss: the node contributes no entity for this row and its
    /// subtree is skipped.
    fn key(&self, row: &Row, ordinal: Option<usize>) -> Result<Option<Key>>;

    /// Construct and populate a fresh instance from the row. Called at most
    /// once per distinct identifier within one traversal.
    fn inflate(&self, row: &Row, ordinal: Option<usize>) -> Result<Entity>;
}

/// Wires a resolved child entity to its resolved parent: attach a singular
/// reference or append to a collection. The traversal context guarantees at
/// most one call per (parent identity, child identity) pair, so
/// implementations append unconditionally.
pub trait RelationWirer {
    fn wire(&self, parent: &Entity, child: &Entity) -> Result<()>;
}

/// An [`EntityInflater`] backed by closures.
pub fn inflater<T, K, F>(key: K, inflate: F) -> Box<dyn EntityInflater>
where
    T: 'static,
    K: Fn(&Row, Option<usize>) -> Result<Option<Key>> + 'static,
    F: Fn(&Row, Option<usize>) -> Result<T> + 'static,
{
    struct FnInflater<T, K, F> {
        key: K,
        inflate: F,
        _entity: PhantomData<fn() -> T>,
    }

    impl<T, K, F> EntityInflater for FnInflater<T, K, F>
    where
        T: 'static,
        K: Fn(&Row, Option<usize>) -> Result<Option<Key>>,
        F: Fn(&Row, Option<usize>) -> Result<T>,
    {
        fn entity_type(&self) -> TypeId {
            TypeId::of::<T>()
        }

        fn entity_name(&self) -> &'static str {
            std::any::type_name::<T>()
        }

        fn key(&self, row: &Row, ordinal: Option<usize>) -> Result<Option<Key>> {
            (self.key)(row, ordinal)
        }

        fn inflate(&self, row: &Row, ordinal: Option<usize>) -> Result<Entity> {
            Ok(entity((self.inflate)(row, ordinal)?))
        }
    }

    Box::new(FnInflater {
        key,
        inflate,
        _entity: PhantomData,
    })
}

/// A [`RelationWirer`] backed by a closure over the typed parent and child.
pub fn wirer<P, C, F>(wire: F) -> Box<dyn RelationWirer>
where
    P: 'static,
    C: 'static,
    F: Fn(&mut P, Rc<RefCell<C>>) + 'static,
{
    struct FnWirer<P, C, F> {
        wire: F,
        _relation: PhantomData<fn(&mut P, C)>,
    }

    impl<P, C, F> RelationWirer for FnWirer<P, C, F>
    where
        P: 'static,
        C: 'static,
        F: Fn(&mut P, Rc<RefCell<C>>),
    {
        fn wire(&self, parent: &Entity, child: &Entity) -> Result<()> {
            let parent = downcast::<P>(parent)?;
            let child = downcast::<C>(child)?;
            (self.wire)(&mut parent.borrow_mut(), child);
            Ok(())
        }
    }

    Box::new(FnWirer {
        wire,
        _relation: PhantomData,
    })
}
