use graft_core::{Error, Result};

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

/// A materialized entity instance.
///
/// Concretely always an `Rc<RefCell<T>>` behind `Rc<dyn Any>`; the typed
/// handle is recovered with [`downcast`]. `Rc` keeps the graph
/// single-threaded by construction, matching the one-thread-per-traversal
/// model: an inflated graph is not meant to cross threads.
pub type Entity = Rc<dyn Any>;

/// Wrap a value as an [`Entity`].
pub fn entity<T: 'static>(value: T) -> Entity {
    Rc::new(RefCell::new(value))
}

/// Recover the typed handle of an entity instance.
pub fn downcast<T: 'static>(entity: &Entity) -> Result<Rc<RefCell<T>>> {
    Rc::clone(entity)
        .downcast::<RefCell<T>>()
        .map_err(|_| Error::entity_downcast(std::any::type_name::<T>()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downcast_round_trip() {
        let e = entity(vec![1, 2, 3]);
        let handle = downcast::<Vec<i32>>(&e).unwrap();
        handle.borrow_mut().push(4);
        assert_eq!(4, downcast::<Vec<i32>>(&e).unwrap().borrow().len());
    }

    #[test]
    fn downcast_to_the_wrong_type_fails() {
        let e = entity(1i64);
        let err = downcast::<String>(&e).unwrap_err();
        assert!(err.is_decode());
    }
}
