use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::model::Shared;

/// Identity map: at most one live instance per primary key
///
/// Owned by a repository, empty when the repository is created and cleared
/// when its table is dropped. Interior mutability lets read-only lookups
/// register instances; not thread-safe (`Rc`/`RefCell`), designed for the
/// single-threaded, blocking repositories.
#[derive(Debug)]
pub struct IdentityMap<T> {
    entries: RefCell<HashMap<i64, Shared<T>>>,
}

impl<T> Default for IdentityMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IdentityMap<T> {
    /// Create a new empty map
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
        }
    }

    /// Canonical instance for `id`, if one is live
    pub fn get(&self, id: i64) -> Option<Shared<T>> {
        self.entries.borrow().get(&id).cloned()
    }

    /// Wrap `value` and register it under `id`, returning the canonical handle
    ///
    /// Replaces any instance previously registered under the same id.
    pub fn register(&self, id: i64, value: T) -> Shared<T> {
        let handle = Rc::new(RefCell::new(value));
        self.entries.borrow_mut().insert(id, Rc::clone(&handle));
        handle
    }

    /// Evict `id`, returning the instance that was registered
    pub fn evict(&self, id: i64) -> Option<Shared<T>> {
        self.entries.borrow_mut().remove(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.entries.borrow().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Forget every instance (table dropped)
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_then_get_returns_same_instance() {
        let map = IdentityMap::new();
        let handle = map.register(1, "alice".to_string());

        let fetched = map.get(1).unwrap();
        assert!(Rc::ptr_eq(&handle, &fetched));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_mutation_through_one_handle_is_visible_through_another() {
        let map = IdentityMap::new();
        let handle = map.register(7, 10_i32);
        *map.get(7).unwrap().borrow_mut() = 11;
        assert_eq!(*handle.borrow(), 11);
    }

    #[test]
    fn test_evict_and_clear() {
        let map = IdentityMap::new();
        map.register(1, ());
        map.register(2, ());

        assert!(map.evict(1).is_some());
        assert!(map.evict(1).is_none());
        assert!(!map.contains(1));
        assert!(map.contains(2));

        map.clear();
        assert!(map.is_empty());
    }
}
