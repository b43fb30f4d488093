//! Single-slot memoization keyed on shallow equality
//!
//! A sparkline is rebuilt on every parent `view` call. When its inputs are
//! the same allocation and the same config, the last display shape is handed
//! back instead of being recomputed.

use std::cell::{Cell, RefCell};
use std::sync::Arc;

/// Cheap equality: reference identity for shared data, value equality for
/// small plain fields
pub trait ShallowEq {
    fn shallow_eq(&self, other: &Self) -> bool;
}

impl<T: ?Sized> ShallowEq for Arc<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<A: ShallowEq, B: PartialEq> ShallowEq for (A, B) {
    fn shallow_eq(&self, other: &Self) -> bool {
        self.0.shallow_eq(&other.0) && self.1 == other.1
    }
}

/// Holds the last computed value together with the key it was computed for
#[derive(Debug)]
pub struct Memo<K, V> {
    slot: RefCell<Option<(K, Arc<V>)>>,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            slot: RefCell::new(None),
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }
}

impl<K: ShallowEq, V> Memo<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the stored value when `key` is shallow-equal to the stored key,
    /// otherwise compute, store and return a new one.
    ///
    /// The second element is true when `compute` ran.
    pub fn get_or_compute(&self, key: K, compute: impl FnOnce(&K) -> V) -> (Arc<V>, bool) {
        if let Some((stored, value)) = self.slot.borrow().as_ref() {
            if stored.shallow_eq(&key) {
                self.hits.set(self.hits.get() + 1);
                return (Arc::clone(value), false);
            }
        }

        let value = Arc::new(compute(&key));
        *self.slot.borrow_mut() = Some((key, Arc::clone(&value)));
        self.misses.set(self.misses.get() + 1);
        (value, true)
    }

    /// Drop the stored value
    pub fn invalidate(&self) {
        *self.slot.borrow_mut() = None;
    }

    /// Number of lookups served from the slot
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits.get()
    }

    /// Number of lookups that ran the computation
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_allocation_hits() {
        let memo: Memo<Arc<[i32]>, i32> = Memo::new();
        let data: Arc<[i32]> = Arc::from(vec![1, 2, 3]);

        let (first, ran) = memo.get_or_compute(Arc::clone(&data), |d| d.iter().sum());
        assert!(ran);
        let (second, ran) = memo.get_or_compute(Arc::clone(&data), |_| unreachable!());
        assert!(!ran);
        assert_eq!(*first, 6);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!((memo.hits(), memo.misses()), (1, 1));
    }

    #[test]
    fn test_equal_contents_different_allocation_misses() {
        let memo: Memo<Arc<[i32]>, i32> = Memo::new();
        memo.get_or_compute(Arc::from(vec![1, 2]), |d| d.iter().sum());
        let (_, ran) = memo.get_or_compute(Arc::from(vec![1, 2]), |d| d.iter().sum());
        assert!(ran);
        assert_eq!(memo.misses(), 2);
    }

    #[test]
    fn test_tuple_key_compares_second_by_value() {
        let memo: Memo<(Arc<str>, u32), usize> = Memo::new();
        let name: Arc<str> = Arc::from("cpu");

        memo.get_or_compute((Arc::clone(&name), 1), |(n, _)| n.len());
        let (_, ran) = memo.get_or_compute((Arc::clone(&name), 1), |(n, _)| n.len());
        assert!(!ran);
        let (_, ran) = memo.get_or_compute((Arc::clone(&name), 2), |(n, _)| n.len());
        assert!(ran);
    }

    #[test]
    fn test_invalidate_forces_recompute() {
        let memo: Memo<Arc<str>, usize> = Memo::new();
        let key: Arc<str> = Arc::from("x");
        memo.get_or_compute(Arc::clone(&key), |k| k.len());
        memo.invalidate();
        let (_, ran) = memo.get_or_compute(key, |k| k.len());
        assert!(ran);
    }
}
