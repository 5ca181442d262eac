//! # Memoization Runtime
//!
//! Memoized selectors declare the exact inputs they read as a dependency
//! tuple. A cached value is reused while every dependency is unchanged
//! relative to the previous call:
//!
//! - `Arc` state slices compare by pointer identity (the snapshot model
//!   replaces a slice whenever it changes, and shares it otherwise)
//! - scalars compare by value
//!
//! Caches use interior mutability and belong to one [`Selectors`] context;
//! they are not meant to be shared across threads.
//!
//! [`Selectors`]: crate::Selectors

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use tracing::debug;

/// An input of a memoized selector
pub trait Dependency: Clone {
    /// Whether `self` is the same input as `previous`
    fn unchanged(&self, previous: &Self) -> bool;
}

impl<T: ?Sized> Dependency for Arc<T> {
    fn unchanged(&self, previous: &Self) -> bool {
        Arc::ptr_eq(self, previous)
    }
}

impl<T: Dependency> Dependency for Option<T> {
    fn unchanged(&self, previous: &Self) -> bool {
        match (self, previous) {
            (Some(current), Some(previous)) => current.unchanged(previous),
            (None, None) => true,
            _ => false,
        }
    }
}

macro_rules! value_dependency {
    ($($ty:ty),*) => {
        $(
            impl Dependency for $ty {
                fn unchanged(&self, previous: &Self) -> bool {
                    self == previous
                }
            }
        )*
    };
}

value_dependency!(bool, usize, u64, String, scribe_blocks::Uid);

macro_rules! tuple_dependency {
    ($($name:ident : $index:tt),+) => {
        impl<$($name: Dependency),+> Dependency for ($($name,)+) {
            fn unchanged(&self, previous: &Self) -> bool {
                $(self.$index.unchanged(&previous.$index))&&+
            }
        }
    };
}

tuple_dependency!(A: 0);
tuple_dependency!(A: 0, B: 1);
tuple_dependency!(A: 0, B: 1, C: 2);
tuple_dependency!(A: 0, B: 1, C: 2, D: 3);
tuple_dependency!(A: 0, B: 1, C: 2, D: 3, E: 4);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoStats {
    pub hits: u64,
    pub misses: u64,
}

impl MemoStats {
    fn hit(self) -> Self {
        Self { hits: self.hits + 1, ..self }
    }

    fn miss(self) -> Self {
        Self { misses: self.misses + 1, ..self }
    }
}

/// Single-slot cache for a selector without arguments
#[derive(Debug)]
pub struct Memo<D, V> {
    name: &'static str,
    slot: RefCell<Option<(D, V)>>,
    stats: Cell<MemoStats>,
}

impl<D: Dependency, V: Clone> Memo<D, V> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: RefCell::new(None),
            stats: Cell::new(MemoStats::default()),
        }
    }

    /// Cached value for `deps`, or the result of `compute` stored for next time
    pub fn get_or_compute<F>(&self, deps: D, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some((previous, value)) = self.slot.borrow().as_ref() {
            if deps.unchanged(previous) {
                self.stats.set(self.stats.get().hit());
                return value.clone();
            }
        }

        debug!(selector = self.name, "Recomputing memoized selector");
        let value = compute();
        *self.slot.borrow_mut() = Some((deps, value.clone()));
        self.stats.set(self.stats.get().miss());
        value
    }

    pub fn clear(&self) {
        self.slot.borrow_mut().take();
    }

    pub fn stats(&self) -> MemoStats {
        self.stats.get()
    }
}

/// Per-argument cache, one slot per key
#[derive(Debug)]
pub struct KeyedMemo<K, D, V> {
    name: &'static str,
    slots: RefCell<HashMap<K, (D, V)>>,
    stats: Cell<MemoStats>,
}

impl<K: Eq + Hash + Clone, D: Dependency, V: Clone> KeyedMemo<K, D, V> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slots: RefCell::new(HashMap::new()),
            stats: Cell::new(MemoStats::default()),
        }
    }

    pub fn get_or_compute<F>(&self, key: &K, deps: D, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some((previous, value)) = self.slots.borrow().get(key) {
            if deps.unchanged(previous) {
                self.stats.set(self.stats.get().hit());
                return value.clone();
            }
        }

        debug!(selector = self.name, "Recomputing memoized selector");
        let value = compute();
        self.slots.borrow_mut().insert(key.clone(), (deps, value.clone()));
        self.stats.set(self.stats.get().miss());
        value
    }

    pub fn clear(&self) {
        self.slots.borrow_mut().clear();
    }

    /// Drop slots whose key fails `keep`
    pub fn retain<F>(&self, mut keep: F)
    where
        F: FnMut(&K) -> bool,
    {
        let mut slots = self.slots.borrow_mut();
        let before = slots.len();
        slots.retain(|key, _| keep(key));

        let dropped = before - slots.len();
        if dropped > 0 {
            debug!(selector = self.name, dropped, "Dropped stale memo slots");
        }
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }

    pub fn stats(&self) -> MemoStats {
        self.stats.get()
    }
}
