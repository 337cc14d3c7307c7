//! In-flight latches.
//!
//! A latch is held while a request against one logical resource is
//! pending. The guard releases it on drop, so every exit path of an
//! operation (success, error, early return) clears the flag.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::hash::Hash;

#[derive(Debug, Default)]
pub struct Latch {
    held: Cell<bool>,
}

impl Latch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self) -> bool {
        self.held.get()
    }

    /// `None` when a request is already in flight.
    pub fn try_acquire(&self) -> Option<LatchGuard<'_>> {
        if self.held.replace(true) {
            return None;
        }
        Some(LatchGuard { latch: self })
    }
}

#[must_use = "the latch is released as soon as the guard is dropped"]
pub struct LatchGuard<'a> {
    latch: &'a Latch,
}

impl Drop for LatchGuard<'_> {
    fn drop(&mut self) {
        self.latch.held.set(false);
    }
}

/// One latch per key, e.g. per (card, vote direction).
#[derive(Debug)]
pub struct KeyedLatch<K> {
    held: RefCell<HashSet<K>>,
}

impl<K> Default for KeyedLatch<K> {
    fn default() -> Self {
        Self {
            held: RefCell::new(HashSet::new()),
        }
    }
}

impl<K: Eq + Hash + Clone> KeyedLatch<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self, key: &K) -> bool {
        self.held.borrow().contains(key)
    }

    pub fn try_acquire(&self, key: K) -> Option<KeyedLatchGuard<'_, K>> {
        if !self.held.borrow_mut().insert(key.clone()) {
            return None;
        }
        Some(KeyedLatchGuard { latch: self, key })
    }
}

#[must_use = "the latch is released as soon as the guard is dropped"]
pub struct KeyedLatchGuard<'a, K: Eq + Hash> {
    latch: &'a KeyedLatch<K>,
    key: K,
}

impl<K: Eq + Hash> Drop for KeyedLatchGuard<'_, K> {
    fn drop(&mut self) {
        self.latch.held.borrow_mut().remove(&self.key);
    }
}
