//! Ordered hash ring with clockwise successor lookup.

use std::collections::BTreeMap;
use std::collections::btree_map;

/// An ordered map from 64-bit ring position to an entry.
///
/// Keys are unique: inserting at an occupied position is rejected rather
/// than overwriting. Iteration is ascending by key.
#[derive(Debug, Clone)]
pub struct Ring<T> {
    entries: BTreeMap<u64, T>,
}

impl<T> Default for Ring<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Ring<T> {
    /// Create a new empty ring.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Insert `value` at `key` if the position is free.
    ///
    /// Returns `false` (and drops nothing already stored) when `key` is taken.
    pub fn insert(&mut self, key: u64, value: T) -> bool {
        match self.entries.entry(key) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
            btree_map::Entry::Occupied(_) => false,
        }
    }

    /// Remove the entry at `key`. Returns the number of entries removed (0 or 1).
    pub fn erase(&mut self, key: u64) -> usize {
        usize::from(self.entries.remove(&key).is_some())
    }

    /// Whether an entry exists at exactly `key`.
    pub fn contains(&self, key: u64) -> bool {
        self.entries.contains_key(&key)
    }

    /// Entry stored at exactly `key`.
    pub fn get(&self, key: u64) -> Option<&T> {
        self.entries.get(&key)
    }

    /// Mutable entry stored at exactly `key`.
    pub fn get_mut(&mut self, key: u64) -> Option<&mut T> {
        self.entries.get_mut(&key)
    }

    /// Find the entry that owns `key`.
    ///
    /// Returns the entry at the smallest stored key `>= key`. If `key` is past
    /// the last stored key, wraps around to the smallest stored key. Returns
    /// `None` only when the ring is empty.
    pub fn find_successor(&self, key: u64) -> Option<(u64, &T)> {
        // BTreeMap::range gives us everything >= key, then we wrap around.
        self.entries
            .range(key..)
            .next()
            .or_else(|| self.entries.iter().next())
            .map(|(k, v)| (*k, v))
    }

    /// Number of entries on the ring.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ring has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &T)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// Remove all entries without running any teardown on them.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Take every entry out of the ring, in ascending key order.
    ///
    /// The ring is empty as soon as this returns; the caller owns the entries.
    pub fn drain(&mut self) -> impl Iterator<Item = (u64, T)> + use<T> {
        std::mem::take(&mut self.entries).into_iter()
    }
}
