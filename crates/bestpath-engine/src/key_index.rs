//! KeyIndex: integer join key -> NodeEntry, each entry owning one BoundedTopK.
//!
//! Entries are allocated lazily on first insertion and never removed; the
//! whole index is dropped with its owning layer.

use std::num::NonZeroUsize;

use ahash::AHashMap;

use crate::topk::{BoundedTopK, Weighted};

/// The retained items sharing one join-key value.
#[derive(Debug, Clone)]
pub struct NodeEntry<T> {
    key: i32,
    paths: BoundedTopK<T>,
}

impl<T: Weighted> NodeEntry<T> {
    fn new(key: i32, k: NonZeroUsize) -> Self {
        Self {
            key,
            paths: BoundedTopK::new(k),
        }
    }

    pub fn key(&self) -> i32 {
        self.key
    }

    pub fn insert(&mut self, item: T) -> bool {
        self.paths.insert(item)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Retained items in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.paths.iter_arrival()
    }

    pub fn into_paths(self) -> BoundedTopK<T> {
        self.paths
    }
}

/// Join-key index. Full scans visit entries in the order their keys were
/// first seen, so a run over identically ordered input is reproducible.
#[derive(Debug, Clone)]
pub struct KeyIndex<T> {
    k: NonZeroUsize,
    /// key -> position in `entries`.
    slots: AHashMap<i32, usize>,
    entries: Vec<NodeEntry<T>>,
}

impl<T: Weighted> KeyIndex<T> {
    pub fn new(k: NonZeroUsize) -> Self {
        Self {
            k,
            slots: AHashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Per-entry capacity shared by every key.
    pub fn k(&self) -> NonZeroUsize {
        self.k
    }

    pub fn get_or_create(&mut self, key: i32) -> &mut NodeEntry<T> {
        let slot = match self.slots.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.entries.push(NodeEntry::new(key, self.k));
                self.slots.insert(key, slot);
                slot
            }
        };
        &mut self.entries[slot]
    }

    /// Point lookup without allocation.
    pub fn find(&self, key: i32) -> Option<&NodeEntry<T>> {
        self.slots.get(&key).map(|&slot| &self.entries[slot])
    }

    /// Offer `item` to the entry at `key`, creating it if needed.
    pub fn insert(&mut self, key: i32, item: T) -> bool {
        self.get_or_create(key).insert(item)
    }

    /// Full scan over every entry.
    pub fn iter(&self) -> impl Iterator<Item = &NodeEntry<T>> + '_ {
        self.entries.iter()
    }

    pub fn into_entries(self) -> impl Iterator<Item = NodeEntry<T>> {
        self.entries.into_iter()
    }

    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    pub fn item_count(&self) -> usize {
        self.entries.iter().map(NodeEntry::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
