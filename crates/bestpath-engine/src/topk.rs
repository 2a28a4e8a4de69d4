//! BoundedTopK: a fixed-capacity collection keeping the K greatest-weight items.
//!
//! Backed by a `BinaryHeap` whose top is always the *eviction candidate*:
//! the lowest weight, and among equal weights the most recently inserted
//! item. Together with the strict `>` replacement rule this gives
//! first-come-wins on ties:
//!
//! - below capacity every item is accepted
//! - at capacity an item replaces the top only if its weight is strictly greater
//!
//! Insertion and replacement are `O(log K)`; a sorted view costs `O(K log K)`.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::num::NonZeroUsize;

/// Anything that carries a 64-bit ranking weight.
pub trait Weighted {
    fn weight(&self) -> i64;
}

#[derive(Debug, Clone)]
struct Slot<T> {
    weight: i64,
    /// Insertion order within this structure (first-come tie-break).
    seq: u64,
    item: T,
}

impl<T> PartialEq for Slot<T> {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

impl<T> Eq for Slot<T> {}

impl<T> PartialOrd for Slot<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Slot<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Inverted on weight so the max-heap top is the minimum weight;
        // later insertions rank "worse" among equal weights.
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Fixed-capacity min-priority collection retaining the K greatest-weight items.
#[derive(Debug, Clone)]
pub struct BoundedTopK<T> {
    capacity: NonZeroUsize,
    heap: BinaryHeap<Slot<T>>,
    next_seq: u64,
}

impl<T: Weighted> BoundedTopK<T> {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            // Grows on demand: K may far exceed what is ever inserted.
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Offer an item. Returns `true` if it was retained.
    pub fn insert(&mut self, item: T) -> bool {
        let weight = item.weight();
        let seq = self.next_seq;
        self.next_seq += 1;

        if self.heap.len() < self.capacity.get() {
            self.heap.push(Slot { weight, seq, item });
            return true;
        }

        match self.heap.peek_mut() {
            Some(mut top) if weight > top.weight => {
                // PeekMut re-sifts on drop.
                *top = Slot { weight, seq, item };
                true
            }
            _ => false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.heap.len() == self.capacity.get()
    }

    /// Weight of the current eviction candidate.
    pub fn min_weight(&self) -> Option<i64> {
        self.heap.peek().map(|slot| slot.weight)
    }

    /// Retained items in heap order (no ordering guarantee).
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.heap.iter().map(|slot| &slot.item)
    }

    /// Retained items in the order they were inserted.
    pub fn iter_arrival(&self) -> impl Iterator<Item = &T> + '_ {
        let mut slots: Vec<&Slot<T>> = self.heap.iter().collect();
        slots.sort_unstable_by_key(|slot| slot.seq);
        slots.into_iter().map(|slot| &slot.item)
    }

    pub fn into_unordered_vec(self) -> Vec<T> {
        self.heap.into_vec().into_iter().map(|slot| slot.item).collect()
    }

    /// Retained items in the order they were inserted.
    pub fn into_arrival_vec(self) -> Vec<T> {
        let mut slots = self.heap.into_vec();
        slots.sort_unstable_by_key(|slot| slot.seq);
        slots.into_iter().map(|slot| slot.item).collect()
    }

    /// Retained items by weight descending, ties in insertion order.
    pub fn into_sorted_vec(self) -> Vec<T> {
        // Ascending under the inverted `Ord` is exactly best-first.
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|slot| slot.item)
            .collect()
    }
}

impl<T: Weighted> Extend<T> for BoundedTopK<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Tagged {
        tag: u32,
        w: i64,
    }

    impl Weighted for Tagged {
        fn weight(&self) -> i64 {
            self.w
        }
    }

    fn cap(k: usize) -> NonZeroUsize {
        NonZeroUsize::new(k).unwrap()
    }

    fn t(tag: u32, w: i64) -> Tagged {
        Tagged { tag, w }
    }

    #[test]
    fn accepts_everything_below_capacity() {
        let mut top = BoundedTopK::new(cap(3));
        assert!(top.insert(t(0, -5)));
        assert!(top.insert(t(1, 100)));
        assert_eq!(top.len(), 2);
        assert!(!top.is_full());
        assert_eq!(top.min_weight(), Some(-5));
    }

    #[test]
    fn replaces_minimum_only_on_strictly_greater_weight() {
        let mut top = BoundedTopK::new(cap(2));
        top.insert(t(0, 10));
        top.insert(t(1, 20));
        assert!(!top.insert(t(2, 10)), "equal weight must be rejected");
        assert!(!top.insert(t(3, 5)));
        assert!(top.insert(t(4, 11)));

        let tags: Vec<u32> = top.into_sorted_vec().iter().map(|x| x.tag).collect();
        assert_eq!(tags, vec![1, 4]);
    }

    #[test]
    fn ties_keep_earliest_insertions() {
        let mut top = BoundedTopK::new(cap(2));
        for tag in 0..5 {
            top.insert(t(tag, 7));
        }
        let tags: Vec<u32> = top.into_sorted_vec().iter().map(|x| x.tag).collect();
        assert_eq!(tags, vec![0, 1]);
    }

    #[test]
    fn eviction_among_tied_minimum_drops_latest() {
        let mut top = BoundedTopK::new(cap(3));
        top.insert(t(0, 1));
        top.insert(t(1, 1));
        top.insert(t(2, 9));
        assert!(top.insert(t(3, 5)));

        let tags: Vec<u32> = top.into_sorted_vec().iter().map(|x| x.tag).collect();
        assert_eq!(tags, vec![2, 3, 0]);
    }

    #[test]
    fn sorted_view_is_descending_and_stable() {
        let mut top = BoundedTopK::new(cap(4));
        top.extend([t(0, 3), t(1, 8), t(2, 3), t(3, 8)]);
        let got: Vec<(u32, i64)> = top
            .into_sorted_vec()
            .iter()
            .map(|x| (x.tag, x.w))
            .collect();
        assert_eq!(got, vec![(1, 8), (3, 8), (0, 3), (2, 3)]);
    }

    #[test]
    fn arrival_order_survives_replacement() {
        let mut top = BoundedTopK::new(cap(3));
        top.extend([t(0, 5), t(1, 1), t(2, 9), t(3, 4)]);

        let seen: Vec<u32> = top.iter_arrival().map(|x| x.tag).collect();
        assert_eq!(seen, vec![0, 2, 3]);
        let owned: Vec<u32> = top.into_arrival_vec().iter().map(|x| x.tag).collect();
        assert_eq!(owned, vec![0, 2, 3]);
    }

    #[test]
    fn capacity_one_keeps_first_maximum() {
        let mut top = BoundedTopK::new(cap(1));
        top.extend([t(0, -1), t(1, 4), t(2, 4), t(3, 2)]);
        assert_eq!(top.into_unordered_vec(), vec![t(1, 4)]);
    }
}
