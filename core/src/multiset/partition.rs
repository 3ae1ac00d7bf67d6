//! One half of the heap-backed multiset.
//!
//! A partition is a binary heap that cannot remove arbitrary entries, plus
//! two tallies keyed by heap key:
//! - `live`: occurrences that logically belong to this partition
//! - `pending`: occurrences deleted logically but still sitting in the heap
//!
//! Deleted entries are popped only once they surface at the top, so the top
//! must be purged before it is read.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

use super::types::Value;

/// Heap ordering for a partition.
///
/// `Value` gives a max-heap (the low half), `Reverse<Value>` a min-heap (the
/// high half).
pub(crate) trait HeapKey: Ord + Hash + Copy {
    fn from_value(value: Value) -> Self;
    fn value(self) -> Value;
}

impl HeapKey for Value {
    fn from_value(value: Value) -> Self {
        value
    }

    fn value(self) -> Value {
        self
    }
}

impl HeapKey for Reverse<Value> {
    fn from_value(value: Value) -> Self {
        Reverse(value)
    }

    fn value(self) -> Value {
        self.0
    }
}

pub(crate) struct Partition<K> {
    heap: BinaryHeap<K>,
    live: HashMap<K, usize>,
    pending: HashMap<K, usize>,
    /// Live occurrences. Excludes pending entries.
    len: usize,
    /// Sum of `pending`.
    stale: usize,
}

impl<K: HeapKey> Partition<K> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            live: HashMap::new(),
            pending: HashMap::new(),
            len: 0,
            stale: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn stale(&self) -> usize {
        self.stale
    }

    pub(crate) fn heap_len(&self) -> usize {
        self.heap.len()
    }

    #[cfg(test)]
    pub(crate) fn live_count(&self, value: Value) -> usize {
        self.live.get(&K::from_value(value)).copied().unwrap_or(0)
    }

    pub(crate) fn push(&mut self, value: Value) {
        let key = K::from_value(value);
        self.heap.push(key);
        *self.live.entry(key).or_default() += 1;
        self.len += 1;
    }

    /// Logically remove one live occurrence of `value`.
    ///
    /// Returns false if this partition holds no live occurrence of it.
    pub(crate) fn mark_deleted(&mut self, value: Value) -> bool {
        let key = K::from_value(value);
        match self.live.get_mut(&key) {
            Some(count) => {
                *count -= 1;
                if *count == 0 {
                    self.live.remove(&key);
                }
            }
            None => return false,
        }
        *self.pending.entry(key).or_default() += 1;
        self.len -= 1;
        self.stale += 1;
        true
    }

    /// Pop stale entries until the top is live or the heap is empty.
    pub(crate) fn purge(&mut self) {
        while let Some(&top) = self.heap.peek() {
            let Some(count) = self.pending.get_mut(&top) else {
                break;
            };
            *count -= 1;
            if *count == 0 {
                self.pending.remove(&top);
            }
            self.heap.pop();
            self.stale -= 1;
            tracing::trace!("purged stale entry {}", top.value());
        }
    }

    /// Extreme live value (max for low, min for high).
    pub(crate) fn top(&mut self) -> Option<Value> {
        self.purge();
        self.heap.peek().map(|key| key.value())
    }

    /// Remove and return the extreme live value.
    pub(crate) fn pop(&mut self) -> Option<Value> {
        self.purge();
        let key = self.heap.pop()?;
        if let Some(count) = self.live.get_mut(&key) {
            *count -= 1;
            if *count == 0 {
                self.live.remove(&key);
            }
        } else {
            debug_assert!(false, "purged top {} has no live count", key.value());
        }
        self.len -= 1;
        Some(key.value())
    }

    /// Rebuild the heap from the live tally, dropping every stale entry.
    pub(crate) fn compact(&mut self) {
        let entries: Vec<K> = self
            .live
            .iter()
            .flat_map(|(&key, &count)| std::iter::repeat_n(key, count))
            .collect();
        self.heap = BinaryHeap::from(entries);
        self.pending.clear();
        self.stale = 0;
    }

    pub(crate) fn clear(&mut self) {
        self.heap.clear();
        self.live.clear();
        self.pending.clear();
        self.len = 0;
        self.stale = 0;
    }

    /// Live (value, count) pairs in no particular order.
    #[cfg(test)]
    pub(crate) fn live_counts(&self) -> impl Iterator<Item = (Value, usize)> + '_ {
        self.live.iter().map(|(&key, &count)| (key.value(), count))
    }

    #[cfg(test)]
    pub(crate) fn pending_total(&self) -> usize {
        self.pending.values().sum()
    }
}
