//! Heap-backed running-median multiset.
//!
//! The live values are split into two partitions:
//! - low: the `ceil(n / 2)` smallest values, a max-heap
//! - high: the remaining `floor(n / 2)` values, a min-heap
//!
//! The median is always the top of `low`. Deletes are recorded in the owning
//! partition's pending tally and the heap entry is dropped when it reaches
//! the top, so every operation stays O(log n) amortized.

use std::cmp::Reverse;
use std::collections::HashMap;

use super::partition::Partition;
use super::types::{MedianContainer, MultisetConfig, MultisetStats, Value};

pub struct MedianMultiset {
    /// Live count per value across both partitions.
    counts: HashMap<Value, usize>,
    low: Partition<Value>,
    high: Partition<Reverse<Value>>,
    compaction_threshold: usize,
    compactions: u64,
}

impl MedianMultiset {
    /// Create an empty multiset with the default configuration.
    pub fn new() -> Self {
        Self::with_config(&MultisetConfig::default())
    }

    /// Create an empty multiset. `config.backend` is ignored.
    pub fn with_config(config: &MultisetConfig) -> Self {
        Self {
            counts: HashMap::new(),
            low: Partition::with_capacity(config.capacity),
            high: Partition::with_capacity(config.capacity),
            compaction_threshold: config.compaction_threshold,
            compactions: 0,
        }
    }

    /// Restore the size invariant `low.len() - high.len() ∈ {0, 1}`.
    ///
    /// Each add or delete moves the total by one, so one transfer is enough.
    fn rebalance(&mut self) {
        self.low.purge();
        self.high.purge();

        if self.low.len() > self.high.len() + 1 {
            if let Some(value) = self.low.pop() {
                tracing::trace!("moving {} from low to high", value);
                self.high.push(value);
            }
        } else if self.low.len() < self.high.len() {
            if let Some(value) = self.high.pop() {
                tracing::trace!("moving {} from high to low", value);
                self.low.push(value);
            }
        }

        self.low.purge();
        self.high.purge();
    }

    fn maybe_compact(&mut self) {
        let stale = self.low.stale() + self.high.stale();
        if stale > self.compaction_threshold.max(self.len()) {
            self.compact();
        }
    }

    /// Rebuild both heaps from their live tallies, discarding stale entries.
    pub fn compact(&mut self) {
        let stale = self.low.stale() + self.high.stale();
        self.low.compact();
        self.high.compact();
        self.compactions += 1;
        tracing::debug!(
            "compacted multiset: dropped {} stale entries, {} live",
            stale,
            self.len()
        );
    }

    pub fn stats(&self) -> MultisetStats {
        MultisetStats {
            len: self.len(),
            distinct_values: self.counts.len(),
            low_len: self.low.len(),
            high_len: self.high.len(),
            stale_entries: self.low.stale() + self.high.stale(),
            heap_entries: self.low.heap_len() + self.high.heap_len(),
            compactions: self.compactions,
        }
    }

    /// Panics if any structural invariant is broken.
    #[cfg(test)]
    pub(crate) fn check_invariants(&mut self) {
        let (low_len, high_len) = (self.low.len(), self.high.len());
        assert!(
            low_len == high_len || low_len == high_len + 1,
            "unbalanced partitions: low {} high {}",
            low_len,
            high_len
        );

        let low_max = self.low.live_counts().map(|(v, _)| v).max();
        let high_min = self.high.live_counts().map(|(v, _)| v).min();
        if let (Some(lo), Some(hi)) = (low_max, high_min) {
            assert!(lo <= hi, "low max {} above high min {}", lo, hi);
        }

        let mut split: HashMap<Value, usize> = HashMap::new();
        for (value, count) in self.low.live_counts().chain(self.high.live_counts()) {
            *split.entry(value).or_default() += count;
        }
        assert_eq!(split, self.counts, "partition counts disagree with multiset");
        assert_eq!(self.counts.values().sum::<usize>(), low_len + high_len);

        assert_eq!(self.low.pending_total(), self.low.stale());
        assert_eq!(self.high.pending_total(), self.high.stale());
        assert_eq!(self.low.heap_len(), low_len + self.low.stale());
        assert_eq!(self.high.heap_len(), high_len + self.high.stale());
    }
}

impl MedianContainer for MedianMultiset {
    fn add(&mut self, value: Value) -> usize {
        *self.counts.entry(value).or_default() += 1;

        match self.low.top() {
            Some(low_max) if value > low_max => self.high.push(value),
            _ => self.low.push(value),
        }

        self.rebalance();
        self.len()
    }

    fn delete(&mut self, value: Value) -> bool {
        match self.counts.get_mut(&value) {
            Some(count) => {
                *count -= 1;
                if *count == 0 {
                    self.counts.remove(&value);
                }
            }
            None => return false,
        }

        self.low.purge();
        self.high.purge();

        if !self.low.mark_deleted(value) {
            let found = self.high.mark_deleted(value);
            debug_assert!(found, "live value {} missing from both partitions", value);
        }

        self.rebalance();
        self.maybe_compact();
        true
    }

    fn get_median(&mut self) -> Option<Value> {
        if self.is_empty() {
            return None;
        }
        self.low.purge();
        self.high.purge();
        self.rebalance();
        self.low.top()
    }

    fn count(&self, value: Value) -> usize {
        self.counts.get(&value).copied().unwrap_or(0)
    }

    fn len(&self) -> usize {
        self.low.len() + self.high.len()
    }

    fn clear(&mut self) {
        self.counts.clear();
        self.low.clear();
        self.high.clear();
    }
}

impl Default for MedianMultiset {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<Value> for MedianMultiset {
    fn extend<I: IntoIterator<Item = Value>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl FromIterator<Value> for MedianMultiset {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
