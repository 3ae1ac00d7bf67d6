//! Core types shared by the multiset backends.

use std::fmt;
use std::str::FromStr;

use crate::constants::DEFAULT_COMPACTION_THRESHOLD;
use crate::replay::ReplayError;

/// Element type stored in the multiset.
pub type Value = i64;

/// Operations every running-median container supports.
///
/// Both backends honour the same contract: `add` returns the live size after
/// insertion, `delete` reports whether an occurrence was removed, and
/// `get_median` returns the value at sorted index `(len - 1) / 2`, which is
/// the lower of the two middle values when `len` is even.
pub trait MedianContainer {
    /// Insert one occurrence of `value`. Returns the live size afterwards.
    fn add(&mut self, value: Value) -> usize;

    /// Remove one occurrence of `value`. Returns false if it was absent.
    fn delete(&mut self, value: Value) -> bool;

    /// Current median, or None if the container is empty.
    fn get_median(&mut self) -> Option<Value>;

    /// Live occurrences of `value`.
    fn count(&self, value: Value) -> usize;

    /// Total live size.
    fn len(&self) -> usize;

    /// Drop every element.
    fn clear(&mut self);

    fn contains(&self, value: Value) -> bool {
        self.count(value) > 0
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which implementation backs a container built from a config.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Backend {
    /// Two lazily-purged heaps. O(log n) amortized per operation.
    #[default]
    Heap,
    /// Ordered map of distinct values. Median is a linear walk.
    Ordered,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Heap => f.write_str("heap"),
            Backend::Ordered => f.write_str("ordered"),
        }
    }
}

impl FromStr for Backend {
    type Err = ReplayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "heap" => Ok(Backend::Heap),
            "ordered" => Ok(Backend::Ordered),
            _ => Err(ReplayError::UnknownBackend(s.to_string())),
        }
    }
}

/// Configuration for a multiset.
#[derive(Clone, Debug)]
pub struct MultisetConfig {
    pub backend: Backend,
    /// Minimum number of stale heap entries before a delete triggers a
    /// compaction. The effective limit is `max(threshold, len)`.
    pub compaction_threshold: usize,
    /// Initial capacity hint for each partition heap.
    pub capacity: usize,
}

impl Default for MultisetConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Heap,
            compaction_threshold: DEFAULT_COMPACTION_THRESHOLD,
            capacity: 0,
        }
    }
}

/// Statistics about a heap-backed multiset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultisetStats {
    pub len: usize,
    pub distinct_values: usize,
    pub low_len: usize,
    pub high_len: usize,
    /// Deleted occurrences still physically present in a heap.
    pub stale_entries: usize,
    /// Physical heap entries, live and stale.
    pub heap_entries: usize,
    pub compactions: u64,
}
