//! Ordered-index multiset.
//!
//! Distinct values are kept sorted in a BTreeMap with their live counts.
//! Updates are O(log d) for d distinct values; the median is found by walking
//! the map and accumulating counts, which is O(d).

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::num::NonZeroUsize;

use super::types::{MedianContainer, Value};

#[derive(Clone, Debug, Default)]
pub struct OrderedMedianMultiset {
    counts: BTreeMap<Value, NonZeroUsize>,
    len: usize,
}

impl OrderedMedianMultiset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct live values.
    pub fn distinct_len(&self) -> usize {
        self.counts.len()
    }

    /// Live values in ascending order, repeated by multiplicity.
    pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
        self.counts
            .iter()
            .flat_map(|(&value, count)| std::iter::repeat_n(value, count.get()))
    }
}

impl MedianContainer for OrderedMedianMultiset {
    fn add(&mut self, value: Value) -> usize {
        match self.counts.entry(value) {
            Entry::Vacant(v) => {
                v.insert(NonZeroUsize::MIN);
            }
            Entry::Occupied(mut o) => {
                let count = o.get_mut();
                *count = count.saturating_add(1);
            }
        }
        self.len += 1;
        self.len
    }

    fn delete(&mut self, value: Value) -> bool {
        let Entry::Occupied(mut o) = self.counts.entry(value) else {
            return false;
        };
        match NonZeroUsize::new(o.get().get() - 1) {
            Some(count) => {
                o.insert(count);
            }
            None => {
                o.remove();
            }
        }
        self.len -= 1;
        true
    }

    fn get_median(&mut self) -> Option<Value> {
        if self.len == 0 {
            return None;
        }
        let target = (self.len - 1) / 2;
        let mut running = 0;
        for (&value, count) in &self.counts {
            running += count.get();
            if running > target {
                return Some(value);
            }
        }
        None
    }

    fn count(&self, value: Value) -> usize {
        self.counts.get(&value).map_or(0, |count| count.get())
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.counts.clear();
        self.len = 0;
    }
}

impl Extend<Value> for OrderedMedianMultiset {
    fn extend<I: IntoIterator<Item = Value>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl FromIterator<Value> for OrderedMedianMultiset {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
