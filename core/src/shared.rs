//! Mutex-guarded multiset for callers that share one instance across threads.
//!
//! The multiset itself has no internal synchronization. This wrapper takes
//! the lock once per operation, so every call sees the state left by the
//! previous one in full.

use parking_lot::Mutex;

use crate::multiset::{MedianContainer, MedianMultiset, MultisetConfig, MultisetStats, Value};

#[derive(Default)]
pub struct SharedMultiset {
    inner: Mutex<MedianMultiset>,
}

impl SharedMultiset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &MultisetConfig) -> Self {
        Self {
            inner: Mutex::new(MedianMultiset::with_config(config)),
        }
    }

    pub fn add(&self, value: Value) -> usize {
        self.inner.lock().add(value)
    }

    pub fn delete(&self, value: Value) -> bool {
        self.inner.lock().delete(value)
    }

    pub fn get_median(&self) -> Option<Value> {
        self.inner.lock().get_median()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn stats(&self) -> MultisetStats {
        self.inner.lock().stats()
    }

    /// Run several operations under a single lock acquisition.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut MedianMultiset) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn into_inner(self) -> MedianMultiset {
        self.inner.into_inner()
    }
}
