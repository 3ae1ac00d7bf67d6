//! Integer multisets with a running median.
//!
//! Two interchangeable backends implement [`MedianContainer`]:
//! - [`MedianMultiset`]: two heaps split at the median, with lazy deletion
//! - [`OrderedMedianMultiset`]: a sorted map of distinct values and counts
//!
//! The median of `n` live values is the value at sorted index `(n - 1) / 2`,
//! i.e. the lower middle value when `n` is even.

mod heap;
mod ordered;
mod partition;
mod types;

pub use heap::MedianMultiset;
pub use ordered::OrderedMedianMultiset;
pub use types::{Backend, MedianContainer, MultisetConfig, MultisetStats, Value};
