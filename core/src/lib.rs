// Public API
pub mod multiset;
pub mod replay;
pub mod shared;

// Internal modules
pub(crate) mod constants;

pub use multiset::{
    Backend, MedianContainer, MedianMultiset, MultisetConfig, MultisetStats,
    OrderedMedianMultiset, Value,
};
pub use replay::{Op, Outcome, ReplayError, Replayer};
pub use shared::SharedMultiset;

/// Build an empty container for the configured backend.
pub fn open(config: &MultisetConfig) -> Box<dyn MedianContainer> {
    tracing::debug!("opening {} multiset", config.backend);
    match config.backend {
        Backend::Heap => Box::new(MedianMultiset::with_config(config)),
        Backend::Ordered => Box::new(OrderedMedianMultiset::new()),
    }
}
