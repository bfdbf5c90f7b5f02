//! Batch computation of cosmic contexts over local date ranges.
//!
//! A [`BatchProcessor`] evaluates each requested date at local noon in the
//! requested timezone, fans cache misses out over rayon, and memoizes the
//! results in a [`ContextCache`].

pub mod cache;
pub mod error;
pub mod processor;

pub use cache::{CacheKey, ClearOnFullCache, ContextCache};
pub use error::BatchError;
pub use processor::{
    BatchConfig, BatchProcessor, BatchStats, DEFAULT_MAX_RANGE_DAYS, local_noon,
};
