//! Error types for search and summary operations.

use kairos_core::EngineError;
use thiserror::Error;

/// Errors from context summaries and searches.
///
/// Failures of an individual sign-transition search are not errors: they
/// surface as an unknown [`crate::SignTransition`].
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// Error from the ephemeris engine.
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
    /// Invalid search configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}
