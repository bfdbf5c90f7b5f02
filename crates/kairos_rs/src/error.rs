//! Unified error type for the facade.

use kairos_batch::BatchError;
use kairos_chart::ChartError;
use kairos_config::ConfigError;
use kairos_core::EngineError;
use kairos_search::SearchError;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KairosError {
    /// [`init`](crate::init) has not been called.
    #[error("kairos not initialized; call kairos_rs::init() first")]
    NotInitialized,
    /// [`init`](crate::init) was called more than once.
    #[error("kairos already initialized")]
    AlreadyInitialized,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Batch(#[from] BatchError),
}
