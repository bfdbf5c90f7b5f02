//! Error types for chart calculations.

use kairos_core::EngineError;
use kairos_time::TimeError;
use thiserror::Error;

/// Errors from zodiac, house and natal chart calculations.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ChartError {
    /// Error from the ephemeris engine.
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
    /// Error from time conversion.
    #[error("time error: {0}")]
    Time(#[from] TimeError),
    /// Invalid geographic location parameter.
    #[error("invalid location: {0}")]
    InvalidLocation(&'static str),
    /// House cusps or angles were requested from a chart without birth time.
    #[error("incomplete birth data: {0}")]
    IncompleteBirthData(&'static str),
    /// Civil birth date/time could not be mapped to an instant.
    #[error("invalid birth time: {0}")]
    InvalidBirthTime(&'static str),
    /// Iterative algorithm did not converge.
    #[error("no convergence: {0}")]
    NoConvergence(&'static str),
}
