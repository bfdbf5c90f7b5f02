//! Error types for time conversions.

use thiserror::Error;

/// Errors from Julian Date ↔ calendar conversion.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// Julian Date is NaN or infinite.
    #[error("julian date must be finite, got {0}")]
    NonFiniteJulianDate(f64),
    /// Julian Date cannot be represented as a `chrono` timestamp.
    #[error("julian date {0} is outside the representable calendar range")]
    Unrepresentable(f64),
}
