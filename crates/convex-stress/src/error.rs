//! Error types for the stress model.
//!
//! The scoring functions themselves are total and never fail. These errors
//! cover the edges where a caller hands the crate something it cannot
//! interpret: non-finite inputs on the fail-fast path, unknown names, and
//! malformed sweep requests.

use thiserror::Error;

/// A specialized Result type for stress model operations.
pub type StressOutcome<T> = Result<T, StressError>;

/// Errors raised at the boundary of the stress model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StressError {
    /// An input field was NaN or infinite.
    #[error("Non-finite input for {field}: {value}")]
    NonFiniteInput {
        /// Serialized name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// No preset with this name exists.
    #[error("Unknown preset: {0}. Use svb, stable, rateShock, or run.")]
    UnknownPreset(String),

    /// No factor with this name exists.
    #[error("Unknown factor: {0}")]
    UnknownFactor(String),

    /// A sensitivity sweep request could not be honoured.
    #[error("Invalid sweep: {0}")]
    InvalidSweep(String),
}

impl StressError {
    /// Creates a non-finite input error.
    pub fn non_finite(field: &'static str, value: f64) -> Self {
        Self::NonFiniteInput { field, value }
    }

    /// Creates an invalid sweep error.
    pub fn invalid_sweep(reason: impl Into<String>) -> Self {
        Self::InvalidSweep(reason.into())
    }
}
