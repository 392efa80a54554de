//! CLI error types.

use convex_stress::StressError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The model rejected an input.
    #[error("Invalid input: {0}")]
    Input(#[from] StressError),

    /// A value could not be parsed as a number.
    #[error("Invalid number for {field}: {value}")]
    InvalidNumber {
        /// Field being set.
        field: String,
        /// Text that failed to parse.
        value: String,
    },

    /// Unknown configuration key.
    #[error("Unknown configuration key: {0}")]
    UnknownConfigKey(String),

    /// Configuration value failed validation.
    #[error("Invalid value for {key}: {value}. {reason}")]
    InvalidConfigValue {
        /// Configuration key.
        key: &'static str,
        /// Rejected value.
        value: String,
        /// What is accepted instead.
        reason: String,
    },

    /// Malformed line in a session script.
    #[error("Line {line}: {message}")]
    Session {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
