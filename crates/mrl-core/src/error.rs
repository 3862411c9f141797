//! Error types for streaming summaries
//!
//! Provides a unified error type for all mrl-stats crates.

use thiserror::Error;

/// Core error type for streaming summary operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Two accumulators cannot be combined
    #[error("Incompatible accumulator: expected {expected}, found {found}")]
    IncompatibleAccumulator { expected: String, found: String },

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a parameter that must be at least `min`
    pub fn below_minimum(name: &str, value: usize, min: usize) -> Self {
        Self::InvalidParameter(format!("{name} must be at least {min}, got {value}"))
    }

    /// Create an error for a parameter that must be finite and positive
    pub fn not_positive(name: &str, value: f64) -> Self {
        Self::InvalidParameter(format!("{name} must be finite and positive, got {value}"))
    }
}
