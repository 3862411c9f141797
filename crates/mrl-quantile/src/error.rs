//! Error types for quantile summarization

use thiserror::Error;

/// Errors that can occur while configuring or merging quantile summaries
#[derive(Error, Debug)]
pub enum Error {
    /// Too few quantiles requested
    #[error("Number of quantiles {value} must be at least 2")]
    InvalidNumQuantiles { value: usize },

    /// Buffers too small to summarize anything
    #[error("Buffer size {value} must be at least 2")]
    InvalidBufferSize { value: usize },

    /// Too few buffers to collapse
    #[error("Number of buffers {value} must be at least 2")]
    InvalidNumBuffers { value: usize },

    /// Invalid target error bound
    #[error("Epsilon {epsilon} must be finite and positive")]
    InvalidEpsilon { epsilon: f64 },

    /// Invalid stream length bound
    #[error("Maximum number of elements {value} must be at least 1")]
    InvalidMaxElements { value: u64 },

    /// Builder given only one of buffer_size / num_buffers
    #[error("Buffer size and number of buffers must be set together")]
    PartialBufferConfig,

    /// Accumulators created with different buffer layouts
    #[error("Incompatible quantile state: expected {expected}, found {found}")]
    IncompatibleState { expected: String, found: String },

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] mrl_core::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions
impl Error {
    /// Check the requested number of quantiles
    pub fn check_num_quantiles(value: usize) -> Result<()> {
        if value < 2 {
            return Err(Error::InvalidNumQuantiles { value });
        }
        Ok(())
    }

    /// Check the buffer size `k`
    pub fn check_buffer_size(value: usize) -> Result<()> {
        if value < 2 {
            return Err(Error::InvalidBufferSize { value });
        }
        Ok(())
    }

    /// Check the number of buffers `b`
    pub fn check_num_buffers(value: usize) -> Result<()> {
        if value < 2 {
            return Err(Error::InvalidNumBuffers { value });
        }
        Ok(())
    }

    /// Check the error bound used for auto-tuning
    pub fn check_epsilon(epsilon: f64) -> Result<()> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(Error::InvalidEpsilon { epsilon });
        }
        Ok(())
    }
}

impl From<Error> for mrl_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Core(inner) => inner,
            Error::InvalidNumQuantiles { value } => {
                mrl_core::Error::below_minimum("num_quantiles", value, 2)
            }
            Error::InvalidBufferSize { value } => {
                mrl_core::Error::below_minimum("buffer_size", value, 2)
            }
            Error::InvalidNumBuffers { value } => {
                mrl_core::Error::below_minimum("num_buffers", value, 2)
            }
            Error::InvalidEpsilon { epsilon } => mrl_core::Error::not_positive("epsilon", epsilon),
            Error::IncompatibleState { expected, found } => {
                mrl_core::Error::IncompatibleAccumulator { expected, found }
            }
            other => mrl_core::Error::InvalidParameter(other.to_string()),
        }
    }
}
