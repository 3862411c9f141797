//! Summarizer configuration and auto-tuning
//!
//! MRL98 is parameterized by the buffer size `k` and number of buffers `b`.
//! Given a target rank error `epsilon` and an upper bound `N` on the stream
//! length, [`SummarizerConfig::from_error_bound`] picks the smallest `b` with
//! `(b - 2) * 2^(b - 2) >= epsilon * N` and sets
//! `k = max(2, ceil(N / 2^(b - 1)))`. That bounds the worst-case rank error
//! by `epsilon * N` while keeping memory at `O(b * k)`.

use crate::{Error, Result};

/// Stream length assumed when no bound is given
pub const DEFAULT_MAX_NUM_ELEMENTS: u64 = 1_000_000_000;

/// Number of quantiles produced by the default configuration
pub const DEFAULT_NUM_QUANTILES: usize = 5;

/// Immutable parameters of a quantile summarizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummarizerConfig {
    num_quantiles: usize,
    buffer_size: usize,
    num_buffers: usize,
}

impl SummarizerConfig {
    /// Create a configuration from explicit parameters
    ///
    /// # Arguments
    /// * `num_quantiles` - Size of the extracted output, including min and max
    /// * `buffer_size` - Elements per buffer (`k`)
    /// * `num_buffers` - Maximum buffers held at once (`b`)
    pub fn new(num_quantiles: usize, buffer_size: usize, num_buffers: usize) -> Result<Self> {
        Error::check_num_quantiles(num_quantiles)?;
        Error::check_buffer_size(buffer_size)?;
        Error::check_num_buffers(num_buffers)?;
        Ok(Self {
            num_quantiles,
            buffer_size,
            num_buffers,
        })
    }

    /// Derive buffer parameters from an error bound
    ///
    /// `epsilon` defaults to `1 / num_quantiles` and `max_num_elements` to
    /// [`DEFAULT_MAX_NUM_ELEMENTS`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use mrl_quantile::SummarizerConfig;
    ///
    /// let config = SummarizerConfig::from_error_bound(101, Some(0.01), Some(1_000_000_000)).unwrap();
    /// assert_eq!(config.num_buffers(), 22);
    /// assert_eq!(config.buffer_size(), 477);
    /// ```
    pub fn from_error_bound(
        num_quantiles: usize,
        epsilon: Option<f64>,
        max_num_elements: Option<u64>,
    ) -> Result<Self> {
        Error::check_num_quantiles(num_quantiles)?;
        let epsilon = epsilon.unwrap_or(1.0 / num_quantiles as f64);
        Error::check_epsilon(epsilon)?;
        let max_num_elements = max_num_elements.unwrap_or(DEFAULT_MAX_NUM_ELEMENTS);
        if max_num_elements == 0 {
            return Err(Error::InvalidMaxElements {
                value: max_num_elements,
            });
        }

        let (buffer_size, num_buffers) = tune_buffers(epsilon, max_num_elements);
        Self::new(num_quantiles, buffer_size, num_buffers)
    }

    /// Size of the extracted output
    pub fn num_quantiles(&self) -> usize {
        self.num_quantiles
    }

    /// Elements per buffer (`k`)
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Maximum number of buffers (`b`)
    pub fn num_buffers(&self) -> usize {
        self.num_buffers
    }

    /// Most elements a single accumulator can hold at once
    ///
    /// `b` full buffers plus a batch one element short of flushing.
    pub fn capacity(&self) -> usize {
        self.num_buffers * self.buffer_size + self.buffer_size - 1
    }
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        let epsilon = 1.0 / DEFAULT_NUM_QUANTILES as f64;
        let (buffer_size, num_buffers) = tune_buffers(epsilon, DEFAULT_MAX_NUM_ELEMENTS);
        Self {
            num_quantiles: DEFAULT_NUM_QUANTILES,
            buffer_size,
            num_buffers,
        }
    }
}

/// Smallest `b` covering `epsilon * n`, and the matching `k`
///
/// Returns `(buffer_size, num_buffers)`. Both are at least 2.
pub fn tune_buffers(epsilon: f64, max_num_elements: u64) -> (usize, usize) {
    let target = epsilon * max_num_elements as f64;
    let mut b: i32 = 2;
    while f64::from(b - 2) * 2f64.powi(b - 2) < target {
        b += 1;
    }
    let k = (max_num_elements as f64 / 2f64.powi(b - 1)).ceil() as usize;
    (k.max(2), b as usize)
}
