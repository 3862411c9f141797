//! Fluent construction of summarizers
//!
//! ```rust
//! use mrl_quantile::SummarizerBuilder;
//! use mrl_core::natural_order;
//!
//! let summarizer = SummarizerBuilder::new()
//!     .num_quantiles(11)
//!     .epsilon(0.01)
//!     .max_num_elements(1_000_000)
//!     .order(natural_order(true))
//!     .build()
//!     .unwrap();
//! assert_eq!(summarizer.config().num_quantiles(), 11);
//! ```

use crate::config::{SummarizerConfig, DEFAULT_NUM_QUANTILES};
use crate::summarizer::MrlSummarizer;
use crate::{Error, Result};
use mrl_core::NaturalOrder;

/// Builder for [`MrlSummarizer`]
///
/// Buffer parameters are either given explicitly through
/// [`buffer_size`](Self::buffer_size) and [`num_buffers`](Self::num_buffers),
/// or derived from [`epsilon`](Self::epsilon) and
/// [`max_num_elements`](Self::max_num_elements). Explicit values win; giving
/// only one of the two is rejected by [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct SummarizerBuilder<O = NaturalOrder> {
    num_quantiles: usize,
    buffer_size: Option<usize>,
    num_buffers: Option<usize>,
    epsilon: Option<f64>,
    max_num_elements: Option<u64>,
    order: O,
}

impl SummarizerBuilder<NaturalOrder> {
    /// Start from the defaults: five quantiles, natural order, auto-tuned buffers
    pub fn new() -> Self {
        Self {
            num_quantiles: DEFAULT_NUM_QUANTILES,
            buffer_size: None,
            num_buffers: None,
            epsilon: None,
            max_num_elements: None,
            order: NaturalOrder,
        }
    }
}

impl Default for SummarizerBuilder<NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> SummarizerBuilder<O> {
    /// Number of quantiles to extract, including min and max
    pub fn num_quantiles(mut self, num_quantiles: usize) -> Self {
        self.num_quantiles = num_quantiles;
        self
    }

    /// Elements per buffer (`k`)
    pub fn buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = Some(buffer_size);
        self
    }

    /// Maximum number of buffers (`b`)
    pub fn num_buffers(mut self, num_buffers: usize) -> Self {
        self.num_buffers = Some(num_buffers);
        self
    }

    /// Target rank error as a fraction of the stream length
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }

    /// Upper bound on the stream length used for auto-tuning
    pub fn max_num_elements(mut self, max_num_elements: u64) -> Self {
        self.max_num_elements = Some(max_num_elements);
        self
    }

    /// Replace the element order
    pub fn order<O2>(self, order: O2) -> SummarizerBuilder<O2> {
        SummarizerBuilder {
            num_quantiles: self.num_quantiles,
            buffer_size: self.buffer_size,
            num_buffers: self.num_buffers,
            epsilon: self.epsilon,
            max_num_elements: self.max_num_elements,
            order,
        }
    }

    /// Resolve the configuration without building a summarizer
    pub fn config(&self) -> Result<SummarizerConfig> {
        match (self.buffer_size, self.num_buffers) {
            (Some(buffer_size), Some(num_buffers)) => {
                SummarizerConfig::new(self.num_quantiles, buffer_size, num_buffers)
            }
            (None, None) => SummarizerConfig::from_error_bound(
                self.num_quantiles,
                self.epsilon,
                self.max_num_elements,
            ),
            _ => Err(Error::PartialBufferConfig),
        }
    }

    /// Validate the parameters and build the summarizer
    pub fn build(self) -> Result<MrlSummarizer<O>> {
        let config = self.config()?;
        Ok(MrlSummarizer::with_config(config, self.order))
    }
}
