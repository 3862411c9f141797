//! MRL98 quantile summarizer
//!
//! The summarizer is the stateless half of the accumulator protocol: it owns
//! the configuration and the element order, and drives every
//! [`QuantileState`] through `add_input`, `merge_accumulators` and
//! `extract_output`.
//!
//! # Data flow
//!
//! 1. Elements are appended to the state's pending batch
//! 2. A full batch of `buffer_size` elements is sorted into a level-0 buffer
//! 3. When more than `num_buffers` buffers exist, the lowest levels collapse
//! 4. Extraction interpolates over all buffers plus the pending batch
//!
//! # Example
//!
//! ```rust
//! use mrl_core::NaturalOrder;
//! use mrl_quantile::MrlSummarizer;
//!
//! let summarizer = MrlSummarizer::new(5, 10, 5, NaturalOrder).unwrap();
//! let mut state = summarizer.create_accumulator();
//! for x in 1..=100 {
//!     summarizer.add_input(&mut state, x);
//! }
//!
//! let quantiles = summarizer.extract_output(&state);
//! assert_eq!(quantiles.len(), 5);
//! assert_eq!(quantiles[0], 1);
//! assert_eq!(quantiles[4], 100);
//! ```

use crate::buffer::QuantileBuffer;
use crate::config::SummarizerConfig;
use crate::interpolate::interpolate;
use crate::state::QuantileState;
use crate::Result;
use mrl_core::{CombineFn, ElementOrder, NaturalOrder};
use tracing::{debug, instrument};

/// Stateless MRL98 configuration and orchestration
#[derive(Debug, Clone)]
pub struct MrlSummarizer<O = NaturalOrder> {
    config: SummarizerConfig,
    order: O,
}

impl<O> MrlSummarizer<O> {
    /// Create a summarizer from explicit parameters
    ///
    /// # Arguments
    /// * `num_quantiles` - Output size, including min and max (at least 2)
    /// * `buffer_size` - Elements per buffer, `k` (at least 2)
    /// * `num_buffers` - Maximum buffers held, `b` (at least 2)
    /// * `order` - Order in which elements are compared
    pub fn new(num_quantiles: usize, buffer_size: usize, num_buffers: usize, order: O) -> Result<Self> {
        let config = SummarizerConfig::new(num_quantiles, buffer_size, num_buffers)?;
        Ok(Self::with_config(config, order))
    }

    /// Create a summarizer with buffers tuned for an error bound
    ///
    /// See [`SummarizerConfig::from_error_bound`].
    pub fn with_error_bound(
        num_quantiles: usize,
        epsilon: Option<f64>,
        max_num_elements: Option<u64>,
        order: O,
    ) -> Result<Self> {
        let config = SummarizerConfig::from_error_bound(num_quantiles, epsilon, max_num_elements)?;
        Ok(Self::with_config(config, order))
    }

    /// Create a summarizer from a validated configuration
    pub fn with_config(config: SummarizerConfig, order: O) -> Self {
        Self { config, order }
    }

    /// The active configuration
    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    /// The element order
    pub fn order(&self) -> &O {
        &self.order
    }

    /// Create an empty accumulator
    pub fn create_accumulator<T>(&self) -> QuantileState<T> {
        QuantileState::new(self.config.buffer_size(), self.config.num_buffers())
    }
}

impl Default for MrlSummarizer<NaturalOrder> {
    fn default() -> Self {
        Self::with_config(SummarizerConfig::default(), NaturalOrder)
    }
}

impl<O> MrlSummarizer<O> {
    /// Add one element to `state`
    ///
    /// Every value is accepted. Once the pending batch reaches `buffer_size`
    /// it is sorted into a new level-0 buffer and the collapse engine runs.
    pub fn add_input<T>(&self, state: &mut QuantileState<T>, element: T)
    where
        T: Clone,
        O: ElementOrder<T>,
    {
        state.observe(&element, &self.order);
        state.push_unbuffered(element, &self.order);
    }

    /// Combine independently filled states into a new one
    ///
    /// Pending elements of every input are re-batched so partial batches
    /// from different partitions can fill whole buffers; existing buffers are
    /// adopted as they are. A single collapse pass at the end restores the
    /// buffer bound. Empty inputs are skipped.
    ///
    /// # Errors
    /// Returns [`Error::IncompatibleState`](crate::Error::IncompatibleState)
    /// if any input was created with a different buffer layout.
    #[instrument(skip_all, fields(buffer_size = self.config.buffer_size()))]
    pub fn merge_accumulators<T, I>(&self, states: I) -> Result<QuantileState<T>>
    where
        T: Clone,
        O: ElementOrder<T>,
        I: IntoIterator<Item = QuantileState<T>>,
    {
        let states: Vec<QuantileState<T>> = states.into_iter().collect();
        for state in &states {
            state.check_layout(self.config.buffer_size(), self.config.num_buffers())?;
        }

        let mut merged = self.create_accumulator();
        let mut merged_inputs = 0usize;

        for state in states.into_iter().filter(|state| !state.is_empty()) {
            merged_inputs += 1;

            let parts = state.into_parts();
            if let (Some(min), Some(max)) = (&parts.min, &parts.max) {
                merged.observe_bounds(min, max, &self.order);
            }
            for element in parts.unbuffered {
                merged.push_unbuffered(element, &self.order);
            }
            merged.adopt_buffers(parts.buffers);
        }

        let collapses = merged.collapse_if_needed(&self.order);
        debug!(
            merged_inputs,
            collapses,
            buffers = merged.num_buffers(),
            "Merged quantile states"
        );
        Ok(merged)
    }

    /// Compute the quantiles summarized by `state`
    ///
    /// Returns `num_quantiles` elements: the exact minimum, `num_quantiles -
    /// 2` evenly spaced interior elements, and the exact maximum. Returns an
    /// empty vector if no element was ever added.
    ///
    /// Extraction does not modify the state; pending elements are sorted
    /// into a temporary buffer, so the state can keep accepting input and
    /// repeated extraction yields the same result.
    #[instrument(skip_all, fields(num_quantiles = self.config.num_quantiles()))]
    pub fn extract_output<T>(&self, state: &QuantileState<T>) -> Vec<T>
    where
        T: Clone,
        O: ElementOrder<T>,
    {
        let (Some(min), Some(max)) = (state.min(), state.max()) else {
            return Vec::new();
        };

        let total_count = state.count() as f64;
        let pending = if state.unbuffered().is_empty() {
            None
        } else {
            Some(QuantileBuffer::from_batch(
                state.unbuffered().to_vec(),
                &self.order,
            ))
        };

        let mut working = state.buffers().sorted_refs();
        working.extend(pending.as_ref());

        let num_quantiles = self.config.num_quantiles();
        let intervals = (num_quantiles - 1) as f64;
        let step = total_count / intervals;
        let offset = (total_count - 1.0) / intervals;

        let mut quantiles = Vec::with_capacity(num_quantiles);
        quantiles.push(min.clone());
        quantiles.extend(interpolate(
            &working,
            num_quantiles - 2,
            step,
            offset,
            &self.order,
        ));
        quantiles.push(max.clone());
        quantiles
    }
}

impl<T, O> CombineFn<T> for MrlSummarizer<O>
where
    T: Clone,
    O: ElementOrder<T>,
{
    type Accumulator = QuantileState<T>;
    type Output = Vec<T>;

    fn create_accumulator(&self) -> QuantileState<T> {
        MrlSummarizer::create_accumulator(self)
    }

    fn add_input(&self, acc: &mut QuantileState<T>, input: T) {
        MrlSummarizer::add_input(self, acc, input);
    }

    fn merge_accumulators<I>(&self, accs: I) -> mrl_core::Result<QuantileState<T>>
    where
        I: IntoIterator<Item = QuantileState<T>>,
    {
        MrlSummarizer::merge_accumulators(self, accs).map_err(Into::into)
    }

    fn extract_output(&self, acc: &QuantileState<T>) -> Vec<T> {
        MrlSummarizer::extract_output(self, acc)
    }
}
