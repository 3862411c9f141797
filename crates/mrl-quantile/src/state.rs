//! Quantile state (the accumulator)
//!
//! A [`QuantileState`] holds everything a summary needs between calls: the
//! batch of not-yet-buffered elements, the level-ordered buffer heap, the
//! exact minimum and maximum, and the anti-bias jitter of its own collapses.
//! States are created by [`MrlSummarizer`](crate::MrlSummarizer) and mutated
//! only through it.
//!
//! Between operations two invariants hold:
//!
//! - `num_buffers() <= max_buffers()`
//! - `unbuffered_len() < buffer_size()`

use crate::buffer::QuantileBuffer;
use crate::collapse::{collapse_if_needed, OffsetJitter};
use crate::heap::BufferHeap;
use crate::{Error, Result};
use mrl_core::ElementOrder;
use tracing::trace;

/// Streaming accumulator for MRL98 quantile summaries
#[derive(Debug, Clone)]
pub struct QuantileState<T> {
    buffer_size: usize,
    num_buffers: usize,
    unbuffered: Vec<T>,
    buffers: BufferHeap<T>,
    min: Option<T>,
    max: Option<T>,
    jitter: OffsetJitter,
}

impl<T> QuantileState<T> {
    pub(crate) fn new(buffer_size: usize, num_buffers: usize) -> Self {
        Self {
            buffer_size,
            num_buffers,
            unbuffered: Vec::new(),
            buffers: BufferHeap::new(),
            min: None,
            max: None,
            jitter: OffsetJitter::new(),
        }
    }

    /// Whether no element has been added
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Exact number of stream elements summarized
    pub fn count(&self) -> u64 {
        let buffered: u64 = self
            .buffers
            .iter()
            .map(|b| self.buffer_size as u64 * b.weight())
            .sum();
        self.unbuffered.len() as u64 + buffered
    }

    /// Smallest element seen under the summarizer's order
    pub fn min(&self) -> Option<&T> {
        self.min.as_ref()
    }

    /// Largest element seen under the summarizer's order
    pub fn max(&self) -> Option<&T> {
        self.max.as_ref()
    }

    /// Elements per buffer (`k`)
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Buffer bound (`b`)
    pub fn max_buffers(&self) -> usize {
        self.num_buffers
    }

    /// Buffers currently held
    pub fn num_buffers(&self) -> usize {
        self.buffers.len()
    }

    /// Elements waiting for a full batch
    pub fn unbuffered_len(&self) -> usize {
        self.unbuffered.len()
    }

    /// Elements held in memory, buffered and unbuffered
    pub fn stored_elements(&self) -> usize {
        self.unbuffered.len() + self.buffers.iter().map(QuantileBuffer::len).sum::<usize>()
    }

    /// Levels of the held buffers, lowest first
    pub fn levels(&self) -> Vec<u32> {
        self.buffers.levels()
    }

    pub(crate) fn buffers(&self) -> &BufferHeap<T> {
        &self.buffers
    }

    pub(crate) fn unbuffered(&self) -> &[T] {
        &self.unbuffered
    }

    pub(crate) fn check_layout(&self, buffer_size: usize, num_buffers: usize) -> Result<()> {
        if self.buffer_size != buffer_size || self.num_buffers != num_buffers {
            return Err(Error::IncompatibleState {
                expected: format!("buffer_size={buffer_size}, num_buffers={num_buffers}"),
                found: format!(
                    "buffer_size={}, num_buffers={}",
                    self.buffer_size, self.num_buffers
                ),
            });
        }
        Ok(())
    }

    /// Break the state into its parts for merging
    pub(crate) fn into_parts(self) -> StateParts<T> {
        StateParts {
            unbuffered: self.unbuffered,
            buffers: self.buffers.into_sorted_vec(),
            min: self.min,
            max: self.max,
        }
    }
}

impl<T: Clone> QuantileState<T> {
    /// Widen the running min/max to include `element`
    pub(crate) fn observe<O: ElementOrder<T>>(&mut self, element: &T, order: &O) {
        self.observe_bounds(element, element, order);
    }

    /// Widen the running min/max to include another state's bounds
    pub(crate) fn observe_bounds<O: ElementOrder<T>>(&mut self, low: &T, high: &T, order: &O) {
        if self.min.as_ref().map_or(true, |current| order.is_less(low, current)) {
            self.min = Some(low.clone());
        }
        if self.max.as_ref().map_or(true, |current| order.is_greater(high, current)) {
            self.max = Some(high.clone());
        }
    }

    /// Append to the pending batch, flushing and collapsing when it fills
    pub(crate) fn push_unbuffered<O: ElementOrder<T>>(&mut self, element: T, order: &O) {
        self.unbuffered.push(element);
        if self.unbuffered.len() == self.buffer_size {
            let batch = std::mem::take(&mut self.unbuffered);
            self.buffers.push(QuantileBuffer::from_batch(batch, order));
            trace!(buffers = self.buffers.len(), "Flushed full batch into level-0 buffer");
            self.collapse_if_needed(order);
        }
    }

    /// Adopt already-built buffers without re-batching them
    pub(crate) fn adopt_buffers(&mut self, buffers: Vec<QuantileBuffer<T>>) {
        self.buffers.extend(buffers);
    }

    /// Restore the buffer bound
    pub(crate) fn collapse_if_needed<O: ElementOrder<T>>(&mut self, order: &O) -> usize {
        collapse_if_needed(
            &mut self.buffers,
            self.num_buffers,
            self.buffer_size,
            &mut self.jitter,
            order,
        )
    }
}

/// Owned pieces of a consumed state
pub(crate) struct StateParts<T> {
    pub unbuffered: Vec<T>,
    pub buffers: Vec<QuantileBuffer<T>>,
    pub min: Option<T>,
    pub max: Option<T>,
}
