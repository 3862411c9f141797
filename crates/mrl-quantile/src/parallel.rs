//! Parallel summarization with rayon
//!
//! Each chunk of the input is summarized into a private accumulator on the
//! rayon pool, then the partial states are merged. Accumulators are never
//! shared between threads while they are filled.

use crate::state::QuantileState;
use crate::summarizer::MrlSummarizer;
use crate::Result;
use mrl_core::ElementOrder;
use rayon::prelude::*;
use tracing::debug;

impl<O> MrlSummarizer<O> {
    /// Summarize `data` in parallel, `chunk_size` elements per task
    ///
    /// The result obeys the same guarantees as adding every element to one
    /// accumulator sequentially: exact count, min and max, and the same
    /// error bound for the interior quantiles. A `chunk_size` of zero is
    /// treated as one.
    pub fn summarize_par<T>(&self, data: &[T], chunk_size: usize) -> Result<QuantileState<T>>
    where
        T: Clone + Send + Sync,
        O: ElementOrder<T> + Sync,
    {
        let chunk_size = chunk_size.max(1);
        let partials: Vec<QuantileState<T>> = data
            .par_chunks(chunk_size)
            .map(|chunk| {
                let mut state = self.create_accumulator();
                for element in chunk {
                    self.add_input(&mut state, element.clone());
                }
                state
            })
            .collect();

        debug!(
            partitions = partials.len(),
            chunk_size, "Summarized partitions in parallel"
        );
        self.merge_accumulators(partials)
    }
}
