//! Streaming approximate quantiles (MRL98)
//!
//! This crate implements the buffer-and-collapse summary of Manku,
//! Rajagopalan and Lindsay: a single pass over an unbounded stream of
//! comparable elements, in memory bounded by `num_buffers * buffer_size`,
//! producing evenly spaced quantiles whose rank error is bounded by
//! `epsilon * N`.
//!
//! # Features
//!
//! - **Exact extremes**: the first and last output are the true min and max
//! - **Mergeable accumulators**: states from independent partitions combine
//!   through [`MrlSummarizer::merge_accumulators`]
//! - **Pluggable order**: natural, reversed, keyed or float ordering via
//!   [`mrl_core::ElementOrder`]
//! - **Auto-tuning**: buffer parameters derived from an error bound
//! - **Parallel summarization**: `summarize_par` behind the `parallel` feature
//!
//! # Example
//!
//! ```rust
//! use mrl_quantile::prelude::*;
//!
//! let summarizer = SummarizerBuilder::new()
//!     .num_quantiles(5)
//!     .epsilon(0.01)
//!     .max_num_elements(1_000_000)
//!     .build()
//!     .unwrap();
//!
//! let mut state = summarizer.create_accumulator();
//! for x in 0..10_000u32 {
//!     summarizer.add_input(&mut state, x);
//! }
//!
//! let quartiles = summarizer.extract_output(&state);
//! assert_eq!(quartiles.first(), Some(&0));
//! assert_eq!(quartiles.last(), Some(&9_999));
//! ```

pub mod buffer;
pub mod builder;
pub mod collapse;
pub mod config;
pub mod error;
pub mod heap;
pub mod interpolate;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod state;
pub mod summarizer;

// Re-export main types
pub use buffer::{QuantileBuffer, WeightedElement};
pub use builder::SummarizerBuilder;
pub use collapse::OffsetJitter;
pub use config::{tune_buffers, SummarizerConfig, DEFAULT_MAX_NUM_ELEMENTS, DEFAULT_NUM_QUANTILES};
pub use error::{Error, Result};
pub use interpolate::interpolate;
pub use state::QuantileState;
pub use summarizer::MrlSummarizer;

// Re-export from mrl-core
pub use mrl_core::{CombineFn, ElementOrder, FloatOrder, NaturalOrder};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        CombineFn, ElementOrder, Error, FloatOrder, MrlSummarizer, NaturalOrder, QuantileState,
        Result, SummarizerBuilder, SummarizerConfig,
    };
    pub use mrl_core::{key_order, natural_order};
}
