//! Bounded-memory streaming quantile summaries
//!
//! This crate re-exports the workspace crates under one roof:
//!
//! - [`mrl_core`]: element orders, the accumulator protocol and the shared error type
//! - [`mrl_quantile`]: the MRL98 buffer-and-collapse summarizer
//!
//! # Example
//!
//! ```rust
//! use mrl_stats::prelude::*;
//!
//! let summarizer = MrlSummarizer::new(5, 64, 8, FloatOrder).unwrap();
//!
//! // two partitions summarized independently, then merged
//! let mut left = summarizer.create_accumulator();
//! let mut right = summarizer.create_accumulator();
//! for i in 0..1_000 {
//!     summarizer.add_input(&mut left, i as f64);
//!     summarizer.add_input(&mut right, (1_000 + i) as f64);
//! }
//!
//! let merged = summarizer.merge_accumulators([left, right]).unwrap();
//! let quantiles = summarizer.extract_output(&merged);
//! assert_eq!(quantiles.first(), Some(&0.0));
//! assert_eq!(quantiles.last(), Some(&1_999.0));
//! ```

pub use mrl_core;
pub use mrl_quantile;

pub use mrl_core::{key_order, natural_order, CombineFn, ElementOrder, FloatOrder, NaturalOrder};
pub use mrl_quantile::{
    MrlSummarizer, QuantileState, SummarizerBuilder, SummarizerConfig, DEFAULT_MAX_NUM_ELEMENTS,
    DEFAULT_NUM_QUANTILES,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use mrl_core::prelude::*;
    pub use mrl_core::{key_order, natural_order};
    pub use mrl_quantile::{MrlSummarizer, QuantileState, SummarizerBuilder, SummarizerConfig};
}
