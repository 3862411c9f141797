//! Core traits and types for bounded-memory streaming summaries
//!
//! This crate provides the pieces shared by every summary in the workspace:
//!
//! - [`ElementOrder`]: explicit comparator strategies (natural, float, by key,
//!   reversed) handed to every component that orders elements
//! - [`CombineFn`]: the create / add / merge / extract accumulator protocol
//!   that makes summaries mergeable across partitions
//! - [`Error`] and [`Result`]: the unified error type
//!
//! # Example
//!
//! ```rust
//! use mrl_core::{ElementOrder, FloatOrder};
//!
//! let mut data = vec![2.5, -1.0, 0.0];
//! FloatOrder.sort(&mut data);
//! assert_eq!(data, vec![-1.0, 0.0, 2.5]);
//! ```

pub mod error;
pub mod order;
pub mod traits;

// Re-export core types
pub use error::{Error, Result};
pub use order::{
    key_order, natural_order, Direction, ElementOrder, FloatOrder, KeyOrder, NaturalOrder,
    Reversed,
};
pub use traits::CombineFn;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CombineFn, ElementOrder, Error, FloatOrder, KeyOrder, NaturalOrder, Result, Reversed,
    };
}
