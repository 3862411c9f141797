//! Core traits for mergeable streaming summaries
//!
//! Algorithm-specific types (like the MRL98 summarizer) live in their
//! respective crates and implement the protocol defined here.

use crate::Result;

/// Accumulator protocol for mergeable summaries
///
/// A `CombineFn` is a stateless description of a summary: it creates empty
/// accumulators, folds elements into them, merges accumulators that were
/// filled independently (e.g. one per partition of a stream), and extracts
/// the final output. Accumulators are owned by exactly one caller at a time;
/// merging consumes its inputs.
///
/// # Example
///
/// ```rust
/// use mrl_core::{CombineFn, Result};
///
/// struct Count;
///
/// impl CombineFn<u32> for Count {
///     type Accumulator = usize;
///     type Output = usize;
///
///     fn create_accumulator(&self) -> usize { 0 }
///     fn add_input(&self, acc: &mut usize, _input: u32) { *acc += 1; }
///     fn merge_accumulators<I>(&self, accs: I) -> Result<usize>
///     where
///         I: IntoIterator<Item = usize>,
///     {
///         Ok(accs.into_iter().sum())
///     }
///     fn extract_output(&self, acc: &usize) -> usize { *acc }
/// }
///
/// assert_eq!(Count.combine([1, 2, 3]), 3);
/// ```
pub trait CombineFn<T> {
    /// Mutable state filled by `add_input`
    type Accumulator;

    /// Result produced by `extract_output`
    type Output;

    /// Create an empty accumulator
    fn create_accumulator(&self) -> Self::Accumulator;

    /// Fold one element into an accumulator
    fn add_input(&self, acc: &mut Self::Accumulator, input: T);

    /// Combine independently filled accumulators into a new one
    ///
    /// Returns an error if the accumulators were produced by incompatible
    /// configurations.
    fn merge_accumulators<I>(&self, accs: I) -> Result<Self::Accumulator>
    where
        I: IntoIterator<Item = Self::Accumulator>;

    /// Produce the output for an accumulator
    fn extract_output(&self, acc: &Self::Accumulator) -> Self::Output;

    /// Fold every element of `inputs` into an accumulator
    fn add_inputs<I>(&self, acc: &mut Self::Accumulator, inputs: I)
    where
        I: IntoIterator<Item = T>,
    {
        for input in inputs {
            self.add_input(acc, input);
        }
    }

    /// Summarize a whole stream in one call
    fn combine<I>(&self, inputs: I) -> Self::Output
    where
        I: IntoIterator<Item = T>,
    {
        let mut acc = self.create_accumulator();
        self.add_inputs(&mut acc, inputs);
        self.extract_output(&acc)
    }
}
