//! Quantile buffers
//!
//! A buffer is a sorted block of representative elements. Every element of a
//! buffer stands for `weight` input stream elements, and `level` counts
//! how many collapses produced it. Level-0 buffers (weight 1) come straight
//! from a full batch of input; higher levels come out of the collapse engine.

use mrl_core::ElementOrder;

/// One representative element together with the number of stream elements
/// it stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedElement<'a, T> {
    /// The representative value
    pub value: &'a T,
    /// Multiplicity in the cumulative weight
    pub weight: u64,
}

/// Sorted block of weighted elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantileBuffer<T> {
    elements: Vec<T>,
    level: u32,
    weight: u64,
}

impl<T> QuantileBuffer<T> {
    /// Wrap a batch of raw elements as a level-0, weight-1 buffer
    ///
    /// The batch is sorted under `order` once here; buffers are never
    /// resorted afterwards.
    pub fn from_batch<O: ElementOrder<T>>(mut elements: Vec<T>, order: &O) -> Self {
        order.sort(&mut elements);
        Self::from_sorted(elements, 0, 1)
    }

    /// Wrap elements that are already sorted under the active order
    pub(crate) fn from_sorted(elements: Vec<T>, level: u32, weight: u64) -> Self {
        debug_assert!(weight >= 1, "buffer weight must be positive");
        Self {
            elements,
            level,
            weight,
        }
    }

    /// The sorted representative elements
    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    /// Number of collapses that produced this buffer
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Per-element multiplier
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Number of stored representatives
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the buffer holds no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate the elements in order, each tagged with the buffer weight
    pub fn weighted_iter(&self) -> impl Iterator<Item = WeightedElement<'_, T>> + '_ {
        let weight = self.weight;
        self.elements
            .iter()
            .map(move |value| WeightedElement { value, weight })
    }
}
