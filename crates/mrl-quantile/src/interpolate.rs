//! Weighted k-way merge and evenly spaced sampling
//!
//! The interpolator emulates taking the ordered union of all buffers, where
//! every element is repeated `weight` times, and picking the elements at
//! cumulative positions `j * step + offset` for `0 <= j < count`. It never
//! materializes the repeated sequence: a cursor per buffer walks the sorted
//! elements and the running cumulative weight decides when to emit.
//!
//! The same routine serves two purposes:
//!
//! - **Collapse**: `count = buffer_size`, `step = sum of weights`, integer
//!   offset from the anti-bias jitter. Produces the elements of the merged
//!   buffer.
//! - **Extraction**: `count = num_quantiles - 2`, fractional `step` and
//!   `offset` derived from the total element count. Produces the interior
//!   quantiles.

use crate::buffer::{QuantileBuffer, WeightedElement};
use mrl_core::ElementOrder;

/// Merges several sorted buffers into one weighted, ordered stream
///
/// Ties are resolved in favour of the buffer that appears first in the input
/// slice, so the merge is stable with respect to buffer order.
pub struct WeightedMerge<'a, T, O> {
    buffers: &'a [&'a QuantileBuffer<T>],
    cursors: Vec<usize>,
    order: &'a O,
}

impl<'a, T, O: ElementOrder<T>> WeightedMerge<'a, T, O> {
    /// Start a merge over `buffers`, each sorted under `order`
    pub fn new(buffers: &'a [&'a QuantileBuffer<T>], order: &'a O) -> Self {
        Self {
            buffers,
            cursors: vec![0; buffers.len()],
            order,
        }
    }

    /// Total weight of everything still to be yielded
    pub fn remaining_weight(&self) -> u64 {
        self.buffers
            .iter()
            .zip(&self.cursors)
            .map(|(buffer, &pos)| (buffer.len() - pos) as u64 * buffer.weight())
            .sum()
    }
}

impl<'a, T, O: ElementOrder<T>> Iterator for WeightedMerge<'a, T, O> {
    type Item = WeightedElement<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut best: Option<(usize, &'a T)> = None;
        for (idx, buffer) in self.buffers.iter().enumerate() {
            let Some(candidate) = buffer.elements().get(self.cursors[idx]) else {
                continue;
            };
            match best {
                Some((_, current)) if !self.order.is_less(candidate, current) => {}
                _ => best = Some((idx, candidate)),
            }
        }

        let (idx, value) = best?;
        self.cursors[idx] += 1;
        Some(WeightedElement {
            value,
            weight: self.buffers[idx].weight(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining: usize = self
            .buffers
            .iter()
            .zip(&self.cursors)
            .map(|(buffer, &pos)| buffer.len() - pos)
            .sum();
        (remaining, Some(remaining))
    }
}

/// Sample `count` elements at cumulative weights `j * step + offset`
///
/// For each `j` the merged stream is advanced until the cumulative weight
/// exceeds the target and the last consumed element is emitted. If the
/// stream runs out early, the final element is repeated so exactly `count`
/// elements are returned. Returns an empty vector when the buffers hold no
/// elements at all.
pub fn interpolate<T, O>(
    buffers: &[&QuantileBuffer<T>],
    count: usize,
    step: f64,
    offset: f64,
    order: &O,
) -> Vec<T>
where
    T: Clone,
    O: ElementOrder<T>,
{
    let mut merged = WeightedMerge::new(buffers, order);
    let Some(mut last) = merged.next() else {
        return Vec::new();
    };
    let mut current = last.weight;

    let mut sampled = Vec::with_capacity(count);
    for j in 0..count {
        let target = j as f64 * step + offset;
        while current as f64 <= target {
            match merged.next() {
                Some(next) => {
                    current += next.weight;
                    last = next;
                }
                None => break,
            }
        }
        sampled.push(last.value.clone());
    }
    sampled
}
