//! Collapse engine
//!
//! Keeps the number of buffers within bound by repeatedly folding the
//! lowest-level buffers into a single buffer one level up. Collapsing the
//! oldest, lightest buffers first keeps weight growth geometric in level and
//! bounds the accumulated interpolation error.

use crate::buffer::QuantileBuffer;
use crate::heap::BufferHeap;
use crate::interpolate::interpolate;
use mrl_core::ElementOrder;
use tracing::debug;

/// Anti-bias rounding for even-weight collapses
///
/// When the combined weight `W` of a collapse is odd the sampling offset is
/// the exact middle, `(W + 1) / 2`. When it is even there are two middle
/// positions; successive even-weight collapses alternate between
/// `W / 2 + 1` and `W / 2` so repeated collapses do not drift to one side.
///
/// Each quantile state owns its own jitter; it is never shared between
/// independent summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OffsetJitter {
    round_up: bool,
}

impl OffsetJitter {
    /// Create a jitter whose first even-weight offset rounds up
    pub fn new() -> Self {
        Self::default()
    }

    /// Sampling offset for a collapse of total weight `weight`
    pub fn offset(&mut self, weight: u64) -> u64 {
        if weight % 2 == 1 {
            (weight + 1) / 2
        } else {
            self.round_up = !self.round_up;
            if self.round_up {
                weight / 2 + 1
            } else {
                weight / 2
            }
        }
    }
}

/// Merge `buffers` into a single buffer of `buffer_size` elements
///
/// The result sits one level above the highest input level and carries the
/// sum of the input weights.
pub fn collapse<T, O>(
    buffers: Vec<QuantileBuffer<T>>,
    buffer_size: usize,
    jitter: &mut OffsetJitter,
    order: &O,
) -> QuantileBuffer<T>
where
    T: Clone,
    O: ElementOrder<T>,
{
    let new_level = buffers.iter().map(|b| b.level() + 1).max().unwrap_or(0);
    let new_weight: u64 = buffers.iter().map(QuantileBuffer::weight).sum();
    let offset = jitter.offset(new_weight);

    let refs: Vec<&QuantileBuffer<T>> = buffers.iter().collect();
    let elements = interpolate(
        &refs,
        buffer_size,
        new_weight as f64,
        offset as f64,
        order,
    );
    QuantileBuffer::from_sorted(elements, new_level, new_weight)
}

/// Collapse until at most `max_buffers` buffers remain
///
/// Each round pops the two lowest-level buffers, then keeps popping while
/// the next buffer shares the level of the second one, so every buffer at
/// the tying lowest level is folded together. Returns the number of
/// collapses performed.
pub fn collapse_if_needed<T, O>(
    heap: &mut BufferHeap<T>,
    max_buffers: usize,
    buffer_size: usize,
    jitter: &mut OffsetJitter,
    order: &O,
) -> usize
where
    T: Clone,
    O: ElementOrder<T>,
{
    let mut rounds = 0;
    while heap.len() > max_buffers {
        let (Some(first), Some(second)) = (heap.pop(), heap.pop()) else {
            break;
        };
        let min_level = second.level();
        let mut to_collapse = vec![first, second];
        while heap.peek_level() == Some(min_level) {
            match heap.pop() {
                Some(buffer) => to_collapse.push(buffer),
                None => break,
            }
        }

        let gathered = to_collapse.len();
        let merged = collapse(to_collapse, buffer_size, jitter, order);
        debug!(
            gathered,
            min_level,
            new_level = merged.level(),
            new_weight = merged.weight(),
            "Collapsed buffers"
        );
        heap.push(merged);
        rounds += 1;
    }
    rounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use mrl_core::NaturalOrder;

    #[test]
    fn test_offset_odd_is_exact_middle() {
        let mut jitter = OffsetJitter::new();
        assert_eq!(jitter.offset(1), 1);
        assert_eq!(jitter.offset(3), 2);
        assert_eq!(jitter.offset(7), 4);
        // odd weights leave the alternation untouched
        assert_eq!(jitter, OffsetJitter::new());
    }

    #[test]
    fn test_offset_even_alternates() {
        let mut jitter = OffsetJitter::new();
        assert_eq!(jitter.offset(4), 3);
        assert_eq!(jitter.offset(4), 2);
        assert_eq!(jitter.offset(5), 3);
        assert_eq!(jitter.offset(2), 2);
        assert_eq!(jitter.offset(2), 1);
    }

    #[test]
    fn test_jitters_are_independent() {
        let mut a = OffsetJitter::new();
        let mut b = OffsetJitter::new();
        assert_eq!(a.offset(2), 2);
        assert_eq!(a.offset(2), 1);
        assert_eq!(b.offset(2), 2);
    }

    #[test]
    fn test_collapse_two_level0_buffers() {
        let a = QuantileBuffer::from_batch(vec![1, 3, 5, 7], &NaturalOrder);
        let b = QuantileBuffer::from_batch(vec![2, 4, 6, 8], &NaturalOrder);
        let mut jitter = OffsetJitter::new();

        // weight 2 is even: first offset rounds up to 2
        let merged = collapse(vec![a, b], 4, &mut jitter, &NaturalOrder);
        assert_eq!(merged.level(), 1);
        assert_eq!(merged.weight(), 2);
        assert_eq!(merged.elements(), &[3, 5, 7, 8]);

        // the next even-weight collapse rounds down to 1
        let c = QuantileBuffer::from_batch(vec![1, 3, 5, 7], &NaturalOrder);
        let d = QuantileBuffer::from_batch(vec![2, 4, 6, 8], &NaturalOrder);
        let merged = collapse(vec![c, d], 4, &mut jitter, &NaturalOrder);
        assert_eq!(merged.elements(), &[2, 4, 6, 8]);
    }

    #[test]
    fn test_collapse_level_and_weight() {
        let a = QuantileBuffer::from_sorted(vec![1, 2], 2, 4);
        let b = QuantileBuffer::from_sorted(vec![3, 4], 0, 1);
        let mut jitter = OffsetJitter::new();
        let merged = collapse(vec![a, b], 2, &mut jitter, &NaturalOrder);
        assert_eq!(merged.level(), 3);
        assert_eq!(merged.weight(), 5);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_collapse_if_needed_gathers_tying_level() {
        let mut heap = BufferHeap::new();
        for start in 0..4 {
            let elements: Vec<i32> = (0..3).map(|i| start * 3 + i).collect();
            heap.push(QuantileBuffer::from_batch(elements, &NaturalOrder));
        }
        let mut jitter = OffsetJitter::new();

        let rounds = collapse_if_needed(&mut heap, 3, 3, &mut jitter, &NaturalOrder);
        assert_eq!(rounds, 1);
        // all four level-0 buffers share the lowest level and fold together
        assert_eq!(heap.len(), 1);
        let merged = heap.pop().unwrap();
        assert_eq!(merged.level(), 1);
        assert_eq!(merged.weight(), 4);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_collapse_if_needed_within_bound_is_noop() {
        let mut heap = BufferHeap::new();
        heap.push(QuantileBuffer::from_batch(vec![1, 2], &NaturalOrder));
        heap.push(QuantileBuffer::from_batch(vec![3, 4], &NaturalOrder));
        let mut jitter = OffsetJitter::new();
        assert_eq!(
            collapse_if_needed(&mut heap, 2, 2, &mut jitter, &NaturalOrder),
            0
        );
        assert_eq!(heap.levels(), vec![0, 0]);
    }
}
