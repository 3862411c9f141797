//! Level-ordered buffer collection
//!
//! Buffers are kept in a min-heap keyed by `(level, sequence)`. The sequence
//! number is assigned on insertion, so buffers of equal level pop oldest
//! first and collapse order is reproducible for identical inputs.

use crate::buffer::QuantileBuffer;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone)]
struct HeapEntry<T> {
    level: u32,
    seq: u64,
    buffer: QuantileBuffer<T>,
}

impl<T> HeapEntry<T> {
    fn key(&self) -> (u32, u64) {
        (self.level, self.seq)
    }
}

impl<T> PartialEq for HeapEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T> Eq for HeapEntry<T> {}

impl<T> PartialOrd for HeapEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for HeapEntry<T> {
    // BinaryHeap is a max-heap; invert so the lowest key sits on top.
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

/// Min-heap of buffers by level with insertion-order tie break
#[derive(Debug, Clone)]
pub struct BufferHeap<T> {
    heap: BinaryHeap<HeapEntry<T>>,
    next_seq: u64,
}

impl<T> Default for BufferHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BufferHeap<T> {
    /// Create an empty heap
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Insert a buffer
    pub fn push(&mut self, buffer: QuantileBuffer<T>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(HeapEntry {
            level: buffer.level(),
            seq,
            buffer,
        });
    }

    /// Remove the buffer with the lowest level (oldest first on ties)
    pub fn pop(&mut self) -> Option<QuantileBuffer<T>> {
        self.heap.pop().map(|entry| entry.buffer)
    }

    /// Level of the buffer `pop` would return next
    pub fn peek_level(&self) -> Option<u32> {
        self.heap.peek().map(|entry| entry.level)
    }

    /// Number of buffers held
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether no buffers are held
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Iterate buffers in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = &QuantileBuffer<T>> + '_ {
        self.heap.iter().map(|entry| &entry.buffer)
    }

    /// Consume the heap, yielding buffers in pop order
    pub fn into_sorted_vec(self) -> Vec<QuantileBuffer<T>> {
        let mut entries = self.heap.into_vec();
        entries.sort_by_key(|entry| entry.key());
        entries.into_iter().map(|entry| entry.buffer).collect()
    }

    /// Borrow all buffers in pop order
    pub fn sorted_refs(&self) -> Vec<&QuantileBuffer<T>> {
        let mut entries: Vec<&HeapEntry<T>> = self.heap.iter().collect();
        entries.sort_by_key(|entry| entry.key());
        entries.into_iter().map(|entry| &entry.buffer).collect()
    }

    /// Levels of all buffers in pop order
    pub fn levels(&self) -> Vec<u32> {
        let mut keys: Vec<_> = self.heap.iter().map(HeapEntry::key).collect();
        keys.sort_unstable();
        keys.into_iter().map(|(level, _)| level).collect()
    }
}

impl<T> Extend<QuantileBuffer<T>> for BufferHeap<T> {
    fn extend<I: IntoIterator<Item = QuantileBuffer<T>>>(&mut self, iter: I) {
        for buffer in iter {
            self.push(buffer);
        }
    }
}
