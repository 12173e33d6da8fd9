//! Pending queue for windows still relevant to future output.
//!
//! Uses Vec + head_idx pattern for better cache locality than VecDeque.
//! Elements before head_idx are logically removed but not deallocated
//! until compaction is triggered.
//!
//! # Memory Complexity
//!
//! O(k) where k = max number of unresolved windows at any position.

use crate::interval::ScoredInterval;

/// Compaction threshold - trigger when head_idx exceeds this value.
const COMPACTION_THRESHOLD: usize = 4096;

/// Ordered-by-start working set of windows awaiting flattening.
///
/// Windows are pushed in non-decreasing start order and owned by the
/// queue until evicted, at which point they are dropped.
#[derive(Debug, Default)]
pub struct PendingQueue {
    /// Storage for queued windows.
    data: Vec<ScoredInterval>,
    /// Index of the first logically queued window.
    head_idx: usize,
    /// Maximum observed queue size (for statistics).
    max_pending: usize,
}

impl PendingQueue {
    /// Create a new empty queue.
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Create a new queue with specified initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            head_idx: 0,
            max_pending: 0,
        }
    }

    /// Append a window to the queue.
    #[inline]
    pub fn push(&mut self, window: ScoredInterval) {
        self.data.push(window);
        let current = self.len();
        if current > self.max_pending {
            self.max_pending = current;
        }
    }

    /// Number of logically queued windows.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len() - self.head_idx
    }

    /// Check if the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head_idx >= self.data.len()
    }

    /// Reference to the earliest-start queued window.
    #[inline]
    pub fn front(&self) -> Option<&ScoredInterval> {
        self.data.get(self.head_idx)
    }

    /// Iterator over queued windows in start order.
    pub fn iter(&self) -> impl Iterator<Item = &ScoredInterval> {
        self.data[self.head_idx..].iter()
    }

    /// Slice of all queued windows.
    #[inline]
    pub fn as_slice(&self) -> &[ScoredInterval] {
        &self.data[self.head_idx..]
    }

    /// Largest stop coordinate among queued windows.
    pub fn max_stop(&self) -> Option<i64> {
        self.iter().map(|w| w.stop).max()
    }

    /// Drop every queued window whose stop is at or before `boundary`.
    ///
    /// Such windows cannot contribute to any output at or past the
    /// boundary. Returns the number of windows removed. The common case
    /// is a prefix removal (starts are sorted), but stops are not, so a
    /// short window can expire behind a still-live long one and is
    /// removed from the interior.
    pub fn evict_expired(&mut self, boundary: i64) -> usize {
        let mut removed = self.advance_while(|w| w.stop <= boundary);

        if self.iter().any(|w| w.stop <= boundary) {
            self.compact();
            let before = self.data.len();
            self.data.retain(|w| w.stop > boundary);
            removed += before - self.data.len();
        } else {
            self.compact_if_needed();
        }

        removed
    }

    /// Clear all windows and reset state.
    pub fn clear(&mut self) {
        self.data.clear();
        self.head_idx = 0;
    }

    /// Maximum queue size observed (for statistics).
    pub fn max_pending(&self) -> usize {
        self.max_pending
    }

    /// Advance head while the condition holds for the front window.
    /// Returns the number of windows removed.
    fn advance_while<F>(&mut self, mut condition: F) -> usize
    where
        F: FnMut(&ScoredInterval) -> bool,
    {
        let start_idx = self.head_idx;
        while self.head_idx < self.data.len() && condition(&self.data[self.head_idx]) {
            self.head_idx += 1;
        }
        self.head_idx - start_idx
    }

    /// Reclaim the logically-removed prefix.
    fn compact(&mut self) {
        self.data.drain(0..self.head_idx);
        self.head_idx = 0;
    }

    fn compact_if_needed(&mut self) {
        if self.head_idx > COMPACTION_THRESHOLD && self.head_idx * 2 > self.data.len() {
            self.compact();
        }
    }
}
