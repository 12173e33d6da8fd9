//! Exact-boundary flattening.
//!
//! Output boundaries are the endpoints of the overlapping inputs
//! themselves, so no signal is attributed outside its original range.
//!
//! # Algorithm
//!
//! Queued windows stay pending until the input frontier passes them.
//! When a new window arrives at start `P`, every distinct queued
//! endpoint below `P` becomes a segment boundary; each segment combines
//! the raw scores of the windows overlapping it and is emitted. The
//! frontier then advances to `P` and windows stopping at or before it
//! are evicted.
//!
//! # Memory Complexity
//!
//! O(k) where k = max number of windows overlapping any position.

use crate::error::Result;
use crate::interval::ScoredInterval;
use crate::pileup::pending::PendingQueue;
use crate::pileup::{PileupFlattener, SortGuard};
use crate::score::ScoreOperation;

/// Flattener emitting variable-width output at exact input endpoints.
#[derive(Debug)]
pub struct BoundaryFlattener {
    operation: ScoreOperation,
    queue: PendingQueue,
    guard: SortGuard,
    /// Everything strictly below this coordinate has been emitted.
    frontier: Option<i64>,
}

impl BoundaryFlattener {
    pub fn new(operation: ScoreOperation) -> Self {
        Self {
            operation,
            queue: PendingQueue::new(),
            guard: SortGuard::new(),
            frontier: None,
        }
    }

    pub fn operation(&self) -> ScoreOperation {
        self.operation
    }

    /// Emit every segment that ends at or before `limit` (`None` means
    /// the end of the chromosome).
    fn flatten_to(&mut self, limit: Option<i64>) -> Result<Vec<ScoredInterval>> {
        let first_start = match self.queue.front() {
            Some(front) => front.start,
            None => return Ok(Vec::new()),
        };
        let floor = self.frontier.unwrap_or(first_start);

        // Boundary points: every queued endpoint strictly inside
        // (floor, limit), bracketed by floor and the limit itself.
        // Dedup is mandatory - duplicate values would emit zero-width
        // segments.
        let mut bounds: Vec<i64> = Vec::with_capacity(self.queue.len() * 2 + 2);
        bounds.push(floor);
        for window in self.queue.iter() {
            for coord in [window.start, window.stop] {
                if coord > floor && limit.map_or(true, |p| coord < p) {
                    bounds.push(coord);
                }
            }
        }
        if let Some(p) = limit {
            if p > floor {
                bounds.push(p);
            }
        }
        bounds.sort_unstable();
        bounds.dedup();

        let mut out = Vec::new();
        let mut scores: Vec<f64> = Vec::new();
        for pair in bounds.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            scores.clear();
            scores.extend(
                self.queue
                    .iter()
                    .filter(|w| w.start < hi && w.stop > lo)
                    .map(|w| w.score),
            );
            // Boundaries always come from real window edges, so a
            // contributor-free segment is a gap between inputs.
            if scores.is_empty() {
                continue;
            }
            out.push(ScoredInterval::new(lo, hi, self.operation.combine(&scores)?));
        }

        let new_frontier = match limit {
            Some(p) => p,
            None => bounds.last().copied().unwrap_or(floor),
        };
        self.frontier = Some(new_frontier);
        self.queue.evict_expired(new_frontier);
        Ok(out)
    }
}

impl PileupFlattener for BoundaryFlattener {
    fn add_window(&mut self, window: ScoredInterval) -> Result<Vec<ScoredInterval>> {
        self.guard.check(window.start)?;
        let out = self.flatten_to(Some(window.start))?;
        self.queue.push(window);
        Ok(out)
    }

    fn flush(&mut self) -> Result<Vec<ScoredInterval>> {
        let out = self.flatten_to(None)?;
        self.queue.clear();
        Ok(out)
    }
}
