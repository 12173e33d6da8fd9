//! Fixed-grid flattening.
//!
//! Output windows are bins `[k*bin_size, (k+1)*bin_size)`. A queued
//! window contributes to each bin it touches the fraction of its own
//! signal located there: `score * overlap / own_length`. Summing a
//! window's contributions across the bins it touches reconstructs its
//! full original score, so this is a read-splitting policy, not a
//! bin-coverage policy.
//!
//! A bin is complete once the input frontier passes its right edge;
//! `add_window` emits all newly completed bins, `flush` emits every bin
//! still touched by queued input.

use crate::error::{PileupError, Result};
use crate::interval::ScoredInterval;
use crate::pileup::pending::PendingQueue;
use crate::pileup::{PileupFlattener, SortGuard};
use crate::score::ScoreOperation;

/// Flattener emitting fixed-width, grid-aligned output.
#[derive(Debug)]
pub struct BinFlattener {
    operation: ScoreOperation,
    bin_size: i64,
    queue: PendingQueue,
    guard: SortGuard,
    /// Start of the first bin not yet emitted.
    next_bin: Option<i64>,
}

impl BinFlattener {
    /// Create a fixed-grid flattener. The bin size must be positive.
    pub fn new(operation: ScoreOperation, bin_size: i64) -> Result<Self> {
        if bin_size < 1 {
            return Err(PileupError::InvalidBinSize(bin_size));
        }
        Ok(Self {
            operation,
            bin_size,
            queue: PendingQueue::new(),
            guard: SortGuard::new(),
            next_bin: None,
        })
    }

    pub fn operation(&self) -> ScoreOperation {
        self.operation
    }

    pub fn bin_size(&self) -> i64 {
        self.bin_size
    }

    /// Emit every bin that completes below `limit` (`None` means the
    /// end of the chromosome).
    fn flatten_to(&mut self, limit: Option<i64>) -> Result<Vec<ScoredInterval>> {
        let first_start = match self.queue.front() {
            Some(front) => front.start,
            None => return Ok(Vec::new()),
        };
        let bin = self.bin_size;
        let max_stop = self.queue.max_stop().unwrap_or(first_start);

        // Bins strictly before the frontier's bin are complete; on
        // flush, every bin touched by queued input completes.
        let end = match limit {
            Some(p) => bin_floor(p, bin),
            None => bin_ceil(max_stop, bin),
        };

        // Bins before the earliest live window have no contributors;
        // jump over them instead of scanning sparse gaps bin by bin.
        let base = bin_floor(first_start, bin);
        let mut cur = self.next_bin.unwrap_or(base).max(base);

        let mut out = Vec::new();
        let mut partials: Vec<f64> = Vec::new();
        while cur < end && cur < max_stop {
            let hi = cur + bin;
            partials.clear();
            for window in self.queue.iter() {
                let overlap = window.range_overlap(cur, hi);
                if overlap > 0 {
                    partials.push(window.score * overlap as f64 / window.len() as f64);
                }
            }
            if !partials.is_empty() {
                out.push(ScoredInterval::new(
                    cur,
                    hi,
                    self.operation.combine(&partials)?,
                ));
            }
            cur = hi;
        }

        self.next_bin = Some(end.max(cur));
        self.queue.evict_expired(end);
        Ok(out)
    }
}

impl PileupFlattener for BinFlattener {
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

#[inline]
fn bin_floor(pos: i64, bin: i64) -> i64 {
    pos.div_euclid(bin) * bin
}

#[inline]
fn bin_ceil(pos: i64, bin: i64) -> i64 {
    let floored = bin_floor(pos, bin);
    if floored == pos {
        floored
    } else {
        floored + bin
    }
}
