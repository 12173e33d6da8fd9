//! Pileup flattening: collapsing overlapping scored windows into a
//! non-overlapping representation.
//!
//! Two strategies share one contract:
//! - [`BoundaryFlattener`]: output boundaries at the exact endpoints of
//!   the overlapping inputs (no data loss, variable-width output)
//! - [`BinFlattener`]: output boundaries at multiples of a fixed bin
//!   size (fixed-width output, inputs attributed proportionally)
//!
//! Both consume a start-sorted stream of windows for a single
//! chromosome and emit finalized output incrementally: `add_window`
//! returns everything that can no longer change, `flush` returns the
//! rest. [`GenomeWideFlattener`] fans a whole genome out to one
//! flattener instance per chromosome.

pub mod bin;
pub mod boundary;
pub mod genome;
pub mod pending;

pub use bin::BinFlattener;
pub use boundary::BoundaryFlattener;
pub use genome::{flatten_tracks, FlattenStats, GenomeWideFlattener};
pub use pending::PendingQueue;

use crate::error::{PileupError, Result};
use crate::interval::ScoredInterval;
use crate::score::ScoreOperation;

/// Shared contract of the flattening strategies.
///
/// Windows must arrive in non-decreasing start order (ties on start are
/// allowed, stops are unordered). A flattener is owned and driven by a
/// single thread; it is not meant to be shared.
pub trait PileupFlattener {
    /// Accept the next window and return all output that is now final,
    /// i.e. every flattened window ending at or before the new start.
    ///
    /// A window violating start order is rejected with
    /// [`PileupError::UnsortedInput`] and leaves the flattener state
    /// untouched.
    fn add_window(&mut self, window: ScoredInterval) -> Result<Vec<ScoredInterval>>;

    /// Finalize and return all remaining buffered output, then clear
    /// internal state. Called once after the last `add_window`; calling
    /// again returns an empty result.
    fn flush(&mut self) -> Result<Vec<ScoredInterval>>;
}

/// Strategy selection for flattening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlattenStrategy {
    /// Boundaries at the exact endpoints of the overlapping inputs.
    Boundary,
    /// Fixed-width bins aligned to multiples of `bin_size`.
    Bin { bin_size: i64 },
}

/// Immutable flattening configuration.
///
/// One config value builds any number of independent flattener
/// instances, one per chromosome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlattenConfig {
    pub operation: ScoreOperation,
    pub strategy: FlattenStrategy,
}

impl FlattenConfig {
    /// Configuration for exact-boundary flattening.
    pub fn boundary(operation: ScoreOperation) -> Self {
        Self {
            operation,
            strategy: FlattenStrategy::Boundary,
        }
    }

    /// Configuration for fixed-grid flattening. The bin size is
    /// validated when an instance is built.
    pub fn binned(operation: ScoreOperation, bin_size: i64) -> Self {
        Self {
            operation,
            strategy: FlattenStrategy::Bin { bin_size },
        }
    }

    /// Build a fresh flattener instance from this configuration.
    pub fn build(&self) -> Result<Flattener> {
        match self.strategy {
            FlattenStrategy::Boundary => {
                Ok(Flattener::Boundary(BoundaryFlattener::new(self.operation)))
            }
            FlattenStrategy::Bin { bin_size } => {
                Ok(Flattener::Bin(BinFlattener::new(self.operation, bin_size)?))
            }
        }
    }
}

/// A flattener built from a [`FlattenConfig`].
#[derive(Debug)]
pub enum Flattener {
    Boundary(BoundaryFlattener),
    Bin(BinFlattener),
}

impl PileupFlattener for Flattener {
    fn add_window(&mut self, window: ScoredInterval) -> Result<Vec<ScoredInterval>> {
        match self {
            Flattener::Boundary(f) => f.add_window(window),
            Flattener::Bin(f) => f.add_window(window),
        }
    }

    fn flush(&mut self) -> Result<Vec<ScoredInterval>> {
        match self {
            Flattener::Boundary(f) => f.flush(),
            Flattener::Bin(f) => f.flush(),
        }
    }
}

/// Inline monotonicity check for window starts.
///
/// Validates start order as windows are accepted; a failed check leaves
/// the guard (and therefore the flattener) unchanged.
#[derive(Debug, Default, Clone)]
pub struct SortGuard {
    prev_start: Option<i64>,
}

impl SortGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate that `start` maintains non-decreasing order.
    #[inline]
    pub fn check(&mut self, start: i64) -> Result<()> {
        if let Some(prev_start) = self.prev_start {
            if start < prev_start {
                return Err(PileupError::UnsortedInput { prev_start, start });
            }
        }
        self.prev_start = Some(start);
        Ok(())
    }
}
