//! Genome-wide fan-out: one flattener instance per chromosome.

use crate::error::{PileupError, Result};
use crate::interval::ScoredInterval;
use crate::pileup::{FlattenConfig, Flattener, PileupFlattener};
use rayon::prelude::*;
use std::fmt;

/// Routes scored windows to per-chromosome flatteners.
///
/// All instances are built from one immutable configuration. Each
/// per-call return value is the finalized output of that chromosome;
/// accumulating it genome-wide is the caller's responsibility, via
/// repeated `add_window` calls and a final `flush_all`.
#[derive(Debug)]
pub struct GenomeWideFlattener {
    flatteners: Vec<Flattener>,
    stats: FlattenStats,
}

impl GenomeWideFlattener {
    /// Build one independent flattener per chromosome.
    pub fn new(config: FlattenConfig, chromosome_count: usize) -> Result<Self> {
        let flatteners = (0..chromosome_count)
            .map(|_| config.build())
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            flatteners,
            stats: FlattenStats::default(),
        })
    }

    pub fn chromosome_count(&self) -> usize {
        self.flatteners.len()
    }

    /// Route a window to its chromosome's flattener and return the
    /// output that is now final for that chromosome.
    pub fn add_window(
        &mut self,
        chromosome: usize,
        window: ScoredInterval,
    ) -> Result<Vec<ScoredInterval>> {
        let count = self.flatteners.len();
        let flattener = self
            .flatteners
            .get_mut(chromosome)
            .ok_or(PileupError::ChromosomeOutOfRange {
                index: chromosome,
                count,
            })?;

        let out = flattener.add_window(window)?;
        self.stats.windows_routed += 1;
        self.stats.intervals_emitted += out.len();
        Ok(out)
    }

    /// Flush every chromosome and return one output list per
    /// chromosome, index-aligned with the chromosome registry.
    pub fn flush_all(&mut self) -> Result<Vec<Vec<ScoredInterval>>> {
        let mut lists = Vec::with_capacity(self.flatteners.len());
        for flattener in &mut self.flatteners {
            let out = flattener.flush()?;
            self.stats.intervals_emitted += out.len();
            lists.push(out);
        }
        Ok(lists)
    }

    /// Routing statistics for this flattener.
    pub fn stats(&self) -> &FlattenStats {
        &self.stats
    }
}

/// Statistics from genome-wide flattening.
#[derive(Debug, Default, Clone)]
pub struct FlattenStats {
    /// Number of windows routed to a chromosome.
    pub windows_routed: usize,
    /// Number of flattened windows emitted.
    pub intervals_emitted: usize,
}

impl fmt::Display for FlattenStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Routed: {}, Emitted: {}",
            self.windows_routed, self.intervals_emitted
        )
    }
}

/// Flatten per-chromosome window lists in parallel, one task per
/// chromosome on the shared worker pool.
///
/// Each task owns its flattener for the whole run; the call blocks
/// until every chromosome completes. The first failing chromosome
/// fails the batch and all partial results are discarded.
pub fn flatten_tracks(
    config: FlattenConfig,
    tracks: Vec<Vec<ScoredInterval>>,
) -> Result<Vec<Vec<ScoredInterval>>> {
    tracks
        .into_par_iter()
        .map(|track| {
            let mut flattener = config.build()?;
            let mut flat = Vec::with_capacity(track.len());
            for window in track {
                flat.extend(flattener.add_window(window)?);
            }
            flat.extend(flattener.flush()?);
            Ok(flat)
        })
        .collect()
}
