//! Finalized genome-wide track with cached statistics.

use crate::error::Result;
use crate::interval::ScoredInterval;
use crate::pileup::{flatten_tracks, FlattenConfig};
use crate::stats::{genome_wide_statistics, GenomeWideStatistics};
use std::sync::OnceLock;

/// Immutable owner of finalized per-chromosome window lists.
///
/// Statistics are computed at most once, on first request, and live as
/// long as the track; rebuilding the track is the only invalidation.
#[derive(Debug, Default)]
pub struct GenomeTrack {
    chromosomes: Vec<Vec<ScoredInterval>>,
    statistics: OnceLock<GenomeWideStatistics>,
}

impl GenomeTrack {
    /// Wrap finalized per-chromosome lists, index-aligned with the
    /// chromosome registry.
    pub fn from_lists(chromosomes: Vec<Vec<ScoredInterval>>) -> Self {
        Self {
            chromosomes,
            statistics: OnceLock::new(),
        }
    }

    /// Flatten raw per-chromosome window lists into a finalized track.
    pub fn flatten(config: FlattenConfig, tracks: Vec<Vec<ScoredInterval>>) -> Result<Self> {
        Ok(Self::from_lists(flatten_tracks(config, tracks)?))
    }

    pub fn chromosome_count(&self) -> usize {
        self.chromosomes.len()
    }

    /// Windows of one chromosome, or `None` for an out-of-range index.
    pub fn chromosome(&self, index: usize) -> Option<&[ScoredInterval]> {
        self.chromosomes.get(index).map(|c| c.as_slice())
    }

    /// Iterate per-chromosome window lists in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &[ScoredInterval]> {
        self.chromosomes.iter().map(|c| c.as_slice())
    }

    /// Total number of windows across all chromosomes.
    pub fn interval_count(&self) -> usize {
        self.chromosomes.iter().map(|c| c.len()).sum()
    }

    /// Genome-wide statistics, computed on first call and cached.
    pub fn statistics(&self) -> &GenomeWideStatistics {
        self.statistics
            .get_or_init(|| genome_wide_statistics(&self.chromosomes))
    }
}
