//! Genome-wide descriptive statistics over per-chromosome window lists.
//!
//! Two-phase parallel reduction on the shared worker pool, one task per
//! chromosome per phase:
//!
//! 1. Scan each chromosome once for min/max/sum/non-null length, each
//!    task filling its own slot; merge the slots sequentially.
//! 2. With the genome-wide average known, scan again for the weighted
//!    squared deviations; merge and take the square root.
//!
//! The variance pass cannot be fused into the first scan: the exact
//! genome-wide average must be known before deviations are computed.
//! Windows with a score of exactly zero carry no information and are
//! excluded from every accumulator.

use crate::interval::ScoredInterval;
use rayon::prelude::*;
use std::fmt;

/// Genome-wide descriptive statistics, weighted by window length.
///
/// When no informative (non-zero-score) position exists, `min` and
/// `max` stay at their `+inf`/`-inf` sentinels and must be treated as
/// undefined; `average` and `std_dev` are zero, not NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenomeWideStatistics {
    pub min: f64,
    pub max: f64,
    /// Sum of `score * length` over informative windows.
    pub sum: f64,
    /// Total length of positions with a non-zero score.
    pub non_null_length: i64,
    pub average: f64,
    pub std_dev: f64,
}

impl GenomeWideStatistics {
    /// True when the genome holds no informative positions; `min` and
    /// `max` are meaningless in that case.
    pub fn is_empty(&self) -> bool {
        self.non_null_length == 0
    }
}

impl fmt::Display for GenomeWideStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "no informative positions");
        }
        write!(
            f,
            "min: {}, max: {}, sum: {}, length: {}, average: {}, std dev: {}",
            self.min, self.max, self.sum, self.non_null_length, self.average, self.std_dev
        )
    }
}

/// Per-chromosome accumulator for phase 1. Each parallel task owns
/// exactly one slot; merging is sequential.
#[derive(Debug, Clone, Copy)]
struct ChromosomePartial {
    min: f64,
    max: f64,
    sum: f64,
    non_null_length: i64,
}

impl ChromosomePartial {
    fn identity() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            sum: 0.0,
            non_null_length: 0,
        }
    }

    fn merge(&mut self, other: &ChromosomePartial) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.non_null_length += other.non_null_length;
    }
}

fn scan_chromosome(windows: &[ScoredInterval]) -> ChromosomePartial {
    let mut partial = ChromosomePartial::identity();
    for window in windows {
        if window.score == 0.0 {
            continue;
        }
        let len = window.len() as f64;
        partial.min = partial.min.min(window.score);
        partial.max = partial.max.max(window.score);
        partial.sum += window.score * len;
        partial.non_null_length += window.len();
    }
    partial
}

fn squared_deviation(windows: &[ScoredInterval], average: f64) -> f64 {
    windows
        .iter()
        .filter(|w| w.score != 0.0)
        .map(|w| (w.score - average) * (w.score - average) * w.len() as f64)
        .sum()
}

/// Compute genome-wide statistics over per-chromosome window lists.
///
/// Runs the two-phase reduction described in the module docs; the call
/// blocks until every chromosome task of a phase completes before the
/// sequential merge of that phase.
pub fn genome_wide_statistics(tracks: &[Vec<ScoredInterval>]) -> GenomeWideStatistics {
    // Phase 1: independent per-chromosome scans.
    let partials: Vec<ChromosomePartial> = tracks
        .par_iter()
        .map(|track| scan_chromosome(track))
        .collect();

    let mut merged = ChromosomePartial::identity();
    for partial in &partials {
        merged.merge(partial);
    }

    if merged.non_null_length == 0 {
        return GenomeWideStatistics {
            min: merged.min,
            max: merged.max,
            sum: merged.sum,
            non_null_length: 0,
            average: 0.0,
            std_dev: 0.0,
        };
    }

    let average = merged.sum / merged.non_null_length as f64;

    // Phase 2: deviations need the genome-wide average from phase 1.
    let deviations: Vec<f64> = tracks
        .par_iter()
        .map(|track| squared_deviation(track, average))
        .collect();
    let variance = deviations.iter().sum::<f64>() / merged.non_null_length as f64;

    GenomeWideStatistics {
        min: merged.min,
        max: merged.max,
        sum: merged.sum,
        non_null_length: merged.non_null_length,
        average,
        std_dev: variance.sqrt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(start: i64, stop: i64, score: f64) -> ScoredInterval {
        ScoredInterval::new(start, stop, score)
    }

    #[test]
    fn test_single_chromosome() {
        let tracks = vec![vec![w(0, 10, 5.0), w(10, 20, 0.0), w(20, 30, 15.0)]];
        let stats = genome_wide_statistics(&tracks);

        assert_eq!(stats.min, 5.0);
        assert_eq!(stats.max, 15.0);
        assert_eq!(stats.sum, 200.0);
        assert_eq!(stats.non_null_length, 20);
        assert_eq!(stats.average, 10.0);
        assert_eq!(stats.std_dev, 5.0);
        assert!(!stats.is_empty());
    }

    #[test]
    fn test_zero_scores_are_uninformative() {
        let tracks = vec![vec![w(0, 1000, 0.0)], vec![]];
        let stats = genome_wide_statistics(&tracks);

        assert!(stats.is_empty());
        assert_eq!(stats.min, f64::INFINITY);
        assert_eq!(stats.max, f64::NEG_INFINITY);
        assert_eq!(stats.sum, 0.0);
        assert_eq!(stats.average, 0.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_no_chromosomes() {
        let stats = genome_wide_statistics(&[]);
        assert!(stats.is_empty());
    }

    #[test]
    fn test_multi_chromosome_merge() {
        let tracks = vec![
            vec![w(0, 10, 2.0)],
            vec![w(0, 10, 4.0)],
            vec![w(0, 20, 6.0)],
        ];
        let stats = genome_wide_statistics(&tracks);

        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 6.0);
        assert_eq!(stats.sum, 2.0 * 10.0 + 4.0 * 10.0 + 6.0 * 20.0);
        assert_eq!(stats.non_null_length, 40);
        assert_eq!(stats.average, 180.0 / 40.0);
    }

    #[test]
    fn test_uniform_scores_have_zero_deviation() {
        let tracks = vec![vec![w(0, 10, 3.0)], vec![w(50, 90, 3.0)]];
        let stats = genome_wide_statistics(&tracks);

        assert_eq!(stats.average, 3.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_negative_scores() {
        let tracks = vec![vec![w(0, 10, -4.0), w(10, 20, 4.0)]];
        let stats = genome_wide_statistics(&tracks);

        assert_eq!(stats.min, -4.0);
        assert_eq!(stats.max, 4.0);
        assert_eq!(stats.sum, 0.0);
        assert_eq!(stats.non_null_length, 20);
        assert_eq!(stats.average, 0.0);
        assert_eq!(stats.std_dev, 4.0);
    }

    #[test]
    fn test_display() {
        let stats = genome_wide_statistics(&[]);
        assert_eq!(stats.to_string(), "no informative positions");
    }
}
