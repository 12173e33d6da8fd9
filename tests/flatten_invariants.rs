//! Property checks for the flattening strategies on synthetic tracks.
//!
//! Covers the structural guarantees callers rely on: non-overlapping
//! output, exact coverage preservation for boundary flattening, score
//! mass preservation for binned sum flattening, insensitivity to tie
//! order among equal starts, and flush idempotence.

use plateau_genomics::generate::{generate_tracks, GenerateConfig};
use plateau_genomics::pileup::flatten_tracks;
use plateau_genomics::{FlattenConfig, PileupFlattener, ScoreOperation, ScoredInterval};

fn dense_config(seed: u64) -> GenerateConfig {
    // Small span + many windows = heavy overlap.
    GenerateConfig {
        chromosome_count: 4,
        chromosome_size: 20_000,
        windows_per_chromosome: 800,
        min_length: 10,
        max_length: 400,
        zero_fraction: 0.1,
        seed,
        ..GenerateConfig::default()
    }
}

/// Snap scores to integers so that summation order cannot introduce
/// floating-point differences.
fn integer_scores(tracks: &mut [Vec<ScoredInterval>]) {
    for track in tracks {
        for window in track {
            window.score = window.score.round();
        }
    }
}

/// Merge a start-sorted window list into its union of covered ranges.
fn covered_union(windows: &[ScoredInterval]) -> Vec<(i64, i64)> {
    let mut union: Vec<(i64, i64)> = Vec::new();
    for window in windows {
        match union.last_mut() {
            Some((_, stop)) if window.start <= *stop => *stop = (*stop).max(window.stop),
            _ => union.push((window.start, window.stop)),
        }
    }
    union
}

#[test]
fn test_flattened_output_is_sorted_and_non_overlapping() {
    let tracks = generate_tracks(&dense_config(7));

    for op in [
        ScoreOperation::Sum,
        ScoreOperation::Average,
        ScoreOperation::Min,
        ScoreOperation::Max,
    ] {
        for config in [
            FlattenConfig::boundary(op),
            FlattenConfig::binned(op, 128),
        ] {
            let flat = flatten_tracks(config, tracks.clone()).unwrap();
            for chromosome in &flat {
                for window in chromosome {
                    assert!(window.start < window.stop);
                }
                for pair in chromosome.windows(2) {
                    assert!(
                        pair[0].stop <= pair[1].start,
                        "overlapping output: {} then {}",
                        pair[0],
                        pair[1]
                    );
                }
            }
        }
    }
}

#[test]
fn test_boundary_flattening_preserves_coverage() {
    let tracks = generate_tracks(&dense_config(11));
    let flat = flatten_tracks(FlattenConfig::boundary(ScoreOperation::Sum), tracks.clone())
        .unwrap();

    for (raw, flattened) in tracks.iter().zip(&flat) {
        assert_eq!(covered_union(raw), covered_union(flattened));
    }
}

#[test]
fn test_binned_sum_preserves_score_mass() {
    let mut tracks = generate_tracks(&dense_config(13));
    integer_scores(&mut tracks);
    let raw_mass: f64 = tracks.iter().flatten().map(|w| w.score).sum();

    for bin_size in [1, 7, 64, 1000] {
        let flat = flatten_tracks(
            FlattenConfig::binned(ScoreOperation::Sum, bin_size),
            tracks.clone(),
        )
        .unwrap();
        let flat_mass: f64 = flat.iter().flatten().map(|w| w.score).sum();
        assert!(
            (flat_mass - raw_mass).abs() < 1e-6 * raw_mass.abs().max(1.0),
            "bin size {}: mass {} != {}",
            bin_size,
            flat_mass,
            raw_mass
        );
    }
}

#[test]
fn test_isolated_window_splits_to_its_own_score() {
    for (start, stop, score) in [(3, 40, 12.0), (0, 5, 1.5), (99, 300, -7.0)] {
        for bin_size in [1, 7, 10, 256] {
            let flat = flatten_tracks(
                FlattenConfig::binned(ScoreOperation::Sum, bin_size),
                vec![vec![ScoredInterval::new(start, stop, score)]],
            )
            .unwrap();
            let total: f64 = flat[0].iter().map(|w| w.score).sum();
            assert!(
                (total - score).abs() < 1e-9,
                "bin size {bin_size}: split of ({start},{stop},{score}) sums to {total}"
            );
        }
    }
}

/// Coordinates must match exactly; scores up to summation-order noise.
fn assert_equivalent(a: &[Vec<ScoredInterval>], b: &[Vec<ScoredInterval>]) {
    assert_eq!(a.len(), b.len());
    for (ca, cb) in a.iter().zip(b) {
        assert_eq!(ca.len(), cb.len());
        for (wa, wb) in ca.iter().zip(cb) {
            assert_eq!((wa.start, wa.stop), (wb.start, wb.stop));
            assert!(
                (wa.score - wb.score).abs() <= 1e-9 * wa.score.abs().max(1.0),
                "score mismatch at [{}, {}): {} vs {}",
                wa.start,
                wa.stop,
                wa.score,
                wb.score
            );
        }
    }
}

#[test]
fn test_tie_order_does_not_change_output() {
    let mut tracks = generate_tracks(&dense_config(17));
    integer_scores(&mut tracks);
    // Snap starts to a coarse grid to force runs of equal starts.
    for track in &mut tracks {
        for window in track.iter_mut() {
            window.start = (window.start / 500) * 500;
        }
    }

    // A second valid ordering: each run of equal starts reversed.
    let mut reordered = tracks.clone();
    for track in &mut reordered {
        let mut lo = 0;
        while lo < track.len() {
            let mut hi = lo + 1;
            while hi < track.len() && track[hi].start == track[lo].start {
                hi += 1;
            }
            track[lo..hi].reverse();
            lo = hi;
        }
    }

    for config in [
        FlattenConfig::boundary(ScoreOperation::Sum),
        FlattenConfig::boundary(ScoreOperation::Max),
        FlattenConfig::binned(ScoreOperation::Sum, 100),
    ] {
        let a = flatten_tracks(config, tracks.clone()).unwrap();
        let b = flatten_tracks(config, reordered.clone()).unwrap();
        assert_equivalent(&a, &b);
    }
}

#[test]
fn test_flush_is_idempotent_for_both_strategies() {
    for config in [
        FlattenConfig::boundary(ScoreOperation::Sum),
        FlattenConfig::binned(ScoreOperation::Sum, 50),
    ] {
        let mut flattener = config.build().unwrap();
        flattener
            .add_window(ScoredInterval::new(10, 120, 2.0))
            .unwrap();
        flattener
            .add_window(ScoredInterval::new(60, 200, 3.0))
            .unwrap();

        assert!(!flattener.flush().unwrap().is_empty());
        assert!(flattener.flush().unwrap().is_empty());
        assert!(flattener.flush().unwrap().is_empty());
    }
}

#[test]
fn test_unsorted_window_fails_without_corrupting_state() {
    let mut flattener = FlattenConfig::boundary(ScoreOperation::Sum).build().unwrap();
    flattener
        .add_window(ScoredInterval::new(5, 10, 1.0))
        .unwrap();
    assert!(flattener.add_window(ScoredInterval::new(3, 8, 1.0)).is_err());

    assert_eq!(
        flattener.flush().unwrap(),
        vec![ScoredInterval::new(5, 10, 1.0)]
    );
}
