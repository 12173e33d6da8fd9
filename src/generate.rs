//! Generate synthetic scored tracks for tests and benchmarks.
//!
//! Deterministic reproducibility via seed: the same configuration
//! always yields the same tracks.

use crate::interval::ScoredInterval;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Configuration for synthetic track generation.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub chromosome_count: usize,
    /// Window starts are drawn from `[0, chromosome_size)`.
    pub chromosome_size: i64,
    pub windows_per_chromosome: usize,
    pub min_length: i64,
    pub max_length: i64,
    pub min_score: f64,
    pub max_score: f64,
    /// Fraction of windows given an exact-zero ("no data") score.
    pub zero_fraction: f64,
    pub seed: u64,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            chromosome_count: 3,
            chromosome_size: 1_000_000,
            windows_per_chromosome: 1_000,
            min_length: 50,
            max_length: 500,
            min_score: 1.0,
            max_score: 100.0,
            zero_fraction: 0.1,
            seed: 42,
        }
    }
}

/// Generate one start-sorted window list per chromosome.
pub fn generate_tracks(config: &GenerateConfig) -> Vec<Vec<ScoredInterval>> {
    (0..config.chromosome_count)
        .map(|chromosome| {
            let mut rng = SmallRng::seed_from_u64(config.seed.wrapping_add(chromosome as u64));
            generate_chromosome(config, &mut rng)
        })
        .collect()
}

fn generate_chromosome(config: &GenerateConfig, rng: &mut SmallRng) -> Vec<ScoredInterval> {
    let mut starts: Vec<i64> = (0..config.windows_per_chromosome)
        .map(|_| rng.gen_range(0..config.chromosome_size))
        .collect();
    starts.sort_unstable();

    starts
        .into_iter()
        .map(|start| {
            let length = rng.gen_range(config.min_length..=config.max_length);
            let score = if rng.gen::<f64>() < config.zero_fraction {
                0.0
            } else {
                rng.gen_range(config.min_score..config.max_score)
            };
            ScoredInterval::new(start, start + length, score)
        })
        .collect()
}
