//! PLATEAU: pileup flattening and genome-wide statistics for scored
//! genomic intervals.
//!
//! This library collapses overlapping scored windows into a
//! non-overlapping representation and computes genome-wide descriptive
//! statistics over the result.
//!
//! # Features
//!
//! - **Streaming flattening**: start-sorted input per chromosome,
//!   O(k) memory where k = max overlapping windows
//! - **Two strategies**: exact input boundaries, or fixed-width bins
//!   with proportional read splitting
//! - **Parallel processing**: per-chromosome fan-out and a two-phase
//!   statistics reduction on Rayon's shared pool
//!
//! # Example
//!
//! ```rust
//! use plateau_genomics::prelude::*;
//!
//! // One window list per chromosome, start-sorted.
//! let raw = vec![vec![
//!     ScoredInterval::new(100, 200, 1.0),
//!     ScoredInterval::new(150, 250, 2.0),
//! ]];
//!
//! let config = FlattenConfig::boundary(ScoreOperation::Sum);
//! let track = GenomeTrack::flatten(config, raw)?;
//!
//! assert_eq!(track.chromosome(0).map(|c| c.len()), Some(3));
//! assert_eq!(track.statistics().max, 3.0);
//! # Ok::<(), plateau_genomics::PileupError>(())
//! ```

pub mod error;
pub mod generate;
pub mod interval;
pub mod pileup;
pub mod score;
pub mod stats;
pub mod track;

// Re-export commonly used types
pub use error::{PileupError, Result};
pub use interval::ScoredInterval;
pub use pileup::{
    BinFlattener, BoundaryFlattener, FlattenConfig, FlattenStrategy, Flattener,
    GenomeWideFlattener, PileupFlattener,
};
pub use score::ScoreOperation;
pub use stats::{genome_wide_statistics, GenomeWideStatistics};
pub use track::GenomeTrack;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::interval::ScoredInterval;
    pub use crate::pileup::{
        flatten_tracks, FlattenConfig, FlattenStrategy, GenomeWideFlattener, PileupFlattener,
    };
    pub use crate::score::ScoreOperation;
    pub use crate::stats::{genome_wide_statistics, GenomeWideStatistics};
    pub use crate::track::GenomeTrack;
}
