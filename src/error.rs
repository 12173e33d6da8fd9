//! Error types shared across the crate.

use crate::score::ScoreOperation;
use thiserror::Error;

/// Errors that can occur while flattening or routing scored windows.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PileupError {
    /// A window arrived with a start position before a previously
    /// accepted one. The flattener rejects the call and keeps its
    /// state as it was before the call.
    #[error("unsorted input: window start {start} is before previously accepted start {prev_start}")]
    UnsortedInput { prev_start: i64, start: i64 },

    /// A binary-only operation was asked to combine an unsupported
    /// number of scores.
    #[error("{operation} is defined for 1 or 2 scores, got {count}")]
    ArityViolation {
        operation: ScoreOperation,
        count: usize,
    },

    /// A chromosome index outside the configured range was used.
    #[error("chromosome index {index} out of range for {count} chromosomes")]
    ChromosomeOutOfRange { index: usize, count: usize },

    /// A bin size smaller than one was configured.
    #[error("bin size must be positive, got {0}")]
    InvalidBinSize(i64),
}

pub type Result<T> = std::result::Result<T, PileupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PileupError::UnsortedInput {
            prev_start: 10,
            start: 5,
        };
        assert!(err.to_string().contains("unsorted"));

        let err = PileupError::ArityViolation {
            operation: ScoreOperation::Subtract,
            count: 3,
        };
        assert!(err.to_string().contains("got 3"));
    }
}
