//! Score combination rules for overlapping windows.
//!
//! Every flattened segment or bin carries the scores of all inputs
//! overlapping it, combined by one of these operations. `Divide`,
//! `Multiply` and `Subtract` are binary: they are defined for exactly
//! one or two contributing scores and fail fast otherwise.

use crate::error::{PileupError, Result};
use std::fmt;

/// Aggregation rule applied to the scores overlapping one output window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreOperation {
    Sum,
    Average,
    Min,
    Max,
    Divide,
    Multiply,
    Subtract,
}

impl ScoreOperation {
    /// Parse an operation from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sum" => Some(ScoreOperation::Sum),
            "average" | "mean" => Some(ScoreOperation::Average),
            "min" => Some(ScoreOperation::Min),
            "max" => Some(ScoreOperation::Max),
            "divide" | "div" => Some(ScoreOperation::Divide),
            "multiply" | "mul" => Some(ScoreOperation::Multiply),
            "subtract" | "sub" => Some(ScoreOperation::Subtract),
            _ => None,
        }
    }

    /// True for operations defined only for one or two scores.
    #[inline]
    pub fn is_binary(&self) -> bool {
        matches!(
            self,
            ScoreOperation::Divide | ScoreOperation::Multiply | ScoreOperation::Subtract
        )
    }

    /// Combine the scores of all windows contributing to one output
    /// segment. Callers invoke this with at least one score.
    ///
    /// `Min` and `Max` ignore entries equal to zero unless all entries
    /// are zero; zero means "no data" and must not win against a real
    /// score. `Multiply` with a single score yields `0.0`: a missing
    /// second factor is treated as an absent partner, unlike `Divide`
    /// and `Subtract` which return the lone score unchanged.
    pub fn combine(&self, scores: &[f64]) -> Result<f64> {
        match self {
            ScoreOperation::Sum => Ok(scores.iter().sum()),
            ScoreOperation::Average => {
                Ok(scores.iter().sum::<f64>() / scores.len() as f64)
            }
            ScoreOperation::Min => Ok(fold_ignoring_zero(scores, f64::min)),
            ScoreOperation::Max => Ok(fold_ignoring_zero(scores, f64::max)),
            ScoreOperation::Divide => match scores {
                [single] => Ok(*single),
                [num, den] => Ok(num / den),
                _ => Err(self.arity_violation(scores.len())),
            },
            ScoreOperation::Multiply => match scores {
                [_single] => Ok(0.0),
                [a, b] => Ok(a * b),
                _ => Err(self.arity_violation(scores.len())),
            },
            ScoreOperation::Subtract => match scores {
                [single] => Ok(*single),
                [a, b] => Ok(a - b),
                _ => Err(self.arity_violation(scores.len())),
            },
        }
    }

    fn arity_violation(&self, count: usize) -> PileupError {
        PileupError::ArityViolation {
            operation: *self,
            count,
        }
    }
}

/// Fold non-zero entries with the given selector; all-zero input
/// yields zero.
fn fold_ignoring_zero(scores: &[f64], select: fn(f64, f64) -> f64) -> f64 {
    let mut picked: Option<f64> = None;
    for &s in scores {
        if s == 0.0 {
            continue;
        }
        picked = Some(match picked {
            Some(p) => select(p, s),
            None => s,
        });
    }
    picked.unwrap_or(0.0)
}

impl fmt::Display for ScoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScoreOperation::Sum => "sum",
            ScoreOperation::Average => "average",
            ScoreOperation::Min => "min",
            ScoreOperation::Max => "max",
            ScoreOperation::Divide => "divide",
            ScoreOperation::Multiply => "multiply",
            ScoreOperation::Subtract => "subtract",
        };
        write!(f, "{}", name)
    }
}
