use crate::Energy;
use serde::Deserialize;
use serde::Serialize;

/// Errors that abort a clustering run before any work is done.
///
/// Degenerate numeric cases met mid-run (zero sampling weights, empty
/// clusters) are not errors; see [`super::Degeneracy`].
#[derive(Debug, Clone, PartialEq)]
pub enum ClusterError {
    /// K must satisfy 1 < K < N.
    InvalidClusters { k: usize, n: usize },
    /// The iteration cap must satisfy 1 < iterations < 1000.
    InvalidIterations(usize),
    /// Epsilon must be finite and non-negative.
    InvalidEpsilon(Energy),
    EmptyDataset,
    ZeroDimension,
    DimensionMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
    NonFinite { row: usize, column: usize },
    /// Weighted sampling failed for a reason other than all-zero weights.
    Sampling(rand::distr::weighted::Error),
}

impl std::fmt::Display for ClusterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidClusters { k, n } => {
                write!(f, "Invalid number of clusters! (k = {}, n = {})", k, n)
            }
            Self::InvalidIterations(t) => write!(f, "Invalid maximum iteration! ({})", t),
            Self::InvalidEpsilon(e) => write!(f, "invalid epsilon: {}", e),
            Self::EmptyDataset => write!(f, "empty dataset"),
            Self::ZeroDimension => write!(f, "points have no coordinates"),
            Self::DimensionMismatch {
                row,
                expected,
                found,
            } => write!(
                f,
                "dimension mismatch at row {}: expected {}, found {}",
                row, expected, found
            ),
            Self::NonFinite { row, column } => {
                write!(f, "non-finite coordinate at row {}, column {}", row, column)
            }
            Self::Sampling(e) => write!(f, "weighted sampling failed: {}", e),
        }
    }
}

impl std::error::Error for ClusterError {}

impl From<rand::distr::weighted::Error> for ClusterError {
    fn from(e: rand::distr::weighted::Error) -> Self {
        Self::Sampling(e)
    }
}

/// Degenerate numeric cases recovered from during a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Degeneracy {
    /// Every remaining candidate coincided with a chosen center, so the
    /// k-means++ draw fell back to a uniform pick over the remaining pool.
    Sampling { round: usize },
    /// A center had no assigned points and kept its previous position.
    EmptyCluster { iteration: usize, center: usize },
}

impl std::fmt::Display for Degeneracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sampling { round } => {
                write!(f, "zero sampling weight in seeding round {}", round)
            }
            Self::EmptyCluster { iteration, center } => {
                write!(f, "empty cluster {} in iteration {}", center, iteration)
            }
        }
    }
}
