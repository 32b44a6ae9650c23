//! Error types for path segmentation and emission.

use swc_io::SwcError;
use thiserror::Error;

/// Result type for neuron path operations.
pub type PathResult<T> = Result<T, PathError>;

/// Errors that can occur while turning a neuron into path segments.
#[derive(Debug, Error)]
pub enum PathError {
    /// Reading or indexing the SWC input failed.
    #[error(transparent)]
    Swc(#[from] SwcError),

    /// A segment has too few points to sweep a tube along.
    #[error("segment '{name}' needs at least 2 points, got {points}")]
    DegenerateSegment {
        /// Name of the rejected segment.
        name: String,
        /// Number of points the segment path would have had.
        points: usize,
    },

    /// Configuration value out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        reason: String,
    },
}

impl PathError {
    /// Create an `InvalidConfig` error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Source line of the underlying SWC error, if any.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::Swc(e) => e.line(),
            Self::DegenerateSegment { .. } | Self::InvalidConfig { .. } => None,
        }
    }
}
