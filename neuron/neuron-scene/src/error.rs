//! Error types for scene planning.

use thiserror::Error;

/// Result type for scene planning.
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors that can occur while planning a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    /// Scene option value out of range.
    #[error("invalid scene options: {reason}")]
    InvalidOptions {
        /// What is wrong with the options.
        reason: String,
    },

    /// A volume grid was requested but the segments span no space.
    #[error("cannot size a volume grid for '{stem}': segment paths have no extent")]
    NoVolumeExtent {
        /// File stem of the neuron.
        stem: String,
    },
}

impl SceneError {
    /// Create an `InvalidOptions` error.
    #[must_use]
    pub fn invalid_options(reason: impl Into<String>) -> Self {
        Self::InvalidOptions {
            reason: reason.into(),
        }
    }
}
