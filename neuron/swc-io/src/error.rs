//! Error types for SWC reading and tree validation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for SWC operations.
pub type SwcResult<T> = Result<T, SwcError>;

/// Errors that can occur while reading an SWC file or indexing its samples.
///
/// Every variant except [`SwcError::Io`] and [`SwcError::FileNotFound`]
/// carries the 1-based physical line number of the offending record.
#[derive(Debug, Error)]
pub enum SwcError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// A data line could not be read as a 7-field sample record.
    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord {
        /// Line where the record starts (1-based, comments included).
        line: usize,
        /// What was wrong with the record.
        reason: String,
    },

    /// A sample refers to a parent that was never seen before it.
    #[error("sample {id} at line {line} refers to unknown parent {parent}")]
    DanglingParent {
        /// Line of the referring sample.
        line: usize,
        /// Id of the referring sample.
        id: u32,
        /// The parent id that could not be resolved.
        parent: u32,
    },

    /// The same sample id appears twice.
    #[error("duplicate sample id {id} at line {line}")]
    DuplicateId {
        /// Line of the second occurrence.
        line: usize,
        /// The repeated id.
        id: u32,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SwcError {
    /// Create a `MalformedRecord` error for the given line.
    #[must_use]
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    /// Source line the error points at, if it has one.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::MalformedRecord { line, .. }
            | Self::DanglingParent { line, .. }
            | Self::DuplicateId { line, .. } => Some(*line),
            Self::FileNotFound { .. } | Self::Io(_) => None,
        }
    }
}
