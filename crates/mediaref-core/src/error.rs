//! Corpus Error Types
//!
//! Error handling for corpus access follows a two-tier policy: per-post
//! failures during a scan are recoverable (skip and continue), while an
//! unreachable corpus aborts the whole operation. Invalid parent pointers are
//! never errors; they are report classifications.

use thiserror::Error;

use crate::post::PostId;

/// Error type for corpus access operations
#[derive(Error, Debug, Clone)]
pub enum CorpusError {
    #[error("corpus unavailable: {0}")]
    Unavailable(String),

    #[error("post not found: {id}")]
    PostNotFound { id: PostId },

    #[error("update rejected: {0}")]
    UpdateRejected(String),

    #[error("corpus backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for corpus operations
pub type CorpusResult<T> = Result<T, CorpusError>;

impl CorpusError {
    /// Create an unavailable error
    pub fn unavailable<S: Into<String>>(msg: S) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create a generic backend error
    pub fn backend<S: Into<String>>(msg: S) -> Self {
        Self::Backend(msg.into())
    }

    /// Create an update-rejected error
    pub fn update_rejected<S: Into<String>>(msg: S) -> Self {
        Self::UpdateRejected(msg.into())
    }

    /// Check if the error must abort the current operation
    ///
    /// Per-post lookups that miss are recoverable during scans; everything
    /// else is surfaced to the caller.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::PostNotFound { .. })
    }
}

impl From<serde_json::Error> for CorpusError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
