//! Resolver error types

use thiserror::Error;

use mediaref_core::{CorpusError, PostId};

/// Error type for resolver operations
#[derive(Error, Debug, Clone)]
pub enum ResolveError {
    #[error("corpus access failed: {0}")]
    Corpus(#[from] CorpusError),

    #[error("update of asset {asset_id} failed: {source}")]
    Update {
        asset_id: PostId,
        #[source]
        source: CorpusError,
    },
}

/// Result type for resolver operations
pub type ResolveResult<T> = Result<T, ResolveError>;
