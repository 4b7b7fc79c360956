//! Reference Resolver
//!
//! Combines the content scanner and the parent validator into the two public
//! operations: building the where-used report and applying partial asset
//! updates. Collaborators are injected as `Arc<dyn CorpusStore>`, so any
//! backend works and tests run against the in-memory corpus.

use std::sync::Arc;

use tracing::debug;

use mediaref_core::{AssetReferenceReport, CorpusStore, Post, PostId, PostUpdate};
use mediaref_scanner::{ContentScanner, ScanConfig};

use crate::error::{ResolveError, ResolveResult};
use crate::validator::classify_parent;

/// Builds where-used reports and applies asset updates
pub struct ReferenceResolver {
    store: Arc<dyn CorpusStore>,
    scanner: ContentScanner,
}

impl ReferenceResolver {
    /// Create a resolver with the default scan configuration
    pub fn new(store: Arc<dyn CorpusStore>) -> Self {
        Self::with_config(store, ScanConfig::default())
    }

    /// Create a resolver with a custom scan configuration
    pub fn with_config(store: Arc<dyn CorpusStore>, config: ScanConfig) -> Self {
        let scanner = ContentScanner::with_config(store.clone(), config);
        Self { store, scanner }
    }

    /// Build the where-used report for one asset
    ///
    /// Read-only and idempotent: for an unchanged corpus the report is
    /// byte-identical across calls, including ordering.
    pub async fn resolve(
        &self,
        asset_id: PostId,
        declared_parent_id: PostId,
    ) -> ResolveResult<AssetReferenceReport> {
        debug!(asset_id, declared_parent_id, "resolving references");

        let outcome = self.scanner.scan(asset_id).await?;
        let parent_post = self.lookup_parent(declared_parent_id).await?;

        let classification =
            classify_parent(declared_parent_id, parent_post.as_ref(), &outcome);
        let found_any_reference = !outcome.is_empty();

        Ok(AssetReferenceReport {
            asset_id,
            declared_parent_id,
            parent_state: classification.state,
            parent_summary: classification.summary,
            found_parent: classification.found_parent,
            found_any_reference,
            is_unattached: classification.is_unattached,
            featured: outcome.featured,
            inserted: outcome.inserted,
            native_galleries: outcome.native_galleries,
            custom_galleries: outcome.custom_galleries,
        })
    }

    /// Apply a partial update to an asset
    ///
    /// Only fields present in the update are written. An empty update is a
    /// no-op; store rejections surface verbatim, with no retries.
    pub async fn update_asset(&self, asset_id: PostId, update: PostUpdate) -> ResolveResult<()> {
        if update.is_empty() {
            debug!(asset_id, "empty update, nothing to apply");
            return Ok(());
        }

        self.store
            .update_post(asset_id, update)
            .await
            .map_err(|source| ResolveError::Update { asset_id, source })
    }

    /// Resolve the declared parent pointer, treating a miss as unresolved
    async fn lookup_parent(&self, declared_parent_id: PostId) -> ResolveResult<Option<Post>> {
        if declared_parent_id == 0 {
            return Ok(None);
        }

        match self.store.get_post(declared_parent_id).await {
            Ok(post) => Ok(post),
            Err(err) if !err.is_fatal() => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
