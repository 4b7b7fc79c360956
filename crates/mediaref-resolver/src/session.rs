//! Request-Scoped Report Cache
//!
//! A [`ResolverSession`] lives for one logical operation (one admin page
//! view, one request). Several presentation components ask about the same
//! asset while rendering a single screen; the session runs the scan once and
//! hands each of them the same immutable report. Dropping the session drops
//! the cache: there is no cross-request persistence, so a fresh request
//! always reflects the corpus at that moment.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use mediaref_core::{AssetReferenceReport, PostId};

use crate::error::ResolveResult;
use crate::resolver::ReferenceResolver;

/// One request scope's view of the resolver
pub struct ResolverSession {
    resolver: ReferenceResolver,
    cache: Mutex<HashMap<PostId, Arc<AssetReferenceReport>>>,
}

impl ResolverSession {
    /// Start a session over a resolver
    pub fn new(resolver: ReferenceResolver) -> Self {
        Self {
            resolver,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Get the report for an asset, building it on first access
    ///
    /// Subsequent calls for the same asset id within this session return the
    /// cached report regardless of intervening corpus changes; that staleness
    /// window is bounded by the session's lifetime by design.
    pub async fn report(
        &self,
        asset_id: PostId,
        declared_parent_id: PostId,
    ) -> ResolveResult<Arc<AssetReferenceReport>> {
        if let Some(report) = self.cache.lock().expect("session cache").get(&asset_id) {
            return Ok(report.clone());
        }

        let report = Arc::new(self.resolver.resolve(asset_id, declared_parent_id).await?);

        let mut cache = self.cache.lock().expect("session cache");
        // Keep the first report if another caller raced us here.
        Ok(cache.entry(asset_id).or_insert(report).clone())
    }

    /// Access the underlying resolver, e.g. for the update path
    pub fn resolver(&self) -> &ReferenceResolver {
        &self.resolver
    }
}
