//! Content Scanner
//!
//! Walks the corpus and collects every reference to one media asset:
//!
//! 1. **Featured**: posts designating the asset as their cover image,
//!    from precomputed store metadata.
//! 2. **Gallery membership**: native and custom gallery owners, also from
//!    precomputed metadata.
//! 3. **Inserted**: inline body markers, found by a paged scan of eligible
//!    post bodies through the marker grammar.
//!
//! The scan is read-only and best-effort: a post that fails to resolve is
//! skipped with a warning, and only an unreachable corpus aborts the whole
//! operation. Output ordering is deterministic (ascending post id) regardless
//! of lookup completion order.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use mediaref_core::{
    CorpusResult, CorpusStore, GalleryMembership, Post, PostId, Reference,
};

use crate::config::ScanConfig;
use crate::markers::extract_markers;

/// Everything the scanner found for one asset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutcome {
    /// Posts featuring the asset, deduplicated, ascending id
    pub featured: Vec<Reference>,

    /// Inline references keyed by containing body text, multiplicity kept
    pub inserted: BTreeMap<String, Vec<Reference>>,

    /// Native gallery owners, deduplicated, ascending id
    pub native_galleries: Vec<GalleryMembership>,

    /// Custom gallery owners, deduplicated, ascending id
    pub custom_galleries: Vec<GalleryMembership>,
}

impl ScanOutcome {
    /// Check whether no reference of any kind was found
    pub fn is_empty(&self) -> bool {
        self.featured.is_empty()
            && self.inserted.is_empty()
            && self.native_galleries.is_empty()
            && self.custom_galleries.is_empty()
    }

    /// Check whether any discovered reference names the given post
    pub fn names_post(&self, post_id: PostId) -> bool {
        self.featured.iter().any(|r| r.post_id == post_id)
            || self
                .inserted
                .values()
                .any(|refs| refs.iter().any(|r| r.post_id == post_id))
            || self.native_galleries.iter().any(|g| g.post_id == post_id)
            || self.custom_galleries.iter().any(|g| g.post_id == post_id)
    }
}

/// Scanner over a corpus store
pub struct ContentScanner {
    store: Arc<dyn CorpusStore>,
    config: ScanConfig,
}

impl ContentScanner {
    /// Create a scanner with the default configuration
    pub fn new(store: Arc<dyn CorpusStore>) -> Self {
        Self::with_config(store, ScanConfig::default())
    }

    /// Create a scanner with a custom configuration
    pub fn with_config(store: Arc<dyn CorpusStore>, config: ScanConfig) -> Self {
        Self { store, config }
    }

    /// Collect every reference to the asset across the corpus
    pub async fn scan(&self, asset_id: PostId) -> CorpusResult<ScanOutcome> {
        let featured_ids = self.store.featured_by(asset_id).await?;
        let gallery_links = self.store.gallery_membership(asset_id).await?;

        let featured = self
            .resolve_owners(featured_ids)
            .await?
            .iter()
            .map(Reference::from_post)
            .collect();

        let native_galleries = self
            .resolve_owners(gallery_links.native)
            .await?
            .iter()
            .map(GalleryMembership::from_post)
            .collect();

        let custom_galleries = self
            .resolve_owners(gallery_links.custom)
            .await?
            .iter()
            .map(GalleryMembership::from_post)
            .collect();

        let inserted = self.scan_bodies(asset_id).await?;

        let outcome = ScanOutcome {
            featured,
            inserted,
            native_galleries,
            custom_galleries,
        };

        debug!(
            asset_id,
            featured = outcome.featured.len(),
            inserted_bodies = outcome.inserted.len(),
            native = outcome.native_galleries.len(),
            custom = outcome.custom_galleries.len(),
            "scan complete"
        );

        Ok(outcome)
    }

    /// Resolve owner ids to post snapshots, deduplicated and sorted
    ///
    /// Lookups fan out concurrently; order is restored by sorting on post id
    /// after fan-in. Dangling ids are skipped.
    async fn resolve_owners(&self, mut ids: Vec<PostId>) -> CorpusResult<Vec<Post>> {
        ids.sort_unstable();
        ids.dedup();

        let lookups = join_all(ids.iter().map(|id| self.store.get_post(*id))).await;

        let mut posts = Vec::with_capacity(ids.len());
        for (id, result) in ids.iter().zip(lookups) {
            match result {
                Ok(Some(post)) => posts.push(post),
                Ok(None) => {
                    warn!(post_id = id, "reference owner no longer exists, skipping");
                }
                Err(err) if !err.is_fatal() => {
                    warn!(post_id = id, %err, "reference owner lookup failed, skipping");
                }
                Err(err) => return Err(err),
            }
        }

        posts.sort_by_key(|p| p.id);
        Ok(posts)
    }

    /// Paged body scan for inline markers referencing the asset
    async fn scan_bodies(
        &self,
        asset_id: PostId,
    ) -> CorpusResult<BTreeMap<String, Vec<Reference>>> {
        let filter = self.config.filter();
        let mut inserted: BTreeMap<String, Vec<Reference>> = BTreeMap::new();
        let mut cursor = None;
        let mut scanned = 0usize;

        loop {
            let page = self.store.list_posts(&filter, cursor).await?;
            scanned += page.posts.len();

            for post in &page.posts {
                for marker in extract_markers(&post.body) {
                    if marker.references(asset_id) {
                        inserted
                            .entry(post.body.clone())
                            .or_default()
                            .push(Reference::from_post(post));
                    }
                }
            }

            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        debug!(asset_id, scanned, "body scan finished");
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediaref_core::{MemoryCorpus, PostStatus};

    fn corpus_with_posts(posts: Vec<Post>) -> Arc<MemoryCorpus> {
        let corpus = MemoryCorpus::new();
        for post in posts {
            corpus.insert_post(post);
        }
        Arc::new(corpus)
    }

    #[tokio::test]
    async fn test_inserted_multiplicity_same_body() {
        let corpus = corpus_with_posts(vec![
            Post::new(9, "post", "Trip").with_body("[image id=50] and again [image id=50]"),
        ]);
        let scanner = ContentScanner::new(corpus);

        let outcome = scanner.scan(50).await.unwrap();
        assert_eq!(outcome.inserted.len(), 1);
        let refs = outcome.inserted.values().next().unwrap();
        assert_eq!(refs.len(), 2);
        assert!(refs.iter().all(|r| r.post_id == 9));
    }

    #[tokio::test]
    async fn test_inserted_two_posts_two_keys() {
        let corpus = corpus_with_posts(vec![
            Post::new(9, "post", "Trip").with_body("first body [image id=50]"),
            Post::new(11, "page", "About").with_body("second body [image id=50]"),
        ]);
        let scanner = ContentScanner::new(corpus);

        let outcome = scanner.scan(50).await.unwrap();
        assert_eq!(outcome.inserted.len(), 2);
        for refs in outcome.inserted.values() {
            assert_eq!(refs.len(), 1);
        }
    }

    #[tokio::test]
    async fn test_body_gallery_id_boundary() {
        let corpus = corpus_with_posts(vec![
            Post::new(9, "post", "Albums").with_body(r#"[gallery ids="123,124"]"#),
        ]);
        let scanner = ContentScanner::new(corpus.clone());

        assert!(scanner.scan(12).await.unwrap().is_empty());
        assert!(!ContentScanner::new(corpus).scan(123).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_trashed_posts_are_not_scanned() {
        let corpus = corpus_with_posts(vec![
            Post::new(9, "post", "Gone")
                .with_body("[image id=50]")
                .with_status(PostStatus::Trash),
        ]);
        let scanner = ContentScanner::new(corpus);

        assert!(scanner.scan(50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_featured_and_galleries_from_metadata() {
        let corpus = corpus_with_posts(vec![
            Post::new(7, "page", "Home"),
            Post::new(9, "post", "Trip"),
        ]);
        corpus.set_featured(9, 50);
        corpus.set_native_gallery(7, vec![50, 60]);
        corpus.set_custom_gallery(9, vec![50]);
        let scanner = ContentScanner::new(corpus);

        let outcome = scanner.scan(50).await.unwrap();
        assert_eq!(outcome.featured.len(), 1);
        assert_eq!(outcome.featured[0].post_id, 9);
        assert_eq!(outcome.native_galleries.len(), 1);
        assert_eq!(outcome.native_galleries[0].post_id, 7);
        assert_eq!(outcome.custom_galleries.len(), 1);
        assert!(outcome.names_post(7));
        assert!(outcome.names_post(9));
    }

    #[tokio::test]
    async fn test_dangling_featured_owner_is_skipped() {
        let corpus = corpus_with_posts(vec![Post::new(9, "post", "Trip")]);
        corpus.set_featured(9, 50);
        corpus.set_featured(999, 50); // owner 999 does not exist
        let scanner = ContentScanner::new(corpus);

        let outcome = scanner.scan(50).await.unwrap();
        assert_eq!(outcome.featured.len(), 1);
        assert_eq!(outcome.featured[0].post_id, 9);
    }

    #[tokio::test]
    async fn test_scan_paginates_across_pages() {
        let corpus = MemoryCorpus::new();
        for id in 1..=25 {
            let body = if id % 10 == 0 {
                format!("[image id=50] in post {}", id)
            } else {
                format!("post {} without embeds", id)
            };
            corpus.insert_post(Post::new(id, "post", format!("Post {}", id)).with_body(body));
        }
        let config = ScanConfig {
            page_size: 4,
            ..ScanConfig::default()
        };
        let scanner = ContentScanner::with_config(Arc::new(corpus), config);

        let outcome = scanner.scan(50).await.unwrap();
        assert_eq!(outcome.inserted.len(), 2); // posts 10 and 20
    }
}
