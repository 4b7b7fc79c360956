//! In-Memory Corpus
//!
//! A [`CorpusStore`] backed by ordered maps, used by tests and by the CLI's
//! JSON snapshot files. Iteration order is ascending post id, which keeps
//! scans deterministic without any extra sorting in the backend.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{CorpusError, CorpusResult};
use crate::post::{Post, PostId};
use crate::store::{CorpusStore, GalleryLinks, PageCursor, PostFilter, PostPage, PostUpdate};

/// Serializable state of a [`MemoryCorpus`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusSnapshot {
    /// All content items, assets included
    #[serde(default)]
    pub posts: Vec<Post>,

    /// Featured-image metadata: owning post id -> asset id
    #[serde(default)]
    pub featured: BTreeMap<PostId, PostId>,

    /// Native gallery metadata: owning post id -> member asset ids
    #[serde(default)]
    pub native_galleries: BTreeMap<PostId, Vec<PostId>>,

    /// Custom gallery metadata: owning post id -> member asset ids
    #[serde(default)]
    pub custom_galleries: BTreeMap<PostId, Vec<PostId>>,
}

#[derive(Debug, Default)]
struct Inner {
    posts: BTreeMap<PostId, Post>,
    featured: BTreeMap<PostId, PostId>,
    native_galleries: BTreeMap<PostId, Vec<PostId>>,
    custom_galleries: BTreeMap<PostId, Vec<PostId>>,
}

/// In-memory corpus store
#[derive(Debug, Default)]
pub struct MemoryCorpus {
    inner: RwLock<Inner>,
}

impl MemoryCorpus {
    /// Create an empty corpus
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from a snapshot
    pub fn from_snapshot(snapshot: CorpusSnapshot) -> Self {
        let corpus = Self::new();
        {
            let mut inner = corpus.inner.write().expect("corpus lock");
            for post in snapshot.posts {
                inner.posts.insert(post.id, post);
            }
            inner.featured = snapshot.featured;
            inner.native_galleries = snapshot.native_galleries;
            inner.custom_galleries = snapshot.custom_galleries;
        }
        corpus
    }

    /// Export the current state as a snapshot
    pub fn snapshot(&self) -> CorpusSnapshot {
        let inner = self.inner.read().expect("corpus lock");
        CorpusSnapshot {
            posts: inner.posts.values().cloned().collect(),
            featured: inner.featured.clone(),
            native_galleries: inner.native_galleries.clone(),
            custom_galleries: inner.custom_galleries.clone(),
        }
    }

    /// Insert or replace a post
    pub fn insert_post(&self, post: Post) {
        let mut inner = self.inner.write().expect("corpus lock");
        inner.posts.insert(post.id, post);
    }

    /// Record that a post designates an asset as its featured image
    pub fn set_featured(&self, post_id: PostId, asset_id: PostId) {
        let mut inner = self.inner.write().expect("corpus lock");
        inner.featured.insert(post_id, asset_id);
    }

    /// Record native gallery membership for a post
    pub fn set_native_gallery(&self, post_id: PostId, assets: Vec<PostId>) {
        let mut inner = self.inner.write().expect("corpus lock");
        inner.native_galleries.insert(post_id, assets);
    }

    /// Record custom gallery membership for a post
    pub fn set_custom_gallery(&self, post_id: PostId, assets: Vec<PostId>) {
        let mut inner = self.inner.write().expect("corpus lock");
        inner.custom_galleries.insert(post_id, assets);
    }
}

#[async_trait]
impl CorpusStore for MemoryCorpus {
    async fn get_post(&self, id: PostId) -> CorpusResult<Option<Post>> {
        let inner = self.inner.read().expect("corpus lock");
        Ok(inner.posts.get(&id).cloned())
    }

    async fn list_posts(
        &self,
        filter: &PostFilter,
        cursor: Option<PageCursor>,
    ) -> CorpusResult<PostPage> {
        let inner = self.inner.read().expect("corpus lock");

        let start = cursor.map(|c| c.0 + 1).unwrap_or(0);
        let mut posts = Vec::with_capacity(filter.page_size);
        let mut next_cursor = None;

        for post in inner.posts.range(start..).map(|(_, p)| p) {
            if !filter.matches(post) {
                continue;
            }
            if posts.len() == filter.page_size {
                // More matches remain; resume after the last returned id.
                next_cursor = posts.last().map(|p: &Post| PageCursor(p.id));
                break;
            }
            posts.push(post.clone());
        }

        Ok(PostPage { posts, next_cursor })
    }

    async fn featured_by(&self, asset_id: PostId) -> CorpusResult<Vec<PostId>> {
        let inner = self.inner.read().expect("corpus lock");
        Ok(inner
            .featured
            .iter()
            .filter(|(_, asset)| **asset == asset_id)
            .map(|(post_id, _)| *post_id)
            .collect())
    }

    async fn gallery_membership(&self, asset_id: PostId) -> CorpusResult<GalleryLinks> {
        let inner = self.inner.read().expect("corpus lock");
        Ok(GalleryLinks {
            native: inner
                .native_galleries
                .iter()
                .filter(|(_, assets)| assets.contains(&asset_id))
                .map(|(post_id, _)| *post_id)
                .collect(),
            custom: inner
                .custom_galleries
                .iter()
                .filter(|(_, assets)| assets.contains(&asset_id))
                .map(|(post_id, _)| *post_id)
                .collect(),
        })
    }

    async fn update_post(&self, id: PostId, update: PostUpdate) -> CorpusResult<()> {
        let mut inner = self.inner.write().expect("corpus lock");
        let post = inner
            .posts
            .get_mut(&id)
            .ok_or_else(|| CorpusError::update_rejected(format!("post {} no longer exists", id)))?;

        if let Some(parent_id) = update.parent_id {
            post.parent_id = parent_id;
        }
        if let Some(sort_order) = update.sort_order {
            post.sort_order = sort_order;
        }
        post.updated_at = Utc::now();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::PostStatus;

    fn sample_corpus() -> MemoryCorpus {
        let corpus = MemoryCorpus::new();
        corpus.insert_post(Post::new(1, "post", "One"));
        corpus.insert_post(Post::new(2, "page", "Two"));
        corpus.insert_post(Post::new(3, "post", "Three").with_status(PostStatus::Trash));
        corpus.insert_post(Post::new(4, "post", "Four"));
        corpus.insert_post(Post::new(50, "attachment", "Image"));
        corpus
    }

    #[tokio::test]
    async fn test_get_post_missing_is_none() {
        let corpus = sample_corpus();
        assert!(corpus.get_post(999).await.unwrap().is_none());
        assert_eq!(corpus.get_post(1).await.unwrap().unwrap().title, "One");
    }

    #[tokio::test]
    async fn test_list_posts_filters_and_orders() {
        let corpus = sample_corpus();
        let page = corpus
            .list_posts(&PostFilter::default(), None)
            .await
            .unwrap();

        let ids: Vec<PostId> = page.posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 4]); // trashed and attachment excluded
        assert!(page.next_cursor.is_none());
    }

    #[tokio::test]
    async fn test_list_posts_pagination() {
        let corpus = sample_corpus();
        let filter = PostFilter {
            page_size: 2,
            ..PostFilter::default()
        };

        let first = corpus.list_posts(&filter, None).await.unwrap();
        assert_eq!(first.posts.len(), 2);
        assert_eq!(first.next_cursor, Some(PageCursor(2)));

        let second = corpus
            .list_posts(&filter, first.next_cursor)
            .await
            .unwrap();
        let ids: Vec<PostId> = second.posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![4]);
        assert!(second.next_cursor.is_none());
    }

    #[tokio::test]
    async fn test_featured_and_gallery_metadata() {
        let corpus = sample_corpus();
        corpus.set_featured(1, 50);
        corpus.set_featured(4, 50);
        corpus.set_featured(2, 60);
        corpus.set_native_gallery(2, vec![50, 60]);
        corpus.set_custom_gallery(4, vec![60]);

        assert_eq!(corpus.featured_by(50).await.unwrap(), vec![1, 4]);

        let links = corpus.gallery_membership(50).await.unwrap();
        assert_eq!(links.native, vec![2]);
        assert!(links.custom.is_empty());
    }

    #[tokio::test]
    async fn test_update_post_applies_partial_fields() {
        let corpus = sample_corpus();
        corpus
            .update_post(
                50,
                PostUpdate {
                    parent_id: Some(9),
                    sort_order: None,
                },
            )
            .await
            .unwrap();

        let post = corpus.get_post(50).await.unwrap().unwrap();
        assert_eq!(post.parent_id, 9);
        assert_eq!(post.sort_order, 0);
    }

    #[tokio::test]
    async fn test_update_missing_post_is_rejected() {
        let corpus = sample_corpus();
        let err = corpus
            .update_post(999, PostUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CorpusError::UpdateRejected(_)));
    }

    #[tokio::test]
    async fn test_snapshot_round_trip() {
        let corpus = sample_corpus();
        corpus.set_featured(1, 50);

        let json = serde_json::to_string(&corpus.snapshot()).unwrap();
        let restored: CorpusSnapshot = serde_json::from_str(&json).unwrap();
        let corpus2 = MemoryCorpus::from_snapshot(restored);

        assert_eq!(corpus2.featured_by(50).await.unwrap(), vec![1]);
        assert_eq!(corpus2.get_post(2).await.unwrap().unwrap().title, "Two");
    }
}
