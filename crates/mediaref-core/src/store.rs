//! Corpus Store Abstraction
//!
//! [`CorpusStore`] is the read/update boundary between the resolver and
//! whatever actually holds the content: a database, a remote API, or the
//! in-memory snapshot used in tests. The resolver never touches storage
//! directly, so backends can be swapped without changing scanning or
//! classification code.
//!
//! # Pagination contract
//!
//! `list_posts` returns bounded pages in ascending id order. Callers loop on
//! `next_cursor` instead of loading the whole corpus; the page size is part of
//! the filter so the scanner's memory use is bounded by configuration.
//!
//! # Thread safety
//!
//! Implementations must be `Send + Sync`; an `Arc<T>` blanket impl is
//! provided so stores can be shared across components cheaply.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CorpusResult;
use crate::post::{Post, PostId, PostStatus};

/// Default page size for corpus scans
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Filter describing which posts a scan should visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostFilter {
    /// Content types eligible to host embeds
    pub post_types: Vec<String>,

    /// Statuses excluded from scanning
    pub exclude_statuses: Vec<PostStatus>,

    /// Maximum number of posts per page
    pub page_size: usize,
}

impl Default for PostFilter {
    fn default() -> Self {
        Self {
            post_types: vec!["post".to_string(), "page".to_string()],
            exclude_statuses: vec![PostStatus::Trash, PostStatus::AutoDraft],
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PostFilter {
    /// Check whether a post passes this filter
    pub fn matches(&self, post: &Post) -> bool {
        self.post_types.iter().any(|t| *t == post.post_type)
            && !self.exclude_statuses.contains(&post.status)
    }
}

/// Opaque cursor into a paged listing
///
/// Backends interpret the inner value however suits them; the in-memory store
/// uses the last id of the previous page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor(pub PostId);

/// One page of a post listing
#[derive(Debug, Clone)]
pub struct PostPage {
    /// Posts in ascending id order
    pub posts: Vec<Post>,
    /// Cursor for the next page, `None` when exhausted
    pub next_cursor: Option<PageCursor>,
}

/// Gallery membership metadata for one asset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryLinks {
    /// Posts whose native gallery lists the asset
    pub native: Vec<PostId>,
    /// Posts whose custom gallery lists the asset
    pub custom: Vec<PostId>,
}

/// Partial update for one asset
///
/// Only fields that are `Some` are applied; the store leaves the rest
/// untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PostUpdate {
    /// New parent pointer
    pub parent_id: Option<PostId>,
    /// New sort order
    pub sort_order: Option<i64>,
}

impl PostUpdate {
    /// Check whether the update carries no fields
    pub fn is_empty(&self) -> bool {
        self.parent_id.is_none() && self.sort_order.is_none()
    }
}

/// Read/update access to the content store
#[async_trait]
pub trait CorpusStore: Send + Sync {
    /// Get a post by id
    ///
    /// Returns `Ok(None)` when the id does not resolve; reserve errors for
    /// backend failures.
    async fn get_post(&self, id: PostId) -> CorpusResult<Option<Post>>;

    /// List posts matching the filter, one bounded page at a time
    async fn list_posts(
        &self,
        filter: &PostFilter,
        cursor: Option<PageCursor>,
    ) -> CorpusResult<PostPage>;

    /// Posts that designate the asset as their featured image
    ///
    /// Precomputed metadata; no body scan involved.
    async fn featured_by(&self, asset_id: PostId) -> CorpusResult<Vec<PostId>>;

    /// Native and custom gallery membership for the asset
    ///
    /// Precomputed metadata; no body scan involved.
    async fn gallery_membership(&self, asset_id: PostId) -> CorpusResult<GalleryLinks>;

    /// Apply a partial update to a post
    ///
    /// Fails with [`CorpusError::UpdateRejected`](crate::CorpusError) when
    /// the target no longer exists.
    async fn update_post(&self, id: PostId, update: PostUpdate) -> CorpusResult<()>;
}

/// Blanket implementation of CorpusStore for Arc<T>
#[async_trait]
impl<T: CorpusStore + ?Sized> CorpusStore for std::sync::Arc<T> {
    async fn get_post(&self, id: PostId) -> CorpusResult<Option<Post>> {
        (**self).get_post(id).await
    }

    async fn list_posts(
        &self,
        filter: &PostFilter,
        cursor: Option<PageCursor>,
    ) -> CorpusResult<PostPage> {
        (**self).list_posts(filter, cursor).await
    }

    async fn featured_by(&self, asset_id: PostId) -> CorpusResult<Vec<PostId>> {
        (**self).featured_by(asset_id).await
    }

    async fn gallery_membership(&self, asset_id: PostId) -> CorpusResult<GalleryLinks> {
        (**self).gallery_membership(asset_id).await
    }

    async fn update_post(&self, id: PostId, update: PostUpdate) -> CorpusResult<()> {
        (**self).update_post(id, update).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        let filter = PostFilter::default();
        assert_eq!(filter.post_types, vec!["post", "page"]);
        assert_eq!(filter.page_size, DEFAULT_PAGE_SIZE);

        let post = Post::new(1, "post", "A");
        assert!(filter.matches(&post));

        let trashed = Post::new(2, "post", "B").with_status(PostStatus::Trash);
        assert!(!filter.matches(&trashed));

        let attachment = Post::new(3, "attachment", "C");
        assert!(!filter.matches(&attachment));
    }

    #[test]
    fn test_post_update_is_empty() {
        assert!(PostUpdate::default().is_empty());
        assert!(!PostUpdate {
            parent_id: Some(9),
            sort_order: None,
        }
        .is_empty());
        assert!(!PostUpdate {
            parent_id: None,
            sort_order: Some(2),
        }
        .is_empty());
    }
}
