//! Content snapshot types
//!
//! A [`Post`] is an immutable snapshot of one content item as returned by the
//! corpus. Media assets share the same table as regular content: an asset is
//! simply a post of type `attachment` whose `parent_id` points at the content
//! item it was uploaded to (0 = deliberately unattached).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier shared by posts, pages, and media assets
pub type PostId = u64;

/// Publication status of a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PostStatus {
    /// Publicly visible
    Published,
    /// Saved but not published
    Draft,
    /// Soft-deleted; never scanned
    Trash,
    /// Platform-created placeholder; never scanned
    AutoDraft,
    /// Status inherited from the parent (typical for attachments)
    Inherit,
}

impl PostStatus {
    /// Statuses whose bodies are never eligible for embed scanning
    pub fn is_scannable(&self) -> bool {
        !matches!(self, PostStatus::Trash | PostStatus::AutoDraft)
    }
}

/// One content item: a post, a page, or a media asset
///
/// Snapshots are read-only; updates go through
/// [`CorpusStore::update_post`](crate::store::CorpusStore::update_post) and
/// are observed on the next read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Primary key
    pub id: PostId,

    /// Content type (`"post"`, `"page"`, `"attachment"`, ...)
    pub post_type: String,

    /// Publication status
    pub status: PostStatus,

    /// Display title
    pub title: String,

    /// Raw body text; empty for most attachments
    #[serde(default)]
    pub body: String,

    /// Declared parent pointer; 0 means unattached
    #[serde(default)]
    pub parent_id: PostId,

    /// Manual ordering value within the parent
    #[serde(default)]
    pub sort_order: i64,

    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a post with minimal required fields
    pub fn new(id: PostId, post_type: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id,
            post_type: post_type.into(),
            status: PostStatus::Published,
            title: title.into(),
            body: String::new(),
            parent_id: 0,
            sort_order: 0,
            updated_at: Utc::now(),
        }
    }

    /// Builder-style: set the body text
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Builder-style: set the status
    #[must_use]
    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = status;
        self
    }

    /// Builder-style: set the parent pointer
    #[must_use]
    pub fn with_parent(mut self, parent_id: PostId) -> Self {
        self.parent_id = parent_id;
        self
    }

    /// Builder-style: set the sort order
    #[must_use]
    pub fn with_sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Check whether this is a media asset
    pub fn is_attachment(&self) -> bool {
        self.post_type == "attachment"
    }
}
