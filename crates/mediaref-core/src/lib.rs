//! Core types for the mediaref workspace
//!
//! This crate defines:
//! - [`Post`] - the immutable content snapshot returned by the corpus
//! - [`CorpusStore`] - the read/update boundary to the content store
//! - [`AssetReferenceReport`] - the where-used report for one media asset
//! - [`MemoryCorpus`] - an in-memory store for tests and snapshot files
//!
//! The higher-level scanning and classification logic lives in
//! `mediaref-scanner` and `mediaref-resolver`; this crate stays dependency-light
//! so every layer can share its vocabulary.

pub mod error;
pub mod memory;
pub mod post;
pub mod report;
pub mod store;

pub use error::{CorpusError, CorpusResult};
pub use memory::{CorpusSnapshot, MemoryCorpus};
pub use post::{Post, PostId, PostStatus};
pub use report::{AssetReferenceReport, GalleryMembership, ParentState, Reference};
pub use store::{CorpusStore, GalleryLinks, PageCursor, PostFilter, PostPage, PostUpdate};
