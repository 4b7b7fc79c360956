//! Scanner configuration

use serde::{Deserialize, Serialize};

use mediaref_core::{PostFilter, PostStatus};

fn default_page_size() -> usize {
    mediaref_core::store::DEFAULT_PAGE_SIZE
}

fn default_post_types() -> Vec<String> {
    vec!["post".to_string(), "page".to_string()]
}

fn default_exclude_statuses() -> Vec<PostStatus> {
    vec![PostStatus::Trash, PostStatus::AutoDraft]
}

/// Configuration for corpus scans
///
/// Deserializable from the CLI's toml config file; every field has a default
/// so an empty table is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Posts fetched per page during the body scan
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Content types eligible to host embeds
    #[serde(default = "default_post_types")]
    pub post_types: Vec<String>,

    /// Statuses excluded from scanning
    #[serde(default = "default_exclude_statuses")]
    pub exclude_statuses: Vec<PostStatus>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            post_types: default_post_types(),
            exclude_statuses: default_exclude_statuses(),
        }
    }
}

impl ScanConfig {
    /// Build the store-level filter for this configuration
    pub fn filter(&self) -> PostFilter {
        PostFilter {
            post_types: self.post_types.clone(),
            exclude_statuses: self.exclude_statuses.clone(),
            page_size: self.page_size,
        }
    }
}
