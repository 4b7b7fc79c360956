//! Command implementations

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use mediaref_core::{CorpusSnapshot, CorpusStore, MemoryCorpus, PostId, PostUpdate};
use mediaref_resolver::{ReferenceResolver, ResolverSession};

use crate::config::CliConfig;
use crate::render::render_report;

/// Load a corpus snapshot file into an in-memory store
fn load_corpus(path: &Path) -> Result<Arc<MemoryCorpus>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read corpus snapshot '{}'", path.display()))?;
    let snapshot: CorpusSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse corpus snapshot '{}'", path.display()))?;
    Ok(Arc::new(MemoryCorpus::from_snapshot(snapshot)))
}

/// Write the corpus state back to the snapshot file
fn save_corpus(corpus: &MemoryCorpus, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&corpus.snapshot())
        .context("failed to serialize corpus snapshot")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write corpus snapshot '{}'", path.display()))
}

/// Build and print the where-used report for one asset
pub async fn run_report(
    asset_id: PostId,
    parent_override: Option<PostId>,
    corpus_path: &Path,
    config: &CliConfig,
) -> Result<String> {
    let corpus = load_corpus(corpus_path)?;

    let asset = corpus
        .get_post(asset_id)
        .await
        .map_err(anyhow::Error::from)?;
    let declared_parent = match parent_override {
        Some(parent) => parent,
        None => asset.as_ref().map(|a| a.parent_id).unwrap_or(0),
    };

    let resolver = ReferenceResolver::with_config(corpus, config.scan.clone());
    let session = ResolverSession::new(resolver);
    let report = session.report(asset_id, declared_parent).await?;

    Ok(render_report(&report, asset.as_ref()))
}

/// Apply a partial update and rewrite the snapshot file
pub async fn run_update(
    asset_id: PostId,
    parent_id: Option<PostId>,
    sort_order: Option<i64>,
    corpus_path: &Path,
    config: &CliConfig,
) -> Result<()> {
    let corpus = load_corpus(corpus_path)?;

    let update = PostUpdate {
        parent_id,
        sort_order,
    };
    let resolver = ReferenceResolver::with_config(corpus.clone(), config.scan.clone());
    resolver.update_asset(asset_id, update).await?;

    save_corpus(&corpus, corpus_path)?;
    info!(asset_id, "update applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediaref_core::Post;
    use std::io::Write;

    fn snapshot_file() -> tempfile::NamedTempFile {
        let corpus = MemoryCorpus::new();
        corpus.insert_post(Post::new(7, "page", "Home"));
        corpus.insert_post(Post::new(9, "post", "Trip"));
        corpus.insert_post(Post::new(50, "attachment", "Beach").with_parent(7));
        corpus.set_featured(9, 50);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&corpus.snapshot()).unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_report_uses_stored_parent_by_default() {
        let file = snapshot_file();
        let rendered = run_report(50, None, file.path(), &CliConfig::default())
            .await
            .unwrap();

        assert!(rendered.contains("(BAD PARENT)"));
        assert!(rendered.contains("(post 9), Trip"));
    }

    #[tokio::test]
    async fn test_update_round_trips_through_the_file() {
        let file = snapshot_file();
        run_update(50, Some(9), None, file.path(), &CliConfig::default())
            .await
            .unwrap();

        let rendered = run_report(50, None, file.path(), &CliConfig::default())
            .await
            .unwrap();
        assert!(rendered.contains("(post) Trip"));
        assert!(!rendered.contains("BAD PARENT"));
    }

    #[tokio::test]
    async fn test_missing_snapshot_is_a_clear_error() {
        let err = run_report(50, None, Path::new("/missing/corpus.json"), &CliConfig::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("/missing/corpus.json"));
    }
}
