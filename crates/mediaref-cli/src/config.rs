//! CLI configuration

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use mediaref_scanner::ScanConfig;

/// CLI configuration file contents
///
/// ```toml
/// [scan]
/// page_size = 50
/// post_types = ["post", "page", "article"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Scan settings
    #[serde(default)]
    pub scan: ScanConfig,
}

impl CliConfig {
    /// Load configuration, falling back to defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))
    }
}
