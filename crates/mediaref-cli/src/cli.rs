//! Command-line interface definition

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Where-used reporting for media assets in a content corpus
#[derive(Parser, Debug)]
#[command(name = "mediaref", version, about)]
pub struct Cli {
    /// Path to a toml config file overriding scan settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build and print the where-used report for one asset
    Report {
        /// Id of the media asset
        asset_id: u64,

        /// Declared parent id (defaults to the asset's stored parent)
        #[arg(long)]
        parent: Option<u64>,

        /// Path to the corpus snapshot (JSON)
        #[arg(long)]
        corpus: PathBuf,
    },

    /// Apply a partial update to one asset and rewrite the snapshot
    Update {
        /// Id of the media asset
        asset_id: u64,

        /// New parent id
        #[arg(long)]
        parent: Option<u64>,

        /// New sort order
        #[arg(long)]
        sort_order: Option<i64>,

        /// Path to the corpus snapshot (JSON)
        #[arg(long)]
        corpus: PathBuf,
    },
}
