use anyhow::Result;
use clap::Parser;

use mediaref_cli::{
    cli::{Cli, Commands},
    commands,
    config::CliConfig,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = format!("mediaref={0},mediaref_scanner={0},mediaref_resolver={0}", log_level);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .init();

    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Report {
            asset_id,
            parent,
            corpus,
        } => {
            let rendered = commands::run_report(asset_id, parent, &corpus, &config).await?;
            print!("{}", rendered);
        }
        Commands::Update {
            asset_id,
            parent,
            sort_order,
            corpus,
        } => {
            commands::run_update(asset_id, parent, sort_order, &corpus, &config).await?;
        }
    }

    Ok(())
}
