//! screener-sync - one scheduled run of the source sync pipeline.
//!
//! Meant to be invoked by an external scheduler (cron or similar);
//! each invocation is one full pass over the configured sources.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use screener_pipeline::{load_sources, run, FtpsTransfer, HttpCsvFetcher, TransferConfig};

#[derive(Parser)]
#[command(name = "screener-sync")]
#[command(about = "Fetch configured source lists and deliver them for ingestion", long_about = None)]
struct Cli {
    /// Source configuration file (JSON mapping of source name to URL/PARAMS)
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Directory for staging artifacts
    #[arg(short, long, default_value = ".")]
    staging_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "screener_sync=info,screener_pipeline=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let transfer_config = TransferConfig::from_env().context("transfer credentials")?;
    let sources = load_sources(&cli.config)
        .with_context(|| format!("loading sources from {}", cli.config.display()))?;

    let fetcher = HttpCsvFetcher::new();
    let mut transfer =
        FtpsTransfer::connect(&transfer_config).context("connecting to transfer host")?;

    let report = run(&sources, &fetcher, &mut transfer, &cli.staging_dir);

    for entry in &report.sources {
        match &entry.outcome {
            Ok(()) => tracing::info!(source = %entry.source, "delivered"),
            Err(e) => tracing::error!(source = %entry.source, "failed: {e}"),
        }
    }
    if !report.is_clean() {
        anyhow::bail!(
            "{} of {} sources failed",
            report.failed(),
            report.sources.len()
        );
    }
    Ok(())
}
