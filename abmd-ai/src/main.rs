//! abmd-ai - Audiobook chapter reconciliation
//!
//! Reads a match job (local tracks plus one catalog book) from a JSON file,
//! aligns the local files with the book's chapters and prints the resulting
//! `MatchReport` as JSON on stdout.

use abmd_ai::services::{BookMatcher, MatchJob};
use abmd_ai::AiConfig;
use abmd_common::config::ConfigResolver;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "abmd-ai")]
#[command(about = "Match local audiobook files to catalog chapters")]
#[command(version)]
struct Args {
    /// Match job file (JSON)
    #[arg(short, long)]
    job: PathBuf,

    /// Config file (TOML); overrides ABMD_CONFIG and the platform default
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the report
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let resolver = ConfigResolver::new("abmd-ai");
    let (toml_config, source) = resolver
        .load(args.config.as_deref())
        .context("Failed to load configuration")?;
    let config = AiConfig::from_toml(&toml_config).context("Invalid configuration")?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new(format!("abmd_ai={}", config.log_level)))
                .unwrap_or_else(|_| "abmd_ai=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting abmd-ai v{}", env!("CARGO_PKG_VERSION"));
    info!(source = ?source, "Configuration loaded");

    let job_text = std::fs::read_to_string(&args.job)
        .with_context(|| format!("Failed to read job file {}", args.job.display()))?;
    let job: MatchJob = serde_json::from_str(&job_text)
        .with_context(|| format!("Failed to parse job file {}", args.job.display()))?;

    let matcher = BookMatcher::new(config.alignment.clone());
    let report = matcher
        .match_job(job, &config.attributes)
        .context("Chapter matching failed")?;

    info!(
        album = %report.album,
        strategy = ?report.strategy,
        tracks = report.tracks.len(),
        warnings = report.warnings.len(),
        "Match complete"
    );

    let output = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", output);

    Ok(())
}
