// bin/replay.rs - TWAB scenario replay
use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use twab_common::types::DEFAULT_CARDINALITY;
use twab_core::{AccountBook, ReplayConfig, Scenario};

#[derive(Parser, Debug)]
#[command(name = "twab-replay")]
#[command(about = "Replay balance events and answer TWAB queries", long_about = None)]
struct Args {
    /// Scenario file (.yaml, .yml or .json)
    #[arg(short, long)]
    scenario: PathBuf,

    /// Config file (.toml, .yaml, .yml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level, overrides the config file
    #[arg(short, long)]
    log_level: Option<String>,

    /// Write a JSON snapshot of every account here, overrides the config file
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Parse arguments
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ReplayConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ReplayConfig::default(),
    };
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    if let Some(path) = &args.snapshot {
        config.snapshot_path = Some(path.display().to_string());
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Config validation failed: {}", e))?;

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_level(true)
        .init();

    tracing::info!("Starting TWAB replay");
    tracing::info!("  Scenario: {}", args.scenario.display());
    tracing::info!("  Period length: {}s", config.periods.period_length);
    tracing::info!("  Period offset: {}", config.periods.period_offset);
    tracing::info!("  Ring capacity: {}", DEFAULT_CARDINALITY);

    let scenario = Scenario::load(&args.scenario)
        .with_context(|| format!("Failed to load scenario {}", args.scenario.display()))?;

    let mut book = AccountBook::<DEFAULT_CARDINALITY>::new(config.periods);
    let report = book.replay(&scenario)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for rejection in &report.rejected {
        writeln!(out, "{}", serde_json::to_string(rejection)?)?;
    }
    for answer in &report.answers {
        writeln!(out, "{}", serde_json::to_string(answer)?)?;
    }

    if let Some(path) = config.snapshot_path() {
        let file = std::fs::File::create(&path)
            .with_context(|| format!("Failed to create snapshot {}", path.display()))?;
        serde_json::to_writer_pretty(file, &book.snapshot())?;
        tracing::info!("Snapshot written to {}", path.display());
    }

    Ok(())
}
