// crates/vouch-cli/src/main.rs
//
// CLI entrypoint for the Vouch reputation engine.
//
// Loads configuration, initializes tracing, and runs an offline scoring
// or distribution pass over a JSON edge list.

mod commands;
mod config;
mod input;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use commands::distribute::DistributeCmd;
use commands::rank::RankCmd;
use config::{CliConfig, ConfigOrigin};
use output::OutputFormat;

/// Vouch CLI — trust-aware reputation scoring and point distribution.
#[derive(Parser, Debug)]
#[command(
    name = "vouch",
    version = "0.1.0",
    about = "Score an attestation graph and distribute a point pool"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Rank nodes by trust-aware PageRank.
    Rank(RankCmd),

    /// Score the graph and distribute a point pool.
    Distribute(DistributeCmd),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, origin) = CliConfig::load(cli.config.as_deref())?;

    // Initialize tracing subscriber for structured logging. Logs go to
    // stderr so JSON output on stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    match &origin {
        ConfigOrigin::File(path) => tracing::info!("Loaded configuration from {}", path.display()),
        ConfigOrigin::Missing(path) => tracing::warn!(
            "Config file {} not found. Using defaults.",
            path.display()
        ),
        ConfigOrigin::Defaults => tracing::debug!("No config file given. Using defaults."),
    }

    match &cli.command {
        Commands::Rank(cmd) => commands::rank::run(cmd, &config, cli.format)?,
        Commands::Distribute(cmd) => commands::distribute::run(cmd, &config, cli.format)?,
    }

    Ok(())
}
