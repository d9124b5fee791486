// crates/vouch-cli/src/commands/rank.rs
//
// `vouch rank --edges <file>` — score every node of an attestation graph.

use std::path::PathBuf;

use clap::Args;

use crate::config::CliConfig;
use crate::input::{build_graph, load_edges};
use crate::output::{format_json, format_table, rank_rows, OutputFormat};

/// Rank nodes by trust-aware PageRank.
#[derive(Debug, Args)]
pub struct RankCmd {
    /// JSON edge list: [{"from": ..., "to": ..., "weight": ...}].
    #[arg(long)]
    pub edges: PathBuf,

    /// Also report iteration count and convergence.
    #[arg(long)]
    pub detailed: bool,
}

/// Run the rank command.
pub fn run(cmd: &RankCmd, config: &CliConfig, format: OutputFormat) -> anyhow::Result<()> {
    let edges = load_edges(&cmd.edges)?;
    let graph = build_graph(&edges, config.graph.duplicate_policy)?;
    let outcome = graph.calculate_pagerank_detailed(&config.pagerank);

    match format {
        OutputFormat::Json if cmd.detailed => println!("{}", format_json(&outcome)?),
        OutputFormat::Json => println!("{}", format_json(&outcome.scores)?),
        OutputFormat::Table => {
            println!("{}", format_table(&rank_rows(&outcome.scores, None)));
            if cmd.detailed {
                println!();
                println!("Iterations: {}", outcome.iterations);
                println!("Converged:  {}", outcome.converged);
                println!("Residual:   {:e}", outcome.residual);
            }
        }
    }

    Ok(())
}
