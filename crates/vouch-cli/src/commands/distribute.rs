// crates/vouch-cli/src/commands/distribute.rs
//
// `vouch distribute --edges <file> --pool <N>` — score the graph and split
// a point pool proportionally to the scores.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use vouch_core::{Allocation, Scores};

use crate::config::CliConfig;
use crate::input::{build_graph, load_edges};
use crate::output::{format_json, format_table, rank_rows, OutputFormat};

/// Distribute a point pool over the graph.
#[derive(Debug, Args)]
pub struct DistributeCmd {
    /// JSON edge list: [{"from": ..., "to": ..., "weight": ...}].
    #[arg(long)]
    pub edges: PathBuf,

    /// Total number of points to distribute.
    #[arg(long)]
    pub pool: u64,
}

#[derive(Debug, Serialize)]
struct DistributeReport<'a> {
    pool: u64,
    scores: &'a Scores,
    allocation: &'a Allocation,
}

/// Run the distribute command.
pub fn run(cmd: &DistributeCmd, config: &CliConfig, format: OutputFormat) -> anyhow::Result<()> {
    let edges = load_edges(&cmd.edges)?;
    let graph = build_graph(&edges, config.graph.duplicate_policy)?;
    let scores = graph.calculate_pagerank(&config.pagerank);
    let allocation = graph.distribute_points(&scores, cmd.pool)?;

    if allocation.unallocated > 0 {
        tracing::warn!(
            unallocated = allocation.unallocated,
            "Scores sum to zero; pool left undistributed"
        );
    }

    match format {
        OutputFormat::Json => {
            let report = DistributeReport {
                pool: cmd.pool,
                scores: &scores,
                allocation: &allocation,
            };
            println!("{}", format_json(&report)?);
        }
        OutputFormat::Table => {
            println!("{}", format_table(&rank_rows(&scores, Some(&allocation))));
            println!();
            println!("Pool:        {}", cmd.pool);
            println!("Allocated:   {}", allocation.allocated());
            println!("Unallocated: {}", allocation.unallocated);
        }
    }

    Ok(())
}
