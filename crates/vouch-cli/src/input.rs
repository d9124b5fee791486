// crates/vouch-cli/src/input.rs
//
// Edge list input for the CLI.
//
// The edge file is a JSON array of attestations:
//   [{"from": "alice", "to": "bob", "weight": 0.8}, ...]
// `weight` defaults to 1.0 when omitted.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use vouch_core::VouchError;
use vouch_reputation::{DuplicateEdgePolicy, GraphComputer};

/// One attestation edge as read from the input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeInput {
    pub from: String,
    pub to: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

/// Parse a JSON edge list.
pub fn parse_edges(json: &str) -> Result<Vec<EdgeInput>, VouchError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse the edge file at `path`.
pub fn load_edges(path: &Path) -> anyhow::Result<Vec<EdgeInput>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading edges {}", path.display()))?;
    parse_edges(&contents).with_context(|| format!("parsing edges {}", path.display()))
}

/// Build a graph from parsed edges, failing on the first invalid one.
pub fn build_graph(edges: &[EdgeInput], policy: DuplicateEdgePolicy) -> anyhow::Result<GraphComputer> {
    let mut graph = GraphComputer::with_policy(policy);
    for (i, edge) in edges.iter().enumerate() {
        graph
            .add_edge(&edge.from, &edge.to, edge.weight)
            .with_context(|| format!("edge #{} ({} -> {})", i, edge.from, edge.to))?;
    }
    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Built attestation graph"
    );
    Ok(graph)
}
