// crates/vouch-reputation/src/graph.rs
//
// The attestation graph and the engine's public entry points.
//
// Each edge (from, to) means `from` attests to (trusts) `to`. Nodes live in
// an arena indexed by integer with a separate identifier lookup table, and
// are created implicitly by the first edge that mentions them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use vouch_core::{Allocation, PageRankConfig, Scores, VouchError};

use crate::pagerank::{self, PageRankOutcome};
use crate::view::TrustView;

/// What `add_edge` does when the (from, to) pair already has an edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateEdgePolicy {
    /// Add the new base weight to the existing edge.
    #[default]
    Sum,
    /// Replace the existing base weight (last write wins).
    Overwrite,
    /// Keep a parallel edge; each one is weighted and clamped on its own.
    Allow,
}

/// A stored edge. `from` and `to` are arena indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EdgeRecord {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
}

/// A borrowed view of one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRef<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub base_weight: f64,
}

/// An edge together with the weight the solver actually uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveEdge<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub base_weight: f64,
    /// `clamp(base * multiplier, min_weight, max_weight)`, where the
    /// multiplier applies only to edges leaving a trusted seed.
    pub effective_weight: f64,
}

/// Directed weighted attestation graph plus the scoring and distribution
/// operations over it.
#[derive(Debug, Clone, Default)]
pub struct GraphComputer {
    policy: DuplicateEdgePolicy,
    /// Node identifiers in insertion order.
    nodes: Vec<String>,
    index: HashMap<String, usize>,
    edges: Vec<EdgeRecord>,
    /// (from, to) -> position in `edges`. Unused under `Allow`.
    edge_index: HashMap<(usize, usize), usize>,
}

impl GraphComputer {
    /// Create an empty graph that sums duplicate edge weights.
    pub fn new() -> Self {
        Self::with_policy(DuplicateEdgePolicy::default())
    }

    /// Create an empty graph with the given duplicate-edge policy.
    pub fn with_policy(policy: DuplicateEdgePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// `true` keeps parallel edges; `false` sums duplicate weights.
    pub fn with_allow_duplicates(allow: bool) -> Self {
        if allow {
            Self::with_policy(DuplicateEdgePolicy::Allow)
        } else {
            Self::with_policy(DuplicateEdgePolicy::Sum)
        }
    }

    pub fn policy(&self) -> DuplicateEdgePolicy {
        self.policy
    }

    /// Insert the edge `from -> to`, registering either node if new.
    ///
    /// # Errors
    /// `VouchError::InvalidEdge` if an identifier is empty or the weight is
    /// negative or non-finite. The graph is unchanged on error.
    pub fn add_edge(&mut self, from: &str, to: &str, base_weight: f64) -> Result<(), VouchError> {
        if from.is_empty() || to.is_empty() {
            return Err(VouchError::InvalidEdge(format!(
                "edge identifiers must not be empty (from: {:?}, to: {:?})",
                from, to
            )));
        }
        if !base_weight.is_finite() || base_weight < 0.0 {
            return Err(VouchError::InvalidEdge(format!(
                "weight for {} -> {} must be finite and >= 0, got {}",
                from, to, base_weight
            )));
        }

        let from_idx = self.intern(from);
        let to_idx = self.intern(to);

        let existing = self.edge_index.get(&(from_idx, to_idx)).copied();
        match (self.policy, existing) {
            (DuplicateEdgePolicy::Allow, _) => {
                self.push_edge(from_idx, to_idx, base_weight);
            }
            (DuplicateEdgePolicy::Sum, Some(pos)) => self.edges[pos].weight += base_weight,
            (DuplicateEdgePolicy::Overwrite, Some(pos)) => self.edges[pos].weight = base_weight,
            (_, None) => {
                let pos = self.push_edge(from_idx, to_idx, base_weight);
                self.edge_index.insert((from_idx, to_idx), pos);
            }
        }
        Ok(())
    }

    fn intern(&mut self, id: &str) -> usize {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(id.to_string());
        self.index.insert(id.to_string(), idx);
        idx
    }

    fn push_edge(&mut self, from: usize, to: usize, weight: f64) -> usize {
        self.edges.push(EdgeRecord { from, to, weight });
        self.edges.len() - 1
    }

    /// All node identifiers. Order is insertion order, but callers must not
    /// rely on it for anything beyond enumeration.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of stored edges (parallel edges count separately).
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Iterate over stored edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef<'_>> + '_ {
        self.edges.iter().map(|e| EdgeRef {
            from: &self.nodes[e.from],
            to: &self.nodes[e.to],
            base_weight: e.weight,
        })
    }

    /// Base weight of `from -> to`, summing parallel edges. `None` if absent.
    pub fn edge_weight(&self, from: &str, to: &str) -> Option<f64> {
        let from_idx = *self.index.get(from)?;
        let to_idx = *self.index.get(to)?;
        let mut total = None;
        for e in self.edges.iter().filter(|e| e.from == from_idx && e.to == to_idx) {
            *total.get_or_insert(0.0) += e.weight;
        }
        total
    }

    /// Every edge with the weight the solver uses under `config`, in the
    /// solver's canonical order (ascending source, then target identifier).
    pub fn effective_edges(&self, config: &PageRankConfig) -> Vec<EffectiveEdge<'_>> {
        let view = TrustView::build(self, config);
        view.out_edges()
            .map(|(src, dst, edge, weight)| EffectiveEdge {
                from: view.id(src),
                to: view.id(dst),
                base_weight: self.edges[edge].weight,
                effective_weight: weight,
            })
            .collect()
    }

    /// Compute trust-aware PageRank scores.
    ///
    /// An empty graph yields an empty score vector. Running out of
    /// iterations is not an error; the last vector is returned.
    pub fn calculate_pagerank(&self, config: &PageRankConfig) -> Scores {
        self.calculate_pagerank_detailed(config).scores
    }

    /// Same as [`calculate_pagerank`](Self::calculate_pagerank), but also
    /// reports iteration count, convergence, and the final L1 residual.
    pub fn calculate_pagerank_detailed(&self, config: &PageRankConfig) -> PageRankOutcome {
        pagerank::solve(self, config)
    }

    /// Split `total_pool` points over the graph's nodes proportionally to
    /// `scores` using the largest-remainder method.
    ///
    /// Graph nodes absent from `scores` count as zero. The allocation sums to
    /// exactly `total_pool` unless `scores` is empty or sums to zero, in which
    /// case every node gets 0 and the pool is reported as `unallocated`.
    ///
    /// # Errors
    /// `VouchError::InvalidScore` for negative or non-finite scores.
    pub fn distribute_points(&self, scores: &Scores, total_pool: u64) -> Result<Allocation, VouchError> {
        vouch_economics::distribute_over(self.nodes.iter().map(String::as_str), scores, total_pool)
    }

    pub(crate) fn edge_records(&self) -> &[EdgeRecord] {
        &self.edges
    }
}
