// crates/vouch-reputation/src/lib.rs
//
// vouch-reputation: Attestation graph, trust-aware PageRank, and point
// distribution for the Vouch reputation engine.
//
// Accounts attest to other accounts; this crate turns the raw attestation
// graph into a comparable trust score per account and an exact integer
// allocation of a reward pool. A configured set of trusted seeds receives
// bounded extra influence through boosted teleportation mass, an edge
// weight multiplier, and per-hop decay of that boost.

pub mod decay;
pub mod graph;
pub mod pagerank;
mod view;

pub use graph::{DuplicateEdgePolicy, EdgeRef, EffectiveEdge, GraphComputer};
pub use pagerank::PageRankOutcome;
