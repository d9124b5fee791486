// crates/vouch-core/src/error.rs

use thiserror::Error;

/// Engine-wide error types for the Vouch reputation engine.
///
/// Degenerate inputs (an empty graph, a zero-sum score vector) are not
/// errors; they produce well-defined empty or zero results instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VouchError {
    /// Edge rejected at insertion (empty identifier, negative or non-finite weight).
    #[error("Invalid edge: {0}")]
    InvalidEdge(String),

    /// Configuration parameter out of range.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Score vector entry that cannot be apportioned (negative or non-finite).
    #[error("Invalid score: {0}")]
    InvalidScore(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for VouchError {
    fn from(e: serde_json::Error) -> Self {
        VouchError::Serialization(e.to_string())
    }
}
