// crates/vouch-core/src/lib.rs
//
// vouch-core: Core types, configuration, and errors for the Vouch
// reputation engine.
//
// This is the leaf crate that the other crates in the workspace depend on.
// It defines the solver and trust configuration, the score and allocation
// vectors, and the error taxonomy.

pub mod config;
pub mod error;
pub mod scores;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use vouch_core::PageRankConfig;`

pub use config::{PageRankConfig, TrustConfig};
pub use error::VouchError;
pub use scores::{Allocation, Scores};
