// crates/vouch-economics/src/lib.rs
//
// vouch-economics: Exact integer point distribution for the Vouch
// reputation engine.
//
// Turns a score vector into a per-node allocation of a finite point pool
// with no rounding leakage.

pub mod distribution;

pub use distribution::{distribute, distribute_over};
