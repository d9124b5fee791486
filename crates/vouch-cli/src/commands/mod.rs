// crates/vouch-cli/src/commands/mod.rs
//
// Command module declarations for the Vouch CLI.

pub mod distribute;
pub mod rank;
