// crates/vouch-cli/src/output.rs
//
// Output formatting utilities for the Vouch CLI.
// Supports table and JSON output modes.

use clap::ValueEnum;
use serde::Serialize;
use tabled::{Table, Tabled};
use vouch_core::{Allocation, Scores};

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table output (default).
    Table,
    /// JSON output for machine consumption.
    Json,
}

/// A row in the ranking table.
#[derive(Debug, Tabled)]
pub struct RankRow {
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[tabled(rename = "Node")]
    pub node: String,
    #[tabled(rename = "Score")]
    pub score: String,
    #[tabled(rename = "Points")]
    pub points: String,
}

/// Nodes ordered by descending score, ties by ascending identifier.
pub fn ranked(scores: &Scores) -> Vec<(&str, f64)> {
    let mut rows: Vec<(&str, f64)> = scores.iter().map(|(id, &s)| (id.as_str(), s)).collect();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    rows
}

/// Build table rows from scores, with points when an allocation is given.
pub fn rank_rows(scores: &Scores, allocation: Option<&Allocation>) -> Vec<RankRow> {
    ranked(scores)
        .into_iter()
        .enumerate()
        .map(|(i, (node, score))| RankRow {
            rank: i + 1,
            node: node.to_string(),
            score: format!("{:.6}", score),
            points: allocation.map_or_else(|| "--".to_string(), |a| a.get(node).to_string()),
        })
        .collect()
}

/// Format a slice of Tabled items as a table string.
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}
