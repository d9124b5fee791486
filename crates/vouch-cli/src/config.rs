// crates/vouch-cli/src/config.rs
//
// Configuration for the `vouch` CLI.
// Loaded from a TOML file or populated with defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use vouch_core::{PageRankConfig, VouchError};
use vouch_reputation::DuplicateEdgePolicy;

/// Runtime configuration for a CLI run.
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Log level used when `RUST_LOG` is unset: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Graph construction settings.
    #[serde(default)]
    pub graph: GraphSection,

    /// Solver and trust parameters.
    #[serde(default)]
    pub pagerank: PageRankConfig,
}

/// `[graph]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphSection {
    /// How repeated (from, to) edges are merged: "sum", "overwrite", or "allow".
    #[serde(default)]
    pub duplicate_policy: DuplicateEdgePolicy,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            graph: GraphSection::default(),
            pagerank: PageRankConfig::default(),
        }
    }
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Read from this file.
    File(PathBuf),
    /// The named file does not exist; defaults are in use.
    Missing(PathBuf),
    /// No file was named; defaults are in use.
    Defaults,
}

impl CliConfig {
    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, VouchError> {
        let config: CliConfig =
            toml::from_str(contents).map_err(|e| VouchError::Serialization(e.to_string()))?;
        config.pagerank.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file at the given path.
    ///
    /// A missing file falls back to defaults; a file that exists but cannot
    /// be parsed or fails validation is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<(Self, ConfigOrigin)> {
        let Some(path) = path else {
            return Ok((Self::default(), ConfigOrigin::Defaults));
        };
        if !path.exists() {
            return Ok((Self::default(), ConfigOrigin::Missing(path.to_path_buf())));
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_toml_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok((config, ConfigOrigin::File(path.to_path_buf())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = CliConfig::from_toml_str("").unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.graph.duplicate_policy, DuplicateEdgePolicy::Sum);
        assert_eq!(config.pagerank, PageRankConfig::default());
    }

    #[test]
    fn full_file_parses() {
        let toml = r#"
            log_level = "debug"

            [graph]
            duplicate_policy = "allow"

            [pagerank]
            damping_factor = 0.9
            max_iterations = 50
            tolerance = 1e-8
            min_weight = 0.1
            max_weight = 2.0

            [pagerank.trust]
            trusted_seeds = ["alice", "bob", "alice"]
            trust_multiplier = 3.0
            trust_share = 0.25
            trust_decay = 0.75
        "#;
        let config = CliConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.graph.duplicate_policy, DuplicateEdgePolicy::Allow);
        let pr = &config.pagerank;
        assert!((pr.damping_factor() - 0.9).abs() < 1e-12);
        assert_eq!(pr.max_iterations(), 50);
        assert!((pr.max_weight() - 2.0).abs() < 1e-12);
        assert_eq!(pr.trust().trusted_seeds().len(), 2);
        assert!((pr.trust().trust_decay() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_values_rejected() {
        let toml = r#"
            [pagerank]
            damping_factor = 1.5
        "#;
        assert!(matches!(
            CliConfig::from_toml_str(toml),
            Err(VouchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn malformed_toml_is_serialization_error() {
        assert!(matches!(
            CliConfig::from_toml_str("[pagerank\n"),
            Err(VouchError::Serialization(_))
        ));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("vouch-config-that-does-not-exist.toml");
        let (config, origin) = CliConfig::load(Some(&path)).unwrap();
        assert_eq!(origin, ConfigOrigin::Missing(path));
        assert_eq!(config.log_level, "info");
    }
}
