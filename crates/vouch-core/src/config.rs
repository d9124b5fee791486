// crates/vouch-core/src/config.rs
//
// Tunable parameters for the trust-aware PageRank solve.
//
// Both config types validate on construction and on every setter, so a
// value that made it into a config is always in range. Configs decoded
// with serde must be passed through `validate()` before use.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::VouchError;

/// Trusted seed set and the parameters controlling how much extra
/// influence the seeds receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustConfig {
    /// Identifiers of the trusted seed accounts. Duplicates collapse.
    #[serde(default)]
    trusted_seeds: BTreeSet<String>,

    /// Multiplier (>= 0) applied to the base weight of edges leaving a seed.
    #[serde(default = "default_trust_multiplier")]
    trust_multiplier: f64,

    /// Fraction of probability mass in [0, 1] reserved for the seeds.
    #[serde(default = "default_trust_share")]
    trust_share: f64,

    /// Per-hop decay in [0, 1] applied to teleportation mass by distance
    /// from the nearest seed.
    #[serde(default = "default_trust_decay")]
    trust_decay: f64,
}

fn default_trust_multiplier() -> f64 {
    2.0
}

fn default_trust_share() -> f64 {
    0.5
}

fn default_trust_decay() -> f64 {
    0.5
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            trusted_seeds: BTreeSet::new(),
            trust_multiplier: default_trust_multiplier(),
            trust_share: default_trust_share(),
            trust_decay: default_trust_decay(),
        }
    }
}

impl TrustConfig {
    /// Create a validated trust configuration.
    pub fn new<I, S>(
        trusted_seeds: I,
        trust_multiplier: f64,
        trust_share: f64,
        trust_decay: f64,
    ) -> Result<Self, VouchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let config = Self {
            trusted_seeds: trusted_seeds.into_iter().map(Into::into).collect(),
            trust_multiplier,
            trust_share,
            trust_decay,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every field, returning the first violation found.
    pub fn validate(&self) -> Result<(), VouchError> {
        for seed in &self.trusted_seeds {
            check_seed(seed)?;
        }
        check_multiplier(self.trust_multiplier)?;
        check_unit_interval("trust_share", self.trust_share)?;
        check_unit_interval("trust_decay", self.trust_decay)?;
        Ok(())
    }

    /// The trusted seed identifiers, in ascending order.
    pub fn trusted_seeds(&self) -> &BTreeSet<String> {
        &self.trusted_seeds
    }

    /// Returns `true` if `id` is a trusted seed.
    pub fn is_trusted(&self, id: &str) -> bool {
        self.trusted_seeds.contains(id)
    }

    pub fn trust_multiplier(&self) -> f64 {
        self.trust_multiplier
    }

    pub fn trust_share(&self) -> f64 {
        self.trust_share
    }

    pub fn trust_decay(&self) -> f64 {
        self.trust_decay
    }

    /// Add a trusted seed. Returns `false` if it was already present.
    pub fn add_seed(&mut self, id: impl Into<String>) -> Result<bool, VouchError> {
        let id = id.into();
        check_seed(&id)?;
        Ok(self.trusted_seeds.insert(id))
    }

    /// Remove a trusted seed. Returns `true` if it was present.
    pub fn remove_seed(&mut self, id: &str) -> bool {
        self.trusted_seeds.remove(id)
    }

    pub fn set_trust_multiplier(&mut self, value: f64) -> Result<(), VouchError> {
        check_multiplier(value)?;
        self.trust_multiplier = value;
        Ok(())
    }

    pub fn set_trust_share(&mut self, value: f64) -> Result<(), VouchError> {
        check_unit_interval("trust_share", value)?;
        self.trust_share = value;
        Ok(())
    }

    pub fn set_trust_decay(&mut self, value: f64) -> Result<(), VouchError> {
        check_unit_interval("trust_decay", value)?;
        self.trust_decay = value;
        Ok(())
    }
}

/// Parameters for the power-iteration solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRankConfig {
    /// Probability of following an edge rather than teleporting, in (0, 1).
    #[serde(default = "default_damping_factor")]
    damping_factor: f64,

    /// Upper bound on solver iterations. Must be at least 1.
    #[serde(default = "default_max_iterations")]
    max_iterations: u32,

    /// L1 change between iterations below which the solve stops.
    #[serde(default = "default_tolerance")]
    tolerance: f64,

    /// Lower clamp bound for effective edge weights.
    #[serde(default = "default_min_weight")]
    min_weight: f64,

    /// Upper clamp bound for effective edge weights.
    #[serde(default = "default_max_weight")]
    max_weight: f64,

    /// Trusted seed configuration.
    #[serde(default)]
    trust: TrustConfig,
}

fn default_damping_factor() -> f64 {
    0.85
}

fn default_max_iterations() -> u32 {
    100
}

fn default_tolerance() -> f64 {
    1e-6
}

fn default_min_weight() -> f64 {
    0.0
}

fn default_max_weight() -> f64 {
    1.0
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: default_damping_factor(),
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
            min_weight: default_min_weight(),
            max_weight: default_max_weight(),
            trust: TrustConfig::default(),
        }
    }
}

impl PageRankConfig {
    /// Create a validated solver configuration.
    pub fn new(
        damping_factor: f64,
        max_iterations: u32,
        tolerance: f64,
        min_weight: f64,
        max_weight: f64,
        trust: TrustConfig,
    ) -> Result<Self, VouchError> {
        let config = Self {
            damping_factor,
            max_iterations,
            tolerance,
            min_weight,
            max_weight,
            trust,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every field (including the nested trust config).
    pub fn validate(&self) -> Result<(), VouchError> {
        check_damping(self.damping_factor)?;
        check_max_iterations(self.max_iterations)?;
        check_tolerance(self.tolerance)?;
        check_weight_bounds(self.min_weight, self.max_weight)?;
        self.trust.validate()
    }

    pub fn damping_factor(&self) -> f64 {
        self.damping_factor
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn min_weight(&self) -> f64 {
        self.min_weight
    }

    pub fn max_weight(&self) -> f64 {
        self.max_weight
    }

    pub fn trust(&self) -> &TrustConfig {
        &self.trust
    }

    /// Mutable access to the trust config. Its setters validate.
    pub fn trust_mut(&mut self) -> &mut TrustConfig {
        &mut self.trust
    }

    /// Replace the trust config, keeping the solver parameters.
    pub fn with_trust(mut self, trust: TrustConfig) -> Result<Self, VouchError> {
        trust.validate()?;
        self.trust = trust;
        Ok(self)
    }

    pub fn set_damping_factor(&mut self, value: f64) -> Result<(), VouchError> {
        check_damping(value)?;
        self.damping_factor = value;
        Ok(())
    }

    pub fn set_max_iterations(&mut self, value: u32) -> Result<(), VouchError> {
        check_max_iterations(value)?;
        self.max_iterations = value;
        Ok(())
    }

    pub fn set_tolerance(&mut self, value: f64) -> Result<(), VouchError> {
        check_tolerance(value)?;
        self.tolerance = value;
        Ok(())
    }

    /// Set both clamp bounds at once so `min <= max` holds at every step.
    pub fn set_weight_bounds(&mut self, min_weight: f64, max_weight: f64) -> Result<(), VouchError> {
        check_weight_bounds(min_weight, max_weight)?;
        self.min_weight = min_weight;
        self.max_weight = max_weight;
        Ok(())
    }

    /// Clamp a weight into `[min_weight, max_weight]`.
    pub fn clamp_weight(&self, weight: f64) -> f64 {
        weight.clamp(self.min_weight, self.max_weight)
    }
}

fn invalid(msg: String) -> VouchError {
    VouchError::InvalidConfig(msg)
}

fn check_seed(id: &str) -> Result<(), VouchError> {
    if id.is_empty() {
        return Err(invalid("trusted seed identifier must not be empty".to_string()));
    }
    Ok(())
}

fn check_multiplier(value: f64) -> Result<(), VouchError> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(format!(
            "trust_multiplier must be finite and >= 0, got {}",
            value
        )));
    }
    Ok(())
}

fn check_unit_interval(name: &str, value: f64) -> Result<(), VouchError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid(format!("{} must be in [0, 1], got {}", name, value)));
    }
    Ok(())
}

fn check_damping(value: f64) -> Result<(), VouchError> {
    if !(value > 0.0 && value < 1.0) {
        return Err(invalid(format!(
            "damping_factor must be in (0, 1), got {}",
            value
        )));
    }
    Ok(())
}

fn check_max_iterations(value: u32) -> Result<(), VouchError> {
    if value == 0 {
        return Err(invalid("max_iterations must be at least 1".to_string()));
    }
    Ok(())
}

fn check_tolerance(value: f64) -> Result<(), VouchError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(format!(
            "tolerance must be finite and > 0, got {}",
            value
        )));
    }
    Ok(())
}

fn check_weight_bounds(min_weight: f64, max_weight: f64) -> Result<(), VouchError> {
    if !min_weight.is_finite() || !max_weight.is_finite() {
        return Err(invalid(format!(
            "weight bounds must be finite, got [{}, {}]",
            min_weight, max_weight
        )));
    }
    if min_weight < 0.0 {
        return Err(invalid(format!("min_weight must be >= 0, got {}", min_weight)));
    }
    if min_weight > max_weight {
        return Err(invalid(format!(
            "min_weight ({}) exceeds max_weight ({})",
            min_weight, max_weight
        )));
    }
    Ok(())
}
