//! Configuration for the roll engine.

use serde::{Deserialize, Serialize};

use crate::dice::Die;

/// Lowest difficulty the table allows.
pub const MIN_DIFFICULTY: u32 = 1;
/// Highest difficulty the table allows.
pub const MAX_DIFFICULTY: u32 = 12;

/// Configuration for a [`RollEngine`](crate::engine::RollEngine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Difficulty used when no opposing actor is selected (1-12).
    pub default_difficulty: u32,
    /// Die value at or above which a check is a critical success.
    pub crit_threshold: u32,
    /// Die rolled for checks, destiny re-rolls and destiny dice.
    pub check_die: Die,
    /// Die rolled for initiative.
    pub initiative_die: Die,
    /// RNG seed for reproducible rolls; entropy when unset.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_difficulty: 8,
            crit_threshold: 12,
            check_die: Die::D12,
            initiative_die: Die::D12,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the default difficulty (clamped to 1-12).
    pub fn with_default_difficulty(mut self, difficulty: u32) -> Self {
        self.default_difficulty = difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY);
        self
    }

    /// Set the crit threshold (at least 2, so a 1 is never a crit success).
    pub fn with_crit_threshold(mut self, threshold: u32) -> Self {
        self.crit_threshold = threshold.max(2);
        self
    }

    /// Clamp values that may have come from an untrusted config file.
    pub fn normalized(self) -> Self {
        let difficulty = self.default_difficulty;
        let threshold = self.crit_threshold;
        self.with_default_difficulty(difficulty)
            .with_crit_threshold(threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.default_difficulty, 8);
        assert_eq!(cfg.crit_threshold, 12);
        assert_eq!(cfg.check_die, Die::D12);
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn builder_methods() {
        let cfg = EngineConfig::default()
            .with_seed(123)
            .with_default_difficulty(10)
            .with_crit_threshold(11);
        assert_eq!(cfg.seed, Some(123));
        assert_eq!(cfg.default_difficulty, 10);
        assert_eq!(cfg.crit_threshold, 11);
    }

    #[test]
    fn difficulty_clamped() {
        let cfg = EngineConfig::default().with_default_difficulty(0);
        assert_eq!(cfg.default_difficulty, 1);
        let cfg = EngineConfig::default().with_default_difficulty(99);
        assert_eq!(cfg.default_difficulty, 12);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: EngineConfig =
            serde_json::from_str(r#"{ "default_difficulty": 40, "seed": 7 }"#).unwrap();
        let cfg = cfg.normalized();
        assert_eq!(cfg.default_difficulty, 12);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.initiative_die, Die::D12);
    }
}
