//! Engine configuration with documented tunables
//!
//! Gameplay numbers are collected here with notes on how they shape a
//! session. The defaults reproduce the classic ruleset: 10 puzzles per
//! session, 2 answer attempts, 3 hints.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::core::error::{GameError, Result};

/// Configuration for the puzzle engine
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === PUZZLE BUDGETS ===
    /// Answer attempts per puzzle before it is forced to `Failed`
    ///
    /// At the default (2), a player gets one retry with feedback before
    /// the sentence is revealed.
    pub max_attempts: u8,

    /// Hint budget per puzzle
    ///
    /// Hints reveal, in order: the first word, the last word, the middle
    /// word. Each costs `hint_penalty` points.
    pub max_hints: u8,

    /// Terminal puzzles per session
    ///
    /// The session completes and is handed to persistence when this many
    /// puzzles reach a terminal state (solved, failed, or skipped alike).
    pub session_length: u8,

    // === GENERATION ===
    /// Sampling retries before generation falls back to summary sentences
    ///
    /// Each retry draws one random corpus entry for the age and scans its
    /// sentences for a word-count match.
    pub generation_retries: u32,

    // === VERIFICATION THRESHOLDS ===
    /// Minimum fraction of words in their exact position for a pass
    ///
    /// Below 20 words this effectively demands a perfect ordering; the
    /// slack only matters for long sentences.
    pub position_threshold: f64,

    /// Minimum longest-common-subsequence fraction for a pass
    ///
    /// Looser than the position threshold because the LCS fraction never
    /// drops below the position fraction.
    pub sequence_threshold: f64,

    // === SCORING ===
    /// Score before penalties
    pub base_score: u32,

    /// Points lost per hint used
    pub hint_penalty: u32,

    /// Points lost per attempt after the first
    pub attempt_penalty: u32,

    /// Scale of the misplaced-word penalty: floor((1 - position) * scale)
    pub position_penalty_scale: f64,

    // === RETENTION ===
    /// Idle time before the sweep evicts a puzzle or session
    pub retention_ttl_secs: u64,

    /// How often the retention sweep runs
    pub sweep_period_secs: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            max_hints: 3,
            session_length: 10,
            generation_retries: 100,
            position_threshold: 0.95,
            sequence_threshold: 0.90,
            base_score: 100,
            hint_penalty: 10,
            attempt_penalty: 5,
            position_penalty_scale: 20.0,
            retention_ttl_secs: 24 * 60 * 60,
            sweep_period_secs: 60 * 60,
        }
    }
}

impl GameConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.max_attempts == 0 {
            return Err("max_attempts must be at least 1".into());
        }
        if self.session_length == 0 {
            return Err("session_length must be at least 1".into());
        }
        if self.generation_retries == 0 {
            return Err("generation_retries must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.position_threshold)
            || !(0.0..=1.0).contains(&self.sequence_threshold)
        {
            return Err(format!(
                "similarity thresholds must lie in 0..=1 (position {}, sequence {})",
                self.position_threshold, self.sequence_threshold
            ));
        }
        if self.position_penalty_scale < 0.0 {
            return Err("position_penalty_scale must not be negative".into());
        }
        Ok(())
    }

    /// Parse a config from TOML text; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig =
            toml::from_str(content).map_err(|e| GameError::Config(e.to_string()))?;
        config.validate().map_err(GameError::Config)?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            GameError::Config(msg) => GameError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.retention_ttl_secs)
    }

    pub fn sweep_period(&self) -> Duration {
        Duration::from_secs(self.sweep_period_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let mut config = GameConfig::default();
        config.max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let mut config = GameConfig::default();
        config.position_threshold = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.contains("thresholds"));
    }

    #[test]
    fn test_partial_toml_takes_defaults() {
        let config = GameConfig::from_toml_str("max_hints = 5\nsession_length = 3\n").unwrap();
        assert_eq!(config.max_hints, 5);
        assert_eq!(config.session_length, 3);
        assert_eq!(config.max_attempts, 2);
        assert_eq!(config.generation_retries, 100);
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(GameConfig::from_toml_str("max_attempts = \"two\"").is_err());
        assert!(GameConfig::from_toml_str("max_attempts = 0").is_err());
    }
}
