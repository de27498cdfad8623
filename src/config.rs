// Configuration module for reading Snakepit.toml
// This module provides OOP-style configuration management for the Snakepit bot

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub timing: TimingConfig,
    pub search: SearchConfig,
    pub thresholds: ThresholdsConfig,
    pub weights: WeightsConfig,
    pub player: PlayerConfig,
    pub debug: DebugConfig,
}

/// Per-tick time budget
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    pub tick_budget_ms: u64,
    pub safety_margin_ms: u64,
}

impl TimingConfig {
    /// Computes the budget the space searches may spend
    pub fn effective_budget_ms(&self) -> u64 {
        self.tick_budget_ms.saturating_sub(self.safety_margin_ms)
    }
}

/// Depth limits for the bounded space searches
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    pub own_space_max_depth: u32,
    pub nemesis_space_max_depth: u32,
}

/// Limits below which a candidate move is tagged
#[derive(Debug, Deserialize, Clone)]
pub struct ThresholdsConfig {
    pub trap_space: u32,
    pub narrow_corridor_width: u32,
}

/// Tag weights and continuous bonus weights
#[derive(Debug, Deserialize, Clone)]
pub struct WeightsConfig {
    pub death: i64,
    pub taken_soon: i64,
    pub trap: i64,

    // Modulated by last tick's state
    pub death_in_two: i64,
    pub death_in_two_when_trapped: i64,
    pub narrow_corridor: i64,
    pub narrow_corridor_in_corridor: i64,
    pub narrow_corridor_when_trapped: i64,

    pub space: i64,
    pub nemesis_space_removed: i64,
}

/// Identity used when reading game results
#[derive(Debug, Deserialize, Clone)]
pub struct PlayerConfig {
    pub name: String,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snakepit.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snakepit.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snakepit.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snakepit.toml
    pub fn default_hardcoded() -> Self {
        Config {
            timing: TimingConfig {
                tick_budget_ms: 200,
                safety_margin_ms: 40,
            },
            search: SearchConfig {
                own_space_max_depth: 150,
                nemesis_space_max_depth: 100,
            },
            thresholds: ThresholdsConfig {
                trap_space: 80,
                narrow_corridor_width: 2,
            },
            weights: WeightsConfig {
                death: -99999,
                taken_soon: -20000,
                trap: -10000,
                death_in_two: -100,
                death_in_two_when_trapped: 0,
                narrow_corridor: -3000,
                narrow_corridor_in_corridor: -300,
                narrow_corridor_when_trapped: 0,
                space: 1,
                nemesis_space_removed: 2,
            },
            player: PlayerConfig {
                name: "snakepit-bot".to_string(),
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "snakepit_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!(
                "Could not load Snakepit.toml ({}), using hardcoded defaults",
                e
            );
            Self::default_hardcoded()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_budget_calculation() {
        let config = Config::default_hardcoded();
        assert_eq!(config.timing.effective_budget_ms(), 160);
    }

    #[test]
    fn test_effective_budget_saturates() {
        let timing = TimingConfig {
            tick_budget_ms: 10,
            safety_margin_ms: 50,
        };
        assert_eq!(timing.effective_budget_ms(), 0);
    }

    #[test]
    fn test_snakepit_toml_can_be_parsed() {
        let result = Config::from_file("Snakepit.toml");
        assert!(
            result.is_ok(),
            "Failed to parse Snakepit.toml: {:?}",
            result.err()
        );
    }

    #[test]
    fn test_all_config_values_match_hardcoded_defaults() {
        let file_config =
            Config::from_file("Snakepit.toml").expect("Snakepit.toml should be parseable");
        let hardcoded = Config::default_hardcoded();

        assert_eq!(
            file_config.timing.tick_budget_ms,
            hardcoded.timing.tick_budget_ms
        );
        assert_eq!(
            file_config.timing.safety_margin_ms,
            hardcoded.timing.safety_margin_ms
        );
        assert_eq!(
            file_config.search.own_space_max_depth,
            hardcoded.search.own_space_max_depth
        );
        assert_eq!(
            file_config.search.nemesis_space_max_depth,
            hardcoded.search.nemesis_space_max_depth
        );
        assert_eq!(
            file_config.thresholds.trap_space,
            hardcoded.thresholds.trap_space
        );
        assert_eq!(
            file_config.thresholds.narrow_corridor_width,
            hardcoded.thresholds.narrow_corridor_width
        );

        let (w, h) = (&file_config.weights, &hardcoded.weights);
        assert_eq!(w.death, h.death);
        assert_eq!(w.taken_soon, h.taken_soon);
        assert_eq!(w.trap, h.trap);
        assert_eq!(w.death_in_two, h.death_in_two);
        assert_eq!(w.death_in_two_when_trapped, h.death_in_two_when_trapped);
        assert_eq!(w.narrow_corridor, h.narrow_corridor);
        assert_eq!(w.narrow_corridor_in_corridor, h.narrow_corridor_in_corridor);
        assert_eq!(w.narrow_corridor_when_trapped, h.narrow_corridor_when_trapped);
        assert_eq!(w.space, h.space);
        assert_eq!(w.nemesis_space_removed, h.nemesis_space_removed);

        assert_eq!(file_config.player.name, hardcoded.player.name);
        assert_eq!(file_config.debug.enabled, hardcoded.debug.enabled);
        assert_eq!(
            file_config.debug.log_file_path,
            hardcoded.debug.log_file_path
        );
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let result = Config::from_file("nonexistent.toml");
        assert!(result.is_err());
    }
}
