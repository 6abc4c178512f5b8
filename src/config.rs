// Configuration module for reading Selector.toml
// This module provides the tunable parameters of the move selector

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::crowd::CrowdWindow;
use crate::search::SearchStrategy;
use crate::types::Direction;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub search: SearchConfig,
    pub fallback: FallbackConfig,
    pub debug: DebugConfig,
}

/// Path search parameters
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SearchConfig {
    pub strategy: SearchStrategy,
    /// Neighbourhood shape for crowdedness; older files without it get "sliding"
    #[serde(default)]
    pub crowd_window: CrowdWindow,
    /// Radius of a sliding window, or the side of a tile
    pub crowd_radius: usize,
    /// Multiplier applied to crowdedness when pricing a step
    pub crowd_weight: u32,
}

/// What to do when no apple is reachable and every neighbour is blocked
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FallbackConfig {
    pub default_direction: Direction,
}

/// Decision log configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Selector.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Selector.toml in the working directory
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Selector.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Selector.toml
    pub fn default_hardcoded() -> Self {
        Config {
            search: SearchConfig {
                strategy: SearchStrategy::Crowded,
                crowd_window: CrowdWindow::Sliding,
                crowd_radius: 5,
                crowd_weight: 1,
            },
            fallback: FallbackConfig {
                default_direction: Direction::Up,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "move_selector_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!(
                "Could not load Selector.toml ({}), using hardcoded defaults",
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
    fn test_config_can_be_created() {
        let config = Config::default_hardcoded();
        assert_eq!(config.search.strategy, SearchStrategy::Crowded);
        assert_eq!(config.search.crowd_radius, 5);
        assert_eq!(config.fallback.default_direction, Direction::Up);
        assert!(!config.debug.enabled);
    }

    #[test]
    fn test_selector_toml_can_be_parsed() {
        // This test ensures Selector.toml is valid and can be parsed
        let result = Config::from_file("Selector.toml");
        assert!(
            result.is_ok(),
            "Failed to parse Selector.toml: {:?}",
            result.err()
        );
    }

    #[test]
    fn test_all_config_values_match_hardcoded_defaults() {
        let file_config = Config::from_file("Selector.toml")
            .expect("Selector.toml should be parseable");

        assert_eq!(file_config, Config::default_hardcoded());
    }

    #[test]
    fn test_parses_alternate_values() {
        let config = Config::from_toml_str(
            r#"
            [search]
            strategy = "bfs"
            crowd_window = "tiled"
            crowd_radius = 10
            crowd_weight = 3

            [fallback]
            default_direction = "left"

            [debug]
            enabled = true
            log_file_path = "decisions.jsonl"
            "#,
        )
        .unwrap();

        assert_eq!(config.search.strategy, SearchStrategy::Bfs);
        assert_eq!(config.search.crowd_window, CrowdWindow::Tiled);
        assert_eq!(config.search.crowd_radius, 10);
        assert_eq!(config.search.crowd_weight, 3);
        assert_eq!(config.fallback.default_direction, Direction::Left);
        assert!(config.debug.enabled);
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let result = Config::from_toml_str(
            r#"
            [search]
            strategy = "astar"
            crowd_radius = 5
            crowd_weight = 1

            [fallback]
            default_direction = "up"

            [debug]
            enabled = false
            log_file_path = "x.jsonl"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_crowd_window_defaults_to_sliding() {
        let config = Config::from_toml_str(
            r#"
            [search]
            strategy = "crowded"
            crowd_radius = 5
            crowd_weight = 1

            [fallback]
            default_direction = "up"

            [debug]
            enabled = false
            log_file_path = "x.jsonl"
            "#,
        )
        .unwrap();
        assert_eq!(config.search.crowd_window, CrowdWindow::Sliding);
    }

    #[test]
    fn test_load_or_default_works() {
        let config = Config::load_or_default();
        assert_eq!(config.search.crowd_radius, 5);
    }

    #[test]
    fn test_missing_file_returns_error() {
        let result = Config::from_file("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let result = Config::from_toml_str("[search\nstrategy = ");
        assert!(result.unwrap_err().starts_with("Failed to parse config file"));

        // Well-formed TOML missing a required table
        let result = Config::from_toml_str("[search]\nstrategy = \"bfs\"\n");
        assert!(result.is_err());
    }
}
