//! Configuration loading for the road simulation.
//!
//! Settings come from a TOML file; every section and field is optional.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Seed used when neither the config nor the command line names one.
pub const DEFAULT_SEED: u64 = 42;

/// Complete road configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadConfig {
    /// Engine settings
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Where notices go
    #[serde(default)]
    pub output: OutputConfig,
}

impl RoadConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for casino payouts and autonomous placement
    pub seed: u64,
    /// Start with notices enabled
    pub visible: bool,
    /// Reposition robots instantly instead of walking them
    pub fast_movement: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            visible: true,
            fast_movement: false,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// JSONL file receiving every render notice
    pub notice_log: Option<PathBuf>,
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Returns the default configuration as a TOML string.
pub fn default_config_toml() -> String {
    r#"# Silk road simulation configuration

[simulation]
# Seed for casino payouts and autonomous store placement
seed = 42
# Emit render notices (false runs silently)
visible = true
# Reposition robots instantly instead of walking them cell by cell
fast_movement = false

[output]
# Uncomment to write every render notice as JSON lines
# notice_log = "output/notices.jsonl"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RoadConfig::default();
        assert_eq!(config.simulation.seed, DEFAULT_SEED);
        assert!(config.simulation.visible);
        assert!(!config.simulation.fast_movement);
        assert!(config.output.notice_log.is_none());
    }

    #[test]
    fn test_parse_default_toml() {
        let config = RoadConfig::from_str(&default_config_toml()).unwrap();
        assert_eq!(config, RoadConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
[simulation]
fast_movement = true
"#;
        let config = RoadConfig::from_str(toml).unwrap();
        assert!(config.simulation.fast_movement);
        assert_eq!(config.simulation.seed, DEFAULT_SEED);
        assert!(config.simulation.visible);
    }

    #[test]
    fn test_round_trip() {
        let mut config = RoadConfig::default();
        config.simulation.seed = 7;
        config.output.notice_log = Some(PathBuf::from("notices.jsonl"));
        let parsed = RoadConfig::from_str(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            RoadConfig::from_str("[simulation\nseed = "),
            Err(ConfigError::Toml(_))
        ));
    }
}
