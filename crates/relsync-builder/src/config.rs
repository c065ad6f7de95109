//! Configuration for relationship builders

use crate::BuilderError;
use serde::{Deserialize, Serialize};

/// Configuration for a relationship builder
///
/// # Examples
///
/// ```
/// use relsync_builder::BuilderConfig;
///
/// let config = BuilderConfig::default();
/// assert!(!config.dry_run);
/// assert!(config.validate_slot);
///
/// let config = BuilderConfig::from_toml("dry_run = true").unwrap();
/// assert!(config.dry_run);
/// assert!(config.validate_slot);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Dry-run mode: compute and log the diff without saving or deleting
    /// Default: false
    #[serde(default)]
    pub dry_run: bool,

    /// Warn when a slot has no relationship name set
    /// Default: true
    #[serde(default = "default_validate_slot")]
    pub validate_slot: bool,
}

fn default_validate_slot() -> bool {
    true
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            validate_slot: true,
        }
    }
}

impl BuilderConfig {
    /// Dry-run configuration: plans are logged, nothing is written
    pub fn dry_run() -> Self {
        Self {
            dry_run: true,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, BuilderError> {
        toml::from_str(toml_str)
            .map_err(|e| BuilderError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, BuilderError> {
        toml::to_string_pretty(self)
            .map_err(|e| BuilderError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BuilderConfig::default();
        assert!(!config.dry_run);
        assert!(config.validate_slot);
    }

    #[test]
    fn test_dry_run_preset() {
        let config = BuilderConfig::dry_run();
        assert!(config.dry_run);
        assert!(config.validate_slot);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = BuilderConfig::from_toml("").unwrap();
        assert_eq!(config, BuilderConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let result = BuilderConfig::from_toml("dry_run = \"sometimes\"");
        assert!(matches!(result, Err(BuilderError::Config(_))));
    }

    #[test]
    fn test_toml_and_json_agree() {
        let config = BuilderConfig {
            dry_run: true,
            validate_slot: false,
        };
        let from_toml = BuilderConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        let from_json: BuilderConfig =
            serde_json::from_str(r#"{"dry_run": true, "validate_slot": false}"#).unwrap();

        assert_eq!(from_toml, config);
        assert_eq!(from_json, config);
    }
}
