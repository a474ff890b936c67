//! Configuration system
//!
//! Handles TOML config file parsing and CLI argument merging.

pub mod builder;
pub mod file;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use crate::domain::IdMode;
use crate::error::ConfigError;
use crate::profile::ProfileRegistry;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// External tool locations
    pub tools: ToolsConfig,
    /// Per-model fan band replacements
    #[serde(rename = "fan_override")]
    pub fan_overrides: Vec<FanOverride>,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Key enclosures by logical identifier instead of front-panel ID
    pub logical_ids: bool,
    /// Upper bound on each external tool invocation, in seconds
    pub timeout_seconds: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            logical_ids: false,
            timeout_seconds: 30,
        }
    }
}

/// Paths (or PATH-resolved names) of the external tools
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub sg_ses: String,
    pub lsscsi: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            sg_ses: "sg_ses".to_string(),
            lsscsi: "lsscsi".to_string(),
        }
    }
}

/// Replacement RPM band for every fan of one model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanOverride {
    pub model: String,
    pub min_rpm: u32,
    pub max_rpm: u32,
}

impl Config {
    /// Check values that serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "general.timeout_seconds".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        for (key, value) in [("tools.sg_ses", &self.tools.sg_ses), ("tools.lsscsi", &self.tools.lsscsi)] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }

        let registry = ProfileRegistry::builtin();
        for fan in &self.fan_overrides {
            if !registry.is_known(&fan.model) {
                return Err(ConfigError::UnknownModel(fan.model.clone()));
            }
            if fan.min_rpm > fan.max_rpm {
                return Err(ConfigError::InvalidValue {
                    key: format!("fan_override.{}", fan.model),
                    message: format!("min_rpm {} exceeds max_rpm {}", fan.min_rpm, fan.max_rpm),
                });
            }
        }
        Ok(())
    }

    /// Bounded wait for one external invocation
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.general.timeout_seconds)
    }

    pub fn id_mode(&self) -> IdMode {
        if self.general.logical_ids {
            IdMode::Logical
        } else {
            IdMode::FrontPanel
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.timeout_seconds, 30);
        assert_eq!(config.tools.sg_ses, "sg_ses");
        assert!(config.fan_overrides.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            [general]
            timeout_seconds = 10
            logical_ids = true

            [tools]
            sg_ses = "/usr/bin/sg_ses"

            [[fan_override]]
            model = "H4060-J"
            min_rpm = 5000
            max_rpm = 18000
            "#,
        )
        .unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.id_mode(), IdMode::Logical);
        assert_eq!(config.tools.sg_ses, "/usr/bin/sg_ses");
        assert_eq!(config.tools.lsscsi, "lsscsi");
        assert_eq!(config.fan_overrides[0].min_rpm, 5000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_fan_band() {
        let mut config = Config::default();
        config.fan_overrides.push(FanOverride {
            model: "MD1420".to_string(),
            min_rpm: 6000,
            max_rpm: 3000,
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_model() {
        let mut config = Config::default();
        config.fan_overrides.push(FanOverride {
            model: "XYZ".to_string(),
            min_rpm: 1,
            max_rpm: 2,
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownModel(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.general.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }
}
