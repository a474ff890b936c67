//! Configuration file loading
//!
//! Handles loading configuration from TOML files.

use crate::config::Config;
use crate::error::ConfigError;

use std::path::{Path, PathBuf};

/// Configuration file handler
pub struct ConfigFile;

impl ConfigFile {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from the first default location that exists
    pub fn load_default() -> Result<Option<Config>, ConfigError> {
        for path in Self::default_paths() {
            if path.exists() {
                let config = Self::load(&path)?;
                log::info!("Loaded config from {}", path.display());
                return Ok(Some(config));
            }
        }
        Ok(None)
    }

    /// Get default configuration file paths
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // System-wide config
        paths.push(PathBuf::from("/etc/check_jbod/config.toml"));

        // User config
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("check_jbod/config.toml"));
        }

        // Current directory
        paths.push(PathBuf::from("check_jbod.toml"));

        paths
    }
}
