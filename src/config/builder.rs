//! Configuration builder
//!
//! Merges configuration from files and CLI arguments.

use crate::config::{Config, ConfigFile};
use crate::error::ConfigError;

/// Builder for merging configuration sources
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Load configuration from a file
    ///
    /// An explicit path must exist; without one the default locations are
    /// searched and a missing file is not an error.
    pub fn with_file(mut self, path: Option<&str>) -> Result<Self, ConfigError> {
        let file_config = match path {
            Some(path) => {
                let config = ConfigFile::load(path)?;
                log::info!("Loaded config from {}", path);
                Some(config)
            }
            None => ConfigFile::load_default()?,
        };

        if let Some(cfg) = file_config {
            self.config = cfg;
        }

        Ok(self)
    }

    /// Override with CLI logical-ID flag
    pub fn with_logical_ids(mut self, logical: Option<bool>) -> Self {
        if let Some(l) = logical {
            self.config.general.logical_ids = l;
        }
        self
    }

    /// Override with CLI timeout
    pub fn with_timeout(mut self, seconds: Option<u64>) -> Self {
        if let Some(s) = seconds {
            self.config.general.timeout_seconds = s;
        }
        self
    }

    /// Validate and return the final configuration
    pub fn build(self) -> Result<Config, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
