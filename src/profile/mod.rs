//! Model profiles
//!
//! Everything that differs between enclosure models lives here as data:
//! record layouts, per-sensor bands, unmonitored channels and populated PSU
//! slots. Evaluation code never branches on a model name.

pub mod models;

use serde::Serialize;

use crate::config::Config;
use crate::domain::ThresholdBand;
use crate::error::ConfigError;
use crate::report::{AnalogLayout, PsuLayout, RecordLayout};

/// Limits for one voltage/current channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Channel {
    /// Reading must stay inside the band
    Monitored(ThresholdBand),
    /// Channel exists but is not evaluated on this model
    NotMonitored,
}

impl Channel {
    pub fn band(&self) -> Option<&ThresholdBand> {
        match self {
            Self::Monitored(band) => Some(band),
            Self::NotMonitored => None,
        }
    }
}

/// Cooling element layout and RPM bands by fan index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FanProfile {
    pub layout: RecordLayout,
    pub bands: Vec<ThresholdBand>,
}

/// Temperature layouts on the status and threshold pages
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureProfile {
    pub layout: RecordLayout,
    pub threshold_layout: RecordLayout,
}

/// Voltage or current layout and bands by channel position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalogProfile {
    pub layout: AnalogLayout,
    pub channels: Vec<Channel>,
}

impl AnalogProfile {
    /// Whether at least one channel has a band
    pub fn has_monitored_channels(&self) -> bool {
        self.channels.iter().any(|c| c.band().is_some())
    }

    /// Whether the reading at `index` must be parsed
    ///
    /// Not-monitored channels are never read. Positions beyond the profile
    /// are, so that they surface as an out-of-profile error.
    pub fn reads(&self, index: usize) -> bool {
        self.channels
            .get(index)
            .map_or(true, |c| c.band().is_some())
    }
}

/// Power supply layout and populated slots
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PsuProfile {
    pub layout: PsuLayout,
    pub online_slots: Vec<u32>,
}

impl PsuProfile {
    pub fn is_online(&self, slot: u32) -> bool {
        self.online_slots.contains(&slot)
    }
}

/// Complete description of one enclosure model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelProfile {
    pub model: String,
    pub fan: FanProfile,
    pub temperature: TemperatureProfile,
    pub voltage: AnalogProfile,
    pub current: AnalogProfile,
    pub psu: PsuProfile,
}

/// Lookup table of all supported models
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: Vec<ModelProfile>,
}

impl ProfileRegistry {
    /// Registry of the built-in models
    pub fn builtin() -> Self {
        Self {
            profiles: models::builtin_profiles(),
        }
    }

    /// Built-in models with configuration overrides applied
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let mut registry = Self::builtin();
        for fan in &config.fan_overrides {
            registry.override_fan_band(
                &fan.model,
                ThresholdBand::critical(fan.min_rpm.into(), fan.max_rpm.into()),
            )?;
            log::debug!(
                "fan band for {} overridden to {}-{} rpm",
                fan.model,
                fan.min_rpm,
                fan.max_rpm
            );
        }
        Ok(registry)
    }

    /// Profile for a model
    pub fn get(&self, model: &str) -> Result<&ModelProfile, ConfigError> {
        self.profiles
            .iter()
            .find(|p| p.model == model)
            .ok_or_else(|| ConfigError::UnknownModel(model.to_string()))
    }

    pub fn is_known(&self, model: &str) -> bool {
        self.get(model).is_ok()
    }

    /// Names of all known models
    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.model.as_str())
    }

    /// Replace the band of every fan of `model`
    pub fn override_fan_band(&mut self, model: &str, band: ThresholdBand) -> Result<(), ConfigError> {
        let profile = self
            .profiles
            .iter_mut()
            .find(|p| p.model == model)
            .ok_or_else(|| ConfigError::UnknownModel(model.to_string()))?;
        profile.fan.bands.iter_mut().for_each(|b| *b = band);
        Ok(())
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
