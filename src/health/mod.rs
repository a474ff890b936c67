//! Enclosure health evaluation
//!
//! Decodes each requested subsystem from the parsed report and classifies
//! every reading against the model profile:
//! - Fans: RPM band and element status
//! - Temperatures: enclosure-reported warning/critical thresholds
//! - Power supplies: known-good status lines
//! - Voltages and currents: fixed or percentage-derived bands

pub mod aggregate;
pub mod analog;
pub mod fan;
pub mod psu;
pub mod temperature;

pub use aggregate::CheckReport;

use crate::domain::{Finding, Metric};
use crate::error::Result;
use crate::profile::ModelProfile;
use crate::report::{decode, RawReport};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A group of sensors checked together
///
/// Declaration order is the order findings appear in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Subsystem {
    Fan,
    Temperature,
    Psu,
    Voltage,
    Current,
}

impl Subsystem {
    /// All subsystems in output order
    pub const ALL: [Subsystem; 5] = [
        Self::Fan,
        Self::Temperature,
        Self::Psu,
        Self::Voltage,
        Self::Current,
    ];
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fan => write!(f, "fan"),
            Self::Temperature => write!(f, "temperature"),
            Self::Psu => write!(f, "psu"),
            Self::Voltage => write!(f, "voltage"),
            Self::Current => write!(f, "current"),
        }
    }
}

/// Findings and metrics contributed by one subsystem
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubsystemResult {
    pub findings: Vec<Finding>,
    pub metrics: Vec<Metric>,
}

impl SubsystemResult {
    /// Result holding a single warning and no metrics
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            findings: vec![Finding::warning(message)],
            metrics: Vec::new(),
        }
    }

    pub(crate) fn critical(&mut self, message: String) {
        self.findings.push(Finding::critical(message));
    }

    pub(crate) fn warn(&mut self, message: String) {
        self.findings.push(Finding::warning(message));
    }
}

/// Evaluates subsystems of one enclosure against its model profile
pub struct HealthEvaluator<'a> {
    profile: &'a ModelProfile,
}

impl<'a> HealthEvaluator<'a> {
    pub fn new(profile: &'a ModelProfile) -> Self {
        Self { profile }
    }

    /// Fan speeds and statuses
    pub fn fans(&self, status: &RawReport) -> Result<SubsystemResult> {
        let records = decode::decode_fans(status, &self.profile.fan.layout)?;
        Ok(fan::evaluate(&records, self.profile)?)
    }

    /// Temperatures against the threshold page
    pub fn temperatures(&self, status: &RawReport, thresholds: &RawReport) -> Result<SubsystemResult> {
        let layout = &self.profile.temperature;
        let bands = decode::decode_temperature_thresholds(thresholds, &layout.threshold_layout)?;
        let records = decode::decode_temperatures(status, &layout.layout)?;
        Ok(temperature::evaluate(&records, &bands)?)
    }

    /// Power supply status lines of the populated slots
    pub fn psus(&self, status: &RawReport) -> Result<SubsystemResult> {
        let records = decode::decode_psus(status, &self.profile.psu.layout)?;
        Ok(psu::evaluate(&records, &self.profile.psu))
    }

    /// Voltage channels
    pub fn voltages(&self, status: &RawReport) -> Result<SubsystemResult> {
        let profile = &self.profile.voltage;
        if !profile.has_monitored_channels() {
            return Ok(SubsystemResult::warning(analog::no_thresholds_message("voltage")));
        }
        let records = decode::decode_voltages(status, &profile.layout, |i| profile.reads(i))?;
        Ok(analog::evaluate(&records, profile, &self.profile.model)?)
    }

    /// Current channels
    pub fn currents(&self, status: &RawReport) -> Result<SubsystemResult> {
        let profile = &self.profile.current;
        if !profile.has_monitored_channels() {
            return Ok(SubsystemResult::warning(analog::no_thresholds_message("current")));
        }
        let records = decode::decode_currents(status, &profile.layout, |i| profile.reads(i))?;
        Ok(analog::evaluate(&records, profile, &self.profile.model)?)
    }
}
