//! Check findings, perfdata metrics and plugin status
//!
//! Output follows the monitoring-plugin convention: a summary line, a `|`,
//! then space-separated `name=value;warn;crit;;` metrics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a single finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "WARNING"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A problem found while evaluating a sensor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn critical(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Critical,
            message: message.into(),
        }
    }
}

/// Overall plugin result
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PluginStatus {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl PluginStatus {
    /// Process exit code for this status
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::Warning => 1,
            Self::Critical => 2,
            Self::Unknown => 3,
        }
    }
}

impl From<Severity> for PluginStatus {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Warning => Self::Warning,
            Severity::Critical => Self::Critical,
        }
    }
}

impl fmt::Display for PluginStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Warning => write!(f, "WARNING"),
            Self::Critical => write!(f, "CRITICAL"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Inclusive perfdata range; infinite ends are left open
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl MetricRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl fmt::Display for MetricRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min.is_finite() {
            write!(f, "{}", self.min)?;
        } else {
            write!(f, "~")?;
        }
        write!(f, ":")?;
        if self.max.is_finite() {
            write!(f, "{}", self.max)?;
        }
        Ok(())
    }
}

/// A measured value as the enclosure reports it
///
/// Counts (RPM, degrees) are integers. Voltages and currents are decimal
/// readings and always keep their fractional part (`13.0`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Integer(i64),
    Reading(f64),
}

impl From<u32> for MetricValue {
    fn from(v: u32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<i32> for MetricValue {
    fn from(v: i32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        Self::Reading(v)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{}", v),
            Self::Reading(v) => write!(f, "{:?}", v),
        }
    }
}

/// One perfdata entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub value: MetricValue,
    pub warn: Option<MetricRange>,
    pub crit: Option<MetricRange>,
}

impl Metric {
    /// Metric with only a critical range populated
    pub fn with_critical(name: impl Into<String>, value: impl Into<MetricValue>, crit: MetricRange) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            warn: None,
            crit: Some(crit),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={};", self.name, self.value)?;
        if let Some(warn) = self.warn {
            write!(f, "{}", warn)?;
        }
        write!(f, ";")?;
        if let Some(crit) = self.crit {
            write!(f, "{}", crit)?;
        }
        write!(f, ";;")
    }
}
