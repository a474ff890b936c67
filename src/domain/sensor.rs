//! Decoded sensor records
//!
//! One record per SES element. Indices are positions within the element's
//! own section and are not shared across subsystems.

use serde::Serialize;

/// Cooling element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FanRecord {
    pub index: u32,
    pub status: String,
    pub speed_rpm: u32,
}

/// Temperature sensor element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemperatureRecord {
    pub index: u32,
    pub status: String,
    /// `None` when the slot reports `<reserved>` (sensor absent)
    pub celsius: Option<i32>,
}

/// Voltage sensor channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoltageRecord {
    pub index: usize,
    pub volts: f64,
}

/// Current sensor channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurrentRecord {
    pub index: usize,
    pub amps: f64,
}

/// Power supply element, kept as raw status lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PsuRecord {
    pub index: u32,
    pub status_line: String,
    pub hw_status_line: String,
    pub fault_status_line: String,
}
