//! Voltage and current evaluation
//!
//! Channels are matched to profile bands by position. There is no warning
//! tier: a reading outside the band is critical.

use super::SubsystemResult;
use crate::domain::{CurrentRecord, Metric, MetricValue, VoltageRecord};
use crate::error::ConfigError;
use crate::profile::AnalogProfile;

/// A positional voltage or current reading
pub trait AnalogReading {
    /// Metric name prefix, e.g. `Volt_`
    const PREFIX: &'static str;
    /// Unit symbol used in messages
    const UNIT: &'static str;
    /// Sensor kind used in errors
    const KIND: &'static str;

    fn index(&self) -> usize;
    fn value(&self) -> f64;
}

impl AnalogReading for VoltageRecord {
    const PREFIX: &'static str = "Volt_";
    const UNIT: &'static str = "V";
    const KIND: &'static str = "voltage";

    fn index(&self) -> usize {
        self.index
    }

    fn value(&self) -> f64 {
        self.volts
    }
}

impl AnalogReading for CurrentRecord {
    const PREFIX: &'static str = "Current_";
    const UNIT: &'static str = "A";
    const KIND: &'static str = "current";

    fn index(&self) -> usize {
        self.index
    }

    fn value(&self) -> f64 {
        self.amps
    }
}

pub fn no_thresholds_message(kind: &str) -> String {
    format!("No {} sensor thresholds found", kind)
}

pub fn evaluate<R: AnalogReading>(
    records: &[R],
    profile: &AnalogProfile,
    model: &str,
) -> Result<SubsystemResult, ConfigError> {
    let mut result = SubsystemResult::default();

    for record in records {
        let channel = profile
            .channels
            .get(record.index())
            .ok_or_else(|| ConfigError::SensorOutOfProfile {
                model: model.to_string(),
                kind: R::KIND,
                index: record.index(),
            })?;
        let Some(band) = channel.band() else {
            continue;
        };

        let name = format!("{}{}", R::PREFIX, record.index());
        let value = record.value();
        let shown = MetricValue::from(value);
        if value > band.high_critical {
            result.critical(format!("{} is too high ({} {})", name, shown, R::UNIT));
        }
        if value < band.low_critical {
            result.critical(format!("{} is too low ({} {})", name, shown, R::UNIT));
        }
        result
            .metrics
            .push(Metric::with_critical(name, value, band.critical_range()));
    }

    Ok(result)
}
