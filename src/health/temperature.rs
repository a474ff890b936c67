//! Temperature evaluation
//!
//! Readings are compared with the thresholds the enclosure itself reports on
//! the threshold page. High and low sides are checked independently; on each
//! side the critical tier takes precedence over the warning tier.

use super::SubsystemResult;
use crate::domain::{Metric, TemperatureRecord, ThresholdBand};
use crate::error::ParseError;
use crate::report::sections;

pub const NO_THRESHOLDS: &str = "No temperature sensor thresholds found";

/// `thresholds[i]` belongs to the sensor with index `i`
///
/// A sensor with a reading but no threshold record at all means the two pages
/// disagree, which is a parse error. An explicit empty record is skipped.
pub fn evaluate(
    records: &[TemperatureRecord],
    thresholds: &[Option<ThresholdBand>],
) -> Result<SubsystemResult, ParseError> {
    let mut result = SubsystemResult::default();

    if thresholds.iter().all(Option::is_none) {
        result.warn(NO_THRESHOLDS.to_string());
    }

    for sensor in records {
        let Some(celsius) = sensor.celsius else {
            continue;
        };
        let index = sensor.index as usize;
        let record = thresholds.get(index).ok_or_else(|| ParseError::MissingRecord {
            section: sections::TEMPERATURE.to_string(),
            index,
        })?;
        let Some(band) = record else {
            log::debug!("temperature sensor {} has no thresholds", sensor.index);
            continue;
        };
        let n = sensor.index;
        let t = f64::from(celsius);

        result.metrics.push(Metric::with_critical(
            format!("Temperature{}", n),
            celsius,
            band.critical_range(),
        ));

        if t > band.high_critical {
            result.critical(format!("Sensor #{} is too hot, {} > {}", n, celsius, band.high_critical));
        } else if t > band.high_warning {
            result.warn(format!("Sensor #{} is too hot, {} > {}", n, celsius, band.high_warning));
        }
        if t < band.low_critical {
            result.critical(format!("Sensor #{} is too cold, {} < {}", n, celsius, band.low_critical));
        } else if t < band.low_warning {
            result.warn(format!("Sensor #{} is too cold, {} < {}", n, celsius, band.low_warning));
        }
    }

    Ok(result)
}
