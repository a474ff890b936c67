//! Fan evaluation
//!
//! A fan is critical when its speed is outside the model band or its element
//! status is anything but `OK`. Both checks run independently.

use super::SubsystemResult;
use crate::domain::{FanRecord, Metric};
use crate::error::ConfigError;
use crate::profile::ModelProfile;

pub fn evaluate(records: &[FanRecord], profile: &ModelProfile) -> Result<SubsystemResult, ConfigError> {
    let mut result = SubsystemResult::default();

    for fan in records {
        let band = profile
            .fan
            .bands
            .get(fan.index as usize)
            .ok_or_else(|| ConfigError::SensorOutOfProfile {
                model: profile.model.clone(),
                kind: "fan",
                index: fan.index as usize,
            })?;
        let speed = f64::from(fan.speed_rpm);

        if speed < band.low_critical {
            result.critical(format!("Fan{} is too slow ({} RPM)", fan.index, fan.speed_rpm));
        }
        if speed > band.high_critical {
            result.critical(format!("Fan{} is too fast ({} RPM)", fan.index, fan.speed_rpm));
        }
        if fan.status != "OK" {
            result.critical(format!("Fan{} is not OK", fan.index));
        }

        result.metrics.push(Metric::with_critical(
            format!("Fan{}_RPM", fan.index),
            fan.speed_rpm,
            band.critical_range(),
        ));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Severity;
    use crate::profile::ProfileRegistry;

    fn fan(index: u32, status: &str, speed_rpm: u32) -> FanRecord {
        FanRecord {
            index,
            status: status.to_string(),
            speed_rpm,
        }
    }

    fn md1420() -> ModelProfile {
        ProfileRegistry::builtin().get("MD1420").unwrap().clone()
    }

    #[test]
    fn test_boundaries_are_acceptable() {
        let result = evaluate(&[fan(0, "OK", 3000), fan(1, "OK", 5000)], &md1420()).unwrap();
        assert!(result.findings.is_empty());
        assert_eq!(result.metrics.len(), 2);
    }

    #[test]
    fn test_one_below_minimum() {
        let result = evaluate(&[fan(0, "OK", 2999), fan(1, "OK", 4000)], &md1420()).unwrap();
        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].severity, Severity::Critical);
        assert_eq!(result.findings[0].message, "Fan0 is too slow (2999 RPM)");
        assert_eq!(result.metrics.len(), 2);
    }

    #[test]
    fn test_too_fast() {
        let result = evaluate(&[fan(3, "OK", 5001)], &md1420()).unwrap();
        assert_eq!(result.findings[0].message, "Fan3 is too fast (5001 RPM)");
    }

    #[test]
    fn test_speed_and_status_fire_independently() {
        let result = evaluate(&[fan(2, "Critical", 100)], &md1420()).unwrap();
        let messages: Vec<_> = result.findings.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(messages, ["Fan2 is too slow (100 RPM)", "Fan2 is not OK"]);
    }

    #[test]
    fn test_metric_format() {
        let result = evaluate(&[fan(1, "OK", 4200)], &md1420()).unwrap();
        assert_eq!(result.metrics[0].to_string(), "Fan1_RPM=4200;;3000:5000;;");
    }

    #[test]
    fn test_fan_outside_profile() {
        let result = evaluate(&[fan(4, "OK", 4000)], &md1420());
        assert!(matches!(
            result,
            Err(ConfigError::SensorOutOfProfile { index: 4, .. })
        ));
    }
}
