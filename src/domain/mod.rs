//! Domain models for jbodcheck
//!
//! Enclosures, decoded sensor records, threshold bands and check findings.

pub mod enclosure;
pub mod finding;
pub mod sensor;
pub mod threshold;

pub use enclosure::{Enclosure, IdMode};
pub use finding::{Finding, Metric, MetricRange, MetricValue, PluginStatus, Severity};
pub use sensor::{CurrentRecord, FanRecord, PsuRecord, TemperatureRecord, VoltageRecord};
pub use threshold::ThresholdBand;
