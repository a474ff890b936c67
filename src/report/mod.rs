//! SES report parsing
//!
//! Turns the human-readable output of `sg_ses` into typed sensor records:
//! - [`grammar`]: per-line-shape matchers
//! - [`section`]: splits a report into element-type sections
//! - [`decode`]: slices sections into fixed-stride records

pub mod decode;
pub mod grammar;
pub mod section;

pub use decode::{AnalogLayout, PsuLayout, RecordLayout};
pub use section::RawReport;

/// Section names as printed after `Element type:`
pub mod sections {
    pub const COOLING: &str = "Cooling";
    pub const TEMPERATURE: &str = "Temperature sensor";
    pub const VOLTAGE: &str = "Voltage sensor";
    pub const CURRENT: &str = "Current sensor";
    pub const POWER_SUPPLY: &str = "Power supply";
}
