//! Power supply evaluation
//!
//! Each populated slot has three status lines that must match one of a few
//! known-good strings exactly. Any other line is reported verbatim as
//! critical, including combinations that may be harmless but were never seen.

use super::SubsystemResult;
use crate::domain::PsuRecord;
use crate::profile::PsuProfile;

pub const GOOD_STATUS: &[&str] = &["Predicted failure=0, Disabled=0, Swap=0, status: OK"];

/// Hot-swap/requested-on variants differ between firmwares; all are healthy
pub const GOOD_HW_STATUS: &[&str] = &[
    "Hot swap=1, Fail=0, Requested on=0, Off=0, Overtmp fail=0",
    "Hot swap=1, Fail=0, Requested on=1, Off=0, Overtmp fail=0",
    "Hot swap=0, Fail=0, Requested on=0, Off=0, Overtmp fail=0",
    "DC overcurrent=0, Hot swap=1, Fail=0, Requested on=1, Off=0",
    "DC overcurrent=0, Hot swap=1, Fail=0, Requested on=0, Off=0",
];

pub const GOOD_FAULT_STATUS: &[&str] = &[
    "Temperature warn=0, AC fail=0, DC fail=0",
    "Overtmp fail=0, Temperature warn=0, AC fail=0, DC fail=0",
];

pub fn evaluate(records: &[PsuRecord], profile: &PsuProfile) -> SubsystemResult {
    let mut result = SubsystemResult::default();

    for psu in records.iter().filter(|p| profile.is_online(p.index)) {
        let checks = [
            (&psu.status_line, GOOD_STATUS),
            (&psu.hw_status_line, GOOD_HW_STATUS),
            (&psu.fault_status_line, GOOD_FAULT_STATUS),
        ];
        for (line, good) in checks {
            if !good.contains(&line.as_str()) {
                result.critical(format!("PSU{} {}", psu.index, line));
            }
        }
    }

    result
}
