//! Enclosure identity types

use serde::{Deserialize, Serialize};
use std::fmt;

/// An SES enclosure found on the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enclosure {
    /// Product model as reported by the SCSI inquiry
    pub model: String,
    /// SCSI generic device path (e.g. `/dev/sg12`)
    pub device: String,
    /// Display identifier, unique within one discovery run
    pub identifier: String,
}

impl Enclosure {
    /// Create a new enclosure record
    pub fn new(
        model: impl Into<String>,
        device: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            device: device.into(),
            identifier: identifier.into(),
        }
    }
}

impl fmt::Display for Enclosure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "model {} with id {}", self.model, self.identifier)
    }
}

/// How enclosures are keyed on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdMode {
    /// Numeric ID shown on the front-panel LED display
    #[default]
    FrontPanel,
    /// Primary enclosure logical identifier (globally unique, hex)
    Logical,
}
