//! Trait definitions for enclosure queries
//!
//! These traits abstract over the sg3_utils tools to enable testing with mocks.

use crate::error::ToolError;
use std::fmt;

/// SES diagnostic page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// Enclosure status (page 0x02)
    Status,
    /// Threshold in (page 0x05)
    Thresholds,
}

impl Page {
    /// Value for `sg_ses --page=`
    pub const fn as_arg(&self) -> &'static str {
        match self {
            Self::Status => "0x02",
            Self::Thresholds => "0x05",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

/// Source of raw enclosure text
///
/// Production code shells out to `lsscsi` and `sg_ses`; tests return canned
/// reports.
pub trait EnclosureTool {
    /// Verbose SCSI device listing (`lsscsi -g`)
    fn scsi_listing(&self) -> Result<String, ToolError>;

    /// One SES page for a device, optionally restricted to an element
    /// (`sg_ses --page=<page> [--index=<element>] <device>`)
    fn ses_page(&self, device: &str, page: Page, element: Option<&str>) -> Result<String, ToolError>;
}
