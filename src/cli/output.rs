//! Output formatting utilities
//!
//! Renders check results either as the monitoring-plugin line or as JSON.

use crate::cli::args::OutputFormat;
use crate::domain::{Enclosure, Finding, Metric, PluginStatus};
use crate::health::CheckReport;
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + PluginDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_output(&mut handle, data, format)
}

/// Write output to any sink
pub fn write_output<W: Write, T: Serialize + PluginDisplay>(
    out: &mut W,
    data: &T,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Nagios => {
            writeln!(out, "{}", data.to_plugin_text())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            writeln!(out, "{}", json)?;
        }
    }
    Ok(())
}

/// Types that render as monitoring-plugin text
pub trait PluginDisplay {
    /// Text printed on stdout
    fn to_plugin_text(&self) -> String;

    /// Status that selects the exit code
    fn status(&self) -> PluginStatus;
}

/// Result of a completed check
#[derive(Debug, Clone, Serialize)]
pub struct PluginResult {
    pub status: PluginStatus,
    pub enclosure: Enclosure,
    pub summary: String,
    pub findings: Vec<Finding>,
    pub metrics: Vec<Metric>,
    #[serde(skip)]
    line: String,
}

impl PluginResult {
    pub fn new(enclosure: &Enclosure, report: &CheckReport) -> Self {
        Self {
            status: report.status(),
            enclosure: enclosure.clone(),
            summary: report.summary(),
            findings: report.findings().to_vec(),
            metrics: report.metrics().to_vec(),
            line: report.to_string(),
        }
    }
}

impl PluginDisplay for PluginResult {
    fn to_plugin_text(&self) -> String {
        self.line.clone()
    }

    fn status(&self) -> PluginStatus {
        self.status
    }
}

/// The requested enclosure was not discovered
#[derive(Debug, Clone, Serialize)]
pub struct EnclosureListing {
    pub status: PluginStatus,
    pub requested: Option<String>,
    pub enclosures: Vec<Enclosure>,
}

impl EnclosureListing {
    pub fn new(requested: Option<String>, enclosures: Vec<Enclosure>) -> Self {
        Self {
            status: PluginStatus::Unknown,
            requested,
            enclosures,
        }
    }
}

impl PluginDisplay for EnclosureListing {
    fn to_plugin_text(&self) -> String {
        let mut lines = vec!["JBOD with the request ID not found, only found:".to_string()];
        lines.extend(self.enclosures.iter().map(Enclosure::to_string));
        lines.join("\n")
    }

    fn status(&self) -> PluginStatus {
        self.status
    }
}

/// A failure that prevented the check from completing
#[derive(Debug, Clone, Serialize)]
pub struct UnknownResult {
    pub status: PluginStatus,
    pub error: String,
}

impl UnknownResult {
    pub fn new(error: impl ToString) -> Self {
        Self {
            status: PluginStatus::Unknown,
            error: error.to_string(),
        }
    }
}

impl PluginDisplay for UnknownResult {
    fn to_plugin_text(&self) -> String {
        format!("JBOD UNKNOWN: {}", self.error)
    }

    fn status(&self) -> PluginStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::SubsystemResult;

    fn render<T: Serialize + PluginDisplay>(data: &T, format: OutputFormat) -> String {
        let mut buf = Vec::new();
        write_output(&mut buf, data, format).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_listing_text() {
        let listing = EnclosureListing::new(
            Some("9".to_string()),
            vec![
                Enclosure::new("MD1420", "/dev/sg3", "0"),
                Enclosure::new("H4060-J", "/dev/sg7", "12"),
            ],
        );
        assert_eq!(
            render(&listing, OutputFormat::Nagios),
            "JBOD with the request ID not found, only found:\n\
             model MD1420 with id 0\n\
             model H4060-J with id 12\n"
        );
        assert_eq!(listing.status().exit_code(), 3);
    }

    #[test]
    fn test_plugin_result_line() {
        let mut report = CheckReport::new();
        report.merge(SubsystemResult::warning("No voltage sensor thresholds found"));
        let result = PluginResult::new(&Enclosure::new("D32845U12GESM", "/dev/sg2", "1"), &report);
        assert_eq!(
            render(&result, OutputFormat::Nagios),
            "No voltage sensor thresholds found | \n"
        );
        assert_eq!(result.status(), PluginStatus::Warning);
    }

    #[test]
    fn test_json_output() {
        let result = PluginResult::new(&Enclosure::new("MD1420", "/dev/sg3", "0"), &CheckReport::new());
        let value: serde_json::Value = serde_json::from_str(&render(&result, OutputFormat::Json)).unwrap();
        assert_eq!(value["status"], "Ok");
        assert_eq!(value["summary"], "JBOD OK");
        assert_eq!(value["enclosure"]["model"], "MD1420");
        assert!(value.get("line").is_none());
    }

    #[test]
    fn test_unknown_result() {
        let unknown = UnknownResult::new("sg_ses exited with status 2");
        assert_eq!(unknown.to_plugin_text(), "JBOD UNKNOWN: sg_ses exited with status 2");
    }
}
