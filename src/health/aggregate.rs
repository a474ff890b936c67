//! Result aggregation
//!
//! Collects subsystem results in evaluation order and renders the
//! monitoring-plugin line.

use super::SubsystemResult;
use crate::domain::{Finding, Metric, PluginStatus, Severity};
use serde::Serialize;
use std::fmt;

const ALL_OK: &str = "JBOD OK";

/// Everything found during one check run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CheckReport {
    findings: Vec<Finding>,
    metrics: Vec<Metric>,
}

impl CheckReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one subsystem's findings and metrics
    pub fn merge(&mut self, result: SubsystemResult) {
        self.findings.extend(result.findings);
        self.metrics.extend(result.metrics);
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Worst severity found, `Ok` when nothing was found
    pub fn status(&self) -> PluginStatus {
        self.findings
            .iter()
            .map(|f| f.severity)
            .max()
            .map(PluginStatus::from)
            .unwrap_or(PluginStatus::Ok)
    }

    fn messages(&self, severity: Severity) -> impl Iterator<Item = &str> {
        self.findings
            .iter()
            .filter(move |f| f.severity == severity)
            .map(|f| f.message.as_str())
    }

    /// Critical messages, then warning messages, comma separated
    pub fn summary(&self) -> String {
        if self.findings.is_empty() {
            return ALL_OK.to_string();
        }
        self.messages(Severity::Critical)
            .chain(self.messages(Severity::Warning))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Space-separated perfdata
    pub fn perfdata(&self) -> String {
        self.metrics
            .iter()
            .map(Metric::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.summary(), self.perfdata())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MetricRange;

    fn result(findings: Vec<Finding>, metric: Option<&str>) -> SubsystemResult {
        SubsystemResult {
            findings,
            metrics: metric
                .map(|name| vec![Metric::with_critical(name, 1u32, MetricRange::new(0.0, 2.0))])
                .unwrap_or_default(),
        }
    }

    #[test]
    fn test_empty_report_is_ok() {
        let report = CheckReport::new();
        assert_eq!(report.status(), PluginStatus::Ok);
        assert_eq!(report.to_string(), "JBOD OK | ");
    }

    #[test]
    fn test_ok_keeps_metrics() {
        let mut report = CheckReport::new();
        report.merge(result(vec![], Some("Fan0_RPM")));
        report.merge(result(vec![], Some("Volt_0")));
        assert_eq!(
            report.to_string(),
            "JBOD OK | Fan0_RPM=1;;0:2;; Volt_0=1;;0:2;;"
        );
    }

    #[test]
    fn test_warning_status() {
        let mut report = CheckReport::new();
        report.merge(result(vec![Finding::warning("w1")], None));
        assert_eq!(report.status(), PluginStatus::Warning);
        assert_eq!(report.summary(), "w1");
    }

    #[test]
    fn test_criticals_precede_warnings() {
        let mut report = CheckReport::new();
        report.merge(result(vec![Finding::warning("temp warm")], None));
        report.merge(result(vec![Finding::critical("PSU0 bad")], None));
        report.merge(result(vec![Finding::critical("Volt_1 low"), Finding::warning("w2")], None));
        assert_eq!(report.status(), PluginStatus::Critical);
        assert_eq!(report.summary(), "PSU0 bad, Volt_1 low, temp warm, w2");
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let build = || {
            let mut report = CheckReport::new();
            report.merge(result(vec![Finding::critical("a"), Finding::warning("b")], Some("m")));
            report.to_string()
        };
        assert_eq!(build(), build());
    }
}
