//! Check command implementation
//!
//! Discovers enclosures, fetches the status page of the requested one and
//! evaluates the selected subsystems in output order.

use crate::cli::args::{Cli, OutputFormat};
use crate::cli::output::{print_output, EnclosureListing, PluginDisplay, PluginResult};
use crate::config::Config;
use crate::domain::{Enclosure, IdMode, PluginStatus};
use crate::error::Result;
use crate::health::{CheckReport, HealthEvaluator, Subsystem};
use crate::profile::ProfileRegistry;
use crate::report::RawReport;
use crate::ses::{self, EnclosureTool, Page, SgUtils};

/// What to check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    /// Enclosure identifier, `None` only lists what was found
    pub target: Option<String>,
    pub id_mode: IdMode,
    pub subsystems: Vec<Subsystem>,
}

impl CheckRequest {
    pub fn new(target: Option<String>, id_mode: IdMode, subsystems: &[Subsystem]) -> Self {
        let mut subsystems = subsystems.to_vec();
        subsystems.sort();
        subsystems.dedup();
        Self {
            target,
            id_mode,
            subsystems,
        }
    }

    fn wants(&self, subsystem: Subsystem) -> bool {
        self.subsystems.contains(&subsystem)
    }
}

/// How a check run ended
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    /// The enclosure was found and evaluated
    Completed {
        enclosure: Enclosure,
        report: CheckReport,
    },
    /// No enclosure with the requested identifier
    UnknownTarget {
        requested: Option<String>,
        enclosures: Vec<Enclosure>,
    },
}

impl CheckOutcome {
    pub fn status(&self) -> PluginStatus {
        match self {
            Self::Completed { report, .. } => report.status(),
            Self::UnknownTarget { .. } => PluginStatus::Unknown,
        }
    }
}

/// Run one check against any enclosure tool
pub fn check_enclosure<T: EnclosureTool>(
    tool: &T,
    registry: &ProfileRegistry,
    request: &CheckRequest,
) -> Result<CheckOutcome> {
    let enclosures = ses::discover(tool, registry, request.id_mode)?;

    let found = request
        .target
        .as_deref()
        .and_then(|id| enclosures.iter().find(|e| e.identifier == id));
    let Some(enclosure) = found.cloned() else {
        return Ok(CheckOutcome::UnknownTarget {
            requested: request.target.clone(),
            enclosures,
        });
    };

    let profile = registry.get(&enclosure.model)?;
    let status = RawReport::parse(&tool.ses_page(&enclosure.device, Page::Status, None)?);
    log::debug!(
        "status page sections: {:?}",
        status.section_names().collect::<Vec<_>>()
    );

    let thresholds = if request.wants(Subsystem::Temperature) {
        let page = RawReport::parse(&tool.ses_page(&enclosure.device, Page::Thresholds, None)?);
        log::debug!(
            "threshold page sections: {:?}",
            page.section_names().collect::<Vec<_>>()
        );
        page
    } else {
        RawReport::default()
    };

    let evaluator = HealthEvaluator::new(profile);
    let mut report = CheckReport::new();
    for &subsystem in &request.subsystems {
        let result = match subsystem {
            Subsystem::Fan => evaluator.fans(&status)?,
            Subsystem::Temperature => evaluator.temperatures(&status, &thresholds)?,
            Subsystem::Psu => evaluator.psus(&status)?,
            Subsystem::Voltage => evaluator.voltages(&status)?,
            Subsystem::Current => evaluator.currents(&status)?,
        };
        log::debug!(
            "{}: {} findings, {} metrics",
            subsystem,
            result.findings.len(),
            result.metrics.len()
        );
        report.merge(result);
    }

    Ok(CheckOutcome::Completed { enclosure, report })
}

/// Execute the check command against the real sg3_utils tools
pub fn run_check(cli: &Cli, config: &Config) -> Result<PluginStatus> {
    let tool = SgUtils::from_config(config);
    let registry = ProfileRegistry::from_config(config)?;
    let request = CheckRequest::new(cli.device.clone(), config.id_mode(), &cli.subsystems());

    let outcome = check_enclosure(&tool, &registry, &request)?;
    print_outcome(&outcome, cli.format)
}

fn print_outcome(outcome: &CheckOutcome, format: OutputFormat) -> Result<PluginStatus> {
    let status = match outcome {
        CheckOutcome::Completed { enclosure, report } => {
            let result = PluginResult::new(enclosure, report);
            print_output(&result, format)?;
            result.status()
        }
        CheckOutcome::UnknownTarget {
            requested,
            enclosures,
        } => {
            let listing = EnclosureListing::new(requested.clone(), enclosures.clone());
            print_output(&listing, format)?;
            listing.status()
        }
    };
    Ok(status)
}
