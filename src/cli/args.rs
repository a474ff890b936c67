//! CLI argument definitions using clap derive
//!
//! Mirrors the classic `check_jbod` flag set: one positional enclosure ID and
//! one switch per subsystem.

use crate::health::Subsystem;
use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::Shell;

/// Monitor fans, PSUs, temperatures, voltages and currents of a JBOD
///
/// Queries the enclosure through SES and reports in monitoring-plugin format.
#[derive(Parser, Debug)]
#[command(name = "check_jbod")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase output verbosity
    #[arg(short, long)]
    pub verbose: bool,

    /// JBOD ID to check
    pub device: Option<String>,

    /// Use logical JBOD IDs
    #[arg(long)]
    pub logical: bool,

    /// Check fans
    #[arg(long)]
    pub fan: bool,

    /// Check voltages
    #[arg(long)]
    pub volt: bool,

    /// Check currents
    #[arg(long)]
    pub current: bool,

    /// Check PSU status
    #[arg(long = "psu_status", visible_alias = "psu-status")]
    pub psu_status: bool,

    /// Check temperatures based on internal thresholds
    #[arg(long)]
    pub temp: bool,

    /// Path to configuration file
    #[arg(short, long, env = "CHECK_JBOD_CONFIG")]
    pub config: Option<String>,

    /// Seconds to wait for each sg_ses/lsscsi invocation
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value = "nagios")]
    pub format: OutputFormat,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Requested subsystems in output order
    pub fn subsystems(&self) -> Vec<Subsystem> {
        Subsystem::ALL
            .into_iter()
            .filter(|s| match s {
                Subsystem::Fan => self.fan,
                Subsystem::Temperature => self.temp,
                Subsystem::Psu => self.psu_status,
                Subsystem::Voltage => self.volt,
                Subsystem::Current => self.current,
            })
            .collect()
    }

    /// `Some(true)` when the flag was given, so config values are kept otherwise
    pub fn flag(value: bool) -> Option<bool> {
        value.then_some(true)
    }
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Monitoring-plugin status line
    #[default]
    Nagios,
    /// JSON document with status, findings and metrics
    Json,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
