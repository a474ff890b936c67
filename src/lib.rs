//! jbodcheck - SES health checks for JBOD disk enclosures
//!
//! This library queries enclosures through sg3_utils, parses the SES status
//! report and classifies fans, temperatures, voltages, currents and power
//! supplies against per-model profiles.
//!
//! # Modules
//!
//! - [`cli`]: Command-line interface definitions and output rendering
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system
//! - [`domain`]: Domain models
//! - [`error`]: Error types
//! - [`health`]: Per-subsystem evaluation and aggregation
//! - [`profile`]: Built-in enclosure model profiles
//! - [`report`]: SES report parsing
//! - [`ses`]: External tool abstraction and enclosure discovery

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod health;
pub mod profile;
pub mod report;
pub mod ses;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{AppError, Result};
