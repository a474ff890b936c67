//! CLI argument parsing and output formatting
//!
//! Uses clap for argument definitions.

pub mod args;
pub mod output;

pub use args::{Cli, OutputFormat};
