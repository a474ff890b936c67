//! Unified error types for jbodcheck
//!
//! Every failure here ends the check run with an UNKNOWN plugin status.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Failure of an external diagnostic tool
    #[error("{0}")]
    Tool(#[from] ToolError),

    /// Report text did not match the layout expected for the model
    #[error("Report parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error (writing output)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from invoking `sg_ses` / `lsscsi`
#[derive(Error, Debug)]
pub enum ToolError {
    /// Executable not found in PATH
    #[error("{0} not found. Is sg3-utils/lsscsi installed?")]
    NotFound(String),

    /// Process could not be started
    #[error("Failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool wrote to its error stream
    #[error("{program} reported an error: {line}")]
    Stderr { program: String, line: String },

    /// The tool exited with a non-zero status
    #[error("{program} exited with status {code}")]
    ExitStatus { program: String, code: i32 },

    /// The tool was killed by a signal
    #[error("{program} was terminated by a signal")]
    Killed { program: String },

    /// The tool succeeded but printed nothing
    #[error("{program} produced no output")]
    EmptyOutput { program: String },

    /// The tool did not finish in time
    #[error("{program} timed out after {seconds}s")]
    Timeout { program: String, seconds: u64 },
}

/// Errors from turning report text into sensor records
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Section header never appeared in the report
    #[error("section '{0}' not found in report")]
    MissingSection(String),

    /// A record has fewer lines than its layout requires
    #[error("record {record} of section '{section}' has {found} lines, needs {needed}")]
    TruncatedRecord {
        section: String,
        record: usize,
        found: usize,
        needed: usize,
    },

    /// An element has no counterpart on a companion page
    #[error("section '{section}' has no record for element {index}")]
    MissingRecord { section: String, index: usize },

    /// A line did not match its expected shape
    #[error("section '{section}': expected {expected}, got '{line}'")]
    UnexpectedLine {
        section: String,
        expected: &'static str,
        line: String,
    },
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// No profile exists for the enclosure model
    #[error("No profile for enclosure model '{0}'")]
    UnknownModel(String),

    /// The report contains a sensor the model profile does not describe
    #[error("{model}: {kind} sensor {index} is not described by the model profile")]
    SensorOutOfProfile {
        model: String,
        kind: &'static str,
        index: usize,
    },
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
