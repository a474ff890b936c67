//! Command handlers
//!
//! The check handler orchestrates discovery, report fetching and evaluation
//! for one enclosure.

pub mod check;

pub use check::{check_enclosure, run_check, CheckOutcome, CheckRequest};
