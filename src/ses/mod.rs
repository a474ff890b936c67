//! SES tool abstraction layer
//!
//! Provides a trait over the external `sg_ses`/`lsscsi` tools for testability,
//! the process-spawning implementation, and enclosure discovery.

pub mod command;
pub mod discovery;
pub mod traits;

pub use command::SgUtils;
pub use discovery::discover;
pub use traits::{EnclosureTool, Page};
