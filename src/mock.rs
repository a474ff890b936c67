//! Mock implementations for testing
//!
//! Provides a scripted enclosure tool for unit testing without real hardware.

use crate::error::ToolError;
use crate::ses::{EnclosureTool, Page};

use std::collections::HashMap;
use std::sync::Mutex;

/// Canned reply for one invocation
#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Stderr(String),
    ExitStatus(i32),
}

impl Reply {
    fn into_result(self, program: &str) -> Result<String, ToolError> {
        match self {
            Self::Text(text) if text.trim().is_empty() => Err(ToolError::EmptyOutput {
                program: program.to_string(),
            }),
            Self::Text(text) => Ok(text),
            Self::Stderr(line) => Err(ToolError::Stderr {
                program: program.to_string(),
                line,
            }),
            Self::ExitStatus(code) => Err(ToolError::ExitStatus {
                program: program.to_string(),
                code,
            }),
        }
    }
}

/// Scripted `lsscsi`/`sg_ses` replacement
///
/// Unscripted pages behave like a tool that printed nothing. Every call is
/// recorded as the command line the real tool would have run.
#[derive(Debug, Default)]
pub struct MockTool {
    listing: Option<Reply>,
    pages: HashMap<(String, Page, Option<String>), Reply>,
    calls: Mutex<Vec<String>>,
}

impl MockTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the `lsscsi -g` output
    pub fn with_listing(mut self, text: &str) -> Self {
        self.listing = Some(Reply::Text(text.to_string()));
        self
    }

    /// Builder: set a full page for a device
    pub fn with_page(mut self, device: &str, page: Page, text: &str) -> Self {
        self.pages
            .insert((device.to_string(), page, None), Reply::Text(text.to_string()));
        self
    }

    /// Builder: set a status page restricted to one element
    pub fn with_element_page(mut self, device: &str, element: &str, text: &str) -> Self {
        self.pages.insert(
            (device.to_string(), Page::Status, Some(element.to_string())),
            Reply::Text(text.to_string()),
        );
        self
    }

    /// Builder: make a full page fail with a non-zero exit
    pub fn with_failing_page(mut self, device: &str, page: Page, code: i32) -> Self {
        self.pages
            .insert((device.to_string(), page, None), Reply::ExitStatus(code));
        self
    }

    /// Builder: make an element page exit non-zero without stderr
    pub fn with_element_exit_status(mut self, device: &str, element: &str, code: i32) -> Self {
        self.pages.insert(
            (device.to_string(), Page::Status, Some(element.to_string())),
            Reply::ExitStatus(code),
        );
        self
    }

    /// Builder: make an element page write to stderr
    pub fn with_failing_element_page(mut self, device: &str, element: &str, stderr: &str) -> Self {
        self.pages.insert(
            (device.to_string(), Page::Status, Some(element.to_string())),
            Reply::Stderr(stderr.to_string()),
        );
        self
    }

    /// Command lines invoked so far
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl EnclosureTool for MockTool {
    fn scsi_listing(&self) -> Result<String, ToolError> {
        self.record("lsscsi -g".to_string());
        self.listing
            .clone()
            .unwrap_or(Reply::Text(String::new()))
            .into_result("lsscsi")
    }

    fn ses_page(&self, device: &str, page: Page, element: Option<&str>) -> Result<String, ToolError> {
        let index = element
            .map(|e| format!(" --index={}", e))
            .unwrap_or_default();
        self.record(format!("sg_ses --page={}{} {}", page.as_arg(), index, device));

        let key = (device.to_string(), page, element.map(str::to_string));
        self.pages
            .get(&key)
            .cloned()
            .unwrap_or(Reply::Text(String::new()))
            .into_result("sg_ses")
    }
}
