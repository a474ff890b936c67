//! Enclosure discovery
//!
//! Lists SCSI enclosures with `lsscsi -g`, keeps the models we have profiles
//! for and resolves each one to a display identifier.

use crate::domain::{Enclosure, IdMode};
use crate::error::ToolError;
use crate::profile::ProfileRegistry;
use crate::report::grammar;
use crate::ses::traits::{EnclosureTool, Page};

/// Element selecting the vendor-specific ID display on Xyratex enclosures
const FRONT_PANEL_ELEMENT: &str = "14,0";
/// Element whose page header carries the logical identifier
const LOGICAL_ID_ELEMENT: &str = "0";

/// Discover known enclosures in listing order
///
/// An ID lookup that exits non-zero or prints nothing falls back to the
/// enclosure's position. Anything written to stderr is an error.
///
/// When two enclosures resolve to the same identifier the later one replaces
/// the earlier entry.
pub fn discover<T: EnclosureTool>(
    tool: &T,
    registry: &ProfileRegistry,
    mode: IdMode,
) -> Result<Vec<Enclosure>, ToolError> {
    let listing = tool.scsi_listing()?;
    let mut enclosures: Vec<Enclosure> = Vec::new();

    for line in listing.lines().filter(|l| l.contains("enclosu")) {
        let Some(found) = grammar::scsi_enclosure(line) else {
            log::debug!("ignoring unparsable enclosure line: {}", line);
            continue;
        };
        if !registry.is_known(found.model) {
            log::debug!(
                "ignoring unsupported enclosure model {} (known: {})",
                found.model,
                registry.models().collect::<Vec<_>>().join(", ")
            );
            continue;
        }

        let device = format!("/dev/{}", found.sg_name);
        let identifier = match resolve_identifier(tool, &device, mode)? {
            Some(id) => id,
            None => enclosures.len().to_string(),
        };
        let enclosure = Enclosure::new(found.model, device, identifier);
        log::debug!("discovered {} at {}", enclosure, enclosure.device);

        match enclosures
            .iter_mut()
            .find(|e| e.identifier == enclosure.identifier)
        {
            Some(existing) => *existing = enclosure,
            None => enclosures.push(enclosure),
        }
    }

    Ok(enclosures)
}

fn resolve_identifier<T: EnclosureTool>(
    tool: &T,
    device: &str,
    mode: IdMode,
) -> Result<Option<String>, ToolError> {
    let element = match mode {
        IdMode::FrontPanel => FRONT_PANEL_ELEMENT,
        IdMode::Logical => LOGICAL_ID_ELEMENT,
    };
    let text = match tool.ses_page(device, Page::Status, Some(element)) {
        Ok(text) => text,
        Err(e @ (ToolError::EmptyOutput { .. } | ToolError::ExitStatus { .. })) => {
            log::debug!("no identifier for {}: {}", device, e);
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let id = text.lines().find_map(|line| match mode {
        IdMode::FrontPanel => grammar::front_panel_id(line).map(|id| id.to_string()),
        IdMode::Logical => grammar::logical_identifier(line).map(str::to_string),
    });
    Ok(id)
}
