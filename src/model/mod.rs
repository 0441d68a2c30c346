//! Automation entity: JSON parsing, graph view and step-list edits.

pub mod edit;
pub mod graph;
pub mod types;

pub use graph::AutomationGraph;
pub use types::*;

use crate::error::AutomationError;

/// Deserialize an automation JSON string.
pub fn parse(json: &str) -> Result<Automation, AutomationError> {
    serde_json::from_str::<Automation>(json).map_err(|e| AutomationError::Parse(e.to_string()))
}

/// Parse JSON and build the strict graph in one step.
pub fn parse_and_build(json: &str) -> Result<(Automation, AutomationGraph), AutomationError> {
    let automation = parse(json)?;
    let graph = AutomationGraph::build(&automation)?;
    Ok((automation, graph))
}
