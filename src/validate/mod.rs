//! Structural validation of an automation graph.
//!
//! Run on demand through `AutomationScene::issues` and the wasm entry point.
//! Save and projection do not call it; projection tolerates the same defects
//! by dropping what it cannot draw.

pub mod structural;

use crate::model::{Automation, AutomationGraph};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub code: &'static str,
    pub message: String,
    /// The step the issue was found at, if applicable.
    pub step_id: Option<String>,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.step_id {
            Some(id) => write!(f, "[{}] {} (at step '{}')", self.code, self.message, id),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

/// Validate the whole automation. Returns all issues found.
pub fn validate_automation(automation: &Automation) -> Vec<ValidationIssue> {
    let graph = AutomationGraph::build_lenient(automation);
    structural::validate_structural(automation, &graph)
}
