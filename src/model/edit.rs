//! Step-list edits: extend from a node and insert on an edge.

use crate::catalog::StepKind;
use crate::error::AutomationError;

use super::types::{Automation, AutomationEdge, AutomationStep};

const STEP_PREFIX: &str = "step-";
const EDGE_PREFIX: &str = "edge-";

impl Automation {
    /// Append a step of `kind` as a child of `parent`. Without a parent the
    /// new step extends the last step in the list (or starts the graph).
    ///
    /// Returns the new step id.
    pub fn append_step(
        &mut self,
        kind: StepKind,
        parent: Option<&str>,
    ) -> Result<String, AutomationError> {
        let source = match parent {
            Some(parent) => {
                if self.step(parent).is_none() {
                    return Err(AutomationError::UnknownStep(parent.to_string()));
                }
                Some(parent.to_string())
            }
            None => self.steps.last().map(|s| s.id.clone()),
        };

        let step_id = self.next_step_id()?;
        let edge_id = match source {
            Some(_) => Some(self.next_edge_id()?),
            None => None,
        };
        self.steps.push(AutomationStep {
            id: step_id.clone(),
            kind,
            label: None,
        });
        if let (Some(source), Some(edge_id)) = (source, edge_id) {
            self.edges.push(AutomationEdge {
                id: edge_id,
                source,
                target: step_id.clone(),
            });
        }
        Ok(step_id)
    }

    /// Split edge `a -> b` into `a -> new -> b`. The original edge id is kept
    /// for `a -> new`.
    pub fn insert_step_on_edge(
        &mut self,
        edge_id: &str,
        kind: StepKind,
    ) -> Result<String, AutomationError> {
        let Some(pos) = self.edges.iter().position(|e| e.id == edge_id) else {
            return Err(AutomationError::UnknownEdge(edge_id.to_string()));
        };

        let step_id = self.next_step_id()?;
        let new_edge_id = self.next_edge_id()?;
        let old_target = std::mem::replace(&mut self.edges[pos].target, step_id.clone());

        self.steps.push(AutomationStep {
            id: step_id.clone(),
            kind,
            label: None,
        });
        self.edges.push(AutomationEdge {
            id: new_edge_id,
            source: step_id.clone(),
            target: old_target,
        });
        Ok(step_id)
    }

    fn next_step_id(&self) -> Result<String, AutomationError> {
        next_id(STEP_PREFIX, self.steps.iter().map(|s| s.id.as_str()))
    }

    fn next_edge_id(&self) -> Result<String, AutomationError> {
        next_id(EDGE_PREFIX, self.edges.iter().map(|e| e.id.as_str()))
    }
}

/// One past the highest numeric suffix in use, so ids are never reused.
/// Fails once the highest suffix is `u64::MAX`.
fn next_id<'a>(
    prefix: &str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<String, AutomationError> {
    let highest = ids
        .filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|n| n.parse::<u64>().ok())
        .max();
    let next = match highest {
        None => 1,
        Some(n) => n
            .checked_add(1)
            .ok_or_else(|| AutomationError::IdsExhausted(prefix.to_string()))?,
    };
    Ok(format!("{}{}", prefix, next))
}
