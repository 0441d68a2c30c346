//! petgraph-based directed graph over an automation's steps.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use super::types::Automation;
use crate::error::AutomationError;

pub struct AutomationGraph {
    /// Node weight is the step id, edge weight the edge id.
    pub graph: DiGraph<String, String>,
    pub node_indices: HashMap<String, NodeIndex>,
}

impl AutomationGraph {
    /// Build the graph, failing on the first edge that points at a missing step.
    pub fn build(automation: &Automation) -> Result<Self, AutomationError> {
        let mut graph = Self::with_steps(automation);
        for edge in &automation.edges {
            match (
                graph.node_indices.get(&edge.source),
                graph.node_indices.get(&edge.target),
            ) {
                (Some(&s), Some(&t)) => {
                    graph.graph.add_edge(s, t, edge.id.clone());
                }
                (None, _) => return Err(AutomationError::UnknownStep(edge.source.clone())),
                (_, None) => return Err(AutomationError::UnknownStep(edge.target.clone())),
            }
        }
        Ok(graph)
    }

    /// Build the graph, skipping edges with a missing endpoint. Validation
    /// reports those separately.
    pub fn build_lenient(automation: &Automation) -> Self {
        let mut graph = Self::with_steps(automation);
        for edge in &automation.edges {
            if let (Some(&s), Some(&t)) = (
                graph.node_indices.get(&edge.source),
                graph.node_indices.get(&edge.target),
            ) {
                graph.graph.add_edge(s, t, edge.id.clone());
            }
        }
        graph
    }

    fn with_steps(automation: &Automation) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();
        for step in &automation.steps {
            // First occurrence wins for duplicated ids.
            if node_indices.contains_key(&step.id) {
                continue;
            }
            let idx = graph.add_node(step.id.clone());
            node_indices.insert(step.id.clone(), idx);
        }
        AutomationGraph {
            graph,
            node_indices,
        }
    }

    pub fn successors(&self, step_id: &str) -> Vec<&str> {
        self.neighbors(step_id, Direction::Outgoing)
    }

    pub fn predecessors(&self, step_id: &str) -> Vec<&str> {
        self.neighbors(step_id, Direction::Incoming)
    }

    fn neighbors(&self, step_id: &str, direction: Direction) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(step_id) else {
            return vec![];
        };
        self.graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n].as_str())
            .collect()
    }

    pub fn incoming_count(&self, step_id: &str) -> usize {
        self.predecessors(step_id).len()
    }

    pub fn outgoing_count(&self, step_id: &str) -> usize {
        self.successors(step_id).len()
    }

    /// Steps with no outgoing edges, in graph insertion order.
    pub fn leaves(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Outgoing)
                    .next()
                    .is_none()
            })
            .map(|idx| self.graph[idx].as_str())
            .collect()
    }
}
