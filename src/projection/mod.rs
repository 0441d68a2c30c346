//! Projection of an automation into the node/edge lists handed to the graph
//! renderer.
//!
//! Every leaf step gets a placeholder child so the user always has somewhere
//! to click to extend the flow. An empty automation projects a single root
//! placeholder.

pub mod layout;

pub use layout::{GraphLayout, PositionedNode, TreeLayout};

use std::collections::HashSet;

use serde::Serialize;

use crate::catalog::{StepCatalog, StepCategory, StepKind};
use crate::model::{Automation, AutomationGraph};

pub const ROOT_PLACEHOLDER_ID: &str = "placeholder-root";
const PLACEHOLDER_LABEL: &str = "+";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FlowNodeType {
    Step,
    Placeholder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FlowEdgeType {
    Workflow,
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNode {
    pub id: String,
    pub node_type: FlowNodeType,
    pub label: String,
    pub kind: Option<StepKind>,
    pub category: Option<StepCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub edge_type: FlowEdgeType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

impl FlowGraph {
    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &FlowNode> {
        self.nodes
            .iter()
            .filter(|n| n.node_type == FlowNodeType::Placeholder)
    }
}

pub fn placeholder_id(step_id: &str) -> String {
    format!("placeholder-{}", step_id)
}

/// Derive renderer nodes and edges from the automation's step list.
///
/// Edges with a missing endpoint and repeated step ids are dropped; the
/// validator reports them. Placeholder ids get a numeric suffix when a step
/// or edge already uses the plain form, so every node id stays unique.
pub fn project_graph(automation: &Automation) -> FlowGraph {
    let catalog = StepCatalog::global();
    let graph = AutomationGraph::build_lenient(automation);

    if graph.node_indices.is_empty() {
        return FlowGraph {
            nodes: vec![placeholder(ROOT_PLACEHOLDER_ID.to_string())],
            edges: vec![],
        };
    }

    let mut flow = FlowGraph::default();
    for idx in graph.graph.node_indices() {
        let Some(step) = automation.step(&graph.graph[idx]) else {
            continue;
        };
        flow.nodes.push(FlowNode {
            id: step.id.clone(),
            node_type: FlowNodeType::Step,
            label: step.label(catalog).to_string(),
            kind: Some(step.kind),
            category: Some(step.kind.category()),
        });
    }

    for edge in graph.graph.edge_indices() {
        let Some((s, t)) = graph.graph.edge_endpoints(edge) else {
            continue;
        };
        flow.edges.push(FlowEdge {
            id: graph.graph[edge].clone(),
            source: graph.graph[s].clone(),
            target: graph.graph[t].clone(),
            edge_type: FlowEdgeType::Workflow,
        });
    }

    let mut taken: HashSet<String> = flow
        .nodes
        .iter()
        .map(|n| n.id.clone())
        .chain(flow.edges.iter().map(|e| e.id.clone()))
        .collect();
    for leaf in graph.leaves() {
        let id = unique_id(placeholder_id(leaf), &mut taken);
        let edge_id = unique_id(format!("{}-{}", leaf, id), &mut taken);
        flow.edges.push(FlowEdge {
            id: edge_id,
            source: leaf.to_string(),
            target: id.clone(),
            edge_type: FlowEdgeType::Placeholder,
        });
        flow.nodes.push(placeholder(id));
    }

    flow
}

/// `base`, or `base-n` for the smallest free `n`. Records the result as taken.
fn unique_id(base: String, taken: &mut HashSet<String>) -> String {
    let mut id = base.clone();
    let mut n = 1u32;
    while taken.contains(&id) {
        id = format!("{}-{}", base, n);
        n += 1;
    }
    taken.insert(id.clone());
    id
}

fn placeholder(id: String) -> FlowNode {
    FlowNode {
        id,
        node_type: FlowNodeType::Placeholder,
        label: PLACEHOLDER_LABEL.to_string(),
        kind: None,
        category: None,
    }
}
