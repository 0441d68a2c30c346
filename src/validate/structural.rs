//! Graph-level structural rules (A001–A007).

use std::collections::HashSet;

use petgraph::algo::kosaraju_scc;
use petgraph::visit::Bfs;

use super::ValidationIssue;
use crate::catalog::StepCategory;
use crate::model::{Automation, AutomationGraph};

/// Run all structural rules. Returns all issues found.
pub fn validate_structural(
    automation: &Automation,
    graph: &AutomationGraph,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    a001_unique_step_ids(automation, &mut issues);
    a002_edges_reference_existing_steps(automation, graph, &mut issues);
    a003_no_duplicate_edges(automation, &mut issues);
    a004_no_self_loops(automation, &mut issues);
    a005_no_cycles(graph, &mut issues);
    a006_source_no_incoming(automation, graph, &mut issues);
    a007_reachable_from_source(automation, graph, &mut issues);

    issues
}

fn issue(code: &'static str, message: String, step_id: Option<&str>) -> ValidationIssue {
    ValidationIssue {
        code,
        message,
        step_id: step_id.map(str::to_string),
    }
}

fn a001_unique_step_ids(automation: &Automation, issues: &mut Vec<ValidationIssue>) {
    let mut seen = HashSet::new();
    for step in &automation.steps {
        if !seen.insert(step.id.as_str()) {
            issues.push(issue(
                "A001",
                format!("Duplicate step id '{}'", step.id),
                Some(step.id.as_str()),
            ));
        }
    }
}

fn a002_edges_reference_existing_steps(
    automation: &Automation,
    graph: &AutomationGraph,
    issues: &mut Vec<ValidationIssue>,
) {
    for edge in &automation.edges {
        for (end, step_id) in [("source", &edge.source), ("target", &edge.target)] {
            if !graph.node_indices.contains_key(step_id) {
                issues.push(issue(
                    "A002",
                    format!(
                        "Edge '{}' references unknown {} step '{}'",
                        edge.id, end, step_id
                    ),
                    None,
                ));
            }
        }
    }
}

fn a003_no_duplicate_edges(automation: &Automation, issues: &mut Vec<ValidationIssue>) {
    let mut seen = HashSet::new();
    for edge in &automation.edges {
        if !seen.insert((edge.source.as_str(), edge.target.as_str())) {
            issues.push(issue(
                "A003",
                format!("Duplicate edge from '{}' to '{}'", edge.source, edge.target),
                None,
            ));
        }
    }
}

fn a004_no_self_loops(automation: &Automation, issues: &mut Vec<ValidationIssue>) {
    for edge in &automation.edges {
        if edge.source == edge.target {
            issues.push(issue(
                "A004",
                format!("Self-loop on step '{}'", edge.source),
                Some(edge.source.as_str()),
            ));
        }
    }
}

fn a005_no_cycles(graph: &AutomationGraph, issues: &mut Vec<ValidationIssue>) {
    // Single-node components are self-loops at most, which A004 reports.
    if kosaraju_scc(&graph.graph).iter().any(|scc| scc.len() > 1) {
        issues.push(issue(
            "A005",
            "Automation graph contains a cycle".to_string(),
            None,
        ));
    }
}

fn a006_source_no_incoming(
    automation: &Automation,
    graph: &AutomationGraph,
    issues: &mut Vec<ValidationIssue>,
) {
    for step in &automation.steps {
        if step.kind.category() == StepCategory::Source && graph.incoming_count(&step.id) > 0 {
            issues.push(issue(
                "A006",
                format!("Source step '{}' must not have incoming edges", step.id),
                Some(step.id.as_str()),
            ));
        }
    }
}

fn a007_reachable_from_source(
    automation: &Automation,
    graph: &AutomationGraph,
    issues: &mut Vec<ValidationIssue>,
) {
    let sources: Vec<_> = automation
        .steps
        .iter()
        .filter(|s| s.kind.category() == StepCategory::Source)
        .filter_map(|s| graph.node_indices.get(&s.id).copied())
        .collect();
    if sources.is_empty() {
        return;
    }

    let mut reachable = HashSet::new();
    for start in sources {
        let mut bfs = Bfs::new(&graph.graph, start);
        while let Some(nx) = bfs.next(&graph.graph) {
            reachable.insert(nx);
        }
    }

    let mut reported = HashSet::new();
    for step in &automation.steps {
        let Some(&idx) = graph.node_indices.get(&step.id) else {
            continue;
        };
        if !reachable.contains(&idx) && reported.insert(idx) {
            issues.push(issue(
                "A007",
                format!("Step '{}' is not reachable from any source step", step.id),
                Some(step.id.as_str()),
            ));
        }
    }
}
