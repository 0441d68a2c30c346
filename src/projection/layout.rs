//! Layout contract for the graph renderer, plus the layered tree layout the
//! editor uses by default.

use std::collections::{HashMap, VecDeque};

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::Serialize;

use super::FlowGraph;
use crate::config::EditorConfig;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

/// Assigns positions to projected nodes. Called after every graph mutation.
pub trait GraphLayout {
    fn layout(&self, graph: &FlowGraph) -> Vec<PositionedNode>;
}

/// Top-down layered layout on a fixed node size. A node's row is the longest
/// path from any root; siblings in a row are centred around `x = 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeLayout {
    pub node_width: f64,
    pub node_height: f64,
}

impl Default for TreeLayout {
    fn default() -> Self {
        TreeLayout {
            node_width: 200.0,
            node_height: 150.0,
        }
    }
}

impl TreeLayout {
    pub fn from_config(config: &EditorConfig) -> Self {
        TreeLayout {
            node_width: config.node_width,
            node_height: config.node_height,
        }
    }
}

impl GraphLayout for TreeLayout {
    fn layout(&self, flow: &FlowGraph) -> Vec<PositionedNode> {
        let mut graph: DiGraph<usize, ()> = DiGraph::new();
        let mut indices = HashMap::new();
        for (i, node) in flow.nodes.iter().enumerate() {
            indices.insert(node.id.as_str(), graph.add_node(i));
        }
        for edge in &flow.edges {
            if let (Some(&s), Some(&t)) = (
                indices.get(edge.source.as_str()),
                indices.get(edge.target.as_str()),
            ) {
                graph.add_edge(s, t, ());
            }
        }

        let depths = depths(&graph);

        let mut rows: Vec<Vec<usize>> = Vec::new();
        for idx in graph.node_indices() {
            let depth = depths.get(&idx).copied().unwrap_or(0);
            if rows.len() <= depth {
                rows.resize_with(depth + 1, Vec::new);
            }
            rows[depth].push(graph[idx]);
        }

        let mut positioned = vec![None; flow.nodes.len()];
        for (depth, row) in rows.iter().enumerate() {
            let offset = (row.len() as f64 - 1.0) / 2.0;
            for (slot, &node) in row.iter().enumerate() {
                positioned[node] = Some(PositionedNode {
                    id: flow.nodes[node].id.clone(),
                    x: (slot as f64 - offset) * self.node_width,
                    y: depth as f64 * self.node_height,
                });
            }
        }
        positioned.into_iter().flatten().collect()
    }
}

/// Longest-path depth per node. Falls back to breadth-first depth from the
/// roots when the graph has a cycle; nodes only reachable through a cycle sit
/// in row 0.
fn depths(graph: &DiGraph<usize, ()>) -> HashMap<NodeIndex, usize> {
    let mut depth: HashMap<NodeIndex, usize> = HashMap::new();
    match toposort(graph, None) {
        Ok(order) => {
            for idx in order {
                let d = graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .filter_map(|p| depth.get(&p))
                    .map(|d| d + 1)
                    .max()
                    .unwrap_or(0);
                depth.insert(idx, d);
            }
        }
        Err(_) => {
            let mut queue: VecDeque<NodeIndex> = graph
                .node_indices()
                .filter(|&idx| graph.neighbors_directed(idx, Direction::Incoming).next().is_none())
                .collect();
            for &root in &queue {
                depth.insert(root, 0);
            }
            while let Some(idx) = queue.pop_front() {
                let next = depth[&idx] + 1;
                for child in graph.neighbors_directed(idx, Direction::Outgoing) {
                    if !depth.contains_key(&child) {
                        depth.insert(child, next);
                        queue.push_back(child);
                    }
                }
            }
        }
    }
    depth
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diamond_places_join_below_both_branches() {
        let mut graph: DiGraph<usize, ()> = DiGraph::new();
        let a = graph.add_node(0);
        let b = graph.add_node(1);
        let c = graph.add_node(2);
        let d = graph.add_node(3);
        graph.add_edge(a, b, ());
        graph.add_edge(a, c, ());
        graph.add_edge(b, d, ());
        graph.add_edge(c, d, ());
        graph.add_edge(a, d, ());

        let depths = depths(&graph);
        assert_eq!(depths[&a], 0);
        assert_eq!(depths[&b], 1);
        assert_eq!(depths[&d], 2);
    }

    #[test]
    fn cycle_falls_back_to_breadth_first() {
        let mut graph: DiGraph<usize, ()> = DiGraph::new();
        let a = graph.add_node(0);
        let b = graph.add_node(1);
        let c = graph.add_node(2);
        graph.add_edge(a, b, ());
        graph.add_edge(b, c, ());
        graph.add_edge(c, b, ());

        let depths = depths(&graph);
        assert_eq!(depths[&a], 0);
        assert_eq!(depths[&b], 1);
        assert_eq!(depths[&c], 2);
    }
}
