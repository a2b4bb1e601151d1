//! petgraph-based directed graph wrapper for the visual workflow.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::types::Workflow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeLabel {
    pub edge_id: String,
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
}

/// Adjacency view over a workflow. Construction is total: edges whose
/// endpoints are unknown are skipped, since diagnosing them is the
/// normalizer's job, not the graph's.
pub struct WorkflowGraph {
    pub graph: DiGraph<String, EdgeLabel>,
    pub node_indices: HashMap<String, NodeIndex>,
}

impl WorkflowGraph {
    pub fn build(workflow: &Workflow) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();

        for node in &workflow.nodes {
            let id = node.id.clone();
            let idx = graph.add_node(id.clone());
            node_indices.insert(id, idx);
        }

        for edge in &workflow.edges {
            let (Some(&s), Some(&t)) = (
                node_indices.get(&edge.source),
                node_indices.get(&edge.target),
            ) else {
                continue;
            };
            graph.add_edge(
                s,
                t,
                EdgeLabel {
                    edge_id: edge.id.clone(),
                    source_handle: edge.source_handle.clone(),
                    target_handle: edge.target_handle.clone(),
                },
            );
        }

        WorkflowGraph {
            graph,
            node_indices,
        }
    }

    pub fn outgoing_edges(&self, node_id: &str) -> Vec<(&str, &EdgeLabel)> {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return vec![];
        };
        self.graph
            .edges_directed(idx, petgraph::Direction::Outgoing)
            .map(|e| (self.graph[e.target()].as_str(), e.weight()))
            .collect()
    }

    pub fn incoming_count(&self, node_id: &str) -> usize {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return 0;
        };
        self.graph
            .edges_directed(idx, petgraph::Direction::Incoming)
            .count()
    }

    pub fn outgoing_count(&self, node_id: &str) -> usize {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return 0;
        };
        self.graph
            .edges_directed(idx, petgraph::Direction::Outgoing)
            .count()
    }
}
