//! Graph-level structural validation rules.

use std::collections::HashSet;

use petgraph::algo::is_cyclic_directed;
use petgraph::visit::Bfs;

use crate::error::{ErrorCode, ValidationError};
use crate::parse::graph::WorkflowGraph;
use crate::parse::types::{Node, Workflow};

/// Known trigger kinds. Last-resort identification for nodes whose
/// category and type string carry no trigger tag.
pub const TRIGGER_TYPES: [&str; 5] = [
    "webhook",
    "schedule",
    "manual",
    "email_received",
    "form_submitted",
];

/// Identify trigger nodes, in priority order: category tag, then a
/// "trigger" substring in the kind, then the [`TRIGGER_TYPES`] allowlist.
/// The first stage producing a non-empty set wins.
pub fn detect_triggers(workflow: &Workflow) -> Vec<&Node> {
    let by_category: Vec<&Node> = workflow
        .nodes
        .iter()
        .filter(|n| n.category_is_trigger())
        .collect();
    if !by_category.is_empty() {
        return by_category;
    }

    let by_type: Vec<&Node> = workflow
        .nodes
        .iter()
        .filter(|n| n.type_mentions_trigger())
        .collect();
    if !by_type.is_empty() {
        return by_type;
    }

    workflow
        .nodes
        .iter()
        .filter(|n| TRIGGER_TYPES.contains(&n.kind()))
        .collect()
}

/// BFS from the trigger; every unvisited node is an error, plus one
/// aggregate warning carrying the count.
pub fn check_reachability(
    workflow: &Workflow,
    graph: &WorkflowGraph,
    trigger: &Node,
    errors: &mut Vec<ValidationError>,
    warnings: &mut Vec<String>,
) {
    let Some(&trigger_idx) = graph.node_indices.get(&trigger.id) else {
        return;
    };

    let mut reachable = HashSet::new();
    let mut bfs = Bfs::new(&graph.graph, trigger_idx);
    while let Some(nx) = bfs.next(&graph.graph) {
        reachable.insert(nx);
    }

    let mut unreachable = 0usize;
    for node in &workflow.nodes {
        let Some(&idx) = graph.node_indices.get(&node.id) else {
            continue;
        };
        if !reachable.contains(&idx) {
            unreachable += 1;
            errors.push(ValidationError::node(
                ErrorCode::UnreachableNode,
                format!("Node '{}' is not reachable from the trigger", node.id),
                node.id.clone(),
            ));
        }
    }
    if unreachable > 0 {
        warnings.push(format!(
            "{} node(s) are not reachable from the trigger",
            unreachable
        ));
    }
}

/// Every non-trigger node takes exactly one incoming edge; merge nodes
/// are exempt from the upper bound.
pub fn check_incoming(
    workflow: &Workflow,
    graph: &WorkflowGraph,
    trigger_ids: &HashSet<&str>,
    errors: &mut Vec<ValidationError>,
) {
    for node in &workflow.nodes {
        if trigger_ids.contains(node.id.as_str()) {
            continue;
        }
        let count = graph.incoming_count(&node.id);
        if count == 0 {
            errors.push(ValidationError::node(
                ErrorCode::NoIncoming,
                format!("Node '{}' has no incoming edge", node.id),
                node.id.clone(),
            ));
        } else if count > 1 && !node.is_merge() {
            errors.push(ValidationError::node(
                ErrorCode::MultipleIncoming,
                format!(
                    "Node '{}' has {} incoming edges; only merge nodes accept more than one",
                    node.id, count
                ),
                node.id.clone(),
            ));
        }
    }
}

/// Outgoing-edge cardinality, branching on node kind. switch and if_else
/// anomalies are warnings only: partially-edited graphs mid-session are
/// the auto-fixer's problem, not a save blocker.
pub fn check_outgoing(
    workflow: &Workflow,
    graph: &WorkflowGraph,
    errors: &mut Vec<ValidationError>,
    warnings: &mut Vec<String>,
) {
    for node in &workflow.nodes {
        let count = graph.outgoing_count(&node.id);
        if node.is_switch() {
            if count == 0 {
                warnings.push(format!(
                    "Switch node '{}' has no case edges; add at least one case",
                    node.id
                ));
            }
        } else if node.is_if_else() {
            if count != 2 {
                warnings.push(format!(
                    "Conditional node '{}' should have exactly 2 outgoing edges (true/false), found {}",
                    node.id, count
                ));
            }
        } else if count > 1 {
            errors.push(ValidationError::node(
                ErrorCode::TooManyOutgoing,
                format!(
                    "Node '{}' has {} outgoing edges; only 1 is allowed",
                    node.id, count
                ),
                node.id.clone(),
            ));
        }
    }
}

/// Single aggregate cycle error; no per-cycle enumeration.
pub fn check_cycles(graph: &WorkflowGraph, errors: &mut Vec<ValidationError>) {
    if is_cyclic_directed(&graph.graph) {
        errors.push(ValidationError::graph(
            ErrorCode::CycleDetected,
            "Workflow graph contains a cycle",
        ));
    }
}
