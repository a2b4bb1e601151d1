//! Auto-fix pass: repair malformed if_else branch wiring.
//!
//! Guarantees that every if_else node leaves this pass with exactly one
//! `true`-handled and one `false`-handled outgoing edge, targeting two
//! distinct nodes. Missing branches get a synthesized log sink; branches
//! colliding on a shared target get the false side detached onto a fresh
//! sink. Re-running the pass on an already-repaired graph is a no-op.

use std::collections::{HashSet, VecDeque};

use serde_json::{Map, Value};

use crate::parse::types::{Edge, KIND_LOG, Node, NodeData, Position, Workflow};

/// Repair all if_else nodes in the workflow. The input is never mutated.
pub fn auto_fix(workflow: &Workflow) -> Workflow {
    let mut wf = workflow.clone();
    let mut ids = IdAllocator::new(&wf);

    let branch_nodes: Vec<(String, Position)> = wf
        .nodes
        .iter()
        .filter(|n| n.is_if_else())
        .map(|n| (n.id.clone(), n.position))
        .collect();

    for (node_id, position) in &branch_nodes {
        resolve_branches(&mut wf, node_id, *position, &mut ids);
    }

    // Second pass over the updated edge set: true and false must not land
    // on the same node.
    for (node_id, position) in &branch_nodes {
        detach_shared_target(&mut wf, node_id, *position, &mut ids);
    }

    wf
}

/// Rebuild the outgoing edges of one if_else node into exactly one true
/// edge and one false edge.
fn resolve_branches(wf: &mut Workflow, node_id: &str, position: Position, ids: &mut IdAllocator) {
    let mut outgoing = Vec::new();
    let mut rest = Vec::with_capacity(wf.edges.len());
    for edge in wf.edges.drain(..) {
        if edge.source == node_id {
            outgoing.push(edge);
        } else {
            rest.push(edge);
        }
    }
    wf.edges = rest;

    let mut true_edge: Option<Edge> = None;
    let mut false_edge: Option<Edge> = None;
    let mut unassigned: VecDeque<Edge> = VecDeque::new();
    for edge in outgoing {
        let is_true = edge.source_handle.as_deref() == Some("true");
        let is_false = edge.source_handle.as_deref() == Some("false");
        if is_true {
            // Surplus handled edges are dropped.
            if true_edge.is_none() {
                true_edge = Some(edge);
            }
        } else if is_false {
            if false_edge.is_none() {
                false_edge = Some(edge);
            }
        } else {
            unassigned.push_back(edge);
        }
    }

    if true_edge.is_none() {
        if let Some(mut edge) = unassigned.pop_front() {
            edge.source_handle = Some("true".into());
            true_edge = Some(edge);
        }
    }
    if false_edge.is_none() {
        if let Some(mut edge) = unassigned.pop_front() {
            edge.source_handle = Some("false".into());
            false_edge = Some(edge);
        }
    }
    // Anything still unassigned is dropped with the surplus.

    let true_edge = match true_edge {
        Some(edge) => edge,
        None => {
            let sink_id = ids.alloc("log_true");
            wf.nodes.push(log_sink(
                &sink_id,
                position.x + 300.0,
                position.y - 100.0,
                "True branch",
                format!("True branch of '{}' was not connected", node_id),
            ));
            synthesized_edge(ids, node_id, &sink_id, "true")
        }
    };
    let false_edge = match false_edge {
        Some(edge) => edge,
        None => {
            let sink_id = ids.alloc("log_false");
            wf.nodes.push(log_sink(
                &sink_id,
                position.x + 300.0,
                position.y + 100.0,
                "False branch",
                format!("False branch of '{}' was not connected", node_id),
            ));
            synthesized_edge(ids, node_id, &sink_id, "false")
        }
    };

    wf.edges.push(true_edge);
    wf.edges.push(false_edge);
}

/// If both branches of an if_else node target the same node, retarget the
/// false edge onto a fresh sink. The true edge stays put.
fn detach_shared_target(
    wf: &mut Workflow,
    node_id: &str,
    position: Position,
    ids: &mut IdAllocator,
) {
    let mut true_target: Option<String> = None;
    let mut false_idx: Option<usize> = None;
    for (i, edge) in wf.edges.iter().enumerate() {
        if edge.source != node_id {
            continue;
        }
        match edge.source_handle.as_deref() {
            Some("true") if true_target.is_none() => true_target = Some(edge.target.clone()),
            Some("false") if false_idx.is_none() => false_idx = Some(i),
            _ => {}
        }
    }

    let (Some(true_target), Some(false_idx)) = (true_target, false_idx) else {
        return;
    };
    if wf.edges[false_idx].target != true_target {
        return;
    }

    let sink_id = ids.alloc("log_detached");
    wf.nodes.push(log_sink(
        &sink_id,
        position.x + 300.0,
        position.y + 150.0,
        "Detached branch",
        format!(
            "False branch of '{}' was detached from a target shared with the true branch",
            node_id
        ),
    ));
    wf.edges[false_idx].target = sink_id;
}

fn synthesized_edge(ids: &mut IdAllocator, source: &str, target: &str, handle: &str) -> Edge {
    Edge {
        id: ids.alloc("edge"),
        source: source.to_string(),
        target: target.to_string(),
        source_handle: Some(handle.to_string()),
        target_handle: None,
    }
}

/// Terminal log node used as a placeholder branch target.
fn log_sink(id: &str, x: f64, y: f64, label: &str, message: String) -> Node {
    let mut config = Map::new();
    config.insert("message".into(), Value::String(message));
    Node {
        id: id.to_string(),
        node_type: KIND_LOG.into(),
        position: Position { x, y },
        data: NodeData {
            node_type: KIND_LOG.into(),
            label: label.into(),
            category: Some("actions".into()),
            config,
        },
    }
}

/// Collision-free id generation: probe `{prefix}_{n}` upward from 1 until
/// an unused id is found. Linear probing is fine at canvas sizes.
struct IdAllocator {
    used: HashSet<String>,
}

impl IdAllocator {
    fn new(wf: &Workflow) -> Self {
        let mut used = HashSet::new();
        for node in &wf.nodes {
            used.insert(node.id.clone());
        }
        for edge in &wf.edges {
            used.insert(edge.id.clone());
        }
        IdAllocator { used }
    }

    fn alloc(&mut self, prefix: &str) -> String {
        let mut n = 1usize;
        loop {
            let candidate = format!("{}_{}", prefix, n);
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}
