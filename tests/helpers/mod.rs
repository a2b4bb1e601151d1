#![allow(dead_code)]

use serde_json::{Map, Value};

use flowcheck::parse::types::{Edge, Node, NodeData, Position, Workflow};

// =============================================================================
// Workflow builders
// =============================================================================

pub fn node(id: &str, kind: &str, category: &str) -> Node {
    Node {
        id: id.into(),
        node_type: kind.into(),
        position: Position { x: 0.0, y: 0.0 },
        data: NodeData {
            node_type: kind.into(),
            label: id.into(),
            category: Some(category.into()),
            config: Map::new(),
        },
    }
}

/// Node without a category tag (forces type/allowlist trigger detection).
pub fn bare_node(id: &str, kind: &str) -> Node {
    let mut n = node(id, kind, "");
    n.data.category = None;
    n
}

pub fn trigger(id: &str) -> Node {
    node(id, "webhook", "triggers")
}

pub fn action(id: &str, kind: &str) -> Node {
    node(id, kind, "actions")
}

pub fn with_config(mut node: Node, key: &str, value: Value) -> Node {
    node.data.config.insert(key.into(), value);
    node
}

pub fn edge(id: &str, source: &str, target: &str) -> Edge {
    Edge {
        id: id.into(),
        source: source.into(),
        target: target.into(),
        source_handle: None,
        target_handle: None,
    }
}

pub fn handled_edge(id: &str, source: &str, target: &str, handle: &str) -> Edge {
    Edge {
        source_handle: Some(handle.into()),
        ..edge(id, source, target)
    }
}

pub fn workflow(nodes: Vec<Node>, edges: Vec<Edge>) -> Workflow {
    Workflow { nodes, edges }
}

// =============================================================================
// Assertions
// =============================================================================

/// Outgoing edges of one node, in edge-list order.
pub fn outgoing<'a>(wf: &'a Workflow, node_id: &str) -> Vec<&'a Edge> {
    wf.edges.iter().filter(|e| e.source == node_id).collect()
}

pub fn node_ids(wf: &Workflow) -> Vec<&str> {
    wf.nodes.iter().map(|n| n.id.as_str()).collect()
}
