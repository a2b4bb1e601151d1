//! Rust types mirroring the canvas workflow JSON.
//!
//! These types are the serde target for graphs produced by the visual
//! editor. Node `config` is deliberately an open map: which keys are valid
//! for a given node kind is decided by the external schema registry at
//! validation time, not by this type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Node kinds with dedicated structural rules.
pub const KIND_IF_ELSE: &str = "if_else";
pub const KIND_SWITCH: &str = "switch";
pub const KIND_MERGE: &str = "merge";

/// Kind tag used for sink nodes synthesized by the auto-fixer.
pub const KIND_LOG: &str = "log";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub position: Position,
    pub data: NodeData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeData {
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub config: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

impl Node {
    pub fn kind(&self) -> &str {
        &self.node_type
    }

    pub fn is_if_else(&self) -> bool {
        self.node_type == KIND_IF_ELSE
    }

    pub fn is_switch(&self) -> bool {
        self.node_type == KIND_SWITCH
    }

    pub fn is_merge(&self) -> bool {
        self.node_type == KIND_MERGE
    }

    /// Category-level trigger tag ("triggers" or "trigger", any case).
    pub fn category_is_trigger(&self) -> bool {
        self.data
            .category
            .as_deref()
            .map(|c| {
                let c = c.to_ascii_lowercase();
                c == "triggers" || c == "trigger"
            })
            .unwrap_or(false)
    }

    /// Type-name fallback: the kind string mentions "trigger".
    pub fn type_mentions_trigger(&self) -> bool {
        self.node_type.to_ascii_lowercase().contains("trigger")
    }
}
