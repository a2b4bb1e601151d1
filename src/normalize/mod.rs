//! Normalization pass: canonicalize a raw canvas graph before validation.
//!
//! Three concerns: migrate legacy if_else condition configs, drop edges
//! whose endpoints no longer exist, and collapse duplicate edges. All
//! anomalies become warnings; this pass never fails.

use std::collections::HashSet;

use serde_json::{Map, Value, json};

use crate::parse::types::Workflow;

/// Result of [`normalize`]. `errors` is kept for contract symmetry with
/// the validation passes but stays empty: every anomaly is a warning.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub workflow: Workflow,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Canonicalize a workflow graph.
pub fn normalize(workflow: &Workflow) -> Normalized {
    let mut wf = workflow.clone();
    let mut warnings = Vec::new();

    for node in &mut wf.nodes {
        if node.is_if_else() {
            canonicalize_conditions(&mut node.data.config);
        }
    }

    let node_ids: HashSet<&str> = workflow.nodes.iter().map(|n| n.id.as_str()).collect();
    let before = wf.edges.len();
    wf.edges
        .retain(|e| node_ids.contains(e.source.as_str()) && node_ids.contains(e.target.as_str()));
    let dangling = before - wf.edges.len();
    if dangling > 0 {
        warnings.push(format!(
            "Removed {} edge(s) referencing missing nodes",
            dangling
        ));
    }

    let mut seen = HashSet::new();
    let before = wf.edges.len();
    wf.edges.retain(|e| {
        let key = (
            e.source.clone(),
            e.target.clone(),
            e.source_handle.clone(),
            e.target_handle.clone(),
        );
        seen.insert(key)
    });
    let duplicates = before - wf.edges.len();
    if duplicates > 0 {
        warnings.push(format!("Removed {} duplicate edge(s)", duplicates));
    }

    Normalized {
        workflow: wf,
        errors: Vec::new(),
        warnings,
    }
}

/// Guarantee that an if_else config carries an array-shaped `conditions`.
///
/// Legacy graphs stored a single `condition` string; newer ones sometimes
/// carry a bare string or a lone `{ expression }` object under
/// `conditions`. The original `condition` key is left untouched for
/// backward compatibility with older renderers.
fn canonicalize_conditions(config: &mut Map<String, Value>) {
    let migrated = match config.get("conditions") {
        Some(Value::Array(_)) => None,
        Some(Value::String(expr)) => Some(json!([{ "expression": expr }])),
        Some(Value::Object(obj)) if obj.contains_key("expression") => {
            Some(Value::Array(vec![Value::Object(obj.clone())]))
        }
        Some(_) => Some(json!([])),
        None => match config.get("condition") {
            Some(Value::String(expr)) => Some(json!([{ "expression": expr }])),
            _ => Some(json!([])),
        },
    };
    if let Some(conditions) = migrated {
        config.insert("conditions".into(), conditions);
    }
}
