//! Per-node input validation against the external schema registry.
//!
//! The registry is the source of truth for which config keys a node kind
//! requires; this pass only reads it. Registry unavailability is an
//! infrastructure condition, not a validation failure: the async entry
//! point degrades to a warning and reports the graph as valid.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ErrorCode, RegistryError, ValidationError, ValidationReport};
use crate::parse::types::Node;

/// Outcome of a field-level validation predicate. Mirrors the registry
/// contract of "boolean, or a string carrying the failure message".
#[derive(Debug, Clone)]
pub enum Verdict {
    Pass,
    Fail,
    FailWith(String),
}

pub type FieldValidator = fn(&Value) -> Verdict;

/// Per-kind schema entry fetched from the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDefinition {
    pub node_type: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub inputs: Vec<InputField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputField {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    /// Custom predicate; not part of the wire shape.
    #[serde(skip)]
    pub validate: Option<FieldValidator>,
}

/// Asynchronous source of node definitions. Implementations may cache and
/// serve stale data on fetch failure; this crate only consumes the trait.
pub trait SchemaRegistry {
    fn fetch_all_schemas(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<NodeDefinition>, RegistryError>>;
}

/// Fetch schemas and validate every node's config against them.
///
/// A failed fetch never blocks: the report comes back valid with a
/// warning explaining why input validation was skipped.
pub async fn validate_inputs<R: SchemaRegistry>(nodes: &[Node], registry: &R) -> ValidationReport {
    match registry.fetch_all_schemas().await {
        Ok(definitions) => validate_inputs_with(nodes, &definitions),
        Err(e) => ValidationReport {
            valid: true,
            errors: Vec::new(),
            warnings: vec![format!(
                "Schema registry unavailable; input validation skipped: {}",
                e
            )],
        },
    }
}

/// Synchronous kernel: validate nodes against already-fetched definitions.
pub fn validate_inputs_with(nodes: &[Node], definitions: &[NodeDefinition]) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let by_type: HashMap<&str, &NodeDefinition> = definitions
        .iter()
        .map(|d| (d.node_type.as_str(), d))
        .collect();

    for node in nodes {
        let Some(definition) = by_type.get(node.kind()) else {
            warnings.push(format!(
                "No schema found for node type '{}'; skipping node '{}'",
                node.kind(),
                node.id
            ));
            continue;
        };

        for field in &definition.inputs {
            let value = node.data.config.get(&field.name);
            if field.required && is_unset(value) {
                errors.push(ValidationError::node(
                    ErrorCode::MissingRequiredInput,
                    format!(
                        "Node '{}' is missing required input '{}'",
                        node.id, field.name
                    ),
                    node.id.clone(),
                ));
                continue;
            }

            let Some(validate) = field.validate else {
                continue;
            };
            // Unset optional fields are not run through the predicate.
            let Some(value) = value.filter(|v| !v.is_null()) else {
                continue;
            };
            let message = match validate(value) {
                Verdict::Pass => continue,
                Verdict::FailWith(message) => message,
                Verdict::Fail => format!(
                    "Node '{}' input '{}' has an invalid value",
                    node.id, field.name
                ),
            };
            errors.push(ValidationError::node(
                ErrorCode::InvalidInputValue,
                message,
                node.id.clone(),
            ));
        }
    }

    ValidationReport::new(errors, warnings)
}

fn is_unset(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        _ => false,
    }
}
