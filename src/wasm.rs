//! WASM entry points for browser use.

use wasm_bindgen::prelude::*;

use crate::error::{ErrorCode, ValidationError, ValidationReport};
use crate::parse::types::{Node, Workflow};

/// Validate a workflow JSON: parse + topology validation.
/// Returns a ValidationReport object.
#[wasm_bindgen]
pub fn validate_workflow(json: &str) -> JsValue {
    let result = validate_workflow_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn validate_workflow_inner(json: &str) -> ValidationReport {
    match crate::parse::parse(json) {
        Ok(workflow) => crate::validate::validate(&workflow),
        Err(errors) => ValidationReport::new(errors, Vec::new()),
    }
}

/// Repair if_else branch wiring. Returns `{ status, workflow | errors }`.
#[wasm_bindgen]
pub fn auto_fix_workflow(json: &str) -> JsValue {
    let result = auto_fix_workflow_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn auto_fix_workflow_inner(json: &str) -> GraphResult {
    match crate::parse::parse(json) {
        Ok(workflow) => GraphResult::Success {
            workflow: crate::fix::auto_fix(&workflow),
        },
        Err(errors) => GraphResult::Errors { errors },
    }
}

/// Canonicalize a workflow. Returns
/// `{ status, workflow | errors, warnings }`.
#[wasm_bindgen]
pub fn normalize_workflow(json: &str) -> JsValue {
    let result = normalize_workflow_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn normalize_workflow_inner(json: &str) -> NormalizeResult {
    match crate::parse::parse(json) {
        Ok(workflow) => {
            let normalized = crate::normalize::normalize(&workflow);
            NormalizeResult::Success {
                workflow: normalized.workflow,
                errors: normalized.errors,
                warnings: normalized.warnings,
            }
        }
        Err(errors) => NormalizeResult::Errors { errors },
    }
}

/// Run the synchronous pipeline (fix → normalize → validate) in one call.
#[wasm_bindgen]
pub fn check_workflow(json: &str) -> JsValue {
    let result = check_workflow_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn check_workflow_inner(json: &str) -> CheckResult {
    match crate::parse::parse(json) {
        Ok(workflow) => {
            let outcome = crate::pipeline::check_graph(&workflow);
            CheckResult::Success {
                workflow: outcome.workflow,
                report: outcome.report,
            }
        }
        Err(errors) => CheckResult::Errors { errors },
    }
}

/// Validate node configs against already-fetched schema definitions.
/// The JS host performs (and may cache) the registry fetch.
#[wasm_bindgen]
pub fn validate_node_inputs(nodes_json: &str, schemas_json: &str) -> JsValue {
    let result = validate_node_inputs_inner(nodes_json, schemas_json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn validate_node_inputs_inner(nodes_json: &str, schemas_json: &str) -> ValidationReport {
    let nodes = match serde_json::from_str::<Vec<Node>>(nodes_json) {
        Ok(nodes) => nodes,
        Err(e) => {
            return ValidationReport::new(
                vec![ValidationError::graph(
                    ErrorCode::InvalidJson,
                    format!("Failed to parse nodes JSON: {}", e),
                )],
                Vec::new(),
            );
        }
    };
    let schemas = match serde_json::from_str::<Vec<crate::inputs::NodeDefinition>>(schemas_json) {
        Ok(schemas) => schemas,
        Err(e) => {
            return ValidationReport::new(
                vec![ValidationError::graph(
                    ErrorCode::InvalidJson,
                    format!("Failed to parse schemas JSON: {}", e),
                )],
                Vec::new(),
            );
        }
    };
    crate::inputs::validate_inputs_with(&nodes, &schemas)
}

// ---------------------------------------------------------------------------
// Result shapes serialized to JS
// ---------------------------------------------------------------------------

#[derive(serde::Serialize)]
#[serde(tag = "status")]
enum GraphResult {
    #[serde(rename = "success")]
    Success { workflow: Workflow },
    #[serde(rename = "errors")]
    Errors { errors: Vec<ValidationError> },
}

#[derive(serde::Serialize)]
#[serde(tag = "status")]
enum NormalizeResult {
    #[serde(rename = "success")]
    Success {
        workflow: Workflow,
        errors: Vec<String>,
        warnings: Vec<String>,
    },
    #[serde(rename = "errors")]
    Errors { errors: Vec<ValidationError> },
}

#[derive(serde::Serialize)]
#[serde(tag = "status")]
enum CheckResult {
    #[serde(rename = "success")]
    Success {
        workflow: Workflow,
        report: ValidationReport,
    },
    #[serde(rename = "errors")]
    Errors { errors: Vec<ValidationError> },
}
