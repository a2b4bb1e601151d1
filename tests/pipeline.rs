//! End-to-end tests for the pre-save pipeline.

mod helpers;

use serde_json::json;
use tokio_test::block_on;

use flowcheck::error::{ErrorCode, RegistryError};
use flowcheck::inputs::{InputField, NodeDefinition, SchemaRegistry};
use flowcheck::pipeline::{check_graph, check_workflow};
use helpers::*;

struct StaticRegistry {
    definitions: Vec<NodeDefinition>,
}

impl SchemaRegistry for StaticRegistry {
    async fn fetch_all_schemas(&self) -> Result<Vec<NodeDefinition>, RegistryError> {
        Ok(self.definitions.clone())
    }
}

struct DownRegistry;

impl SchemaRegistry for DownRegistry {
    async fn fetch_all_schemas(&self) -> Result<Vec<NodeDefinition>, RegistryError> {
        Err(RegistryError::Fetch("timeout".into()))
    }
}

/// A trigger feeding an if_else with no branch edges at all. Broken as
/// drawn, but the pipeline must repair it into a valid graph.
fn half_drawn_conditional() -> flowcheck::parse::types::Workflow {
    workflow(
        vec![
            trigger("t"),
            with_config(action("cond", "if_else"), "condition", json!("x > 1")),
        ],
        vec![edge("e1", "t", "cond")],
    )
}

#[test]
fn pipeline_repairs_a_half_drawn_conditional() {
    let outcome = check_graph(&half_drawn_conditional());
    assert!(
        outcome.report.valid,
        "unexpected errors: {:?}",
        outcome.report.errors
    );

    // Two sinks were synthesized and the legacy condition migrated.
    assert_eq!(outcome.workflow.nodes.len(), 4);
    assert_eq!(outcome.workflow.edges.len(), 3);
    let cond = outcome
        .workflow
        .nodes
        .iter()
        .find(|n| n.id == "cond")
        .expect("cond survives");
    assert_eq!(
        cond.data.config["conditions"],
        json!([{ "expression": "x > 1" }])
    );
}

#[test]
fn pipeline_surfaces_normalizer_warnings() {
    let mut wf = half_drawn_conditional();
    wf.edges.push(edge("e2", "t", "cond"));
    let outcome = check_graph(&wf);
    assert!(
        outcome
            .report
            .warnings
            .iter()
            .any(|w| w.contains("duplicate")),
        "expected dedup warning: {:?}",
        outcome.report.warnings
    );
}

#[test]
fn pipeline_still_rejects_cycles() {
    let wf = workflow(
        vec![trigger("t"), action("a", "log"), action("b", "log")],
        vec![
            edge("e1", "t", "a"),
            edge("e2", "a", "b"),
            edge("e3", "b", "a"),
        ],
    );
    let outcome = check_graph(&wf);
    assert!(!outcome.report.valid);
    assert!(outcome.report.has_code(ErrorCode::CycleDetected));
}

#[test]
fn full_pipeline_checks_inputs_of_synthesized_nodes() {
    // Synthesized log sinks carry a message, so a registry requiring one
    // is satisfied.
    let definitions = vec![
        NodeDefinition {
            node_type: "log".into(),
            category: None,
            inputs: vec![InputField {
                name: "message".into(),
                required: true,
                validate: None,
            }],
        },
        NodeDefinition {
            node_type: "webhook".into(),
            category: None,
            inputs: vec![],
        },
        NodeDefinition {
            node_type: "if_else".into(),
            category: None,
            inputs: vec![],
        },
    ];
    let outcome = block_on(check_workflow(
        &half_drawn_conditional(),
        &StaticRegistry { definitions },
    ));
    assert!(
        outcome.report.valid,
        "unexpected errors: {:?}",
        outcome.report.errors
    );
}

#[test]
fn full_pipeline_flags_missing_inputs() {
    let definitions = vec![NodeDefinition {
        node_type: "webhook".into(),
        category: None,
        inputs: vec![InputField {
            name: "path".into(),
            required: true,
            validate: None,
        }],
    }];
    let wf = workflow(
        vec![trigger("t"), action("a", "log")],
        vec![edge("e1", "t", "a")],
    );
    let outcome = block_on(check_workflow(&wf, &StaticRegistry { definitions }));
    assert!(!outcome.report.valid);
    assert!(outcome.report.has_code(ErrorCode::MissingRequiredInput));
}

#[test]
fn registry_outage_never_blocks_a_structurally_valid_save() {
    let outcome = block_on(check_workflow(&half_drawn_conditional(), &DownRegistry));
    assert!(
        outcome.report.valid,
        "unexpected errors: {:?}",
        outcome.report.errors
    );
    assert!(
        outcome
            .report
            .warnings
            .iter()
            .any(|w| w.contains("registry")),
        "expected degradation warning: {:?}",
        outcome.report.warnings
    );
}
