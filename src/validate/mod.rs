//! Topology validation phase.
//!
//! Consumes a normalized graph and checks the structural invariants:
//! trigger cardinality, reachability, per-kind edge-count rules, and
//! acyclicity. Pure and deterministic: error ordering follows input
//! array order within each rule.

pub mod structural;

use std::collections::HashSet;

use crate::error::{ErrorCode, ValidationError, ValidationReport};
use crate::parse::graph::WorkflowGraph;
use crate::parse::types::Workflow;

/// Validate the workflow graph against all structural invariants.
pub fn validate(workflow: &Workflow) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if workflow.nodes.is_empty() {
        errors.push(ValidationError::graph(
            ErrorCode::NoNodes,
            "Workflow has no nodes",
        ));
        return ValidationReport::new(errors, warnings);
    }

    let triggers = structural::detect_triggers(workflow);
    if triggers.is_empty() {
        errors.push(ValidationError::graph(
            ErrorCode::NoTrigger,
            "Workflow must have exactly 1 trigger node, found 0",
        ));
        return ValidationReport::new(errors, warnings);
    }
    if triggers.len() > 1 {
        errors.push(ValidationError::node(
            ErrorCode::MultipleTriggers,
            format!(
                "Workflow must have exactly 1 trigger node, found {}",
                triggers.len()
            ),
            triggers[1].id.clone(),
        ));
    }

    let graph = WorkflowGraph::build(workflow);
    let trigger_ids: HashSet<&str> = triggers.iter().map(|n| n.id.as_str()).collect();

    structural::check_reachability(workflow, &graph, triggers[0], &mut errors, &mut warnings);
    structural::check_incoming(workflow, &graph, &trigger_ids, &mut errors);
    structural::check_outgoing(workflow, &graph, &mut errors, &mut warnings);
    structural::check_cycles(&graph, &mut errors);

    ValidationReport::new(errors, warnings)
}
