//! Full pre-save pipeline: repair → canonicalize → topology check →
//! per-node input check.

use crate::error::ValidationReport;
use crate::fix;
use crate::inputs::{self, SchemaRegistry};
use crate::normalize;
use crate::parse::types::Workflow;
use crate::validate;

/// The repaired, canonical workflow plus all accumulated diagnostics.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub workflow: Workflow,
    pub report: ValidationReport,
}

/// Synchronous stages only: auto-fix, normalize, validate topology.
/// Hosts that fetch schemas themselves follow up with
/// [`inputs::validate_inputs_with`].
pub fn check_graph(workflow: &Workflow) -> PipelineOutcome {
    let fixed = fix::auto_fix(workflow);
    let normalized = normalize::normalize(&fixed);

    let mut report = ValidationReport::new(Vec::new(), normalized.warnings);
    report.merge(validate::validate(&normalized.workflow));

    PipelineOutcome {
        workflow: normalized.workflow,
        report,
    }
}

/// The whole pipeline, schema fetch included.
pub async fn check_workflow<R: SchemaRegistry>(
    workflow: &Workflow,
    registry: &R,
) -> PipelineOutcome {
    let mut outcome = check_graph(workflow);
    let inputs_report = inputs::validate_inputs(&outcome.workflow.nodes, registry).await;
    outcome.report.merge(inputs_report);
    outcome
}
