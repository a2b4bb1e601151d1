//! Diagnostic types shared by every pipeline pass.
//!
//! Data-shape problems are never thrown: each pass accumulates
//! [`ValidationError`]s and warning strings into a [`ValidationReport`].
//! Only true infrastructure failures (the schema registry fetch) use a
//! `Result`, via [`RegistryError`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable diagnostic codes surfaced verbatim to the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidJson,
    NoNodes,
    NoTrigger,
    MultipleTriggers,
    UnreachableNode,
    NoIncoming,
    MultipleIncoming,
    TooManyOutgoing,
    CycleDetected,
    MissingRequiredInput,
    InvalidInputValue,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidJson => "INVALID_JSON",
            ErrorCode::NoNodes => "NO_NODES",
            ErrorCode::NoTrigger => "NO_TRIGGER",
            ErrorCode::MultipleTriggers => "MULTIPLE_TRIGGERS",
            ErrorCode::UnreachableNode => "UNREACHABLE_NODE",
            ErrorCode::NoIncoming => "NO_INCOMING",
            ErrorCode::MultipleIncoming => "MULTIPLE_INCOMING",
            ErrorCode::TooManyOutgoing => "TOO_MANY_OUTGOING",
            ErrorCode::CycleDetected => "CYCLE_DETECTED",
            ErrorCode::MissingRequiredInput => "MISSING_REQUIRED_INPUT",
            ErrorCode::InvalidInputValue => "INVALID_INPUT_VALUE",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single blocking diagnostic, optionally pinned to a node or edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_id: Option<String>,
}

impl ValidationError {
    pub fn graph(code: ErrorCode, message: impl Into<String>) -> Self {
        ValidationError {
            code,
            message: message.into(),
            node_id: None,
            edge_id: None,
        }
    }

    pub fn node(code: ErrorCode, message: impl Into<String>, node_id: impl Into<String>) -> Self {
        ValidationError {
            code,
            message: message.into(),
            node_id: Some(node_id.into()),
            edge_id: None,
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.node_id {
            Some(id) => write!(f, "[{}] {} (node '{}')", self.code, self.message, id),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

/// Outcome of a validation pass: blocking errors plus non-blocking hints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new(errors: Vec<ValidationError>, warnings: Vec<String>) -> Self {
        ValidationReport {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Fold another report into this one. `valid` is the conjunction.
    pub fn merge(&mut self, other: ValidationReport) {
        self.valid = self.valid && other.valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }
}

/// Infrastructure failure reaching the external schema registry.
///
/// Kept separate from validation diagnostics: registry unavailability must
/// never block a save, so callers degrade it to a warning.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    #[error("schema registry fetch failed: {0}")]
    Fetch(String),
    #[error("schema registry returned malformed data: {0}")]
    Malformed(String),
}
