//! The engine's externally visible result types.
//!
//! These are the values crossing the boundary back out to an embedder:
//! the output of a single leaf format-constraint evaluation, of the
//! requirement-constraint and format-constraint passes, and of the
//! top-level AHB-expression orchestrator. They carry `serde` derives
//! because unlike the AST they are meant to be handed to callers outside
//! the engine, not just threaded between its own crates.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use ahb_common::Fulfillment;

/// The outcome of evaluating a single format-constraint leaf.
///
/// Invariant: `fulfilled` implies `error_message` is `None`; a present
/// `error_message` is never the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatedFormatConstraint {
    pub fulfilled: bool,
    pub error_message: Option<String>,
}

impl EvaluatedFormatConstraint {
    pub fn fulfilled() -> Self {
        Self { fulfilled: true, error_message: None }
    }

    pub fn unfulfilled(error_message: impl Into<String>) -> Self {
        let message = error_message.into();
        debug_assert!(!message.is_empty());
        Self { fulfilled: false, error_message: Some(message) }
    }
}

/// The result of the requirement-constraint pass over a single
/// requirement-indicator alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementConstraintEvaluationResult {
    pub constraints_fulfilled: bool,
    pub is_conditional: bool,
    pub fc_expression: Option<String>,
    pub hints: Option<String>,
}

/// The result of the format-constraint pass, after evaluating the
/// `fc_expression` the requirement-constraint pass produced against an
/// entered input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatConstraintEvaluationResult {
    pub fulfilled: bool,
    pub error_message: Option<String>,
}

impl From<EvaluatedFormatConstraint> for FormatConstraintEvaluationResult {
    fn from(value: EvaluatedFormatConstraint) -> Self {
        Self { fulfilled: value.fulfilled, error_message: value.error_message }
    }
}

/// The final, top-level output of evaluating one AHB expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionCheckResult {
    pub requirement_indicator: String,
    pub rc_result: RequirementConstraintEvaluationResult,
    pub fc_result: FormatConstraintEvaluationResult,
}

/// The expression a `PackageResolver` returns for a package key, or `None`
/// if the package cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageExpression {
    pub package_key: String,
    pub expression: Option<String>,
}

/// A complete, pre-computed set of content-evaluation results: what every
/// hint, format constraint, requirement constraint and package in an
/// expression evaluates to. The reference providers in [`crate::reference`]
/// are thin wrappers around the maps here; the validity checker (`ahb-check`)
/// builds one of these per admissible combination it enumerates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentEvaluationResult {
    pub hints: FxHashMap<String, Option<String>>,
    pub format_constraints: FxHashMap<String, EvaluatedFormatConstraint>,
    pub requirement_constraints: FxHashMap<String, Fulfillment>,
    pub packages: FxHashMap<String, String>,
}
