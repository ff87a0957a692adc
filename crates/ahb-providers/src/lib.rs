//! Provider contracts and result types for the condition-evaluation engine.
//!
//! This crate is the seam between the pure expression engine (`ahb-parser`,
//! `ahb-resolve`, `ahb-eval`) and whatever holds the actual message data:
//! the four traits in [`provider`] are what an embedder implements, the
//! types in [`result`] are what the engine hands back. [`builtin`] and
//! [`reference`] ship ready-made implementations -- built-in FC evaluators
//! for the day-boundary format constraints, and in-memory fixtures for
//! tests and the validity checker.

pub mod builtin;
pub mod provider;
pub mod reference;
pub mod result;
pub mod token_logic;

pub use provider::{FcEvaluator, HintsProvider, NotImplemented, PackageResolver, RcEvaluator};
pub use reference::{DictFcEvaluator, DictRcEvaluator, MapHintsProvider, MapPackageResolver};
pub use result::{
    ConditionCheckResult, ContentEvaluationResult, EvaluatedFormatConstraint, FormatConstraintEvaluationResult,
    PackageExpression, RequirementConstraintEvaluationResult,
};
pub use token_logic::{SingletonTokenLogicProvider, TokenLogicProvider};
