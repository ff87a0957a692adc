//! The evaluation-time error taxonomy: everything that can go wrong once an
//! already-resolved (no `Package`/`TimeCondition` leaves) AST is folded.

use std::fmt;

use ahb_common::InvalidKeyRange;
use ahb_parser::SyntaxError;
use ahb_providers::NotImplemented;

/// A composition whose operand types don't admit the operator applied to
/// them -- a hint OR'd with a format constraint, a `NEUTRAL` node OR'd with
/// a decided one, a juxtaposition where neither side is a format constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IllTyped {
    pub message: String,
}

impl IllTyped {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl fmt::Display for IllTyped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for IllTyped {}

/// The final requirement-constraint state was `UNKNOWN` and the caller
/// asked for a definite answer -- the single-pass evaluation has no way to
/// express "it depends," so it surfaces as an error instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingInformation;

impl fmt::Display for MissingInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("it is unknown if the conditions are fulfilled due to missing information")
    }
}

impl std::error::Error for MissingInformation {}

/// A condition expression that is structurally well-formed but semantically
/// nonsensical in a way none of the other variants capture -- e.g. a
/// format-constraint expression whose re-parse produced a node kind the
/// format-constraint pass doesn't know how to fold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidExpression {
    pub message: String,
    pub expression: Option<String>,
}

impl fmt::Display for InvalidExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.expression {
            Some(expr) => write!(f, "{} (in '{}')", self.message, expr),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for InvalidExpression {}

/// Everything [`crate::rc`], [`crate::fc`], and [`crate::orchestrator`] can
/// raise.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    IllTyped(IllTyped),
    MissingInformation(MissingInformation),
    InvalidExpression(InvalidExpression),
    NotImplemented(NotImplemented),
    SyntaxError(SyntaxError),
    InvalidKeyRange(InvalidKeyRange),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::IllTyped(e) => e.fmt(f),
            EvalError::MissingInformation(e) => e.fmt(f),
            EvalError::InvalidExpression(e) => e.fmt(f),
            EvalError::NotImplemented(e) => e.fmt(f),
            EvalError::SyntaxError(e) => e.fmt(f),
            EvalError::InvalidKeyRange(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for EvalError {}

impl From<IllTyped> for EvalError {
    fn from(e: IllTyped) -> Self {
        EvalError::IllTyped(e)
    }
}

impl From<MissingInformation> for EvalError {
    fn from(e: MissingInformation) -> Self {
        EvalError::MissingInformation(e)
    }
}

impl From<InvalidExpression> for EvalError {
    fn from(e: InvalidExpression) -> Self {
        EvalError::InvalidExpression(e)
    }
}

impl From<NotImplemented> for EvalError {
    fn from(e: NotImplemented) -> Self {
        EvalError::NotImplemented(e)
    }
}

impl From<SyntaxError> for EvalError {
    fn from(e: SyntaxError) -> Self {
        EvalError::SyntaxError(e)
    }
}

impl From<InvalidKeyRange> for EvalError {
    fn from(e: InvalidKeyRange) -> Self {
        EvalError::InvalidKeyRange(e)
    }
}
