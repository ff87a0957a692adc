//! The four provider contracts the core expression engine consumes.
//!
//! Every method is `async` and every trait is object-safe (`dyn`-compatible
//! via `async_trait`) since the engine only ever holds providers behind a
//! `TokenLogicProvider`. None of these traits know anything about EDIFACT
//! message structure; a key is just a string and the provider's business is
//! entirely its own.

use std::fmt;

use async_trait::async_trait;

use ahb_common::Fulfillment;

use crate::result::{EvaluatedFormatConstraint, PackageExpression};

/// Returned by [`RcEvaluator::evaluate`] and [`FcEvaluator::evaluate`] when
/// no evaluation logic is registered for the given key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotImplemented {
    pub key: String,
}

impl fmt::Display for NotImplemented {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no evaluator is registered for condition '{}'", self.key)
    }
}

impl std::error::Error for NotImplemented {}

/// Decides whether a requirement constraint holds for the message under
/// evaluation. Never returns `Fulfillment::Neutral` -- that state is
/// reserved for hints and deferred format constraints.
#[async_trait]
pub trait RcEvaluator: Send + Sync {
    async fn evaluate(&self, key: &str) -> Result<Fulfillment, NotImplemented>;
}

/// Validates already-present data against a format constraint's rule.
#[async_trait]
pub trait FcEvaluator: Send + Sync {
    async fn evaluate(&self, key: &str, entered_input: Option<&str>) -> Result<EvaluatedFormatConstraint, NotImplemented>;
}

/// Supplies the descriptive text for a hint key. A missing hint is not an
/// error at this layer -- callers decide how to treat `None`.
#[async_trait]
pub trait HintsProvider: Send + Sync {
    async fn get_hint(&self, key: &str) -> Option<String>;
}

/// Expands a package key into the condition expression it abbreviates.
#[async_trait]
pub trait PackageResolver: Send + Sync {
    async fn resolve(&self, key: &str) -> PackageExpression;
}
