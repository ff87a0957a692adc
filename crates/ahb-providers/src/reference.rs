//! In-memory, map-backed reference implementations of the four provider
//! traits. These are fixtures, not a persistence layer: they hold whatever
//! the caller hands them at construction time and answer lookups against
//! it, raising [`NotImplemented`] for anything that wasn't provided. The
//! validity checker builds exactly these for every content-evaluation
//! result combination it enumerates.

use async_trait::async_trait;
use rustc_hash::FxHashMap;

use ahb_common::Fulfillment;

use crate::provider::{FcEvaluator, HintsProvider, NotImplemented, PackageResolver, RcEvaluator};
use crate::result::{EvaluatedFormatConstraint, PackageExpression};

/// An `RcEvaluator` pre-seeded with every key/outcome it can answer.
#[derive(Debug, Clone, Default)]
pub struct DictRcEvaluator {
    results: FxHashMap<String, Fulfillment>,
}

impl DictRcEvaluator {
    pub fn new(results: FxHashMap<String, Fulfillment>) -> Self {
        Self { results }
    }
}

#[async_trait]
impl RcEvaluator for DictRcEvaluator {
    async fn evaluate(&self, key: &str) -> Result<Fulfillment, NotImplemented> {
        self.results.get(key).copied().ok_or_else(|| NotImplemented { key: key.to_string() })
    }
}

/// An `FcEvaluator` pre-seeded with every key/outcome it can answer,
/// ignoring the entered input entirely -- a fixture is not in the business
/// of actually validating anything.
#[derive(Debug, Clone, Default)]
pub struct DictFcEvaluator {
    results: FxHashMap<String, EvaluatedFormatConstraint>,
}

impl DictFcEvaluator {
    pub fn new(results: FxHashMap<String, EvaluatedFormatConstraint>) -> Self {
        Self { results }
    }
}

#[async_trait]
impl FcEvaluator for DictFcEvaluator {
    async fn evaluate(&self, key: &str, _entered_input: Option<&str>) -> Result<EvaluatedFormatConstraint, NotImplemented> {
        self.results.get(key).cloned().ok_or_else(|| NotImplemented { key: key.to_string() })
    }
}

/// A `HintsProvider` pre-seeded with a key-to-text map.
#[derive(Debug, Clone, Default)]
pub struct MapHintsProvider {
    hints: FxHashMap<String, String>,
}

impl MapHintsProvider {
    pub fn new(hints: FxHashMap<String, String>) -> Self {
        Self { hints }
    }
}

#[async_trait]
impl HintsProvider for MapHintsProvider {
    async fn get_hint(&self, key: &str) -> Option<String> {
        self.hints.get(key).cloned()
    }
}

/// A `PackageResolver` pre-seeded with a package-key-to-expression map.
/// Every key is expected to carry the trailing `P`, matching how package
/// keys are represented everywhere else in this crate family.
#[derive(Debug, Clone, Default)]
pub struct MapPackageResolver {
    packages: FxHashMap<String, String>,
}

impl MapPackageResolver {
    pub fn new(packages: FxHashMap<String, String>) -> Self {
        Self { packages }
    }
}

#[async_trait]
impl PackageResolver for MapPackageResolver {
    async fn resolve(&self, key: &str) -> PackageExpression {
        PackageExpression { package_key: key.to_string(), expression: self.packages.get(key).cloned() }
    }
}
