//! Aggregates the four provider traits behind a single lookup keyed by
//! `(EdifactFormat, EdifactFormatVersion)`, so a caller evaluating a
//! `PRICAT` message in `FV2204` and one evaluating `UTILMD` in `FV2110`
//! can share one `TokenLogicProvider` without either one's evaluators
//! seeing the other's keys.
//!
//! The source's `SingletonTokenLogicProvider` accepts a flat list of
//! evaluator instances and sorts them into buckets at runtime by
//! `isinstance` checks; Rust's trait objects don't support that kind of
//! instance-of dispatch, so [`SingletonTokenLogicProvider`] here is built
//! with an explicit builder instead -- the caller says which trait each
//! instance fulfills by calling the matching `with_*` method.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use ahb_common::{EdifactFormat, EdifactFormatVersion};

use crate::provider::{FcEvaluator, HintsProvider, PackageResolver, RcEvaluator};

type FormatKey = (EdifactFormat, EdifactFormatVersion);

/// Resolves the correct evaluator/provider/resolver for a given EDIFACT
/// format and format version.
pub trait TokenLogicProvider: Send + Sync {
    fn rc_evaluator(&self, format: EdifactFormat, version: EdifactFormatVersion) -> Option<Arc<dyn RcEvaluator>>;
    fn fc_evaluator(&self, format: EdifactFormat, version: EdifactFormatVersion) -> Option<Arc<dyn FcEvaluator>>;
    fn hints_provider(&self, format: EdifactFormat, version: EdifactFormatVersion) -> Option<Arc<dyn HintsProvider>>;
    fn package_resolver(&self, format: EdifactFormat, version: EdifactFormatVersion) -> Option<Arc<dyn PackageResolver>>;
}

/// A `TokenLogicProvider` populated once at startup and shared for the
/// lifetime of the process.
#[derive(Default, Clone)]
pub struct SingletonTokenLogicProvider {
    rc_evaluators: FxHashMap<FormatKey, Arc<dyn RcEvaluator>>,
    fc_evaluators: FxHashMap<FormatKey, Arc<dyn FcEvaluator>>,
    hints_providers: FxHashMap<FormatKey, Arc<dyn HintsProvider>>,
    package_resolvers: FxHashMap<FormatKey, Arc<dyn PackageResolver>>,
}

impl SingletonTokenLogicProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rc_evaluator(
        mut self,
        format: EdifactFormat,
        version: EdifactFormatVersion,
        evaluator: Arc<dyn RcEvaluator>,
    ) -> Self {
        self.rc_evaluators.insert((format, version), evaluator);
        self
    }

    pub fn with_fc_evaluator(
        mut self,
        format: EdifactFormat,
        version: EdifactFormatVersion,
        evaluator: Arc<dyn FcEvaluator>,
    ) -> Self {
        self.fc_evaluators.insert((format, version), evaluator);
        self
    }

    pub fn with_hints_provider(
        mut self,
        format: EdifactFormat,
        version: EdifactFormatVersion,
        provider: Arc<dyn HintsProvider>,
    ) -> Self {
        self.hints_providers.insert((format, version), provider);
        self
    }

    pub fn with_package_resolver(
        mut self,
        format: EdifactFormat,
        version: EdifactFormatVersion,
        resolver: Arc<dyn PackageResolver>,
    ) -> Self {
        self.package_resolvers.insert((format, version), resolver);
        self
    }
}

impl TokenLogicProvider for SingletonTokenLogicProvider {
    fn rc_evaluator(&self, format: EdifactFormat, version: EdifactFormatVersion) -> Option<Arc<dyn RcEvaluator>> {
        self.rc_evaluators.get(&(format, version)).cloned()
    }

    fn fc_evaluator(&self, format: EdifactFormat, version: EdifactFormatVersion) -> Option<Arc<dyn FcEvaluator>> {
        self.fc_evaluators.get(&(format, version)).cloned()
    }

    fn hints_provider(&self, format: EdifactFormat, version: EdifactFormatVersion) -> Option<Arc<dyn HintsProvider>> {
        self.hints_providers.get(&(format, version)).cloned()
    }

    fn package_resolver(&self, format: EdifactFormat, version: EdifactFormatVersion) -> Option<Arc<dyn PackageResolver>> {
        self.package_resolvers.get(&(format, version)).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::DictRcEvaluator;

    #[test]
    fn returns_none_for_unregistered_format() {
        let provider = SingletonTokenLogicProvider::new();
        assert!(provider.rc_evaluator(EdifactFormat::Utilmd, EdifactFormatVersion::Fv2104).is_none());
    }

    #[test]
    fn returns_the_registered_evaluator_for_its_exact_key() {
        let evaluator: Arc<dyn RcEvaluator> = Arc::new(DictRcEvaluator::default());
        let provider = SingletonTokenLogicProvider::new().with_rc_evaluator(
            EdifactFormat::Utilmd,
            EdifactFormatVersion::Fv2104,
            evaluator,
        );
        assert!(provider.rc_evaluator(EdifactFormat::Utilmd, EdifactFormatVersion::Fv2104).is_some());
        assert!(provider.rc_evaluator(EdifactFormat::Utilmd, EdifactFormatVersion::Fv2110).is_none());
    }
}
