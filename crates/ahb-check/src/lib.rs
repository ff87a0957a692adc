//! Validity checking: given a fully resolved AHB expression (packages and
//! time conditions already expanded by `ahb-resolve`), decide whether *any*
//! admissible combination of content-evaluation results could make it raise
//! a type error. This answers "is this expression well-formed" independent
//! of what a real message actually contains -- exactly the question an
//! application-handbook author needs answered before publishing a rule.
//!
//! Grounded on `content_evaluation/__init__.py::is_valid_expression` and
//! `content_evaluation/categorized_key_extract.py`'s combination generator.

pub mod combinations;

pub use combinations::generate_possible_content_evaluation_results;

use ahb_eval::{evaluate_ahb_expression, EvalError, Providers};
use ahb_parser::{extract_keys, AhbExpression, CategorizedKeyExtract};
use ahb_providers::reference::{DictFcEvaluator, DictRcEvaluator, MapHintsProvider};
use ahb_providers::ContentEvaluationResult;

/// The outcome of checking an expression's validity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidityCheckResult {
    pub valid: bool,
    pub first_error_message: Option<String>,
}

impl ValidityCheckResult {
    fn valid() -> Self {
        Self { valid: true, first_error_message: None }
    }

    fn invalid(message: impl Into<String>) -> Self {
        Self { valid: false, first_error_message: Some(message.into()) }
    }
}

/// Checks an already-resolved AHB expression for type validity by running
/// the orchestrator against every content-evaluation result its keys admit.
///
/// A run raising [`EvalError::MissingInformation`] is expected -- it only
/// means that combination assigned `UNKNOWN` to a requirement constraint
/// that actually decided the expression's outcome -- and is not held
/// against the expression. Any other error (`IllTyped`, `NotImplemented`, a
/// structural `InvalidExpression`, ...) fails the check immediately and is
/// reported as the first error found.
pub async fn check_ahb_expression_validity(ahb: &AhbExpression) -> ValidityCheckResult {
    let mut extract = CategorizedKeyExtract::default();
    for child in &ahb.children {
        let Some(body) = &child.body else { continue };
        match extract_keys(body) {
            Ok(e) => extract = extract + e,
            Err(invalid) => return ValidityCheckResult::invalid(invalid.to_string()),
        }
    }

    for content_evaluation_result in generate_possible_content_evaluation_results(&extract) {
        if let Err(message) = run_one(ahb, &content_evaluation_result).await {
            return ValidityCheckResult::invalid(message);
        }
    }
    ValidityCheckResult::valid()
}

async fn run_one(ahb: &AhbExpression, cer: &ContentEvaluationResult) -> Result<(), String> {
    let rc_evaluator = DictRcEvaluator::new(cer.requirement_constraints.clone());
    let fc_evaluator = DictFcEvaluator::new(cer.format_constraints.clone());
    let hints_provider =
        MapHintsProvider::new(cer.hints.iter().filter_map(|(k, v)| v.clone().map(|text| (k.clone(), text))).collect());
    let providers = Providers { rc_evaluator: &rc_evaluator, fc_evaluator: &fc_evaluator, hints_provider: &hints_provider };

    match evaluate_ahb_expression(ahb, &providers, None).await {
        Ok(_) => Ok(()),
        Err(EvalError::MissingInformation(_)) => Ok(()),
        Err(other) => Err(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahb_parser::parse_ahb_expression;

    #[tokio::test]
    async fn a_hint_ored_with_a_format_constraint_is_invalid() {
        let ahb = parse_ahb_expression("Muss[501]O[901]").unwrap();
        let result = check_ahb_expression_validity(&ahb).await;
        assert!(!result.valid);
        assert!(result.first_error_message.is_some());
    }

    #[tokio::test]
    async fn exclusive_package_style_composition_is_valid() {
        let ahb = parse_ahb_expression("Muss[1]X[2]").unwrap();
        let result = check_ahb_expression_validity(&ahb).await;
        assert!(result.valid);
    }

    #[tokio::test]
    async fn a_simple_requirement_constraint_is_valid() {
        let ahb = parse_ahb_expression("Muss[1]").unwrap();
        let result = check_ahb_expression_validity(&ahb).await;
        assert!(result.valid);
    }

    #[tokio::test]
    async fn a_bare_requirement_indicator_is_valid() {
        let ahb = parse_ahb_expression("Muss").unwrap();
        let result = check_ahb_expression_validity(&ahb).await;
        assert!(result.valid);
    }

    #[tokio::test]
    async fn a_then_also_with_a_format_constraint_is_valid() {
        let ahb = parse_ahb_expression("Muss[2][901]").unwrap();
        let result = check_ahb_expression_validity(&ahb).await;
        assert!(result.valid);
    }

    /// An expression with neither a requirement- nor a format-constraint key
    /// has nothing content-dependent to vary, so the checker has no run to
    /// make and defaults to valid even if the composition would actually be
    /// ill-typed once evaluated -- there's no content-evaluation result left
    /// to catch it with.
    #[tokio::test]
    async fn an_expression_with_only_hint_keys_is_never_actually_run() {
        let ahb = parse_ahb_expression("Muss[501][502]").unwrap();
        let result = check_ahb_expression_validity(&ahb).await;
        assert!(result.valid);
    }
}
