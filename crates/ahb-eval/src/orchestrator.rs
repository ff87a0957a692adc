//! The top-level AHB-expression orchestrator: runs the requirement-
//! constraint pass then the format-constraint pass over each requirement-
//! indicator alternative of a parsed AHB expression, and selects which
//! alternative's result to report.

use ahb_parser::{AhbExpression, RequirementIndicatorExpression};
use ahb_providers::{ConditionCheckResult, FcEvaluator, FormatConstraintEvaluationResult, HintsProvider, RcEvaluator};

use crate::error::EvalError;
use crate::{fc, rc};

/// The three provider handles the orchestrator needs, bundled so call sites
/// don't have to pass them one by one through every helper.
pub struct Providers<'a> {
    pub rc_evaluator: &'a dyn RcEvaluator,
    pub fc_evaluator: &'a dyn FcEvaluator,
    pub hints_provider: &'a dyn HintsProvider,
}

/// Evaluates every requirement-indicator alternative of `ahb` in source
/// order and reports the selected one, per §4.7:
/// 1. the first alternative whose requirement-constraint pass fulfilled its
///    constraints wins;
/// 2. if none did, the last alternative is reported instead;
/// 3. if more than one alternative existed, the winner is forced
///    conditional, since which alternative even applies depended on order.
pub async fn evaluate_ahb_expression(
    ahb: &AhbExpression,
    providers: &Providers<'_>,
    entered_input: Option<&str>,
) -> Result<ConditionCheckResult, EvalError> {
    let mut results = Vec::with_capacity(ahb.children.len());
    for child in &ahb.children {
        results.push(evaluate_alternative(child, providers, entered_input).await?);
    }

    let multiple = results.len() > 1;
    let winner = results
        .iter()
        .position(|r| r.rc_result.constraints_fulfilled)
        .unwrap_or(results.len() - 1);
    let mut selected = results.swap_remove(winner);
    if multiple {
        selected.rc_result.is_conditional = true;
    }
    Ok(selected)
}

async fn evaluate_alternative(
    child: &RequirementIndicatorExpression,
    providers: &Providers<'_>,
    entered_input: Option<&str>,
) -> Result<ConditionCheckResult, EvalError> {
    let Some(body) = &child.body else {
        return Ok(ConditionCheckResult {
            requirement_indicator: child.indicator.to_string(),
            rc_result: ahb_providers::RequirementConstraintEvaluationResult {
                constraints_fulfilled: true,
                is_conditional: false,
                fc_expression: None,
                hints: None,
            },
            fc_result: FormatConstraintEvaluationResult { fulfilled: true, error_message: None },
        });
    };

    let rc_result =
        rc::evaluate_condition_expression_rc(body, providers.rc_evaluator, providers.hints_provider).await?;
    let fc_result =
        fc::evaluate_format_constraints(rc_result.fc_expression.as_deref(), entered_input, providers.fc_evaluator)
            .await?;
    Ok(ConditionCheckResult {
        requirement_indicator: child.indicator.to_string(),
        rc_result,
        fc_result: fc_result.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahb_common::Fulfillment;
    use ahb_parser::parse_ahb_expression;
    use ahb_providers::reference::{DictFcEvaluator, DictRcEvaluator, MapHintsProvider};
    use rustc_hash::FxHashMap;

    #[tokio::test]
    async fn a_bare_requirement_indicator_is_unconditionally_fulfilled() {
        let ahb = parse_ahb_expression("Muss").unwrap();
        let providers = Providers {
            rc_evaluator: &DictRcEvaluator::default(),
            fc_evaluator: &DictFcEvaluator::default(),
            hints_provider: &MapHintsProvider::default(),
        };
        let result = evaluate_ahb_expression(&ahb, &providers, None).await.unwrap();
        assert!(result.rc_result.constraints_fulfilled);
        assert!(!result.rc_result.is_conditional);
    }

    #[tokio::test]
    async fn picks_the_first_fulfilled_alternative() {
        let ahb = parse_ahb_expression("Muss[1] Kann").unwrap();
        let mut rc_map = FxHashMap::default();
        rc_map.insert("1".to_string(), Fulfillment::Unfulfilled);
        let providers = Providers {
            rc_evaluator: &DictRcEvaluator::new(rc_map),
            fc_evaluator: &DictFcEvaluator::default(),
            hints_provider: &MapHintsProvider::default(),
        };
        let result = evaluate_ahb_expression(&ahb, &providers, None).await.unwrap();
        assert_eq!(result.requirement_indicator, "Kann");
        assert!(result.rc_result.is_conditional);
    }

    #[tokio::test]
    async fn falls_back_to_the_last_alternative_if_none_fulfilled() {
        let ahb = parse_ahb_expression("Muss[1] Soll[2]").unwrap();
        let mut rc_map = FxHashMap::default();
        rc_map.insert("1".to_string(), Fulfillment::Unfulfilled);
        rc_map.insert("2".to_string(), Fulfillment::Unfulfilled);
        let providers = Providers {
            rc_evaluator: &DictRcEvaluator::new(rc_map),
            fc_evaluator: &DictFcEvaluator::default(),
            hints_provider: &MapHintsProvider::default(),
        };
        let result = evaluate_ahb_expression(&ahb, &providers, None).await.unwrap();
        assert_eq!(result.requirement_indicator, "Soll");
        assert!(!result.rc_result.constraints_fulfilled);
    }

    #[tokio::test]
    async fn a_single_neutral_alternative_is_not_forced_conditional() {
        let ahb = parse_ahb_expression("Muss[501]").unwrap();
        let mut hint_map = FxHashMap::default();
        hint_map.insert("501".to_string(), "x".to_string());
        let providers = Providers {
            rc_evaluator: &DictRcEvaluator::default(),
            fc_evaluator: &DictFcEvaluator::default(),
            hints_provider: &MapHintsProvider::new(hint_map),
        };
        let result = evaluate_ahb_expression(&ahb, &providers, None).await.unwrap();
        assert!(!result.rc_result.is_conditional);
    }
}
