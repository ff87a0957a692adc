//! The requirement-constraint pass: a post-order fold over a fully
//! resolved condition-expression AST (no `Package`/`TimeCondition` leaves
//! remain -- see `ahb-resolve`).
//!
//! The fold carries an [`RcNode`] at every level. Three of its variants are
//! *raw leaves* -- a requirement constraint, a hint, or an as-yet-unevaluated
//! format constraint -- and the fourth, `Composition`, is what every
//! AND/OR/XOR/`ThenAlso` produces. The OR/XOR and `ThenAlso` type rules only
//! fire against raw leaves, matching the distinction the source draws
//! between its `Hint`/`UnevaluatedFormatConstraint` leaf types and its
//! generic `EvaluatedComposition`.

use ahb_common::{classify, Category, Fulfillment};
use ahb_parser::{Expr, Operator};
use ahb_providers::{HintsProvider, RcEvaluator, RequirementConstraintEvaluationResult};
use futures::future::{BoxFuture, FutureExt};

use crate::builder::{fc_land, fc_lor, fc_xor, hint_and, hint_or, hint_xor};
use crate::error::{EvalError, IllTyped, MissingInformation};

/// A fully evaluated (or still-pending, for format constraints) node of the
/// requirement-constraint fold.
#[derive(Debug, Clone, PartialEq)]
pub enum RcNode {
    RequirementConstraint { state: Fulfillment },
    Hint { text: Option<String> },
    UnevaluatedFormatConstraint { key: String },
    Composition(EvaluatedComposition),
}

/// What an AND/OR/XOR/`ThenAlso` composition carries upward: its combined
/// state, the hint text accumulated so far, and the format-constraint
/// expression string accumulated so far.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedComposition {
    pub state: Fulfillment,
    pub hint: Option<String>,
    pub fc_expr: Option<String>,
}

impl RcNode {
    pub fn state(&self) -> Fulfillment {
        match self {
            RcNode::RequirementConstraint { state } => *state,
            RcNode::Hint { .. } => Fulfillment::Neutral,
            RcNode::UnevaluatedFormatConstraint { .. } => Fulfillment::Neutral,
            RcNode::Composition(c) => c.state,
        }
    }

    pub fn hint(&self) -> Option<String> {
        match self {
            RcNode::Hint { text } => text.clone(),
            RcNode::Composition(c) => c.hint.clone(),
            _ => None,
        }
    }

    pub fn fc_expr(&self) -> Option<String> {
        match self {
            RcNode::UnevaluatedFormatConstraint { key } => Some(format!("[{key}]")),
            RcNode::Composition(c) => c.fc_expr.clone(),
            _ => None,
        }
    }
}

/// Folds `expr`, calling `rc_evaluator` for requirement-constraint leaves
/// and `hints_provider` for hint leaves. Format-constraint leaves are
/// materialized without any provider call.
pub fn evaluate_requirement_constraints<'a>(
    expr: &'a Expr,
    rc_evaluator: &'a dyn RcEvaluator,
    hints_provider: &'a dyn HintsProvider,
) -> BoxFuture<'a, Result<RcNode, EvalError>> {
    async move {
        match expr {
            Expr::Condition { key, .. } => evaluate_leaf(key, rc_evaluator, hints_provider).await,
            Expr::Package { key, .. } => Err(EvalError::InvalidExpression(crate::error::InvalidExpression {
                message: "a package leaf survived into the requirement-constraint pass unexpanded".to_string(),
                expression: Some(key.clone()),
            })),
            Expr::TimeCondition { condition, .. } => {
                Err(EvalError::InvalidExpression(crate::error::InvalidExpression {
                    message: "a time-condition leaf survived into the requirement-constraint pass unexpanded"
                        .to_string(),
                    expression: Some(condition.as_str().to_string()),
                }))
            }
            Expr::Binary { op, left, right, .. } => {
                let (left, right) = futures::try_join!(
                    evaluate_requirement_constraints(left, rc_evaluator, hints_provider),
                    evaluate_requirement_constraints(right, rc_evaluator, hints_provider),
                )?;
                compose(*op, left, right).map(RcNode::Composition).map_err(EvalError::from)
            }
            Expr::ThenAlso { left, right, .. } => {
                let (left, right) = futures::try_join!(
                    evaluate_requirement_constraints(left, rc_evaluator, hints_provider),
                    evaluate_requirement_constraints(right, rc_evaluator, hints_provider),
                )?;
                then_also(left, right).map(RcNode::Composition).map_err(EvalError::from)
            }
        }
    }
    .boxed()
}

async fn evaluate_leaf(
    key: &str,
    rc_evaluator: &dyn RcEvaluator,
    hints_provider: &dyn HintsProvider,
) -> Result<RcNode, EvalError> {
    let category = classify(key)?;
    match category {
        Category::RequirementConstraint => {
            let state = rc_evaluator.evaluate(key).await?;
            Ok(RcNode::RequirementConstraint { state })
        }
        Category::Hint => {
            let text = hints_provider.get_hint(key).await;
            Ok(RcNode::Hint { text })
        }
        Category::FormatConstraint => Ok(RcNode::UnevaluatedFormatConstraint { key: key.to_string() }),
        Category::Package | Category::TimeCondition => {
            unreachable!("Expr::Condition leaves are only ever classified as RC/Hint/FC")
        }
    }
}

fn compose(op: Operator, left: RcNode, right: RcNode) -> Result<EvaluatedComposition, IllTyped> {
    match op {
        Operator::And => Ok(and(left, right)),
        Operator::Or => or_xor(left, right, false),
        Operator::Xor => or_xor(left, right, true),
    }
}

fn and(left: RcNode, right: RcNode) -> EvaluatedComposition {
    let state = left.state().and(right.state());
    let hint = if state != Fulfillment::Unfulfilled { hint_and(left.hint(), right.hint()) } else { None };
    let fc_expr = fc_land(left.fc_expr(), right.fc_expr());
    EvaluatedComposition { state, hint, fc_expr }
}

/// A raw leaf's type is only meaningful for the OR/XOR check when the node
/// is literally a `Hint` or an `UnevaluatedFormatConstraint` -- a
/// `Composition` that merely happens to carry a hint or an fc_expr does not
/// count, mirroring the source's `isinstance` checks against its leaf types.
fn is_raw_hint(node: &RcNode) -> bool {
    matches!(node, RcNode::Hint { .. })
}

fn is_raw_fc(node: &RcNode) -> bool {
    matches!(node, RcNode::UnevaluatedFormatConstraint { .. })
}

fn or_xor(left: RcNode, right: RcNode, xor: bool) -> Result<EvaluatedComposition, IllTyped> {
    if (is_raw_hint(&left) && is_raw_fc(&right)) || (is_raw_fc(&left) && is_raw_hint(&right)) {
        return Err(IllTyped::new("a hint cannot be combined with a format constraint under OR/XOR"));
    }
    let (l_state, r_state) = (left.state(), right.state());
    let l_neutral = l_state == Fulfillment::Neutral;
    let r_neutral = r_state == Fulfillment::Neutral;
    if l_neutral != r_neutral {
        return Err(IllTyped::new("a NEUTRAL node cannot be combined with a decided node under OR/XOR"));
    }
    let state = if xor { l_state.xor(r_state) } else { l_state.or(r_state) };
    let hint = if xor { hint_xor(left.hint(), right.hint()) } else { hint_or(left.hint(), right.hint()) };
    let fc_expr = if xor { fc_xor(left.fc_expr(), right.fc_expr()) } else { fc_lor(left.fc_expr(), right.fc_expr()) };
    Ok(EvaluatedComposition { state, hint, fc_expr })
}

fn then_also(left: RcNode, right: RcNode) -> Result<EvaluatedComposition, IllTyped> {
    let (fc_side, other) = if is_raw_fc(&left) {
        (left, right)
    } else if is_raw_fc(&right) {
        (right, left)
    } else {
        return Err(IllTyped::new("exactly one side of a juxtaposition must be a format constraint"));
    };
    let RcNode::UnevaluatedFormatConstraint { key } = &fc_side else { unreachable!() };
    let fc_key_expr = format!("[{key}]");

    match other.state() {
        Fulfillment::Neutral => {
            if !is_raw_hint(&other) {
                return Err(IllTyped::new(
                    "a format constraint can only be juxtaposed against a requirement constraint or a hint",
                ));
            }
            Ok(EvaluatedComposition {
                state: Fulfillment::Neutral,
                hint: other.hint(),
                fc_expr: fc_land(Some(fc_key_expr), other.fc_expr()),
            })
        }
        state @ (Fulfillment::Fulfilled | Fulfillment::Unfulfilled | Fulfillment::Unknown) => {
            let fc_expr = if state == Fulfillment::Fulfilled { fc_land(Some(fc_key_expr), other.fc_expr()) } else { None };
            Ok(EvaluatedComposition { state, hint: None, fc_expr })
        }
    }
}

/// Runs the requirement-constraint pass over the body of a requirement
/// indicator and maps the final fold state to the externally visible
/// result: `NEUTRAL` means "unconditionally applies," any of
/// `{FULFILLED,UNFULFILLED}` means the constraint decided it one way or the
/// other, and `UNKNOWN` is fatal for this single-pass API (see
/// [`MissingInformation`]).
pub async fn evaluate_condition_expression_rc(
    expr: &Expr,
    rc_evaluator: &dyn RcEvaluator,
    hints_provider: &dyn HintsProvider,
) -> Result<RequirementConstraintEvaluationResult, EvalError> {
    let node = evaluate_requirement_constraints(expr, rc_evaluator, hints_provider).await?;
    match node.state() {
        Fulfillment::Neutral => Ok(RequirementConstraintEvaluationResult {
            constraints_fulfilled: true,
            is_conditional: false,
            fc_expression: node.fc_expr(),
            hints: node.hint(),
        }),
        Fulfillment::Fulfilled | Fulfillment::Unfulfilled => Ok(RequirementConstraintEvaluationResult {
            constraints_fulfilled: node.state() == Fulfillment::Fulfilled,
            is_conditional: true,
            fc_expression: node.fc_expr(),
            hints: node.hint(),
        }),
        Fulfillment::Unknown => Err(EvalError::MissingInformation(MissingInformation)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahb_parser::parse_condition_expression;
    use ahb_providers::reference::{DictRcEvaluator, MapHintsProvider};
    use rustc_hash::FxHashMap;

    fn rc(pairs: &[(&str, Fulfillment)]) -> DictRcEvaluator {
        let mut map = FxHashMap::default();
        for (k, v) in pairs {
            map.insert(k.to_string(), *v);
        }
        DictRcEvaluator::new(map)
    }

    fn hints(pairs: &[(&str, &str)]) -> MapHintsProvider {
        let mut map = FxHashMap::default();
        for (k, v) in pairs {
            map.insert(k.to_string(), v.to_string());
        }
        MapHintsProvider::new(map)
    }

    #[tokio::test]
    async fn and_of_two_fulfilled_is_fulfilled() {
        let expr = parse_condition_expression("[1]U[2]").unwrap();
        let evaluator = rc(&[("1", Fulfillment::Fulfilled), ("2", Fulfillment::Fulfilled)]);
        let node = evaluate_requirement_constraints(&expr, &evaluator, &hints(&[])).await.unwrap();
        assert_eq!(node.state(), Fulfillment::Fulfilled);
    }

    #[tokio::test]
    async fn and_suppresses_hint_when_result_is_unfulfilled() {
        let expr = parse_condition_expression("[501]U[2]").unwrap();
        let evaluator = rc(&[("2", Fulfillment::Unfulfilled)]);
        let node = evaluate_requirement_constraints(&expr, &evaluator, &hints(&[("501", "see docs")])).await.unwrap();
        assert_eq!(node.state(), Fulfillment::Unfulfilled);
        assert!(node.hint().is_none());
    }

    #[tokio::test]
    async fn or_of_hint_and_format_constraint_is_ill_typed() {
        let expr = parse_condition_expression("[501]O[901]").unwrap();
        let evaluator = rc(&[]);
        let err = evaluate_requirement_constraints(&expr, &evaluator, &hints(&[])).await.unwrap_err();
        assert!(matches!(err, EvalError::IllTyped(_)));
    }

    #[tokio::test]
    async fn then_also_requires_fc_when_other_side_fulfilled() {
        let expr = parse_condition_expression("[2][901]").unwrap();
        let evaluator = rc(&[("2", Fulfillment::Fulfilled)]);
        let node = evaluate_requirement_constraints(&expr, &evaluator, &hints(&[])).await.unwrap();
        assert_eq!(node.state(), Fulfillment::Fulfilled);
        assert_eq!(node.fc_expr(), Some("[901]".to_string()));
    }

    #[tokio::test]
    async fn then_also_drops_fc_when_other_side_unfulfilled() {
        let expr = parse_condition_expression("[2][901]").unwrap();
        let evaluator = rc(&[("2", Fulfillment::Unfulfilled)]);
        let node = evaluate_requirement_constraints(&expr, &evaluator, &hints(&[])).await.unwrap();
        assert_eq!(node.state(), Fulfillment::Unfulfilled);
        assert!(node.fc_expr().is_none());
    }

    #[tokio::test]
    async fn then_also_over_a_hint_is_neutral_and_requires_the_fc() {
        let expr = parse_condition_expression("[501][901]").unwrap();
        let node =
            evaluate_requirement_constraints(&expr, &rc(&[]), &hints(&[("501", "Hinweistext")])).await.unwrap();
        assert_eq!(node.state(), Fulfillment::Neutral);
        assert_eq!(node.hint(), Some("Hinweistext".to_string()));
        assert_eq!(node.fc_expr(), Some("[901]".to_string()));
    }

    #[tokio::test]
    async fn unknown_rc_propagates_through_and() {
        let expr = parse_condition_expression("[1]U[2]").unwrap();
        let evaluator = rc(&[("1", Fulfillment::Unknown), ("2", Fulfillment::Fulfilled)]);
        let node = evaluate_requirement_constraints(&expr, &evaluator, &hints(&[])).await.unwrap();
        assert_eq!(node.state(), Fulfillment::Unknown);
    }

    #[tokio::test]
    async fn top_level_unknown_is_missing_information() {
        let expr = parse_condition_expression("[1]").unwrap();
        let evaluator = rc(&[("1", Fulfillment::Unknown)]);
        let err = evaluate_condition_expression_rc(&expr, &evaluator, &hints(&[])).await.unwrap_err();
        assert!(matches!(err, EvalError::MissingInformation(_)));
    }

    #[tokio::test]
    async fn top_level_neutral_is_unconditionally_fulfilled() {
        let expr = parse_condition_expression("[501]").unwrap();
        let result = evaluate_condition_expression_rc(&expr, &rc(&[]), &hints(&[("501", "x")])).await.unwrap();
        assert!(result.constraints_fulfilled);
        assert!(!result.is_conditional);
        assert_eq!(result.hints.as_deref(), Some("x"));
    }
}
