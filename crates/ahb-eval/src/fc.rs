//! The format-constraint pass: evaluates the `fc_expression` string the
//! requirement-constraint pass produced against the actual entered input,
//! folding leaf results with AND/OR/XOR-specific error-message composition.

use ahb_parser::{parse_condition_expression, Expr, Operator};
use ahb_providers::{EvaluatedFormatConstraint, FcEvaluator};
use futures::future::{BoxFuture, FutureExt};

use crate::error::{EvalError, InvalidExpression};

/// Evaluates `fc_expr` (the string carried out of the requirement-constraint
/// pass) against `entered_input`. `None`/empty is vacuously satisfied.
pub async fn evaluate_format_constraints(
    fc_expr: Option<&str>,
    entered_input: Option<&str>,
    fc_evaluator: &dyn FcEvaluator,
) -> Result<EvaluatedFormatConstraint, EvalError> {
    let Some(fc_expr) = fc_expr.filter(|s| !s.is_empty()) else {
        return Ok(EvaluatedFormatConstraint::fulfilled());
    };
    let expr = parse_condition_expression(fc_expr)?;
    fold(&expr, entered_input, fc_evaluator).await
}

fn fold<'a>(
    expr: &'a Expr,
    entered_input: Option<&'a str>,
    fc_evaluator: &'a dyn FcEvaluator,
) -> BoxFuture<'a, Result<EvaluatedFormatConstraint, EvalError>> {
    async move {
        match expr {
            Expr::Condition { key, .. } => evaluate_leaf(key, entered_input, fc_evaluator).await,
            Expr::Binary { op, left, right, .. } => {
                let (left, right) = futures::try_join!(
                    fold(left, entered_input, fc_evaluator),
                    fold(right, entered_input, fc_evaluator),
                )?;
                Ok(compose(*op, left, right))
            }
            other => Err(EvalError::InvalidExpression(InvalidExpression {
                message: "a format-constraint expression must consist only of conditions combined by U/O/X"
                    .to_string(),
                expression: Some(format!("{other:?}")),
            })),
        }
    }
    .boxed()
}

async fn evaluate_leaf(
    key: &str,
    entered_input: Option<&str>,
    fc_evaluator: &dyn FcEvaluator,
) -> Result<EvaluatedFormatConstraint, EvalError> {
    let result = fc_evaluator.evaluate(key, entered_input).await?;
    if !result.fulfilled && result.error_message.is_none() {
        return Ok(EvaluatedFormatConstraint::unfulfilled(format!("Condition [{key}] has to be fulfilled.")));
    }
    Ok(result)
}

fn compose(op: Operator, left: EvaluatedFormatConstraint, right: EvaluatedFormatConstraint) -> EvaluatedFormatConstraint {
    match op {
        Operator::And => and(left, right),
        Operator::Or => or(left, right),
        Operator::Xor => xor(left, right),
    }
}

fn and(left: EvaluatedFormatConstraint, right: EvaluatedFormatConstraint) -> EvaluatedFormatConstraint {
    let fulfilled = left.fulfilled && right.fulfilled;
    let error_message = if right.fulfilled {
        left.error_message
    } else if let Some(l) = &left.error_message {
        Some(format!("'{l}' und '{}'", right.error_message.as_deref().unwrap_or_default()))
    } else {
        right.error_message
    };
    EvaluatedFormatConstraint { fulfilled, error_message }
}

fn or(left: EvaluatedFormatConstraint, right: EvaluatedFormatConstraint) -> EvaluatedFormatConstraint {
    let fulfilled = left.fulfilled || right.fulfilled;
    let error_message = if !left.fulfilled && !right.fulfilled {
        Some(format!(
            "'{}' oder '{}'",
            left.error_message.as_deref().unwrap_or_default(),
            right.error_message.as_deref().unwrap_or_default()
        ))
    } else {
        None
    };
    EvaluatedFormatConstraint { fulfilled, error_message }
}

fn xor(left: EvaluatedFormatConstraint, right: EvaluatedFormatConstraint) -> EvaluatedFormatConstraint {
    let fulfilled = left.fulfilled ^ right.fulfilled;
    let error_message = if !left.fulfilled && !right.fulfilled {
        Some(format!(
            "Entweder '{}' oder '{}'",
            left.error_message.as_deref().unwrap_or_default(),
            right.error_message.as_deref().unwrap_or_default()
        ))
    } else if left.fulfilled && right.fulfilled {
        Some("Zwei exklusive Formatdefinitionen dürfen nicht gleichzeitig erfüllt sein".to_string())
    } else {
        None
    };
    EvaluatedFormatConstraint { fulfilled, error_message }
}
