//! Expands `Package` and `TimeCondition` leaves of a parsed condition
//! expression in place, producing a tree the requirement-constraint pass
//! (`ahb-eval`) can fold without ever seeing either node kind again.
//!
//! Package expansion asks a [`PackageResolver`] for the condition expression
//! a package key abbreviates, re-parses it, and splices the result in. Time-
//! condition expansion is a fixed rewrite (`UB1`→`[932]`, `UB2`→`[934]`,
//! `UB3`→`([932] ∧ [492]) ⊻ ([934] ∧ [493])`) and needs no provider call at
//! all; it can be switched off so a caller can treat `TimeCondition` leaves
//! as opaque requirement constraints of its own choosing.
//!
//! Sibling subtrees are expanded concurrently (`futures::try_join`); since
//! the expansion of one leaf can never affect another, this is purely a
//! latency optimization, not a correctness requirement. Dropping the
//! returned future cancels any outstanding provider calls, since every
//! suspension point is a plain `.await` with no task spawned behind it.

pub mod error;

pub use error::{PackageUnresolvable, ResolveError};

use ahb_parser::{parse_condition_expression, Expr};
use ahb_providers::PackageResolver;
use futures::future::{BoxFuture, FutureExt};

/// Expands every `Package` leaf (via `resolver`) and, if `expand_time_conditions`
/// is set, every `TimeCondition` leaf, returning a tree with neither node kind
/// left in it.
pub async fn resolve_expression(
    expr: Expr,
    resolver: &dyn PackageResolver,
    expand_time_conditions: bool,
) -> Result<Expr, ResolveError> {
    resolve_boxed(expr, resolver, expand_time_conditions).await
}

fn resolve_boxed<'a>(
    expr: Expr,
    resolver: &'a dyn PackageResolver,
    expand_time_conditions: bool,
) -> BoxFuture<'a, Result<Expr, ResolveError>> {
    async move {
        match expr {
            Expr::Condition { .. } => Ok(expr),
            Expr::Package { key, span, .. } => {
                let expansion = resolver.resolve(&key).await;
                let Some(source) = expansion.expression else {
                    return Err(PackageUnresolvable { key }.into());
                };
                let spliced = parse_condition_expression(&source)?;
                let spliced = resolve_boxed(spliced, resolver, expand_time_conditions).await?;
                Ok(reposition(spliced, span))
            }
            Expr::TimeCondition { condition, span } => {
                if !expand_time_conditions {
                    return Ok(Expr::TimeCondition { condition, span });
                }
                let source = time_condition_expansion(condition);
                let spliced = parse_condition_expression(source)?;
                Ok(reposition(spliced, span))
            }
            Expr::Binary { op, left, right, span } => {
                let (left, right) = futures::try_join!(
                    resolve_boxed(*left, resolver, expand_time_conditions),
                    resolve_boxed(*right, resolver, expand_time_conditions),
                )?;
                Ok(Expr::Binary { op, left: Box::new(left), right: Box::new(right), span })
            }
            Expr::ThenAlso { left, right, span } => {
                let (left, right) = futures::try_join!(
                    resolve_boxed(*left, resolver, expand_time_conditions),
                    resolve_boxed(*right, resolver, expand_time_conditions),
                )?;
                Ok(Expr::ThenAlso { left: Box::new(left), right: Box::new(right), span })
            }
        }
    }
    .boxed()
}

/// The literal expansion formula for each time-condition token.
fn time_condition_expansion(condition: ahb_common::TimeCondition) -> &'static str {
    use ahb_common::TimeCondition::*;
    match condition {
        Ub1 => "[932]",
        Ub2 => "[934]",
        Ub3 => "([932]U[492])X([934]U[493])",
    }
}

/// A spliced-in subtree keeps its own internally consistent spans (they
/// matter for syntax-error messages if the splice itself fails to parse
/// further), but is re-rooted to the span of the leaf it replaced so
/// callers walking the outer tree see a span that still falls within the
/// original source.
fn reposition(expr: Expr, span: ahb_common::Span) -> Expr {
    match expr {
        Expr::Condition { key, .. } => Expr::Condition { key, span },
        Expr::Package { key, repeatability, .. } => Expr::Package { key, repeatability, span },
        Expr::TimeCondition { condition, .. } => Expr::TimeCondition { condition, span },
        Expr::Binary { op, left, right, .. } => Expr::Binary { op, left, right, span },
        Expr::ThenAlso { left, right, .. } => Expr::ThenAlso { left, right, span },
    }
}
