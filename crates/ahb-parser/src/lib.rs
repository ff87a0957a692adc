//! Parser, AST, and categorized-key extraction for the condition-expression
//! and AHB-expression grammars.
//!
//! [`parse_condition_expression`] and [`parse_ahb_expression`] are the
//! uncached entry points; [`parse_condition_expression_cached`] and
//! [`parse_ahb_expression_cached`] memoize by source string in a
//! process-wide cache, since the same handful of expressions recur across
//! an entire AHB document.

pub mod ahb;
pub mod ast;
pub mod condition;
pub mod error;
pub mod extract;

pub use ahb::parse_ahb_expression;
pub use ast::{
    AhbExpression, Expr, Operator, Repeatability, RepeatabilityMax, RequirementIndicator,
    RequirementIndicatorExpression,
};
pub use condition::parse_condition_expression;
pub use error::{SyntaxError, AHB_EXPRESSION_HELP, CONDITION_EXPRESSION_HELP};
pub use extract::{extract_keys, CategorizedKeyExtract};

use std::sync::RwLock;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

static CONDITION_CACHE: Lazy<RwLock<FxHashMap<String, Expr>>> =
    Lazy::new(|| RwLock::new(FxHashMap::default()));
static AHB_CACHE: Lazy<RwLock<FxHashMap<String, AhbExpression>>> =
    Lazy::new(|| RwLock::new(FxHashMap::default()));

/// Parses a condition expression, consulting the process-wide cache first
/// unless `disable_cache` is set.
pub fn parse_condition_expression_cached(source: &str, disable_cache: bool) -> Result<Expr, SyntaxError> {
    if !disable_cache {
        if let Some(hit) = CONDITION_CACHE.read().unwrap().get(source) {
            return Ok(hit.clone());
        }
    }
    let parsed = parse_condition_expression(source)?;
    if !disable_cache {
        CONDITION_CACHE.write().unwrap().insert(source.to_string(), parsed.clone());
    }
    Ok(parsed)
}

/// Parses an AHB expression, consulting the process-wide cache first unless
/// `disable_cache` is set.
pub fn parse_ahb_expression_cached(source: &str, disable_cache: bool) -> Result<AhbExpression, SyntaxError> {
    if !disable_cache {
        if let Some(hit) = AHB_CACHE.read().unwrap().get(source) {
            return Ok(hit.clone());
        }
    }
    let parsed = parse_ahb_expression(source)?;
    if !disable_cache {
        AHB_CACHE.write().unwrap().insert(source.to_string(), parsed.clone());
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cached_condition_parse_is_idempotent() {
        let a = parse_condition_expression_cached("[1]U[2]", false).unwrap();
        let b = parse_condition_expression_cached("[1]U[2]", false).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn disabling_the_cache_still_parses_correctly() {
        let a = parse_condition_expression_cached("[3]", true).unwrap();
        let b = parse_condition_expression_cached("[3]", true).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn cached_ahb_parse_is_idempotent() {
        let a = parse_ahb_expression_cached("Muss[1]", false).unwrap();
        let b = parse_ahb_expression_cached("Muss[1]", false).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn cache_does_not_leak_errors_as_successes() {
        assert!(parse_condition_expression_cached("[1", false).is_err());
        assert!(parse_ahb_expression_cached("", false).is_err());
    }
}
