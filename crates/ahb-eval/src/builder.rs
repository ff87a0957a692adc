//! String builders for the format-constraint expression and the hint text
//! the requirement-constraint pass accumulates as it folds upward.
//!
//! Both builders share a shape: `None` is the identity (nothing to combine
//! with yet), and combining two present values wraps them in a canonical,
//! operator-specific template.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a single bracketed atom wrapped in a redundant pair of
/// parentheses, e.g. `"([932])"` -> `"[932]"`.
static REDUNDANT_PARENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((\[\d+\])\)").unwrap());

fn simplify(expression: String) -> String {
    REDUNDANT_PARENS.replace_all(&expression, "$1").into_owned()
}

fn connect(op: char, left: Option<String>, right: Option<String>) -> Option<String> {
    match (left, right) {
        (None, None) => None,
        (Some(l), None) => Some(l),
        (None, Some(r)) => Some(r),
        (Some(l), Some(r)) => Some(simplify(format!("({l}) {op} ({r})"))),
    }
}

/// Combines two format-constraint expression fragments under AND.
pub fn fc_land(left: Option<String>, right: Option<String>) -> Option<String> {
    connect('U', left, right)
}

/// Combines two format-constraint expression fragments under OR.
pub fn fc_lor(left: Option<String>, right: Option<String>) -> Option<String> {
    connect('O', left, right)
}

/// Combines two format-constraint expression fragments under XOR.
pub fn fc_xor(left: Option<String>, right: Option<String>) -> Option<String> {
    connect('X', left, right)
}

/// Combines two hint texts under AND ("A und B").
pub fn hint_and(left: Option<String>, right: Option<String>) -> Option<String> {
    match (left, right) {
        (None, None) => None,
        (Some(l), None) => Some(l),
        (None, Some(r)) => Some(r),
        (Some(l), Some(r)) => Some(format!("{l} und {r}")),
    }
}

/// Combines two hint texts under OR ("A oder B").
pub fn hint_or(left: Option<String>, right: Option<String>) -> Option<String> {
    match (left, right) {
        (None, None) => None,
        (Some(l), None) => Some(l),
        (None, Some(r)) => Some(r),
        (Some(l), Some(r)) => Some(format!("{l} oder {r}")),
    }
}

/// Combines two hint texts under XOR ("Entweder (A) oder (B)").
pub fn hint_xor(left: Option<String>, right: Option<String>) -> Option<String> {
    match (left, right) {
        (None, None) => None,
        (Some(l), None) => Some(l),
        (None, Some(r)) => Some(r),
        (Some(l), Some(r)) => Some(format!("Entweder ({l}) oder ({r})")),
    }
}
