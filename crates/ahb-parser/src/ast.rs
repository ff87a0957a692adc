//! The condition-expression and AHB-expression abstract syntax trees.
//!
//! Every node is a plain tagged union -- no inheritance, no dynamic
//! dispatch. Trees are immutable once built; transformations (package
//! expansion, time-condition expansion) produce new trees rather than
//! mutating in place.

use ahb_common::{Span, TimeCondition};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A binary boolean composition operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    And,
    Or,
    Xor,
}

impl Operator {
    /// The canonical ASCII letter used when rendering a composed
    /// format-constraint expression (`U`/`O`/`X`).
    pub fn canonical_char(self) -> char {
        match self {
            Operator::And => 'U',
            Operator::Or => 'O',
            Operator::Xor => 'X',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_char())
    }
}

/// The upper bound of a package [`Repeatability`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatabilityMax {
    Bounded(u32),
    /// The literal `n` upper bound, meaning "unbounded".
    Unbounded,
}

/// A package's `n..m` repeatability annotation. Parsed and carried for
/// downstream consumers but never affects the spliced subtree itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repeatability {
    pub min: u32,
    pub max: RepeatabilityMax,
}

impl Repeatability {
    /// `0 <= min <= max`, and not both zero.
    pub fn is_valid(&self) -> bool {
        match self.max {
            RepeatabilityMax::Unbounded => true,
            RepeatabilityMax::Bounded(max) => self.min <= max && !(self.min == 0 && max == 0),
        }
    }
}

/// A condition-expression AST node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// `[n]` -- a leaf referencing a numbered condition, already classified
    /// (requirement constraint, hint, or format constraint) by `ahb_common::classify`.
    Condition { key: String, span: Span },
    /// `[nP]` or `[nPn..m]` -- a leaf to be expanded by the resolver.
    Package { key: String, repeatability: Option<Repeatability>, span: Span },
    /// `[UB1]`/`[UB2]`/`[UB3]` -- a leaf to be replaced by the resolver.
    TimeCondition { condition: TimeCondition, span: Span },
    /// A binary boolean composition (`U`/`O`/`X`/`∧`/`∨`/`⊻`).
    Binary { op: Operator, left: Box<Expr>, right: Box<Expr>, span: Span },
    /// Juxtaposition without an explicit operator, e.g. `[2][901]`: attaches
    /// a format-constraint suffix to a boolean sub-expression.
    ThenAlso { left: Box<Expr>, right: Box<Expr>, span: Span },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Condition { span, .. }
            | Expr::Package { span, .. }
            | Expr::TimeCondition { span, .. }
            | Expr::Binary { span, .. }
            | Expr::ThenAlso { span, .. } => *span,
        }
    }
}

/// One of the six requirement indicators recognized by the AHB-expression
/// grammar: three modal marks and three prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequirementIndicator {
    Muss,
    Soll,
    Kann,
    /// Prefix operator `X` -- "exactly one of the referenced segments/groups".
    X,
    /// Prefix operator `O` -- "at least one of the referenced segments/groups".
    O,
    /// Prefix operator `U` -- "all of the referenced segments/groups".
    U,
}

impl fmt::Display for RequirementIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RequirementIndicator::Muss => "Muss",
            RequirementIndicator::Soll => "Soll",
            RequirementIndicator::Kann => "Kann",
            RequirementIndicator::X => "X",
            RequirementIndicator::O => "O",
            RequirementIndicator::U => "U",
        };
        f.write_str(s)
    }
}

/// One `MODAL_MARK COND_EXPR` or `PREFIX_OP COND_EXPR` alternative inside an
/// [`AhbExpression`]; `body` is `None` for a lone requirement indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementIndicatorExpression {
    pub indicator: RequirementIndicator,
    pub body: Option<Expr>,
}

/// The top-level AST for an AHB expression: one or more requirement
/// indicator alternatives in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AhbExpression {
    pub children: Vec<RequirementIndicatorExpression>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeatability_rejects_zero_to_zero() {
        let r = Repeatability { min: 0, max: RepeatabilityMax::Bounded(0) };
        assert!(!r.is_valid());
    }

    #[test]
    fn repeatability_rejects_min_above_max() {
        let r = Repeatability { min: 5, max: RepeatabilityMax::Bounded(3) };
        assert!(!r.is_valid());
    }

    #[test]
    fn repeatability_accepts_unbounded() {
        let r = Repeatability { min: 1, max: RepeatabilityMax::Unbounded };
        assert!(r.is_valid());
    }

    #[test]
    fn operator_canonical_chars() {
        assert_eq!(Operator::And.canonical_char(), 'U');
        assert_eq!(Operator::Or.canonical_char(), 'O');
        assert_eq!(Operator::Xor.canonical_char(), 'X');
    }
}
