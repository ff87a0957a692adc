//! Recursive-descent parser for the condition-expression grammar:
//!
//! ```text
//! expression ::= expression OR expression
//!             |  expression XOR expression
//!             |  expression AND expression
//!             |  expression expression        (* implicit then-also *)
//!             |  "(" expression ")"
//!             |  atom
//! atom       ::= "[" INT "]"
//!             |  "[" INT "P" (repeat)? "]"
//!             |  "[" UB1|UB2|UB3 "]"
//! repeat     ::= INT ".." (INT | "n")
//! ```
//!
//! Operators are left-associative; parentheses override precedence, which is
//! (lowest to highest) OR, XOR, AND, then implicit juxtaposition.

use ahb_common::{sanitize_expression, Span};
use ahb_lexer::{Lexer, Token, TokenKind};

use crate::ast::{Expr, Operator, Repeatability, RepeatabilityMax};
use crate::error::SyntaxError;

/// Sanitizes (NBSP/`V` normalization, whitespace trim) and parses a
/// condition expression into an [`Expr`] tree.
pub fn parse_condition_expression(source: &str) -> Result<Expr, SyntaxError> {
    let source = sanitize_expression(source);
    let tokens = Lexer::tokenize(&source).map_err(SyntaxError::condition_expression)?;
    let mut parser = Parser { tokens, pos: 0 };
    if matches!(parser.peek_kind(), TokenKind::Eof) {
        return Err(SyntaxError::condition_expression("the expression is empty"));
    }
    let expr = parser.parse_or()?;
    if !matches!(parser.peek_kind(), TokenKind::Eof) {
        return Err(SyntaxError::condition_expression(format!(
            "unexpected trailing token at byte {}",
            parser.peek().start
        )));
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Token {
        self.tokens[self.pos]
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    fn advance(&mut self) -> Token {
        let t = self.tokens[self.pos];
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token, SyntaxError> {
        if self.peek_kind() == kind {
            Ok(self.advance())
        } else {
            Err(SyntaxError::condition_expression(format!(
                "expected {what} at byte {}",
                self.peek().start
            )))
        }
    }

    fn parse_or(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_xor()?;
        while matches!(self.peek_kind(), TokenKind::Or) {
            self.advance();
            let right = self.parse_xor()?;
            let span = left.span().cover(right.span());
            left = Expr::Binary { op: Operator::Or, left: Box::new(left), right: Box::new(right), span };
        }
        Ok(left)
    }

    fn parse_xor(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_and()?;
        while matches!(self.peek_kind(), TokenKind::Xor) {
            self.advance();
            let right = self.parse_and()?;
            let span = left.span().cover(right.span());
            left = Expr::Binary { op: Operator::Xor, left: Box::new(left), right: Box::new(right), span };
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_then_also()?;
        while matches!(self.peek_kind(), TokenKind::And) {
            self.advance();
            let right = self.parse_then_also()?;
            let span = left.span().cover(right.span());
            left = Expr::Binary { op: Operator::And, left: Box::new(left), right: Box::new(right), span };
        }
        Ok(left)
    }

    /// Juxtaposition: as long as the next token could start another atom
    /// (with no operator token consumed in between), glue it on as a
    /// `ThenAlso`.
    fn parse_then_also(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_atom()?;
        while self.starts_atom() {
            let right = self.parse_atom()?;
            let span = left.span().cover(right.span());
            left = Expr::ThenAlso { left: Box::new(left), right: Box::new(right), span };
        }
        Ok(left)
    }

    fn starts_atom(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::LBracket | TokenKind::LParen)
    }

    fn parse_atom(&mut self) -> Result<Expr, SyntaxError> {
        match self.peek_kind() {
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_or()?;
                self.expect(TokenKind::RParen, "closing ')'")?;
                Ok(inner)
            }
            TokenKind::LBracket => self.parse_bracketed_atom(),
            _ => Err(SyntaxError::condition_expression(format!(
                "expected '[' or '(' at byte {}",
                self.peek().start
            ))),
        }
    }

    fn parse_bracketed_atom(&mut self) -> Result<Expr, SyntaxError> {
        let open = self.expect(TokenKind::LBracket, "opening '['")?;
        if let TokenKind::TimeCondition(condition) = self.peek_kind() {
            self.advance();
            let close = self.expect(TokenKind::RBracket, "closing ']'")?;
            return Ok(Expr::TimeCondition { condition, span: Span::new(open.start, close.end) });
        }
        let TokenKind::Int(n) = self.peek_kind() else {
            return Err(SyntaxError::condition_expression(format!(
                "expected a condition key after '[' at byte {}",
                self.peek().start
            )));
        };
        self.advance();
        if matches!(self.peek_kind(), TokenKind::PackageMarker) {
            self.advance();
            let repeatability = self.parse_optional_repeatability()?;
            let close = self.expect(TokenKind::RBracket, "closing ']'")?;
            return Ok(Expr::Package {
                key: format!("{n}P"),
                repeatability,
                span: Span::new(open.start, close.end),
            });
        }
        let close = self.expect(TokenKind::RBracket, "closing ']'")?;
        Ok(Expr::Condition { key: n.to_string(), span: Span::new(open.start, close.end) })
    }

    fn parse_optional_repeatability(&mut self) -> Result<Option<Repeatability>, SyntaxError> {
        if !matches!(self.peek_kind(), TokenKind::Int(_)) {
            return Ok(None);
        }
        let TokenKind::Int(min) = self.advance().kind else { unreachable!() };
        self.expect(TokenKind::DotDot, "'..' in repeatability")?;
        let max = match self.peek_kind() {
            TokenKind::Int(max) => {
                self.advance();
                RepeatabilityMax::Bounded(max)
            }
            TokenKind::UnboundedMarker => {
                self.advance();
                RepeatabilityMax::Unbounded
            }
            _ => {
                return Err(SyntaxError::condition_expression(format!(
                    "expected an integer or 'n' after '..' at byte {}",
                    self.peek().start
                )))
            }
        };
        Ok(Some(Repeatability { min, max }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahb_common::TimeCondition;

    fn key(e: &Expr) -> &str {
        match e {
            Expr::Condition { key, .. } => key,
            _ => panic!("expected condition, got {e:?}"),
        }
    }

    #[test]
    fn parses_single_condition() {
        let e = parse_condition_expression("[1]").unwrap();
        assert_eq!(key(&e), "1");
    }

    #[test]
    fn parses_single_condition_with_trailing_whitespace_in_brackets() {
        let e = parse_condition_expression("[1  ]").unwrap();
        assert_eq!(key(&e), "1");
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let e = parse_condition_expression("[1]U[2]O[53]").unwrap();
        match e {
            Expr::Binary { op: Operator::Or, left, right, .. } => {
                assert!(matches!(*right, Expr::Condition { .. }));
                assert!(matches!(*left, Expr::Binary { op: Operator::And, .. }));
            }
            other => panic!("expected top-level OR, got {other:?}"),
        }
    }

    #[test]
    fn parses_xor() {
        let e = parse_condition_expression("[1]X[2]").unwrap();
        assert!(matches!(e, Expr::Binary { op: Operator::Xor, .. }));
    }

    #[test]
    fn parses_then_also_juxtaposition() {
        let e = parse_condition_expression("[2][901]").unwrap();
        match e {
            Expr::ThenAlso { left, right, .. } => {
                assert_eq!(key(&left), "2");
                assert_eq!(key(&right), "901");
            }
            other => panic!("expected ThenAlso, got {other:?}"),
        }
    }

    #[test]
    fn then_also_binds_tighter_than_and() {
        let e = parse_condition_expression("[2]U[3][901]").unwrap();
        match e {
            Expr::Binary { op: Operator::And, left, right, .. } => {
                assert_eq!(key(&left), "2");
                assert!(matches!(*right, Expr::ThenAlso { .. }));
            }
            other => panic!("expected AND at top, got {other:?}"),
        }
    }

    #[test]
    fn parentheses_override_precedence() {
        let e = parse_condition_expression("([1]U[2])O[3]").unwrap();
        match e {
            Expr::Binary { op: Operator::Or, left, .. } => {
                assert!(matches!(*left, Expr::Binary { op: Operator::And, .. }));
            }
            other => panic!("expected OR at top, got {other:?}"),
        }
    }

    #[test]
    fn parses_package_without_repeatability() {
        let e = parse_condition_expression("[10P]").unwrap();
        match e {
            Expr::Package { key, repeatability, .. } => {
                assert_eq!(key, "10P");
                assert!(repeatability.is_none());
            }
            other => panic!("expected Package, got {other:?}"),
        }
    }

    #[test]
    fn parses_package_with_repeatability() {
        let e = parse_condition_expression("[10P1..5]").unwrap();
        match e {
            Expr::Package { key, repeatability, .. } => {
                assert_eq!(key, "10P");
                assert_eq!(repeatability.unwrap().min, 1);
                assert_eq!(repeatability.unwrap().max, RepeatabilityMax::Bounded(5));
            }
            other => panic!("expected Package, got {other:?}"),
        }
    }

    #[test]
    fn parses_unbounded_repeatability() {
        let e = parse_condition_expression("[10P1..n]").unwrap();
        match e {
            Expr::Package { repeatability, .. } => {
                assert_eq!(repeatability.unwrap().max, RepeatabilityMax::Unbounded);
            }
            other => panic!("expected Package, got {other:?}"),
        }
    }

    #[test]
    fn parses_time_condition() {
        let e = parse_condition_expression("[UB1]U[2]").unwrap();
        match e {
            Expr::Binary { left, .. } => {
                assert!(matches!(*left, Expr::TimeCondition { condition: TimeCondition::Ub1, .. }));
            }
            other => panic!("expected Binary, got {other:?}"),
        }
    }

    #[test]
    fn nested_brackets_with_package() {
        let e = parse_condition_expression("[10P]U([1]O[2])").unwrap();
        assert!(matches!(e, Expr::Binary { op: Operator::And, .. }));
    }

    #[rustfmt::skip]
    #[test]
    fn rejects_invalid_expressions() {
        for bad in [
            "", "   ", "[1", "1]", "1", "[]", "[2]U[1", "[2]U1", "[2]U", "([1]U[2]", "[1]U[2])", "[P1]", "[10P1.5]",
        ] {
            assert!(parse_condition_expression(bad).is_err(), "expected error for {bad:?}");
        }
    }

    /// Structural equality ignoring spans, since substituting a multi-byte
    /// Unicode operator shifts every following byte offset.
    fn same_shape(a: &Expr, b: &Expr) -> bool {
        match (a, b) {
            (Expr::Condition { key: k1, .. }, Expr::Condition { key: k2, .. }) => k1 == k2,
            (
                Expr::Package { key: k1, repeatability: r1, .. },
                Expr::Package { key: k2, repeatability: r2, .. },
            ) => k1 == k2 && r1 == r2,
            (Expr::TimeCondition { condition: c1, .. }, Expr::TimeCondition { condition: c2, .. }) => c1 == c2,
            (
                Expr::Binary { op: o1, left: l1, right: r1, .. },
                Expr::Binary { op: o2, left: l2, right: r2, .. },
            ) => o1 == o2 && same_shape(l1, l2) && same_shape(r1, r2),
            (Expr::ThenAlso { left: l1, right: r1, .. }, Expr::ThenAlso { left: l2, right: r2, .. }) => {
                same_shape(l1, l2) && same_shape(r1, r2)
            }
            _ => false,
        }
    }

    #[test]
    fn operator_letters_are_case_insensitive_and_interchangeable_with_unicode() {
        let ascii = parse_condition_expression("[1]U[2]").unwrap();
        let unicode = parse_condition_expression("[1]\u{2227}[2]").unwrap();
        assert!(same_shape(&ascii, &unicode));
    }
}
