//! The AHB-expression grammar: a requirement indicator (modal mark or
//! prefix operator) optionally followed by a condition-expression body,
//! repeated in source order.
//!
//! Unlike [`crate::condition`], this grammar is not tokenized up front.
//! A requirement indicator is always one to four ASCII letters, so it is
//! found by inspecting the source directly; everything between it and
//! the next indicator (or the end of input) is handed to
//! [`crate::condition::parse_condition_expression`] verbatim.

use ahb_common::sanitize_expression;

use crate::ast::{AhbExpression, RequirementIndicator, RequirementIndicatorExpression};
use crate::condition::parse_condition_expression;
use crate::error::SyntaxError;

/// Characters a condition-expression body may contain. Mirrors the
/// character class the lexer itself accepts, plus the `n`/`N` unbounded-
/// repeatability marker the condition grammar allows inside packages.
fn is_body_char(c: char) -> bool {
    matches!(
        c,
        '[' | ']' | '(' | ')' | 'U' | 'u' | '∧' | 'O' | 'o' | '∨' | 'X' | 'x' | '⊻' | 'P' | 'p'
            | '.' | 'B' | 'b' | 'N' | 'n'
    ) || c.is_ascii_digit()
        || c.is_whitespace()
}

fn peek_char(src: &str, pos: usize) -> Option<char> {
    src[pos..].chars().next()
}

/// Looks for a requirement indicator starting at `pos`. Full modal-mark
/// words are tried before their single-letter abbreviations so that
/// `"Muss"` is not mistaken for a bare `"M"` followed by leftover `"uss"`.
fn match_indicator(src: &str, pos: usize) -> Option<(RequirementIndicator, usize)> {
    let rest = &src[pos..];
    const WORDS: [(&str, RequirementIndicator); 3] = [
        ("muss", RequirementIndicator::Muss),
        ("soll", RequirementIndicator::Soll),
        ("kann", RequirementIndicator::Kann),
    ];
    for (word, indicator) in WORDS {
        if rest.len() >= word.len() && rest.is_char_boundary(word.len()) && rest[..word.len()].eq_ignore_ascii_case(word) {
            return Some((indicator, word.len()));
        }
    }
    let first = rest.chars().next()?;
    let indicator = match first.to_ascii_uppercase() {
        'M' => RequirementIndicator::Muss,
        'S' => RequirementIndicator::Soll,
        'K' => RequirementIndicator::Kann,
        'X' => RequirementIndicator::X,
        'O' => RequirementIndicator::O,
        'U' => RequirementIndicator::U,
        _ => return None,
    };
    Some((indicator, first.len_utf8()))
}

/// Parses an AHB expression: one or more `requirement-indicator
/// [condition-expression]` alternatives in source order.
pub fn parse_ahb_expression(source: &str) -> Result<AhbExpression, SyntaxError> {
    if source.trim().is_empty() {
        return Err(SyntaxError::ahb_expression("an ahb_expression must not be empty"));
    }
    let source = sanitize_expression(source);
    let source = source.as_str();

    let len = source.len();
    let mut pos = 0;
    let mut children = Vec::new();

    loop {
        while let Some(c) = peek_char(source, pos) {
            if c.is_whitespace() {
                pos += c.len_utf8();
            } else {
                break;
            }
        }
        if pos >= len {
            break;
        }

        let Some((indicator, consumed)) = match_indicator(source, pos) else {
            return Err(SyntaxError::ahb_expression(format!(
                "expected a requirement indicator (Muss/Soll/Kann/X/O/U) at byte offset {pos} of '{source}'"
            )));
        };
        pos += consumed;

        let body_start = pos;
        while let Some(c) = peek_char(source, pos) {
            if is_body_char(c) {
                pos += c.len_utf8();
            } else {
                break;
            }
        }
        let body_text = source[body_start..pos].trim();
        let body = if body_text.is_empty() { None } else { Some(parse_condition_expression(body_text)?) };

        children.push(RequirementIndicatorExpression { indicator, body });
    }

    if children.is_empty() {
        return Err(SyntaxError::ahb_expression("an ahb_expression must not be empty"));
    }
    Ok(AhbExpression { children })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expr;

    fn indicators(source: &str) -> Vec<RequirementIndicator> {
        parse_ahb_expression(source).unwrap().children.into_iter().map(|c| c.indicator).collect()
    }

    #[test]
    fn bare_modal_mark_has_no_body() {
        let ahb = parse_ahb_expression("Muss").unwrap();
        assert_eq!(ahb.children.len(), 1);
        assert_eq!(ahb.children[0].indicator, RequirementIndicator::Muss);
        assert!(ahb.children[0].body.is_none());
    }

    #[test]
    fn bare_prefix_operator_has_no_body() {
        let ahb = parse_ahb_expression("X").unwrap();
        assert_eq!(ahb.children[0].indicator, RequirementIndicator::X);
        assert!(ahb.children[0].body.is_none());
    }

    #[test]
    fn single_condition_body() {
        let ahb = parse_ahb_expression("Muss[1]").unwrap();
        assert_eq!(ahb.children.len(), 1);
        match ahb.children[0].body.as_ref().unwrap() {
            Expr::Condition { key, .. } => assert_eq!(key, "1"),
            other => panic!("expected a condition leaf, got {other:?}"),
        }
    }

    #[test]
    fn body_absorbs_and_operator_without_splitting_on_bare_u() {
        let ahb = parse_ahb_expression("Soll[1]U[5]").unwrap();
        assert_eq!(ahb.children.len(), 1);
        assert!(matches!(ahb.children[0].body.as_ref().unwrap(), Expr::Binary { .. }));
    }

    #[test]
    fn body_absorbs_parenthesized_composition_and_trailing_operator() {
        let ahb = parse_ahb_expression("Kann([1]U[5])U[905]").unwrap();
        assert_eq!(ahb.children.len(), 1);
        assert!(matches!(ahb.children[0].body.as_ref().unwrap(), Expr::Binary { .. }));
    }

    #[test]
    fn body_absorbs_interior_whitespace_and_tabs() {
        let ahb = parse_ahb_expression("O([1]U[5]) U\t[905]").unwrap();
        assert_eq!(ahb.children.len(), 1);
        assert_eq!(ahb.children[0].indicator, RequirementIndicator::O);
    }

    #[test]
    fn prefix_operator_is_case_insensitive() {
        assert_eq!(indicators("U[1]O[5]"), vec![RequirementIndicator::U]);
        assert_eq!(indicators("u[1]O[5]"), vec![RequirementIndicator::U]);
    }

    #[test]
    fn modal_mark_abbreviations_are_accepted() {
        assert_eq!(indicators("M[3]U[4]"), vec![RequirementIndicator::Muss]);
        assert_eq!(indicators("m[3]u[4]"), vec![RequirementIndicator::Muss]);
    }

    #[test]
    fn chains_multiple_requirement_indicators() {
        let ahb = parse_ahb_expression("Muss[3]U[4]Soll[5]    Kann[502]").unwrap();
        assert_eq!(
            ahb.children.iter().map(|c| c.indicator).collect::<Vec<_>>(),
            vec![RequirementIndicator::Muss, RequirementIndicator::Soll, RequirementIndicator::Kann]
        );
        assert!(ahb.children[1].body.is_some());
        match ahb.children[2].body.as_ref().unwrap() {
            Expr::Condition { key, .. } => assert_eq!(key, "502"),
            other => panic!("expected a condition leaf, got {other:?}"),
        }
    }

    #[test]
    fn chains_abbreviated_indicators_case_insensitively() {
        let ahb = parse_ahb_expression("m[3]u[4]s[5]    k[502]").unwrap();
        assert_eq!(
            ahb.children.iter().map(|c| c.indicator).collect::<Vec<_>>(),
            vec![RequirementIndicator::Muss, RequirementIndicator::Soll, RequirementIndicator::Kann]
        );
    }

    #[test]
    fn rejects_empty_input() {
        assert!(parse_ahb_expression("").is_err());
        assert!(parse_ahb_expression("   ").is_err());
    }

    #[test]
    fn rejects_condition_expression_without_requirement_indicator() {
        assert!(parse_ahb_expression("[1]").is_err());
    }

    #[test]
    fn rejects_abbreviated_modal_mark_followed_by_unparsable_remainder() {
        // "M" is a valid modal mark; the leftover "us[2]" starts a body of
        // just "u" (the rest isn't in the condition-expression charset),
        // and "u" alone never parses as a condition expression.
        assert!(parse_ahb_expression("Mus[2]").is_err());
    }

    #[test]
    fn rejects_trailing_characters_outside_any_grammar() {
        assert!(parse_ahb_expression("Muss[2]C[3]").is_err());
    }
}
