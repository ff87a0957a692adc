//! Tokenizer for the condition-expression grammar (the bracketed mini
//! language nested inside AHB expressions, e.g. `[2] U ([3] O [4])[901]`).
//!
//! The AHB-expression grammar itself (the outer `Muss`/`Soll`/`Kann`/`X`/`O`/`U`
//! wrapper) is split apart in `ahb-parser`, which re-lexes each condition-
//! expression body found inside it with this same lexer.

mod cursor;

use ahb_common::TimeCondition;
use cursor::Cursor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A lexical token with its source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub start: u32,
    pub end: u32,
}

impl Token {
    fn new(kind: TokenKind, start: u32, end: u32) -> Self {
        Self { kind, start, end }
    }
}

/// The kinds of tokens the condition-expression lexer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    LBracket,
    RBracket,
    LParen,
    RParen,
    /// A run of decimal digits, already parsed to a value.
    Int(u32),
    /// The package marker letter `P`/`p`.
    PackageMarker,
    /// The unbounded-repeatability marker letter `n`/`N`.
    UnboundedMarker,
    /// `..` inside a repeatability (`1..5`).
    DotDot,
    /// A single `.`, never valid on its own -- only `..` separates a
    /// repeatability's bounds.
    Dot,
    And,
    Or,
    Xor,
    /// One of the three time-condition tokens, lexed as a unit so that the
    /// `U` in `UB1` is never mistaken for the AND operator.
    TimeCondition(TimeCondition),
    Eof,
}

/// A lexer error with location information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexError {
    pub message: String,
    pub start: u32,
    pub end: u32,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for LexError {}

/// Tokenizes a (pre-sanitized) condition expression.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    emitted_eof: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self { cursor: Cursor::new(source), emitted_eof: false }
    }

    /// Tokenizes the full source, including a trailing [`TokenKind::Eof`].
    ///
    /// Validates the whole character stream up front so an unexpected
    /// character fails the tokenization instead of silently truncating it.
    pub fn tokenize(source: &'src str) -> Result<Vec<Token>, LexError> {
        Lexer::new(source).validate()?;
        Ok(Lexer::new(source).collect())
    }

    fn validate(&mut self) -> Result<(), LexError> {
        loop {
            self.skip_whitespace();
            let start = self.cursor.pos();
            let Some(c) = self.cursor.peek() else { break };
            match c {
                '[' | ']' | '(' | ')' | '.' => {
                    self.cursor.advance();
                }
                '∧' | '∨' | '⊻' => {
                    self.cursor.advance();
                }
                'u' | 'U' | 'o' | 'O' | 'x' | 'X' | 'p' | 'P' | 'n' | 'N' => {
                    self.cursor.advance();
                }
                'b' | 'B' => {
                    self.cursor.advance();
                }
                c if c.is_ascii_digit() => {
                    self.cursor.eat_while(|c| c.is_ascii_digit());
                }
                other => {
                    let end = start + other.len_utf8() as u32;
                    return Err(LexError {
                        message: format!("unexpected character '{other}' in condition expression"),
                        start,
                        end,
                    });
                }
            }
        }
        Ok(())
    }

    fn skip_whitespace(&mut self) {
        self.cursor.eat_while(|c| c.is_whitespace());
    }

    fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        let start = self.cursor.pos();
        let Some(c) = self.cursor.peek() else {
            return Token::new(TokenKind::Eof, start, start);
        };

        match c {
            '[' => self.single(TokenKind::LBracket, start),
            ']' => self.single(TokenKind::RBracket, start),
            '(' => self.single(TokenKind::LParen, start),
            ')' => self.single(TokenKind::RParen, start),
            '∧' => self.single(TokenKind::And, start),
            '∨' => self.single(TokenKind::Or, start),
            '⊻' => self.single(TokenKind::Xor, start),
            '.' => {
                if self.cursor.peek_next() == Some('.') {
                    self.cursor.advance();
                    self.cursor.advance();
                    Token::new(TokenKind::DotDot, start, self.cursor.pos())
                } else {
                    // A lone '.' is not the repeatability range separator;
                    // emit it as its own kind so the parser's `expect(DotDot, ..)`
                    // rejects malformed repeatabilities like `[10P1.5]` instead
                    // of silently treating them as `..`.
                    self.cursor.advance();
                    Token::new(TokenKind::Dot, start, self.cursor.pos())
                }
            }
            'u' | 'U' => {
                if let Some(time_condition) = self.try_lex_time_condition() {
                    Token::new(TokenKind::TimeCondition(time_condition), start, self.cursor.pos())
                } else {
                    self.cursor.advance();
                    Token::new(TokenKind::And, start, self.cursor.pos())
                }
            }
            'o' | 'O' => self.single(TokenKind::Or, start),
            'x' | 'X' => self.single(TokenKind::Xor, start),
            'p' | 'P' => self.single(TokenKind::PackageMarker, start),
            'n' | 'N' => self.single(TokenKind::UnboundedMarker, start),
            c if c.is_ascii_digit() => {
                self.cursor.eat_while(|c| c.is_ascii_digit());
                let end = self.cursor.pos();
                let digits = self.cursor.slice(start, end);
                let value: u32 = digits.parse().unwrap_or(u32::MAX);
                Token::new(TokenKind::Int(value), start, end)
            }
            _ => {
                // Unreachable when called after `validate`, which already
                // rejected every other character.
                self.cursor.advance();
                Token::new(TokenKind::Eof, start, self.cursor.pos())
            }
        }
    }

    /// `U`/`u` has already been peeked (not consumed). Looks ahead for
    /// `B1`/`B2`/`B3` (case-insensitive); consumes and returns the matching
    /// [`TimeCondition`] if found, otherwise leaves the cursor untouched.
    fn try_lex_time_condition(&mut self) -> Option<TimeCondition> {
        let upper = self.cursor.peek_str(3).to_ascii_uppercase();
        let time_condition = if upper == "UB1" {
            Some(TimeCondition::Ub1)
        } else if upper == "UB2" {
            Some(TimeCondition::Ub2)
        } else if upper == "UB3" {
            Some(TimeCondition::Ub3)
        } else {
            None
        };
        if time_condition.is_some() {
            for _ in 0..3 {
                self.cursor.advance();
            }
        }
        time_condition
    }

    fn single(&mut self, kind: TokenKind, start: u32) -> Token {
        self.cursor.advance();
        Token::new(kind, start, self.cursor.pos())
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.emitted_eof {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.emitted_eof = true;
        }
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::tokenize(src).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_single_condition() {
        assert_eq!(
            kinds("[1]"),
            vec![TokenKind::LBracket, TokenKind::Int(1), TokenKind::RBracket, TokenKind::Eof]
        );
    }

    #[test]
    fn lexes_operators_case_insensitively() {
        assert_eq!(kinds("[1]u[2]")[2], TokenKind::And);
        assert_eq!(kinds("[1]U[2]")[2], TokenKind::And);
        assert_eq!(kinds("[1]o[2]")[2], TokenKind::Or);
        assert_eq!(kinds("[1]x[2]")[2], TokenKind::Xor);
        assert_eq!(kinds("[1]∧[2]")[2], TokenKind::And);
        assert_eq!(kinds("[1]∨[2]")[2], TokenKind::Or);
        assert_eq!(kinds("[1]⊻[2]")[2], TokenKind::Xor);
    }

    #[test]
    fn lexes_package_with_repeatability() {
        assert_eq!(
            kinds("[10P1..5]"),
            vec![
                TokenKind::LBracket,
                TokenKind::Int(10),
                TokenKind::PackageMarker,
                TokenKind::Int(1),
                TokenKind::DotDot,
                TokenKind::Int(5),
                TokenKind::RBracket,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lexes_unbounded_repeatability_marker() {
        assert_eq!(
            kinds("[10P1..n]"),
            vec![
                TokenKind::LBracket,
                TokenKind::Int(10),
                TokenKind::PackageMarker,
                TokenKind::Int(1),
                TokenKind::DotDot,
                TokenKind::UnboundedMarker,
                TokenKind::RBracket,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn a_lone_dot_is_not_a_repeatability_separator() {
        assert_eq!(
            kinds("[10P1.5]"),
            vec![
                TokenKind::LBracket,
                TokenKind::Int(10),
                TokenKind::PackageMarker,
                TokenKind::Int(1),
                TokenKind::Dot,
                TokenKind::Int(5),
                TokenKind::RBracket,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn distinguishes_and_from_time_condition() {
        assert_eq!(kinds("[UB1]u[2]")[1], TokenKind::TimeCondition(TimeCondition::Ub1));
        assert_eq!(kinds("[UB1]u[2]")[3], TokenKind::And);
    }

    #[test]
    fn time_condition_is_case_insensitive() {
        assert_eq!(kinds("[ub2]")[1], TokenKind::TimeCondition(TimeCondition::Ub2));
        assert_eq!(kinds("[Ub3]")[1], TokenKind::TimeCondition(TimeCondition::Ub3));
    }

    #[test]
    fn skips_whitespace_between_tokens() {
        assert_eq!(kinds(" [1] U[ 2]"), kinds("[1]U[2]"));
    }

    #[test]
    fn rejects_unexpected_character() {
        let err = Lexer::tokenize("[1]@[2]").unwrap_err();
        assert!(err.message.contains('@'));
    }
}
