//! Parser error types.

use std::fmt;

/// The fixed, structural explanation shown for every malformed condition
/// expression -- the parser does not attempt to pinpoint which rule failed,
/// only to list the likely causes (mirrors the source's own fixed message).
pub const CONDITION_EXPRESSION_HELP: &str = "Please make sure that:\n\
     * all conditions have the form [INT]\n\
     * all packages have the form [INTPn..m]\n\
     * no conditions are empty\n\
     * all compositions are combined by operators 'U'/'O'/'X' or without an operator\n\
     * all open brackets are closed again and vice versa";

/// The fixed explanation shown for every malformed AHB expression.
pub const AHB_EXPRESSION_HELP: &str = "Please make sure that the ahb_expression starts with a requirement \
indicator (i.e Muss/M, Soll/S, Kann/K, X, O, U) and the condition expressions consist of only the following \
characters: [ ] ( ) U \u{2227} O \u{2228} X \u{22bb} and digits.";

/// A syntax error raised by either grammar's parser.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    pub message: String,
}

impl SyntaxError {
    pub fn condition_expression(detail: impl fmt::Display) -> Self {
        Self { message: format!("{detail}\n\n{CONDITION_EXPRESSION_HELP}") }
    }

    pub fn ahb_expression(detail: impl fmt::Display) -> Self {
        Self { message: format!("{detail}\n\n{AHB_EXPRESSION_HELP}") }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SyntaxError {}
