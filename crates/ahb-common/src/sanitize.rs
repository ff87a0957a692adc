//! Normalizes common AHB-document quirks before an expression is lexed.

/// Replaces NBSP with a plain space and the letter `V`/`v` (a frequent OCR/
/// copy-paste stand-in for the logical-or glyph `∨`) with `∨`, then trims
/// surrounding whitespace.
pub fn sanitize_expression(expression: &str) -> String {
    let mut out = String::with_capacity(expression.len());
    for c in expression.chars() {
        match c {
            '\u{00A0}' => out.push(' '),
            'V' | 'v' => out.push('∨'),
            other => out.push(other),
        }
    }
    out.trim().to_string()
}
