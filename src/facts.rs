//! Character classes and classification rules shared by the lexer and the
//! construction API.

use crate::kind::SyntaxKind;
use crate::token::SyntaxToken;

/// Produced in place of characters that could not be decoded; DOT treats it as a letter.
pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

pub fn is_identifier_char(c: char, first: bool) -> bool {
    if c == '_' || c == REPLACEMENT_CHARACTER {
        return true;
    }
    if first {
        c.is_alphabetic()
    } else {
        c.is_alphanumeric()
    }
}

/// Returns true if `c` already separates two tokens, so that no `' '` or `';'`
/// needs to be written after it.
pub fn is_terminal_delimiter(c: char) -> bool {
    match c {
        ':' | ';' | '[' | ']' | '}' => true,
        c => c.is_whitespace(),
    }
}

/// Decides how an arbitrary value must be written so that lexing the output
/// yields a single token with the same value: a bare identifier, a numeral, or
/// (for anything else) a quoted string. Some strings have no quoted spelling;
/// see [`can_quote`].
pub fn classify_identifier(value: &str) -> SyntaxKind {
    if value.is_empty() || value == "." {
        return SyntaxKind::StringLiteral;
    }

    // A bare keyword would lex as the keyword, not as an ID.
    if SyntaxKind::keyword_from_text(value).is_some() {
        return SyntaxKind::StringLiteral;
    }

    if is_numeral(value) {
        return SyntaxKind::NumeralLiteral;
    }

    let mut chars = value.chars();
    let first_ok = chars
        .next()
        .map_or(false, |c| is_identifier_char(c, true));
    if first_ok && chars.all(|c| is_identifier_char(c, false)) {
        SyntaxKind::Identifier
    } else {
        SyntaxKind::StringLiteral
    }
}

/// Returns true if `value` can be written as a quoted string that lexes back to
/// the same value. Only `"` is escaped, and a `\` always takes the character
/// after it, so a value in which a `\` would pair with a `"` or with the
/// closing quote has no spelling. Parsed strings always pass.
pub fn can_quote(value: &str) -> bool {
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('"') | None => return false,
                Some(_) => {}
            }
        }
    }
    true
}

/// Mirrors the lexer's numeral rule: an optional `-`, then ASCII digits with at
/// most one `.`, and at least one digit.
fn is_numeral(value: &str) -> bool {
    let digits = if value.starts_with('-') {
        &value[1..]
    } else {
        value
    };
    let mut seen_dot = false;
    let mut seen_digit = false;
    for c in digits.chars() {
        if c.is_ascii_digit() {
            seen_digit = true;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
        } else {
            return false;
        }
    }
    seen_digit
}

/// Builds an unparsed ID token for `value`, classified by [`classify_identifier`].
pub(crate) fn identifier_token(value: impl Into<String>) -> SyntaxToken {
    let value = value.into();
    SyntaxToken::synthesized_with_value(classify_identifier(&value), Some(value))
}
