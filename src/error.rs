use crate::kind::SyntaxKind;
use crate::text::LinePosition;
use core::fmt;
use thiserror::Error;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The input contains text that does not begin any token or trivia.
    #[error("{position}: {message}")]
    Tokenize {
        message: String,
        position: LinePosition,
    },

    /// The parser required one of a set of tokens and found something else.
    #[error("{position}: expected {expected}, found {found}")]
    UnexpectedToken {
        expected: Expected,
        found: SyntaxKind,
        position: LinePosition,
    },

    /// The verbatim writer was asked to write a node that did not come from the parser.
    #[error("node was not produced by the parser; use the formatting writer instead")]
    NotParsed,

    /// A constructed string value that no quoted DOT string can spell, such as
    /// one ending in a single `\`.
    #[error("value {0:?} cannot be written as a quoted string")]
    UnquotableValue(String),

    #[error("invalid format settings: {0}")]
    InvalidSettings(String),

    #[error("failed to write output")]
    Fmt(#[from] fmt::Error),
}

impl Error {
    pub(crate) fn tokenize(message: impl Into<String>, position: LinePosition) -> Self {
        Error::Tokenize {
            message: message.into(),
            position,
        }
    }
}

/// The set of tokens the parser would have accepted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expected {
    /// Any ID form (identifier, numeral, quoted string, XML literal) was acceptable.
    pub identifier: bool,
    pub kinds: Vec<SyntaxKind>,
}

impl Expected {
    pub fn kinds(kinds: &[SyntaxKind]) -> Self {
        Self {
            identifier: false,
            kinds: kinds.to_vec(),
        }
    }

    pub fn identifier_or(kinds: &[SyntaxKind]) -> Self {
        Self {
            identifier: true,
            kinds: kinds.to_vec(),
        }
    }

    pub fn accepts(&self, kind: SyntaxKind) -> bool {
        (self.identifier && kind.is_identifier()) || self.kinds.contains(&kind)
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<String> = Vec::with_capacity(self.kinds.len() + 1);
        if self.identifier {
            names.push("identifier".to_string());
        }
        names.extend(self.kinds.iter().map(|kind| kind.to_string()));
        match names.len() {
            0 => fmt.write_str("nothing"),
            1 => fmt.write_str(&names[0]),
            n => write!(fmt, "{} or {}", names[..n - 1].join(", "), names[n - 1]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_display_test() {
        fn case(expected: Expected, text: &str) {
            assert_eq!(expected.to_string(), text);
        }

        case(Expected::kinds(&[]), "nothing");
        case(Expected::kinds(&[SyntaxKind::OpenBrace]), "`{`");
        case(Expected::identifier_or(&[]), "identifier");
        case(
            Expected::identifier_or(&[SyntaxKind::OpenBrace, SyntaxKind::Semicolon]),
            "identifier, `{` or `;`",
        );
    }

    #[test]
    fn message_test() {
        let error = Error::UnexpectedToken {
            expected: Expected::kinds(&[SyntaxKind::GraphKeyword, SyntaxKind::DigraphKeyword]),
            found: SyntaxKind::Identifier,
            position: LinePosition {
                line: 3,
                character: 7,
            },
        };
        assert_eq!(
            error.to_string(),
            "3:7: expected `graph` or `digraph`, found identifier"
        );
    }
}
