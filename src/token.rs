use crate::kind::SyntaxKind;
use crate::text::SourceLocation;
use crate::visitor::SyntaxVisitor;

/// A classified piece of source text, plus the trivia that preceded it.
///
/// Tokens produced by the [`Lexer`](crate::lexer::Lexer) carry their exact source
/// text and location, so writing every token's trivia and text in order
/// reproduces the input. Tokens built by the construction API have neither and
/// can only be written by the formatting writer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxToken {
    kind: SyntaxKind,
    location: Option<SourceLocation>,
    source_text: Option<String>,
    value: Option<String>,
    leading_trivia: Vec<SyntaxToken>,
}

impl SyntaxToken {
    pub(crate) fn parsed(
        kind: SyntaxKind,
        location: SourceLocation,
        source_text: String,
        value: Option<String>,
        leading_trivia: Vec<SyntaxToken>,
    ) -> Self {
        Self {
            kind,
            location: Some(location),
            source_text: Some(source_text),
            value,
            leading_trivia,
        }
    }

    pub(crate) fn synthesized(kind: SyntaxKind) -> Self {
        Self::synthesized_with_value(kind, None)
    }

    pub(crate) fn synthesized_with_value(kind: SyntaxKind, value: Option<String>) -> Self {
        Self {
            kind,
            location: None,
            source_text: None,
            value,
            leading_trivia: Vec::new(),
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    /// The exact source text of the token, excluding trivia. `None` for tokens
    /// that were not produced by the lexer.
    pub fn source_text(&self) -> Option<&str> {
        self.source_text.as_deref()
    }

    /// The semantic value: unescaped for strings, unwrapped for XML literals,
    /// verbatim for numerals, identifiers and keywords.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn leading_trivia(&self) -> &[SyntaxToken] {
        &self.leading_trivia
    }

    pub fn is_parsed(&self) -> bool {
        self.source_text.is_some()
    }

    pub fn is_identifier(&self) -> bool {
        self.kind.is_identifier()
    }

    pub fn is_edge(&self) -> bool {
        self.kind.is_edge()
    }

    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    /// Visits the leading trivia, then the token itself.
    pub fn accept<'t, V: SyntaxVisitor<'t> + ?Sized>(&'t self, visitor: &mut V) {
        for trivia in self.leading_trivia.iter() {
            visitor.visit_token(trivia);
        }
        visitor.visit_token(self);
    }

    /// Splits off the leading trivia, leaving a token without any.
    pub(crate) fn detach_trivia(mut self) -> (Vec<SyntaxToken>, SyntaxToken) {
        let trivia = core::mem::take(&mut self.leading_trivia);
        (trivia, self)
    }
}
