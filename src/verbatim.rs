use crate::error::Error;
use crate::token::SyntaxToken;
use crate::visitor::{SyntaxNodeRef, SyntaxVisitor, VisitKind};
use core::fmt;
use log::debug;

/// Writes a parsed tree back out exactly as it was read, trivia included.
///
/// Stops at the first node that was not produced by the parser, or the first
/// write that fails; [`finish`](Self::finish) reports which.
pub struct VerbatimWriter<W> {
    out: W,
    error: Option<Error>,
}

impl<W: fmt::Write> VerbatimWriter<W> {
    pub fn new(out: W) -> Self {
        debug!("writing verbatim");
        Self { out, error: None }
    }

    pub fn finish(self) -> Result<(), Error> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<'t, W: fmt::Write> SyntaxVisitor<'t> for VerbatimWriter<W> {
    fn visit_node(&mut self, node: SyntaxNodeRef<'t>, _kind: VisitKind) -> bool {
        if self.error.is_some() {
            return false;
        }
        if !node.is_parsed() {
            self.error = Some(Error::NotParsed);
            return false;
        }
        true
    }

    fn visit_token(&mut self, token: &'t SyntaxToken) {
        if self.error.is_some() {
            return;
        }
        if let Some(text) = token.source_text() {
            if let Err(e) = self.out.write_str(text) {
                self.error = Some(e.into());
            }
        }
    }
}
