use crate::error::Error;
use crate::kind::SyntaxKind;
use crate::token::SyntaxToken;
use crate::tree::{SyntaxNode, SyntaxTree};
use crate::visitor::{SyntaxNodeRef, SyntaxVisitor, VisitKind};
use core::fmt;

/// Writes an indented outline of a tree: one line per node, with the tokens
/// a node owns directly listed beneath it once all of its children are done.
///
/// ```text
/// SyntaxTree
///   GraphSyntax
///     NodeStatement
///       NodeIdentifier
///         WhiteSpaceTrivia
///         Identifier → a
///     GraphKeyword → graph
/// ```
pub struct TreeDumper<W> {
    out: W,
    // One entry per open node: the tokens seen since it was entered, outside
    // of any child node.
    lines: Vec<String>,
    error: Option<Error>,
}

impl<W: fmt::Write> TreeDumper<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            lines: Vec::new(),
            error: None,
        }
    }

    pub fn finish(self) -> Result<(), Error> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn write_line(&mut self, depth: usize, text: &str) {
        if self.error.is_some() {
            return;
        }
        let out = &mut self.out;
        let result = (0..depth)
            .try_for_each(|_| out.write_str("  "))
            .and_then(|_| writeln!(out, "{}", text));
        if let Err(e) = result {
            self.error = Some(e.into());
        }
    }
}

fn describe(token: &SyntaxToken) -> String {
    match token.source_text() {
        Some(text) if !text.is_empty() && token.kind() != SyntaxKind::WhiteSpaceTrivia => {
            format!("{:?} → {}", token.kind(), text)
        }
        _ => format!("{:?}", token.kind()),
    }
}

impl<'t, W: fmt::Write> SyntaxVisitor<'t> for TreeDumper<W> {
    fn visit_node(&mut self, node: SyntaxNodeRef<'t>, kind: VisitKind) -> bool {
        match kind {
            VisitKind::Enter => {
                self.write_line(self.lines.len(), node.kind_name());
                self.lines.push(String::new());
            }
            VisitKind::Leave => {
                let depth = self.lines.len();
                if let Some(tokens) = self.lines.pop() {
                    for line in tokens.lines() {
                        self.write_line(depth, line);
                    }
                }
            }
        }
        self.error.is_none()
    }

    fn visit_token(&mut self, token: &'t SyntaxToken) {
        if let Some(lines) = self.lines.last_mut() {
            lines.push_str(&describe(token));
            lines.push('\n');
        }
    }
}

/// Dumps `tree` to a string with a [`TreeDumper`].
pub fn dump_tree(tree: &SyntaxTree) -> Result<String, Error> {
    let mut out = String::new();
    let mut dumper = TreeDumper::new(&mut out);
    tree.accept(&mut dumper);
    dumper.finish()?;
    Ok(out)
}
