//! A lossless front end for the Graphviz DOT language.
//!
//! [`parse`] turns DOT text into a [`SyntaxTree`] that keeps every character
//! of its input, comments and white space included, so that writing it back
//! with [`SyntaxNode::write_verbatim`] reproduces the input exactly. Trees can
//! also be built by hand through the builder methods in [`tree`] and written
//! with the [`FormattingWriter`], which chooses layout from the tree's shape.
//!
//! ```
//! use dot_syntax::{EdgeKind, EdgeStatement, GraphSyntax};
//!
//! let graph = GraphSyntax::digraph()
//!     .named("G")
//!     .statement(EdgeStatement::new("a", EdgeKind::Directed, "b"));
//! assert_eq!(graph.to_string(), "digraph G {\n    a -> b;\n}");
//!
//! let tree = dot_syntax::parse("digraph G{a->b}").unwrap();
//! assert_eq!(tree.to_string(), "digraph G{a->b}");
//! ```

pub mod dump;
pub mod error;
pub mod facts;
pub mod format;
pub mod kind;
pub mod lexer;
pub mod parser;
pub mod registry;
pub mod text;
pub mod token;
pub mod tree;
pub mod verbatim;
pub mod visitor;

#[cfg(test)]
mod testing;

pub use error::{Error, Expected};
pub use format::{FormatSettings, FormattingWriter};
pub use kind::{AttributeKeyword, EdgeKind, GraphKind, SyntaxKind};
pub use lexer::Lexer;
pub use parser::Parser;
pub use text::{LinePosition, LinePositionSpan, SourceLocation, SourceText, TextSpan};
pub use token::SyntaxToken;
pub use tree::{
    Attribute, AttributeList, AttributeStatement, EdgeStatement, EdgeVertex, EmptyStatement,
    GraphSyntax, NameValueStatement, NodeIdentifier, NodeStatement, Port, Statement,
    SubgraphStatement, SyntaxNode, SyntaxTree,
};
pub use verbatim::VerbatimWriter;
pub use visitor::{SyntaxNodeRef, SyntaxVisitor, VisitKind};

/// Parses a complete DOT document.
pub fn parse(text: &str) -> Result<SyntaxTree, Error> {
    Parser::new(text).parse_tree()
}

pub fn parse_source(source: &SourceText) -> Result<SyntaxTree, Error> {
    Parser::from_lexer(Lexer::from_source(source)).parse_tree()
}
