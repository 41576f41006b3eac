//! Recursive-descent parser for DOT.
//!
//! ```text
//! tree       := graph* EOF
//! graph      := "strict"? ("graph" | "digraph") ID? "{" stmt* "}"
//! stmt       := subgraph edge?
//!             | ("graph" | "node" | "edge") attr_list ";"?
//!             | ID "=" ID ";"?
//!             | node_stmt edge?
//!             | ";"
//! node_stmt  := ID port? attr_list? ";"?
//! port       := ":" ID (":" ID)?
//! edge       := ("->" | "--") (subgraph | node_stmt) edge? attr_list? ";"?
//! subgraph   := ("subgraph" ID?)? "{" stmt* "}" ";"?
//! attr_list  := "[" (ID "=" ID ("," | ";")?)* "]"
//! ```
//!
//! One token of lookahead, no backtracking. The first error ends the parse.

use crate::error::{Error, Expected};
use crate::kind::SyntaxKind;
use crate::lexer::Lexer;
use crate::token::SyntaxToken;
use crate::tree::{
    Attribute, AttributeList, AttributeStatement, EdgeStatement, EdgeVertex, EmptyStatement,
    GraphSyntax, NameValueStatement, NodeIdentifier, NodeStatement, Port, Statement,
    SubgraphStatement, SyntaxTree,
};
use log::debug;

const GRAPH_START: [SyntaxKind; 3] = [
    SyntaxKind::StrictKeyword,
    SyntaxKind::GraphKeyword,
    SyntaxKind::DigraphKeyword,
];

const STATEMENT_START: [SyntaxKind; 7] = [
    SyntaxKind::SubgraphKeyword,
    SyntaxKind::OpenBrace,
    SyntaxKind::GraphKeyword,
    SyntaxKind::NodeKeyword,
    SyntaxKind::EdgeKeyword,
    SyntaxKind::Semicolon,
    SyntaxKind::CloseBrace,
];

pub struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::from_lexer(Lexer::new(text))
    }

    pub fn from_lexer(lexer: Lexer<'a>) -> Self {
        Self { lexer }
    }

    /// Parses everything up to and including end of file.
    pub fn parse_tree(&mut self) -> Result<SyntaxTree, Error> {
        let mut graphs = Vec::new();
        loop {
            match self.lexer.peek_kind()? {
                SyntaxKind::EndOfFile => break,
                SyntaxKind::StrictKeyword
                | SyntaxKind::GraphKeyword
                | SyntaxKind::DigraphKeyword => graphs.push(self.parse_graph()?),
                _ => {
                    let mut expected = Expected::kinds(&GRAPH_START);
                    expected.kinds.push(SyntaxKind::EndOfFile);
                    return Err(self.unexpected(expected));
                }
            }
        }
        let end_of_file = self.lexer.read_token()?;
        debug!("parsed {} graph(s)", graphs.len());
        Ok(SyntaxTree {
            graphs,
            end_of_file,
            is_parsed: true,
        })
    }

    fn parse_graph(&mut self) -> Result<GraphSyntax, Error> {
        let strict_keyword = self.accept(SyntaxKind::StrictKeyword)?;
        let graph_keyword = self.expect(Expected::kinds(&GRAPH_START[1..]))?;
        let identifier = self.accept_identifier()?;
        debug!(
            "graph {:?} {:?}",
            graph_keyword.kind(),
            identifier.as_ref().and_then(|t| t.value())
        );
        let open_brace = if identifier.is_some() {
            self.expect(Expected::kinds(&[SyntaxKind::OpenBrace]))?
        } else {
            self.expect(Expected::identifier_or(&[SyntaxKind::OpenBrace]))?
        };
        let statements = self.parse_statements()?;
        let close_brace = self.expect(Expected::kinds(&[SyntaxKind::CloseBrace]))?;
        Ok(GraphSyntax {
            strict_keyword,
            graph_keyword,
            identifier,
            open_brace,
            statements,
            close_brace,
            is_parsed: true,
        })
    }

    // Statements up to, but not including, the closing brace.
    fn parse_statements(&mut self) -> Result<Vec<Statement>, Error> {
        let mut statements = Vec::new();
        while self.lexer.peek_kind()? != SyntaxKind::CloseBrace {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    fn parse_statement(&mut self) -> Result<Statement, Error> {
        let kind = self.lexer.peek_kind()?;
        let statement = match kind {
            SyntaxKind::Semicolon => Statement::Empty(EmptyStatement {
                semicolon: self.lexer.read_token()?,
                is_parsed: true,
            }),
            SyntaxKind::GraphKeyword | SyntaxKind::NodeKeyword | SyntaxKind::EdgeKeyword => {
                let keyword = self.lexer.read_token()?;
                let attributes = self.parse_attribute_list()?;
                let semicolon = self.accept(SyntaxKind::Semicolon)?;
                Statement::Attribute(AttributeStatement {
                    keyword,
                    attributes,
                    semicolon,
                    is_parsed: true,
                })
            }
            SyntaxKind::SubgraphKeyword | SyntaxKind::OpenBrace => {
                let subgraph = self.parse_subgraph()?;
                self.parse_edge_or(EdgeVertex::Subgraph(subgraph))?
            }
            kind if kind.is_identifier() => {
                let identifier = self.lexer.read_token()?;
                if self.lexer.peek_kind()? == SyntaxKind::Equals {
                    let equals = self.lexer.read_token()?;
                    let value = self.expect_identifier()?;
                    let semicolon = self.accept(SyntaxKind::Semicolon)?;
                    Statement::NameValue(NameValueStatement {
                        name: identifier,
                        equals,
                        value,
                        semicolon,
                        is_parsed: true,
                    })
                } else {
                    let node = self.parse_node_statement(identifier)?;
                    self.parse_edge_or(EdgeVertex::Node(node))?
                }
            }
            _ => return Err(self.unexpected(Expected::identifier_or(&STATEMENT_START))),
        };
        debug!("statement {}", statement.as_node_ref().kind_name());
        Ok(statement)
    }

    // Continues `vertex` into an edge if an edge operator follows; otherwise
    // the vertex is the whole statement.
    fn parse_edge_or(&mut self, vertex: EdgeVertex) -> Result<Statement, Error> {
        if self.lexer.peek_kind()?.is_edge() {
            return Ok(Statement::Edge(self.parse_edge(vertex, true)?));
        }
        Ok(match vertex {
            EdgeVertex::Node(node) => Statement::Node(node),
            EdgeVertex::Subgraph(subgraph) => Statement::Subgraph(subgraph),
            EdgeVertex::Edge(edge) => Statement::Edge(*edge),
        })
    }

    // The chain nests to the right. Only the outermost edge takes the
    // attribute list and semicolon that follow the chain.
    fn parse_edge(&mut self, left: EdgeVertex, outermost: bool) -> Result<EdgeStatement, Error> {
        let operator = self.lexer.read_token()?;
        let mut right = self.parse_vertex()?;
        if self.lexer.peek_kind()?.is_edge() {
            right = EdgeVertex::Edge(Box::new(self.parse_edge(right, false)?));
        }

        let (attributes, semicolon) = if outermost {
            let attributes = if self.lexer.peek_kind()? == SyntaxKind::OpenBracket {
                Some(self.parse_attribute_list()?)
            } else {
                None
            };
            (attributes, self.accept(SyntaxKind::Semicolon)?)
        } else {
            (None, None)
        };

        Ok(EdgeStatement {
            left,
            operator,
            right,
            attributes,
            semicolon,
            is_parsed: true,
        })
    }

    fn parse_vertex(&mut self) -> Result<EdgeVertex, Error> {
        match self.lexer.peek_kind()? {
            SyntaxKind::SubgraphKeyword | SyntaxKind::OpenBrace => {
                Ok(EdgeVertex::Subgraph(self.parse_subgraph()?))
            }
            kind if kind.is_identifier() => {
                let identifier = self.lexer.read_token()?;
                Ok(EdgeVertex::Node(self.parse_node_statement(identifier)?))
            }
            _ => Err(self.unexpected(Expected::identifier_or(&[
                SyntaxKind::SubgraphKeyword,
                SyntaxKind::OpenBrace,
            ]))),
        }
    }

    // `identifier` has already been consumed.
    fn parse_node_statement(&mut self, identifier: SyntaxToken) -> Result<NodeStatement, Error> {
        let port = if self.lexer.peek_kind()? == SyntaxKind::Colon {
            Some(self.parse_port()?)
        } else {
            None
        };
        let attributes = if self.lexer.peek_kind()? == SyntaxKind::OpenBracket {
            Some(self.parse_attribute_list()?)
        } else {
            None
        };
        let semicolon = self.accept(SyntaxKind::Semicolon)?;
        Ok(NodeStatement {
            identifier: NodeIdentifier {
                identifier,
                port,
                is_parsed: true,
            },
            attributes,
            semicolon,
            is_parsed: true,
        })
    }

    fn parse_port(&mut self) -> Result<Port, Error> {
        let colon = self.expect(Expected::kinds(&[SyntaxKind::Colon]))?;
        let identifier = self.expect_identifier()?;
        let compass = match self.accept(SyntaxKind::Colon)? {
            Some(colon) => Some((colon, self.expect_identifier()?)),
            None => None,
        };
        Ok(Port {
            colon,
            identifier,
            compass,
            is_parsed: true,
        })
    }

    fn parse_subgraph(&mut self) -> Result<SubgraphStatement, Error> {
        let subgraph_keyword = self.accept(SyntaxKind::SubgraphKeyword)?;
        let (identifier, open_brace) = if subgraph_keyword.is_some() {
            let identifier = self.accept_identifier()?;
            let open_brace = if identifier.is_some() {
                self.expect(Expected::kinds(&[SyntaxKind::OpenBrace]))?
            } else {
                self.expect(Expected::identifier_or(&[SyntaxKind::OpenBrace]))?
            };
            (identifier, open_brace)
        } else {
            (
                None,
                self.expect(Expected::kinds(&[
                    SyntaxKind::SubgraphKeyword,
                    SyntaxKind::OpenBrace,
                ]))?,
            )
        };
        let statements = self.parse_statements()?;
        let close_brace = self.expect(Expected::kinds(&[SyntaxKind::CloseBrace]))?;
        let semicolon = self.accept(SyntaxKind::Semicolon)?;
        Ok(SubgraphStatement {
            subgraph_keyword,
            identifier,
            open_brace,
            statements,
            close_brace,
            semicolon,
            is_parsed: true,
        })
    }

    fn parse_attribute_list(&mut self) -> Result<AttributeList, Error> {
        let open_bracket = self.expect(Expected::kinds(&[SyntaxKind::OpenBracket]))?;
        let mut attributes = Vec::new();
        while self.lexer.peek_kind()? != SyntaxKind::CloseBracket {
            let name = self.expect(Expected::identifier_or(&[SyntaxKind::CloseBracket]))?;
            let equals = self.expect(Expected::kinds(&[SyntaxKind::Equals]))?;
            let value = self.expect_identifier()?;
            let separator = match self.lexer.peek_kind()? {
                SyntaxKind::Comma | SyntaxKind::Semicolon => Some(self.lexer.read_token()?),
                _ => None,
            };
            attributes.push(Attribute {
                name,
                equals,
                value,
                separator,
                is_parsed: true,
            });
        }
        let close_bracket = self.lexer.read_token()?;
        Ok(AttributeList {
            open_bracket,
            attributes,
            close_bracket,
            is_parsed: true,
        })
    }

    /// Consumes the next token if it has the given kind.
    fn accept(&mut self, kind: SyntaxKind) -> Result<Option<SyntaxToken>, Error> {
        if self.lexer.peek_kind()? == kind {
            Ok(Some(self.lexer.read_token()?))
        } else {
            Ok(None)
        }
    }

    fn accept_identifier(&mut self) -> Result<Option<SyntaxToken>, Error> {
        if self.lexer.peek_kind()?.is_identifier() {
            Ok(Some(self.lexer.read_token()?))
        } else {
            Ok(None)
        }
    }

    fn expect(&mut self, expected: Expected) -> Result<SyntaxToken, Error> {
        if expected.accepts(self.lexer.peek_kind()?) {
            self.lexer.read_token()
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_identifier(&mut self) -> Result<SyntaxToken, Error> {
        self.expect(Expected::identifier_or(&[]))
    }

    fn unexpected(&mut self, expected: Expected) -> Error {
        match self.lexer.peek_token() {
            Ok(token) => Error::UnexpectedToken {
                expected,
                found: token.kind(),
                position: token
                    .location()
                    .map(|location| location.line_span.start)
                    .unwrap_or_default(),
            },
            Err(e) => e,
        }
    }
}
