//! The syntax tree.
//!
//! Nodes own their children outright; there are no parent links. A tree comes
//! either from [`parse`](crate::parse), in which case every token carries its
//! source text and the tree writes itself back out verbatim, or from the
//! builder methods on each node type, in which case it is written through the
//! [`FormattingWriter`](crate::format::FormattingWriter).

use crate::error::Error;
use crate::facts::identifier_token;
use crate::format::{FormatSettings, FormattingWriter};
use crate::kind::{AttributeKeyword, EdgeKind, GraphKind, SyntaxKind};
use crate::token::SyntaxToken;
use crate::verbatim::VerbatimWriter;
use crate::visitor::{SyntaxNodeRef, SyntaxVisitor, VisitKind};
use core::fmt;

/// Behavior shared by every node type.
pub trait SyntaxNode {
    /// True if the node, and everything under it, came from the parser.
    fn is_parsed(&self) -> bool;

    /// Walks the node and its children, calling `visitor` on entry and exit of
    /// each node and for every token.
    fn accept<'t, V: SyntaxVisitor<'t> + ?Sized>(&'t self, visitor: &mut V);

    /// Writes the exact source text the node was parsed from. Fails with
    /// [`Error::NotParsed`] if any part of the node was built by hand.
    fn write_verbatim<W: fmt::Write + ?Sized>(&self, out: &mut W) -> Result<(), Error> {
        let mut writer = VerbatimWriter::new(out);
        self.accept(&mut writer);
        writer.finish()
    }

    fn write_formatted<W: fmt::Write + ?Sized>(
        &self,
        out: &mut W,
        settings: &FormatSettings,
    ) -> Result<(), Error> {
        let mut writer = FormattingWriter::new(out, settings)?;
        self.accept(&mut writer);
        writer.finish()
    }

    /// Writes parsed nodes verbatim and constructed nodes with the default
    /// [`FormatSettings`].
    fn write_to<W: fmt::Write + ?Sized>(&self, out: &mut W) -> Result<(), Error> {
        if self.is_parsed() {
            self.write_verbatim(out)
        } else {
            self.write_formatted(out, &FormatSettings::default())
        }
    }
}

macro_rules! impl_display {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
                    self.write_to(fmt).map_err(|_| fmt::Error)
                }
            }
        )*
    };
}

impl_display!(
    SyntaxTree,
    GraphSyntax,
    Statement,
    EmptyStatement,
    NameValueStatement,
    AttributeStatement,
    NodeStatement,
    EdgeStatement,
    EdgeVertex,
    SubgraphStatement,
    NodeIdentifier,
    Port,
    AttributeList,
    Attribute
);

fn accept_opt<'t, V: SyntaxVisitor<'t> + ?Sized>(token: &'t Option<SyntaxToken>, visitor: &mut V) {
    if let Some(token) = token {
        token.accept(visitor);
    }
}

fn value_of(token: &SyntaxToken) -> &str {
    token.value().unwrap_or("")
}

fn punct(kind: SyntaxKind) -> SyntaxToken {
    SyntaxToken::synthesized(kind)
}

/// The root: zero or more top-level graphs, then end of file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxTree {
    pub(crate) graphs: Vec<GraphSyntax>,
    pub(crate) end_of_file: SyntaxToken,
    pub(crate) is_parsed: bool,
}

impl SyntaxTree {
    pub fn new(graphs: impl IntoIterator<Item = GraphSyntax>) -> Self {
        Self {
            graphs: graphs.into_iter().collect(),
            end_of_file: punct(SyntaxKind::EndOfFile),
            is_parsed: false,
        }
    }

    pub fn from_graph(graph: GraphSyntax) -> Self {
        Self::new(Some(graph))
    }

    pub fn graphs(&self) -> &[GraphSyntax] {
        &self.graphs
    }

    /// Holds any trivia that follows the last graph.
    pub fn end_of_file(&self) -> &SyntaxToken {
        &self.end_of_file
    }
}

impl SyntaxNode for SyntaxTree {
    fn is_parsed(&self) -> bool {
        self.is_parsed
    }

    fn accept<'t, V: SyntaxVisitor<'t> + ?Sized>(&'t self, visitor: &mut V) {
        if visitor.visit_tree(self, VisitKind::Enter) {
            for graph in self.graphs.iter() {
                graph.accept(visitor);
            }
            self.end_of_file.accept(visitor);
            visitor.visit_tree(self, VisitKind::Leave);
        }
    }
}

/// A top-level `[strict] (graph | digraph) [ID] { ... }`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphSyntax {
    pub(crate) strict_keyword: Option<SyntaxToken>,
    pub(crate) graph_keyword: SyntaxToken,
    pub(crate) identifier: Option<SyntaxToken>,
    pub(crate) open_brace: SyntaxToken,
    pub(crate) statements: Vec<Statement>,
    pub(crate) close_brace: SyntaxToken,
    pub(crate) is_parsed: bool,
}

impl GraphSyntax {
    pub fn new(kind: GraphKind) -> Self {
        Self {
            strict_keyword: None,
            graph_keyword: punct(kind.keyword()),
            identifier: None,
            open_brace: punct(SyntaxKind::OpenBrace),
            statements: Vec::new(),
            close_brace: punct(SyntaxKind::CloseBrace),
            is_parsed: false,
        }
    }

    pub fn graph() -> Self {
        Self::new(GraphKind::Graph)
    }

    pub fn digraph() -> Self {
        Self::new(GraphKind::Digraph)
    }

    pub fn named(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier_token(identifier));
        self.is_parsed = false;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_keyword = if strict {
            Some(punct(SyntaxKind::StrictKeyword))
        } else {
            None
        };
        self.is_parsed = false;
        self
    }

    pub fn statement(mut self, statement: impl Into<Statement>) -> Self {
        self.statements.push(statement.into());
        self.is_parsed = false;
        self
    }

    pub fn statements<I>(mut self, statements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Statement>,
    {
        self.statements
            .extend(statements.into_iter().map(Into::into));
        self.is_parsed = false;
        self
    }

    pub fn kind(&self) -> GraphKind {
        match self.graph_keyword.kind() {
            SyntaxKind::DigraphKeyword => GraphKind::Digraph,
            _ => GraphKind::Graph,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strict_keyword.is_some()
    }

    pub fn name(&self) -> Option<&str> {
        self.identifier.as_ref().map(value_of)
    }

    pub fn strict_keyword(&self) -> Option<&SyntaxToken> {
        self.strict_keyword.as_ref()
    }

    pub fn graph_keyword(&self) -> &SyntaxToken {
        &self.graph_keyword
    }

    pub fn identifier(&self) -> Option<&SyntaxToken> {
        self.identifier.as_ref()
    }

    pub fn open_brace(&self) -> &SyntaxToken {
        &self.open_brace
    }

    pub fn body(&self) -> &[Statement] {
        &self.statements
    }

    pub fn close_brace(&self) -> &SyntaxToken {
        &self.close_brace
    }
}

impl SyntaxNode for GraphSyntax {
    fn is_parsed(&self) -> bool {
        self.is_parsed
    }

    fn accept<'t, V: SyntaxVisitor<'t> + ?Sized>(&'t self, visitor: &mut V) {
        if visitor.visit_graph(self, VisitKind::Enter) {
            accept_opt(&self.strict_keyword, visitor);
            self.graph_keyword.accept(visitor);
            accept_opt(&self.identifier, visitor);
            self.open_brace.accept(visitor);
            for statement in self.statements.iter() {
                statement.accept(visitor);
            }
            self.close_brace.accept(visitor);
            visitor.visit_graph(self, VisitKind::Leave);
        }
    }
}

/// One statement inside a graph or subgraph body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Statement {
    Empty(EmptyStatement),
    NameValue(NameValueStatement),
    Attribute(AttributeStatement),
    Node(NodeStatement),
    Edge(EdgeStatement),
    Subgraph(SubgraphStatement),
}

impl Statement {
    pub fn as_node_ref(&self) -> SyntaxNodeRef<'_> {
        match self {
            Statement::Empty(s) => SyntaxNodeRef::EmptyStatement(s),
            Statement::NameValue(s) => SyntaxNodeRef::NameValueStatement(s),
            Statement::Attribute(s) => SyntaxNodeRef::AttributeStatement(s),
            Statement::Node(s) => SyntaxNodeRef::NodeStatement(s),
            Statement::Edge(s) => SyntaxNodeRef::EdgeStatement(s),
            Statement::Subgraph(s) => SyntaxNodeRef::SubgraphStatement(s),
        }
    }

    /// The optional `;` that ended the statement. Always present for an empty statement.
    pub fn semicolon(&self) -> Option<&SyntaxToken> {
        match self {
            Statement::Empty(s) => Some(&s.semicolon),
            Statement::NameValue(s) => s.semicolon.as_ref(),
            Statement::Attribute(s) => s.semicolon.as_ref(),
            Statement::Node(s) => s.semicolon.as_ref(),
            Statement::Edge(s) => s.semicolon.as_ref(),
            Statement::Subgraph(s) => s.semicolon.as_ref(),
        }
    }
}

impl SyntaxNode for Statement {
    fn is_parsed(&self) -> bool {
        self.as_node_ref().is_parsed()
    }

    fn accept<'t, V: SyntaxVisitor<'t> + ?Sized>(&'t self, visitor: &mut V) {
        match self {
            Statement::Empty(s) => s.accept(visitor),
            Statement::NameValue(s) => s.accept(visitor),
            Statement::Attribute(s) => s.accept(visitor),
            Statement::Node(s) => s.accept(visitor),
            Statement::Edge(s) => s.accept(visitor),
            Statement::Subgraph(s) => s.accept(visitor),
        }
    }
}

impl From<EmptyStatement> for Statement {
    fn from(s: EmptyStatement) -> Self {
        Statement::Empty(s)
    }
}

impl From<NameValueStatement> for Statement {
    fn from(s: NameValueStatement) -> Self {
        Statement::NameValue(s)
    }
}

impl From<AttributeStatement> for Statement {
    fn from(s: AttributeStatement) -> Self {
        Statement::Attribute(s)
    }
}

impl From<NodeStatement> for Statement {
    fn from(s: NodeStatement) -> Self {
        Statement::Node(s)
    }
}

impl From<EdgeStatement> for Statement {
    fn from(s: EdgeStatement) -> Self {
        Statement::Edge(s)
    }
}

impl From<SubgraphStatement> for Statement {
    fn from(s: SubgraphStatement) -> Self {
        Statement::Subgraph(s)
    }
}

/// A bare `;`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmptyStatement {
    pub(crate) semicolon: SyntaxToken,
    pub(crate) is_parsed: bool,
}

impl EmptyStatement {
    pub fn new() -> Self {
        Self {
            semicolon: punct(SyntaxKind::Semicolon),
            is_parsed: false,
        }
    }

    pub fn semicolon(&self) -> &SyntaxToken {
        &self.semicolon
    }
}

impl Default for EmptyStatement {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxNode for EmptyStatement {
    fn is_parsed(&self) -> bool {
        self.is_parsed
    }

    fn accept<'t, V: SyntaxVisitor<'t> + ?Sized>(&'t self, visitor: &mut V) {
        if visitor.visit_empty_statement(self, VisitKind::Enter) {
            self.semicolon.accept(visitor);
            visitor.visit_empty_statement(self, VisitKind::Leave);
        }
    }
}

/// `ID = ID`, setting a graph attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameValueStatement {
    pub(crate) name: SyntaxToken,
    pub(crate) equals: SyntaxToken,
    pub(crate) value: SyntaxToken,
    pub(crate) semicolon: Option<SyntaxToken>,
    pub(crate) is_parsed: bool,
}

impl NameValueStatement {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: identifier_token(name),
            equals: punct(SyntaxKind::Equals),
            value: identifier_token(value),
            semicolon: None,
            is_parsed: false,
        }
    }

    pub fn name(&self) -> &str {
        value_of(&self.name)
    }

    pub fn value(&self) -> &str {
        value_of(&self.value)
    }

    pub fn name_token(&self) -> &SyntaxToken {
        &self.name
    }

    pub fn equals_token(&self) -> &SyntaxToken {
        &self.equals
    }

    pub fn value_token(&self) -> &SyntaxToken {
        &self.value
    }

    pub fn semicolon(&self) -> Option<&SyntaxToken> {
        self.semicolon.as_ref()
    }
}

impl SyntaxNode for NameValueStatement {
    fn is_parsed(&self) -> bool {
        self.is_parsed
    }

    fn accept<'t, V: SyntaxVisitor<'t> + ?Sized>(&'t self, visitor: &mut V) {
        if visitor.visit_name_value_statement(self, VisitKind::Enter) {
            self.name.accept(visitor);
            self.equals.accept(visitor);
            self.value.accept(visitor);
            accept_opt(&self.semicolon, visitor);
            visitor.visit_name_value_statement(self, VisitKind::Leave);
        }
    }
}

/// `graph [...]`, `node [...]` or `edge [...]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeStatement {
    pub(crate) keyword: SyntaxToken,
    pub(crate) attributes: AttributeList,
    pub(crate) semicolon: Option<SyntaxToken>,
    pub(crate) is_parsed: bool,
}

impl AttributeStatement {
    pub fn new<I, N, V>(keyword: AttributeKeyword, attributes: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        Self {
            keyword: punct(keyword.keyword()),
            attributes: AttributeList::new(attributes),
            semicolon: None,
            is_parsed: false,
        }
    }

    pub fn keyword(&self) -> AttributeKeyword {
        match self.keyword.kind() {
            SyntaxKind::NodeKeyword => AttributeKeyword::Node,
            SyntaxKind::EdgeKeyword => AttributeKeyword::Edge,
            _ => AttributeKeyword::Graph,
        }
    }

    pub fn keyword_token(&self) -> &SyntaxToken {
        &self.keyword
    }

    pub fn attributes(&self) -> &AttributeList {
        &self.attributes
    }

    pub fn semicolon(&self) -> Option<&SyntaxToken> {
        self.semicolon.as_ref()
    }
}

impl SyntaxNode for AttributeStatement {
    fn is_parsed(&self) -> bool {
        self.is_parsed
    }

    fn accept<'t, V: SyntaxVisitor<'t> + ?Sized>(&'t self, visitor: &mut V) {
        if visitor.visit_attribute_statement(self, VisitKind::Enter) {
            self.keyword.accept(visitor);
            self.attributes.accept(visitor);
            accept_opt(&self.semicolon, visitor);
            visitor.visit_attribute_statement(self, VisitKind::Leave);
        }
    }
}

/// A node reference with optional attributes: `a:port:sw [color=red]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeStatement {
    pub(crate) identifier: NodeIdentifier,
    pub(crate) attributes: Option<AttributeList>,
    pub(crate) semicolon: Option<SyntaxToken>,
    pub(crate) is_parsed: bool,
}

impl NodeStatement {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self::from_identifier(NodeIdentifier::new(identifier, None, None))
    }

    pub fn from_identifier(identifier: NodeIdentifier) -> Self {
        Self {
            identifier,
            attributes: None,
            semicolon: None,
            is_parsed: false,
        }
    }

    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.identifier.port = Some(Port::new(port));
        self.identifier.is_parsed = false;
        self.is_parsed = false;
        self
    }

    pub fn with_port_and_compass(
        mut self,
        port: impl Into<String>,
        compass: impl Into<String>,
    ) -> Self {
        self.identifier.port = Some(Port::with_compass(port, compass));
        self.identifier.is_parsed = false;
        self.is_parsed = false;
        self
    }

    pub fn attribute(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes(Some((name, value)))
    }

    pub fn attributes<I, N, V>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        self.attributes = Some(
            self.attributes
                .take()
                .unwrap_or_default()
                .extended(attributes),
        );
        self.is_parsed = false;
        self
    }

    pub fn name(&self) -> &str {
        self.identifier.name()
    }

    pub fn identifier(&self) -> &NodeIdentifier {
        &self.identifier
    }

    pub fn attribute_list(&self) -> Option<&AttributeList> {
        self.attributes.as_ref()
    }

    pub fn semicolon(&self) -> Option<&SyntaxToken> {
        self.semicolon.as_ref()
    }
}

impl SyntaxNode for NodeStatement {
    fn is_parsed(&self) -> bool {
        self.is_parsed
    }

    fn accept<'t, V: SyntaxVisitor<'t> + ?Sized>(&'t self, visitor: &mut V) {
        if visitor.visit_node_statement(self, VisitKind::Enter) {
            self.identifier.accept(visitor);
            if let Some(attributes) = &self.attributes {
                attributes.accept(visitor);
            }
            accept_opt(&self.semicolon, visitor);
            visitor.visit_node_statement(self, VisitKind::Leave);
        }
    }
}

/// `ID [port]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeIdentifier {
    pub(crate) identifier: SyntaxToken,
    pub(crate) port: Option<Port>,
    pub(crate) is_parsed: bool,
}

impl NodeIdentifier {
    /// A compass point given without a port becomes the port's only ID,
    /// which is how `a:sw` is written.
    pub fn new(identifier: impl Into<String>, port: Option<&str>, compass: Option<&str>) -> Self {
        let port = match (port, compass) {
            (Some(port), Some(compass)) => Some(Port::with_compass(port, compass)),
            (Some(port), None) | (None, Some(port)) => Some(Port::new(port)),
            (None, None) => None,
        };
        Self {
            identifier: identifier_token(identifier),
            port,
            is_parsed: false,
        }
    }

    pub fn name(&self) -> &str {
        value_of(&self.identifier)
    }

    pub fn identifier(&self) -> &SyntaxToken {
        &self.identifier
    }

    pub fn port(&self) -> Option<&Port> {
        self.port.as_ref()
    }
}

impl SyntaxNode for NodeIdentifier {
    fn is_parsed(&self) -> bool {
        self.is_parsed
    }

    fn accept<'t, V: SyntaxVisitor<'t> + ?Sized>(&'t self, visitor: &mut V) {
        if visitor.visit_node_identifier(self, VisitKind::Enter) {
            self.identifier.accept(visitor);
            if let Some(port) = &self.port {
                port.accept(visitor);
            }
            visitor.visit_node_identifier(self, VisitKind::Leave);
        }
    }
}

/// `: ID [: ID]`. The first ID may itself be a compass point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Port {
    pub(crate) colon: SyntaxToken,
    pub(crate) identifier: SyntaxToken,
    pub(crate) compass: Option<(SyntaxToken, SyntaxToken)>,
    pub(crate) is_parsed: bool,
}

impl Port {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            colon: punct(SyntaxKind::Colon),
            identifier: identifier_token(identifier),
            compass: None,
            is_parsed: false,
        }
    }

    pub fn with_compass(identifier: impl Into<String>, compass: impl Into<String>) -> Self {
        Self {
            compass: Some((punct(SyntaxKind::Colon), identifier_token(compass))),
            ..Self::new(identifier)
        }
    }

    pub fn name(&self) -> &str {
        value_of(&self.identifier)
    }

    pub fn compass(&self) -> Option<&str> {
        self.compass.as_ref().map(|(_, compass)| value_of(compass))
    }

    pub fn colon(&self) -> &SyntaxToken {
        &self.colon
    }

    pub fn identifier(&self) -> &SyntaxToken {
        &self.identifier
    }

    pub fn compass_colon(&self) -> Option<&SyntaxToken> {
        self.compass.as_ref().map(|(colon, _)| colon)
    }

    pub fn compass_point(&self) -> Option<&SyntaxToken> {
        self.compass.as_ref().map(|(_, compass)| compass)
    }
}

impl SyntaxNode for Port {
    fn is_parsed(&self) -> bool {
        self.is_parsed
    }

    fn accept<'t, V: SyntaxVisitor<'t> + ?Sized>(&'t self, visitor: &mut V) {
        if visitor.visit_port(self, VisitKind::Enter) {
            self.colon.accept(visitor);
            self.identifier.accept(visitor);
            if let Some((colon, compass)) = &self.compass {
                colon.accept(visitor);
                compass.accept(visitor);
            }
            visitor.visit_port(self, VisitKind::Leave);
        }
    }
}

/// `[ a = b, c = d ]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeList {
    pub(crate) open_bracket: SyntaxToken,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) close_bracket: SyntaxToken,
    pub(crate) is_parsed: bool,
}

impl AttributeList {
    pub fn new<I, N, V>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        Self::default().extended(attributes)
    }

    fn extended<I, N, V>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        self.attributes.extend(
            attributes
                .into_iter()
                .map(|(name, value)| Attribute::new(name, value)),
        );
        self.is_parsed = false;
        self
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Attribute> {
        self.attributes.iter()
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// The value of the last attribute named `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .rev()
            .find(|a| a.name() == name)
            .map(|a| a.value())
    }

    pub fn open_bracket(&self) -> &SyntaxToken {
        &self.open_bracket
    }

    pub fn close_bracket(&self) -> &SyntaxToken {
        &self.close_bracket
    }
}

impl Default for AttributeList {
    fn default() -> Self {
        Self {
            open_bracket: punct(SyntaxKind::OpenBracket),
            attributes: Vec::new(),
            close_bracket: punct(SyntaxKind::CloseBracket),
            is_parsed: false,
        }
    }
}

impl core::iter::FromIterator<Attribute> for AttributeList {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        Self {
            attributes: iter.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl<'a> IntoIterator for &'a AttributeList {
    type Item = &'a Attribute;
    type IntoIter = core::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

impl SyntaxNode for AttributeList {
    fn is_parsed(&self) -> bool {
        self.is_parsed
    }

    fn accept<'t, V: SyntaxVisitor<'t> + ?Sized>(&'t self, visitor: &mut V) {
        if visitor.visit_attribute_list(self, VisitKind::Enter) {
            self.open_bracket.accept(visitor);
            for attribute in self.attributes.iter() {
                attribute.accept(visitor);
            }
            self.close_bracket.accept(visitor);
            visitor.visit_attribute_list(self, VisitKind::Leave);
        }
    }
}

/// `ID = ID`, inside an attribute list, with its optional `,` or `;` separator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub(crate) name: SyntaxToken,
    pub(crate) equals: SyntaxToken,
    pub(crate) value: SyntaxToken,
    pub(crate) separator: Option<SyntaxToken>,
    pub(crate) is_parsed: bool,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: identifier_token(name),
            equals: punct(SyntaxKind::Equals),
            value: identifier_token(value),
            separator: None,
            is_parsed: false,
        }
    }

    pub fn name(&self) -> &str {
        value_of(&self.name)
    }

    pub fn value(&self) -> &str {
        value_of(&self.value)
    }

    pub fn name_token(&self) -> &SyntaxToken {
        &self.name
    }

    pub fn equals_token(&self) -> &SyntaxToken {
        &self.equals
    }

    pub fn value_token(&self) -> &SyntaxToken {
        &self.value
    }

    pub fn separator(&self) -> Option<&SyntaxToken> {
        self.separator.as_ref()
    }
}

impl SyntaxNode for Attribute {
    fn is_parsed(&self) -> bool {
        self.is_parsed
    }

    fn accept<'t, V: SyntaxVisitor<'t> + ?Sized>(&'t self, visitor: &mut V) {
        if visitor.visit_attribute(self, VisitKind::Enter) {
            self.name.accept(visitor);
            self.equals.accept(visitor);
            self.value.accept(visitor);
            accept_opt(&self.separator, visitor);
            visitor.visit_attribute(self, VisitKind::Leave);
        }
    }
}

/// `[subgraph [ID]] { ... }`. A bare brace group has no keyword.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubgraphStatement {
    pub(crate) subgraph_keyword: Option<SyntaxToken>,
    pub(crate) identifier: Option<SyntaxToken>,
    pub(crate) open_brace: SyntaxToken,
    pub(crate) statements: Vec<Statement>,
    pub(crate) close_brace: SyntaxToken,
    pub(crate) semicolon: Option<SyntaxToken>,
    pub(crate) is_parsed: bool,
}

impl SubgraphStatement {
    pub fn new() -> Self {
        Self {
            subgraph_keyword: Some(punct(SyntaxKind::SubgraphKeyword)),
            identifier: None,
            open_brace: punct(SyntaxKind::OpenBrace),
            statements: Vec::new(),
            close_brace: punct(SyntaxKind::CloseBrace),
            semicolon: None,
            is_parsed: false,
        }
    }

    pub fn named(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier_token(identifier));
        self.is_parsed = false;
        self
    }

    pub fn statement(mut self, statement: impl Into<Statement>) -> Self {
        self.statements.push(statement.into());
        self.is_parsed = false;
        self
    }

    pub fn statements<I>(mut self, statements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Statement>,
    {
        self.statements
            .extend(statements.into_iter().map(Into::into));
        self.is_parsed = false;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.identifier.as_ref().map(value_of)
    }

    pub fn subgraph_keyword(&self) -> Option<&SyntaxToken> {
        self.subgraph_keyword.as_ref()
    }

    pub fn identifier(&self) -> Option<&SyntaxToken> {
        self.identifier.as_ref()
    }

    pub fn open_brace(&self) -> &SyntaxToken {
        &self.open_brace
    }

    pub fn body(&self) -> &[Statement] {
        &self.statements
    }

    pub fn close_brace(&self) -> &SyntaxToken {
        &self.close_brace
    }

    pub fn semicolon(&self) -> Option<&SyntaxToken> {
        self.semicolon.as_ref()
    }
}

impl Default for SubgraphStatement {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxNode for SubgraphStatement {
    fn is_parsed(&self) -> bool {
        self.is_parsed
    }

    fn accept<'t, V: SyntaxVisitor<'t> + ?Sized>(&'t self, visitor: &mut V) {
        if visitor.visit_subgraph_statement(self, VisitKind::Enter) {
            accept_opt(&self.subgraph_keyword, visitor);
            accept_opt(&self.identifier, visitor);
            self.open_brace.accept(visitor);
            for statement in self.statements.iter() {
                statement.accept(visitor);
            }
            self.close_brace.accept(visitor);
            accept_opt(&self.semicolon, visitor);
            visitor.visit_subgraph_statement(self, VisitKind::Leave);
        }
    }
}

/// `left -> right` or `left -- right`.
///
/// Chains nest to the right: `a -> b -> c` is an edge from `a` whose right
/// side is the edge `b -> c`. Attributes written after a chain belong to the
/// outermost edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeStatement {
    pub(crate) left: EdgeVertex,
    pub(crate) operator: SyntaxToken,
    pub(crate) right: EdgeVertex,
    pub(crate) attributes: Option<AttributeList>,
    pub(crate) semicolon: Option<SyntaxToken>,
    pub(crate) is_parsed: bool,
}

impl EdgeStatement {
    pub fn new(left: impl Into<EdgeVertex>, kind: EdgeKind, right: impl Into<EdgeVertex>) -> Self {
        Self {
            left: left.into(),
            operator: punct(kind.operator()),
            right: right.into(),
            attributes: None,
            semicolon: None,
            is_parsed: false,
        }
    }

    pub fn attribute(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes(Some((name, value)))
    }

    pub fn attributes<I, N, V>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        self.attributes = Some(
            self.attributes
                .take()
                .unwrap_or_default()
                .extended(attributes),
        );
        self.is_parsed = false;
        self
    }

    pub fn kind(&self) -> EdgeKind {
        match self.operator.kind() {
            SyntaxKind::UndirectedEdge => EdgeKind::Undirected,
            _ => EdgeKind::Directed,
        }
    }

    pub fn left(&self) -> &EdgeVertex {
        &self.left
    }

    pub fn operator(&self) -> &SyntaxToken {
        &self.operator
    }

    pub fn right(&self) -> &EdgeVertex {
        &self.right
    }

    /// Follows right-hand sides down the chain to the last vertex, which is
    /// never an edge.
    pub fn last_vertex(&self) -> &EdgeVertex {
        let mut edge = self;
        loop {
            match &edge.right {
                EdgeVertex::Edge(next) => edge = &**next,
                vertex => return vertex,
            }
        }
    }

    pub fn attribute_list(&self) -> Option<&AttributeList> {
        self.attributes.as_ref()
    }

    pub fn semicolon(&self) -> Option<&SyntaxToken> {
        self.semicolon.as_ref()
    }
}

impl SyntaxNode for EdgeStatement {
    fn is_parsed(&self) -> bool {
        self.is_parsed
    }

    fn accept<'t, V: SyntaxVisitor<'t> + ?Sized>(&'t self, visitor: &mut V) {
        if visitor.visit_edge_statement(self, VisitKind::Enter) {
            self.left.accept(visitor);
            self.operator.accept(visitor);
            self.right.accept(visitor);
            if let Some(attributes) = &self.attributes {
                attributes.accept(visitor);
            }
            accept_opt(&self.semicolon, visitor);
            visitor.visit_edge_statement(self, VisitKind::Leave);
        }
    }
}

/// Anything that can stand on either side of an edge operator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EdgeVertex {
    Node(NodeStatement),
    Subgraph(SubgraphStatement),
    Edge(Box<EdgeStatement>),
}

impl EdgeVertex {
    pub fn as_node_ref(&self) -> SyntaxNodeRef<'_> {
        match self {
            EdgeVertex::Node(v) => SyntaxNodeRef::NodeStatement(v),
            EdgeVertex::Subgraph(v) => SyntaxNodeRef::SubgraphStatement(v),
            EdgeVertex::Edge(v) => SyntaxNodeRef::EdgeStatement(v),
        }
    }
}

impl SyntaxNode for EdgeVertex {
    fn is_parsed(&self) -> bool {
        self.as_node_ref().is_parsed()
    }

    fn accept<'t, V: SyntaxVisitor<'t> + ?Sized>(&'t self, visitor: &mut V) {
        match self {
            EdgeVertex::Node(v) => v.accept(visitor),
            EdgeVertex::Subgraph(v) => v.accept(visitor),
            EdgeVertex::Edge(v) => v.accept(visitor),
        }
    }
}

impl From<&str> for EdgeVertex {
    fn from(identifier: &str) -> Self {
        EdgeVertex::Node(NodeStatement::new(identifier))
    }
}

impl From<String> for EdgeVertex {
    fn from(identifier: String) -> Self {
        EdgeVertex::Node(NodeStatement::new(identifier))
    }
}

impl From<NodeStatement> for EdgeVertex {
    fn from(v: NodeStatement) -> Self {
        EdgeVertex::Node(v)
    }
}

impl From<SubgraphStatement> for EdgeVertex {
    fn from(v: SubgraphStatement) -> Self {
        EdgeVertex::Subgraph(v)
    }
}

impl From<EdgeStatement> for EdgeVertex {
    fn from(v: EdgeStatement) -> Self {
        EdgeVertex::Edge(Box::new(v))
    }
}
