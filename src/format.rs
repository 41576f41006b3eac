//! Writing trees with a consistent layout.
//!
//! The [`FormattingWriter`] ignores source text and trivia entirely; it writes
//! each token from its kind and value and decides spacing, semicolons, line
//! breaks and indentation from the shape of the tree. It is the only way to
//! write a tree built through the construction API.

use crate::error::Error;
use crate::facts::{can_quote, is_terminal_delimiter};
use crate::kind::SyntaxKind;
use crate::token::SyntaxToken;
use crate::tree::{
    Attribute, AttributeList, AttributeStatement, EdgeStatement, EdgeVertex, GraphSyntax,
    NameValueStatement, NodeIdentifier, NodeStatement, Port, SubgraphStatement, SyntaxTree,
};
use crate::visitor::{SyntaxNodeRef, SyntaxVisitor, VisitKind};
use core::fmt;
use core::ptr;
use log::debug;

/// Layout options for the [`FormattingWriter`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatSettings {
    /// Written at the end of each line. Must not be empty.
    pub new_line: String,
    /// Written once per level of brace nesting at the start of each line.
    pub indent: String,
    /// End the output of a whole tree with `new_line`.
    pub insert_final_new_line: bool,
    /// End node, attribute and name/value statements (and edges ending in a
    /// node) with `;`.
    pub insert_semicolon_after_node_statements: bool,
    /// End subgraph statements (and edges ending in a subgraph) with `;`.
    pub insert_semicolon_after_subgraph_statements: bool,
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            new_line: "\n".to_string(),
            indent: "    ".to_string(),
            insert_final_new_line: true,
            insert_semicolon_after_node_statements: true,
            insert_semicolon_after_subgraph_statements: false,
        }
    }
}

impl FormatSettings {
    pub fn validate(&self) -> Result<(), Error> {
        if self.new_line.is_empty() {
            return Err(Error::InvalidSettings(
                "new_line must contain at least one character".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_new_line(mut self, new_line: impl Into<String>) -> Self {
        self.new_line = new_line.into();
        self
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn with_final_new_line(mut self, value: bool) -> Self {
        self.insert_final_new_line = value;
        self
    }

    pub fn with_node_semicolons(mut self, value: bool) -> Self {
        self.insert_semicolon_after_node_statements = value;
        self
    }

    pub fn with_subgraph_semicolons(mut self, value: bool) -> Self {
        self.insert_semicolon_after_subgraph_statements = value;
        self
    }
}

// Where a statement sits relative to an enclosing edge.
#[derive(Clone, Copy)]
enum Role<'t> {
    Statement,
    LeftOf(&'t EdgeStatement),
    RightOf,
}

fn same_vertex(vertex: &EdgeVertex, node: SyntaxNodeRef<'_>) -> bool {
    match (vertex, node) {
        (EdgeVertex::Node(a), SyntaxNodeRef::NodeStatement(b)) => ptr::eq(a, b),
        (EdgeVertex::Subgraph(a), SyntaxNodeRef::SubgraphStatement(b)) => ptr::eq(a, b),
        (EdgeVertex::Edge(a), SyntaxNodeRef::EdgeStatement(b)) => ptr::eq(&**a, b),
        _ => false,
    }
}

/// A visitor that writes any tree, parsed or constructed, using [`FormatSettings`].
pub struct FormattingWriter<'t, 's, W> {
    out: W,
    settings: &'s FormatSettings,
    last_new_line_char: char,
    depth: usize,
    last_char: Option<char>,
    // Nodes entered and not yet left. On Enter the current node is on top; on
    // Leave it has already been popped, so the top is its parent.
    stack: Vec<SyntaxNodeRef<'t>>,
    graphs_written: usize,
    error: Option<Error>,
}

impl<'t, 's, W: fmt::Write> FormattingWriter<'t, 's, W> {
    pub fn new(out: W, settings: &'s FormatSettings) -> Result<Self, Error> {
        settings.validate()?;
        debug!("writing formatted: {:?}", settings);
        Ok(Self {
            out,
            settings,
            last_new_line_char: settings.new_line.chars().last().unwrap_or('\n'),
            depth: 0,
            last_char: None,
            stack: Vec::new(),
            graphs_written: 0,
            error: None,
        })
    }

    pub fn finish(self) -> Result<(), Error> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn write_char(&mut self, c: char) {
        if self.error.is_some() {
            return;
        }
        // Indentation is written lazily, so blank lines stay empty.
        let at_line_start = self.last_char == Some(self.last_new_line_char);
        if at_line_start && !self.settings.new_line.starts_with(c) {
            for _ in 0..self.depth {
                if let Err(e) = self.out.write_str(&self.settings.indent) {
                    self.error = Some(e.into());
                    return;
                }
            }
        }
        self.write_raw(c);
    }

    // Bypasses indentation. New lines inside a literal belong to its value.
    fn write_raw(&mut self, c: char) {
        if self.error.is_some() {
            return;
        }
        self.last_char = Some(c);
        if let Err(e) = self.out.write_char(c) {
            self.error = Some(e.into());
        }
    }

    fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            self.write_char(c);
        }
    }

    fn write_line(&mut self) {
        let settings = self.settings;
        self.write_str(&settings.new_line);
    }

    fn write_delimiter_if_needed(&mut self, delimiter: char) {
        match self.last_char {
            // `];` is the one place a terminal delimiter still gets a semicolon.
            Some(']') if delimiter == ';' => self.write_char(delimiter),
            Some(last) if last != delimiter && !is_terminal_delimiter(last) => {
                self.write_char(delimiter)
            }
            _ => {}
        }
    }

    fn write_kind(&mut self, kind: SyntaxKind) {
        if let Some(text) = kind.text() {
            match kind {
                SyntaxKind::OpenBracket | SyntaxKind::CloseBracket | SyntaxKind::Colon => {}
                _ => self.write_delimiter_if_needed(' '),
            }
            self.write_str(text);
        }
    }

    fn write_token(&mut self, token: &SyntaxToken) {
        if !token.is_identifier() {
            self.write_kind(token.kind());
            return;
        }
        let value = match token.value() {
            Some(value) => value,
            None => return,
        };
        self.write_delimiter_if_needed(' ');
        match token.kind() {
            SyntaxKind::StringLiteral => {
                if !can_quote(value) {
                    if self.error.is_none() {
                        self.error = Some(Error::UnquotableValue(value.to_string()));
                    }
                    return;
                }
                self.write_char('"');
                for c in value.chars() {
                    if c == '"' {
                        self.write_raw('\\');
                    }
                    self.write_raw(c);
                }
                self.write_raw('"');
            }
            SyntaxKind::XmlLiteral => {
                self.write_char('<');
                value.chars().for_each(|c| self.write_raw(c));
                self.write_raw('>');
            }
            _ => self.write_str(value),
        }
    }

    fn write_opt(&mut self, token: Option<&SyntaxToken>) {
        if let Some(token) = token {
            self.write_token(token);
        }
    }

    fn write_open_brace(&mut self) {
        self.write_kind(SyntaxKind::OpenBrace);
        self.depth += 1;
        self.write_line();
    }

    fn write_close_brace(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.write_kind(SyntaxKind::CloseBrace);
    }

    fn end_node_statement(&mut self) {
        if self.settings.insert_semicolon_after_node_statements {
            self.write_delimiter_if_needed(';');
        }
        self.write_line();
    }

    fn end_subgraph_statement(&mut self) {
        if self.settings.insert_semicolon_after_subgraph_statements {
            self.write_char(';');
        }
        self.write_line();
    }

    fn parent(&self, kind: VisitKind) -> Option<SyntaxNodeRef<'t>> {
        match kind {
            VisitKind::Enter => self.stack.iter().rev().nth(1).copied(),
            VisitKind::Leave => self.stack.last().copied(),
        }
    }

    // Only meaningful on Leave.
    fn role(&self, node: SyntaxNodeRef<'t>) -> Role<'t> {
        match self.parent(VisitKind::Leave) {
            Some(SyntaxNodeRef::EdgeStatement(edge)) if same_vertex(edge.left(), node) => {
                Role::LeftOf(edge)
            }
            Some(SyntaxNodeRef::EdgeStatement(_)) => Role::RightOf,
            _ => Role::Statement,
        }
    }

    // A vertex on the left continues the chain with its edge's operator.
    // Returns false if the node is a statement of its own.
    fn leave_vertex(&mut self, node: SyntaxNodeRef<'t>) -> bool {
        match self.role(node) {
            Role::LeftOf(edge) => {
                self.write_char(' ');
                self.write_token(edge.operator());
                true
            }
            Role::RightOf => true,
            Role::Statement => false,
        }
    }
}

impl<'t, 's, W: fmt::Write> SyntaxVisitor<'t> for FormattingWriter<'t, 's, W> {
    fn visit_node(&mut self, node: SyntaxNodeRef<'t>, kind: VisitKind) -> bool {
        match kind {
            VisitKind::Enter => self.stack.push(node),
            VisitKind::Leave => {
                self.stack.pop();
            }
        }
        self.error.is_none()
    }

    fn visit_tree(&mut self, tree: &'t SyntaxTree, kind: VisitKind) -> bool {
        self.visit_node(SyntaxNodeRef::Tree(tree), kind);
        if kind == VisitKind::Leave && self.settings.insert_final_new_line {
            self.write_line();
        }
        self.error.is_none()
    }

    fn visit_graph(&mut self, graph: &'t GraphSyntax, kind: VisitKind) -> bool {
        self.visit_node(SyntaxNodeRef::Graph(graph), kind);
        match kind {
            VisitKind::Enter => {
                if self.graphs_written > 0 {
                    self.write_line();
                }
                self.graphs_written += 1;
                self.write_opt(graph.strict_keyword());
                self.write_token(graph.graph_keyword());
                self.write_opt(graph.identifier());
                self.write_open_brace();
            }
            VisitKind::Leave => self.write_close_brace(),
        }
        self.error.is_none()
    }

    fn visit_subgraph_statement(
        &mut self,
        statement: &'t SubgraphStatement,
        kind: VisitKind,
    ) -> bool {
        let node = SyntaxNodeRef::SubgraphStatement(statement);
        self.visit_node(node, kind);
        match kind {
            VisitKind::Enter => {
                self.write_opt(statement.subgraph_keyword());
                self.write_opt(statement.identifier());
                self.write_open_brace();
            }
            VisitKind::Leave => {
                self.write_close_brace();
                if !self.leave_vertex(node) {
                    self.end_subgraph_statement();
                }
            }
        }
        self.error.is_none()
    }

    fn visit_node_statement(&mut self, statement: &'t NodeStatement, kind: VisitKind) -> bool {
        let node = SyntaxNodeRef::NodeStatement(statement);
        self.visit_node(node, kind);
        if kind == VisitKind::Leave && !self.leave_vertex(node) {
            self.end_node_statement();
        }
        self.error.is_none()
    }

    fn visit_edge_statement(&mut self, statement: &'t EdgeStatement, kind: VisitKind) -> bool {
        let node = SyntaxNodeRef::EdgeStatement(statement);
        self.visit_node(node, kind);
        if kind == VisitKind::Leave && !self.leave_vertex(node) {
            match statement.last_vertex() {
                EdgeVertex::Subgraph(_) => self.end_subgraph_statement(),
                _ => self.end_node_statement(),
            }
        }
        self.error.is_none()
    }

    fn visit_node_identifier(&mut self, identifier: &'t NodeIdentifier, kind: VisitKind) -> bool {
        self.visit_node(SyntaxNodeRef::NodeIdentifier(identifier), kind);
        if kind == VisitKind::Enter {
            self.write_token(identifier.identifier());
        }
        self.error.is_none()
    }

    fn visit_port(&mut self, port: &'t Port, kind: VisitKind) -> bool {
        self.visit_node(SyntaxNodeRef::Port(port), kind);
        if kind == VisitKind::Enter {
            self.write_token(port.colon());
            self.write_token(port.identifier());
            self.write_opt(port.compass_colon());
            self.write_opt(port.compass_point());
        }
        self.error.is_none()
    }

    fn visit_attribute_list(&mut self, list: &'t AttributeList, kind: VisitKind) -> bool {
        self.visit_node(SyntaxNodeRef::AttributeList(list), kind);
        // An attribute statement needs its brackets even when empty.
        let required = match self.parent(kind) {
            Some(SyntaxNodeRef::AttributeStatement(_)) => true,
            _ => false,
        };
        if !list.is_empty() || required {
            match kind {
                VisitKind::Enter => self.write_kind(SyntaxKind::OpenBracket),
                VisitKind::Leave => self.write_kind(SyntaxKind::CloseBracket),
            }
        }
        self.error.is_none()
    }

    fn visit_attribute(&mut self, attribute: &'t Attribute, kind: VisitKind) -> bool {
        self.visit_node(SyntaxNodeRef::Attribute(attribute), kind);
        match kind {
            VisitKind::Enter => {
                self.write_token(attribute.name_token());
                self.write_kind(SyntaxKind::Equals);
                self.write_token(attribute.value_token());
            }
            VisitKind::Leave => {
                if let Some(SyntaxNodeRef::AttributeList(list)) = self.parent(kind) {
                    let is_last = list
                        .attributes()
                        .last()
                        .map_or(true, |last| ptr::eq(last, attribute));
                    if !is_last {
                        self.write_str(", ");
                    }
                }
            }
        }
        self.error.is_none()
    }

    fn visit_attribute_statement(
        &mut self,
        statement: &'t AttributeStatement,
        kind: VisitKind,
    ) -> bool {
        self.visit_node(SyntaxNodeRef::AttributeStatement(statement), kind);
        match kind {
            VisitKind::Enter => self.write_token(statement.keyword_token()),
            VisitKind::Leave => self.end_node_statement(),
        }
        self.error.is_none()
    }

    fn visit_name_value_statement(
        &mut self,
        statement: &'t NameValueStatement,
        kind: VisitKind,
    ) -> bool {
        self.visit_node(SyntaxNodeRef::NameValueStatement(statement), kind);
        match kind {
            VisitKind::Enter => {
                self.write_token(statement.name_token());
                self.write_kind(SyntaxKind::Equals);
                self.write_token(statement.value_token());
            }
            VisitKind::Leave => self.end_node_statement(),
        }
        self.error.is_none()
    }
}
