//! Walking a syntax tree.
//!
//! [`SyntaxNode::accept`](crate::tree::SyntaxNode::accept) calls the matching
//! `visit_*` method with [`VisitKind::Enter`], and only if that returns true
//! walks the node's children and then calls it again with
//! [`VisitKind::Leave`]. Tokens are passed to
//! [`visit_token`](SyntaxVisitor::visit_token), leading trivia first.
//!
//! Every `visit_*` method defaults to [`visit_statement`](SyntaxVisitor::visit_statement)
//! (for statement kinds) or [`visit_node`](SyntaxVisitor::visit_node), so a
//! visitor that handles all nodes alike overrides only `visit_node`.

use crate::tree::{
    Attribute, AttributeList, AttributeStatement, EdgeStatement, EmptyStatement, GraphSyntax,
    NameValueStatement, NodeIdentifier, NodeStatement, Port, SubgraphStatement, SyntaxNode,
    SyntaxTree,
};
use crate::token::SyntaxToken;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisitKind {
    Enter,
    Leave,
}

/// A borrowed reference to any node in a tree.
#[derive(Clone, Copy, Debug)]
pub enum SyntaxNodeRef<'t> {
    Tree(&'t SyntaxTree),
    Graph(&'t GraphSyntax),
    EmptyStatement(&'t EmptyStatement),
    NameValueStatement(&'t NameValueStatement),
    AttributeStatement(&'t AttributeStatement),
    NodeStatement(&'t NodeStatement),
    EdgeStatement(&'t EdgeStatement),
    SubgraphStatement(&'t SubgraphStatement),
    NodeIdentifier(&'t NodeIdentifier),
    Port(&'t Port),
    AttributeList(&'t AttributeList),
    Attribute(&'t Attribute),
}

impl<'t> SyntaxNodeRef<'t> {
    /// The name of the node's type.
    pub fn kind_name(self) -> &'static str {
        match self {
            SyntaxNodeRef::Tree(_) => "SyntaxTree",
            SyntaxNodeRef::Graph(_) => "GraphSyntax",
            SyntaxNodeRef::EmptyStatement(_) => "EmptyStatement",
            SyntaxNodeRef::NameValueStatement(_) => "NameValueStatement",
            SyntaxNodeRef::AttributeStatement(_) => "AttributeStatement",
            SyntaxNodeRef::NodeStatement(_) => "NodeStatement",
            SyntaxNodeRef::EdgeStatement(_) => "EdgeStatement",
            SyntaxNodeRef::SubgraphStatement(_) => "SubgraphStatement",
            SyntaxNodeRef::NodeIdentifier(_) => "NodeIdentifier",
            SyntaxNodeRef::Port(_) => "Port",
            SyntaxNodeRef::AttributeList(_) => "AttributeList",
            SyntaxNodeRef::Attribute(_) => "Attribute",
        }
    }

    pub fn is_parsed(self) -> bool {
        match self {
            SyntaxNodeRef::Tree(n) => n.is_parsed(),
            SyntaxNodeRef::Graph(n) => n.is_parsed(),
            SyntaxNodeRef::EmptyStatement(n) => n.is_parsed(),
            SyntaxNodeRef::NameValueStatement(n) => n.is_parsed(),
            SyntaxNodeRef::AttributeStatement(n) => n.is_parsed(),
            SyntaxNodeRef::NodeStatement(n) => n.is_parsed(),
            SyntaxNodeRef::EdgeStatement(n) => n.is_parsed(),
            SyntaxNodeRef::SubgraphStatement(n) => n.is_parsed(),
            SyntaxNodeRef::NodeIdentifier(n) => n.is_parsed(),
            SyntaxNodeRef::Port(n) => n.is_parsed(),
            SyntaxNodeRef::AttributeList(n) => n.is_parsed(),
            SyntaxNodeRef::Attribute(n) => n.is_parsed(),
        }
    }

    pub fn is_statement(self) -> bool {
        match self {
            SyntaxNodeRef::EmptyStatement(_)
            | SyntaxNodeRef::NameValueStatement(_)
            | SyntaxNodeRef::AttributeStatement(_)
            | SyntaxNodeRef::NodeStatement(_)
            | SyntaxNodeRef::EdgeStatement(_)
            | SyntaxNodeRef::SubgraphStatement(_) => true,
            _ => false,
        }
    }

    /// Walks this node with `visitor`.
    pub fn accept<V: SyntaxVisitor<'t> + ?Sized>(self, visitor: &mut V) {
        match self {
            SyntaxNodeRef::Tree(n) => n.accept(visitor),
            SyntaxNodeRef::Graph(n) => n.accept(visitor),
            SyntaxNodeRef::EmptyStatement(n) => n.accept(visitor),
            SyntaxNodeRef::NameValueStatement(n) => n.accept(visitor),
            SyntaxNodeRef::AttributeStatement(n) => n.accept(visitor),
            SyntaxNodeRef::NodeStatement(n) => n.accept(visitor),
            SyntaxNodeRef::EdgeStatement(n) => n.accept(visitor),
            SyntaxNodeRef::SubgraphStatement(n) => n.accept(visitor),
            SyntaxNodeRef::NodeIdentifier(n) => n.accept(visitor),
            SyntaxNodeRef::Port(n) => n.accept(visitor),
            SyntaxNodeRef::AttributeList(n) => n.accept(visitor),
            SyntaxNodeRef::Attribute(n) => n.accept(visitor),
        }
    }
}

pub trait SyntaxVisitor<'t> {
    /// Called for every node unless a more specific method is overridden.
    /// Returning false on [`VisitKind::Enter`] skips the node's children and
    /// its [`VisitKind::Leave`] call.
    fn visit_node(&mut self, node: SyntaxNodeRef<'t>, kind: VisitKind) -> bool {
        let _ = (node, kind);
        true
    }

    fn visit_token(&mut self, token: &'t SyntaxToken) {
        let _ = token;
    }

    fn visit_statement(&mut self, statement: SyntaxNodeRef<'t>, kind: VisitKind) -> bool {
        self.visit_node(statement, kind)
    }

    fn visit_tree(&mut self, tree: &'t SyntaxTree, kind: VisitKind) -> bool {
        self.visit_node(SyntaxNodeRef::Tree(tree), kind)
    }

    fn visit_graph(&mut self, graph: &'t GraphSyntax, kind: VisitKind) -> bool {
        self.visit_node(SyntaxNodeRef::Graph(graph), kind)
    }

    fn visit_empty_statement(&mut self, statement: &'t EmptyStatement, kind: VisitKind) -> bool {
        self.visit_statement(SyntaxNodeRef::EmptyStatement(statement), kind)
    }

    fn visit_name_value_statement(
        &mut self,
        statement: &'t NameValueStatement,
        kind: VisitKind,
    ) -> bool {
        self.visit_statement(SyntaxNodeRef::NameValueStatement(statement), kind)
    }

    fn visit_attribute_statement(
        &mut self,
        statement: &'t AttributeStatement,
        kind: VisitKind,
    ) -> bool {
        self.visit_statement(SyntaxNodeRef::AttributeStatement(statement), kind)
    }

    fn visit_node_statement(&mut self, statement: &'t NodeStatement, kind: VisitKind) -> bool {
        self.visit_statement(SyntaxNodeRef::NodeStatement(statement), kind)
    }

    fn visit_edge_statement(&mut self, statement: &'t EdgeStatement, kind: VisitKind) -> bool {
        self.visit_statement(SyntaxNodeRef::EdgeStatement(statement), kind)
    }

    fn visit_subgraph_statement(
        &mut self,
        statement: &'t SubgraphStatement,
        kind: VisitKind,
    ) -> bool {
        self.visit_statement(SyntaxNodeRef::SubgraphStatement(statement), kind)
    }

    fn visit_node_identifier(&mut self, identifier: &'t NodeIdentifier, kind: VisitKind) -> bool {
        self.visit_node(SyntaxNodeRef::NodeIdentifier(identifier), kind)
    }

    fn visit_port(&mut self, port: &'t Port, kind: VisitKind) -> bool {
        self.visit_node(SyntaxNodeRef::Port(port), kind)
    }

    fn visit_attribute_list(&mut self, list: &'t AttributeList, kind: VisitKind) -> bool {
        self.visit_node(SyntaxNodeRef::AttributeList(list), kind)
    }

    fn visit_attribute(&mut self, attribute: &'t Attribute, kind: VisitKind) -> bool {
        self.visit_node(SyntaxNodeRef::Attribute(attribute), kind)
    }
}
