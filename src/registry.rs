//! A table of the node types in [`crate::tree`], and a DOT diagram of it.

use crate::kind::{AttributeKeyword, EdgeKind};
use crate::tree::{
    AttributeStatement, EdgeStatement, GraphSyntax, NameValueStatement, NodeStatement, Statement,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeKindInfo {
    pub name: &'static str,
    /// `None` only for the root, `SyntaxNode`.
    pub parent: Option<&'static str>,
}

const fn kind(name: &'static str, parent: &'static str) -> NodeKindInfo {
    NodeKindInfo {
        name,
        parent: Some(parent),
    }
}

/// Every node kind, parents before children. `Statement` and `SyntaxNode`
/// are abstract; the names of the rest match
/// [`SyntaxNodeRef::kind_name`](crate::visitor::SyntaxNodeRef::kind_name).
pub static NODE_KINDS: &[NodeKindInfo] = &[
    NodeKindInfo {
        name: "SyntaxNode",
        parent: None,
    },
    kind("Attribute", "SyntaxNode"),
    kind("AttributeList", "SyntaxNode"),
    kind("GraphSyntax", "SyntaxNode"),
    kind("NodeIdentifier", "SyntaxNode"),
    kind("Port", "SyntaxNode"),
    kind("Statement", "SyntaxNode"),
    kind("SyntaxTree", "SyntaxNode"),
    kind("AttributeStatement", "Statement"),
    kind("EdgeStatement", "Statement"),
    kind("EmptyStatement", "Statement"),
    kind("NameValueStatement", "Statement"),
    kind("NodeStatement", "Statement"),
    kind("SubgraphStatement", "Statement"),
];

pub fn find_kind(name: &str) -> Option<&'static NodeKindInfo> {
    NODE_KINDS.iter().find(|info| info.name == name)
}

/// Builds a digraph of [`NODE_KINDS`] with an edge from each kind to its
/// parent, each node linking to its API page.
pub fn self_diagram() -> GraphSyntax {
    let mut statements: Vec<Statement> = vec![
        NameValueStatement::new("rankdir", "LR").into(),
        NameValueStatement::new("bgcolor", "transparent").into(),
        AttributeStatement::new(
            AttributeKeyword::Node,
            vec![
                ("fontname", "sans-serif"),
                ("color", "#102538"),
                ("fontcolor", "#337ab7"),
                ("shape", "record"),
            ],
        )
        .into(),
        AttributeStatement::new(AttributeKeyword::Edge, vec![("color", "#3B5266")]).into(),
    ];

    statements.extend(NODE_KINDS.iter().map(|info| {
        Statement::from(
            NodeStatement::new(info.name)
                .attribute("target", "_parent")
                .attribute("href", format!("/api/dot_syntax.{}.html", info.name)),
        )
    }));

    statements.extend(NODE_KINDS.iter().filter_map(|info| {
        let parent = info.parent?;
        Some(Statement::from(EdgeStatement::new(
            info.name,
            EdgeKind::Directed,
            parent,
        )))
    }));

    GraphSyntax::digraph().statements(statements)
}
