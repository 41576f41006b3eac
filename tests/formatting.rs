use dot_syntax::{
    parse, AttributeKeyword, EdgeKind, EdgeStatement, FormatSettings, GraphSyntax,
    NameValueStatement, NodeStatement, SubgraphStatement, SyntaxNode, SyntaxTree,
};
use pretty_assertions::assert_eq;

fn init_test() {
    drop(env_logger::try_init());
}

fn format(node: &impl SyntaxNode, settings: &FormatSettings) -> String {
    let mut out = String::new();
    node.write_formatted(&mut out, settings).unwrap();
    out
}

// Formats `tree`, parses the result, and formats that again. Both passes must
// agree, and the first output must re-parse to a tree that writes back
// verbatim.
fn assert_stable(tree: &SyntaxTree, settings: &FormatSettings) -> String {
    let first = format(tree, settings);
    let reparsed = parse(&first).unwrap_or_else(|e| panic!("{}\n{}", e, first));
    assert_eq!(reparsed.to_string(), first);
    let second = format(&reparsed, settings);
    assert_eq!(first, second);
    first
}

fn sample() -> SyntaxTree {
    SyntaxTree::new(vec![
        GraphSyntax::digraph()
            .named("G")
            .strict(true)
            .statement(NameValueStatement::new("label", "say \"hi\""))
            .statement(dot_syntax::AttributeStatement::new(
                AttributeKeyword::Node,
                vec![("shape", "box"), ("fontname", "sans-serif")],
            ))
            .statement(NodeStatement::new("a").with_port_and_compass("p", "ne"))
            .statement(NodeStatement::new("node").attribute("label", "keyword"))
            .statement(NodeStatement::new("-1.5"))
            .statement(NodeStatement::new("<b>html</b>"))
            .statement(
                EdgeStatement::new(
                    "a",
                    EdgeKind::Directed,
                    EdgeStatement::new(
                        SubgraphStatement::new()
                            .named("cluster_x")
                            .statement(NodeStatement::new("x"))
                            .statement(NameValueStatement::new("color", "blue")),
                        EdgeKind::Directed,
                        "b",
                    ),
                )
                .attribute("weight", "2"),
            )
            .statement(EdgeStatement::new(
                "b",
                EdgeKind::Directed,
                SubgraphStatement::new().statement(NodeStatement::new("c")),
            )),
        GraphSyntax::graph().statement(EdgeStatement::new("one two", EdgeKind::Undirected, "")),
    ])
}

#[test]
fn constructed_trees_are_stable() {
    init_test();

    fn case(settings: FormatSettings) {
        assert_stable(&sample(), &settings);
    }

    case(FormatSettings::default());
    case(FormatSettings::default().with_indent("\t"));
    case(FormatSettings::default().with_indent(""));
    case(FormatSettings::default().with_new_line("\r\n"));
    case(FormatSettings::default().with_final_new_line(false));
    case(FormatSettings::default().with_node_semicolons(false));
    case(FormatSettings::default().with_subgraph_semicolons(true));
}

#[test]
fn constructed_tree_output() {
    let text = assert_stable(&sample(), &FormatSettings::default());
    assert_eq!(
        text,
        r#"strict digraph G {
    label = "say \"hi\"";
    node[shape = box, fontname = "sans-serif"];
    a:p:ne;
    "node"[label = keyword];
    -1.5;
    "<b>html</b>";
    a -> subgraph cluster_x {
        x;
        color = blue;
    } -> b[weight = 2];
    b -> subgraph {
        c;
    }
}
graph {
    "one two" -- "";
}
"#
    );
    assert_eq!(sample().to_string(), text);
}

#[test]
fn parsed_trees_are_stable() {
    init_test();
    for &text in [
        include_str!("data/unix.gv"),
        include_str!("data/clust.gv"),
        "digraph { a -> b[x=1] -> c [y=2]; { rank=same a b } -> { c } }",
        "graph{a--b--c;d:n;e:f:sw[]}",
    ]
    .iter()
    {
        let tree = parse(text).unwrap();
        assert_stable(&tree, &FormatSettings::default());
        assert_stable(
            &tree,
            &FormatSettings::default()
                .with_node_semicolons(false)
                .with_subgraph_semicolons(true),
        );
    }
}

#[test]
fn multi_line_values_are_stable() {
    init_test();

    let tree = SyntaxTree::from_graph(
        GraphSyntax::graph().statement(
            SubgraphStatement::new()
                .statement(NodeStatement::new("line1\nline2"))
                .statement(NameValueStatement::new("label", "a\n  \"b\"\n")),
        ),
    );
    let text = assert_stable(&tree, &FormatSettings::default());
    let reparsed = parse(&text).unwrap();
    match &reparsed.graphs()[0].body()[0] {
        dot_syntax::Statement::Subgraph(s) => match &s.body()[0] {
            dot_syntax::Statement::Node(node) => assert_eq!(node.name(), "line1\nline2"),
            other => panic!("expected a node, found {:?}", other),
        },
        other => panic!("expected a subgraph, found {:?}", other),
    }

    let tree = parse("graph {\n  a [label=<<b>\nx</b>>]\n}").unwrap();
    for settings in [
        FormatSettings::default(),
        FormatSettings::default().with_indent("\t"),
        FormatSettings::default().with_new_line("\r\n"),
    ]
    .iter()
    {
        assert_stable(&tree, settings);
    }
}

#[test]
fn unquotable_values_are_rejected() {
    let tree = SyntaxTree::from_graph(GraphSyntax::graph().statement(NodeStatement::new("a\\")));
    let mut out = String::new();
    assert_eq!(
        tree.write_formatted(&mut out, &FormatSettings::default()),
        Err(dot_syntax::Error::UnquotableValue("a\\".to_string()))
    );
}

#[test]
fn formatting_drops_trivia() {
    let tree = parse("/* c */ graph { a // x\n ; b }\n").unwrap();
    assert_eq!(
        format(&tree, &FormatSettings::default()),
        "graph {\n    a;\n    b;\n}\n"
    );
}

#[test]
fn string_values_are_re_escaped() {
    let tree = parse(r#"graph { "hello \"world\"" }"#).unwrap();
    let graph = &tree.graphs()[0];
    match &graph.body()[0] {
        dot_syntax::Statement::Node(node) => assert_eq!(node.name(), "hello \"world\""),
        other => panic!("expected a node, found {:?}", other),
    }
    assert_eq!(
        graph.to_string(),
        "graph { \"hello \\\"world\\\"\" }"
    );
    assert_eq!(
        format(graph, &FormatSettings::default()),
        "graph {\n    \"hello \\\"world\\\"\";\n}"
    );
}
