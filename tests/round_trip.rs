use dot_syntax::{
    parse, EdgeVertex, Error, Lexer, SourceText, Statement, SyntaxKind, SyntaxNode, SyntaxToken,
    SyntaxTree, SyntaxVisitor,
};
use pretty_assertions::assert_eq;

fn init_test() {
    drop(env_logger::try_init());
}

// Every token except end of file must carry the text it was read from.
struct TokensHaveSourceText;

impl<'t> SyntaxVisitor<'t> for TokensHaveSourceText {
    fn visit_token(&mut self, token: &'t SyntaxToken) {
        if token.kind() != SyntaxKind::EndOfFile {
            assert!(token.is_parsed(), "{:?}", token);
            assert!(
                token.source_text().map_or(false, |s| !s.is_empty()),
                "{:?}",
                token
            );
        }
    }
}

fn round_trip(text: &str) -> SyntaxTree {
    let tree = parse(text).unwrap_or_else(|e| panic!("{}\n{}", e, text));
    assert!(tree.is_parsed());
    tree.accept(&mut TokensHaveSourceText);
    assert_eq!(tree.to_string(), text);
    tree
}

#[test]
fn empty_graphs() {
    init_test();
    for &text in [
        "",
        "  \n// nothing\n",
        "graph{}",
        "digraph{}",
        "digraph{}graph{}",
        "strict graph { }",
        "strict graph A { }",
        "strict graph A { } strict digraph Hello {  \n  }    \n\n",
        "graph { ; }",
        "graph { ; ; }",
        "graph { ; ; ; }",
        "graph{;\t\t\t;;;;;     \t\t\r    \n \n \n }",
        "graph{;;;;;;;;;}",
        "GRAPH { } DiGraph { } Strict Graph { }",
    ]
    .iter()
    {
        round_trip(text);
    }
}

#[test]
fn name_value_statements() {
    for &text in [
        "graph { a = b }",
        "graph { aaa=bbb c=d }",
        "graph { message=\"hello world\" ; { __key = __value } }",
        "graph { x = 1.5; y = -.5; z = <<b>bold</b>> }",
    ]
    .iter()
    {
        round_trip(text);
    }
}

#[test]
fn attribute_statements() {
    for &text in [
        "graph { node [a=b] }",
        "graph { edge [a=b, aaa = bbb ] }",
        "graph { graph [a=b ; aaa = bbb ; \"hello\" = \"world\" ] }",
        "graph{node[x=y k=v]edge[a=b]}",
        "graph{node[x=y;k=v]edge[a=b]}",
        "graph{node[x=y,k=v]edge[a=b]a->b}",
        "graph { node [] ; edge[]graph[] }",
    ]
    .iter()
    {
        round_trip(text);
    }
}

#[test]
fn node_statements() {
    for &text in [
        "digraph{a}",
        "graph { n0   }",
        "graph { a b c }",
        "digraph { a -> subgraph b { b0 b1 } -> c }",
        "graph { a[k=v] }",
        "graph { a[k1=v1 k2=v2] b[] c[a=b,c=d,e=f]}",
        "graph { a[k1=v1 k2=v2] -> b[] -> c[a=b,c=d,e=f] [edge=attrs]}",
        "graph { a:p b:p:ne c:sw d : e : f }",
    ]
    .iter()
    {
        round_trip(text);
    }
}

#[test]
fn edge_statements() {
    for &text in [
        "digraph { a -> b }",
        "digraph { a -> b -> c }",
        "digraph { a -> b -> c -> d }",
        "graph { a -- b }",
        "graph { a -- b -- c }",
        "graph { a -- b -- c -- d }",
        "digraph { a -> b c -> d }",
        "digraph { a -> b ; c -> d }",
        "digraph { { a ; b } -> { c ; d } -> e -> { f } }",
        "digraph { a->b[x=1];b->c[y=2]; }",
    ]
    .iter()
    {
        round_trip(text);
    }
}

#[test]
fn trivia() {
    for &text in [
        "/* a */ graph /* b */ { /* c */ } /* d */",
        "// one\ngraph { // two\n a // three\n} // four",
        "#include \"x.gv\"\ngraph {\n  # 12 \"y.gv\"\n  a\n}\n",
        "graph { a } /* never closed",
        "graph { \"\u{e9}t\u{e9}\" -- caf\u{e9} }",
    ]
    .iter()
    {
        round_trip(text);
    }
}

fn node_name(statement: &Statement) -> &str {
    match statement {
        Statement::Node(node) => node.name(),
        other => panic!("expected a node statement, found {:?}", other),
    }
}

#[test]
fn node_statement_trees() {
    assert!(round_trip("graph { }").graphs()[0].body().is_empty());

    let tree = round_trip("graph { a }");
    let names: Vec<&str> = tree.graphs()[0].body().iter().map(node_name).collect();
    assert_eq!(names, ["a"]);

    let tree = round_trip(
        "graph {
            a
            bb; ccc;
            dddd eeeee
        }",
    );
    let names: Vec<&str> = tree.graphs()[0].body().iter().map(node_name).collect();
    assert_eq!(names, ["a", "bb", "ccc", "dddd", "eeeee"]);
}

#[test]
fn subgraph_statement_trees() {
    let tree = round_trip(
        "graph {
            a subgraph b {
                b_a subgraph b_b { b_b_c }
            }c;d
        }",
    );
    let body = tree.graphs()[0].body();
    assert_eq!(body.len(), 4);
    assert_eq!(node_name(&body[0]), "a");
    assert_eq!(node_name(&body[2]), "c");
    assert_eq!(node_name(&body[3]), "d");

    let b = match &body[1] {
        Statement::Subgraph(s) => s,
        other => panic!("expected a subgraph, found {:?}", other),
    };
    assert_eq!(b.name(), Some("b"));
    assert_eq!(node_name(&b.body()[0]), "b_a");
    match &b.body()[1] {
        Statement::Subgraph(b_b) => {
            assert_eq!(b_b.name(), Some("b_b"));
            assert_eq!(node_name(&b_b.body()[0]), "b_b_c");
        }
        other => panic!("expected a subgraph, found {:?}", other),
    }
}

#[test]
fn edge_chain_is_right_associative() {
    let tree = round_trip("digraph { a -> b -> c }");
    let edge = match &tree.graphs()[0].body()[0] {
        Statement::Edge(edge) => edge,
        other => panic!("expected an edge, found {:?}", other),
    };
    match (edge.left(), edge.right()) {
        (EdgeVertex::Node(a), EdgeVertex::Edge(rest)) => {
            assert_eq!(a.name(), "a");
            assert_eq!(rest.to_string(), " b -> c");
        }
        other => panic!("unexpected shape {:?}", other),
    }
}

#[test]
fn corpus_files() {
    init_test();
    for &text in [
        include_str!("data/unix.gv"),
        include_str!("data/clust.gv"),
    ]
    .iter()
    {
        round_trip(text);
    }
}

#[test]
fn source_text_entry_point() {
    let source = SourceText::from(include_str!("data/clust.gv"));
    let tree = dot_syntax::parse_source(&source).unwrap();
    assert_eq!(tree.to_string(), source.as_str());
}

#[test]
fn invalid_input() {
    fn case(text: &str) {
        match parse(text) {
            Err(Error::UnexpectedToken { .. }) | Err(Error::Tokenize { .. }) => {}
            other => panic!("{:?} should not parse: {:?}", text, other),
        }
    }

    case("{a}");
    case("{");
    case("{a");
    case("graph{a");
    case("graph{a->}");
    case("graph{a=}");
    case("graph{node}");
    case("graph{a[b]}");
    case("graph{a:}");
    case("graph{\"open}");
    case("graph{ a - b }");
    case("graph{ a / b }");
    case("graph{ a } #x");
    case("graph{ @ }");
}

#[test]
fn numerals_split() {
    let kinds: Vec<(SyntaxKind, String)> = Lexer::new("1.2.3.4")
        .read_tokens(true)
        .map(|t| t.unwrap())
        .filter(|t| t.kind() != SyntaxKind::EndOfFile)
        .map(|t| (t.kind(), t.value().unwrap_or_default().to_string()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (SyntaxKind::NumeralLiteral, "1.2".to_string()),
            (SyntaxKind::NumeralLiteral, ".3".to_string()),
            (SyntaxKind::NumeralLiteral, ".4".to_string()),
        ]
    );
}
