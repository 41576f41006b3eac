use core::fmt;

/// Identifies the kind of a [`SyntaxToken`](crate::token::SyntaxToken).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SyntaxKind {
    /// `=`
    Equals,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `[-]?(.[0-9]+ | [0-9]+(.[0-9]*)?)`
    NumeralLiteral,
    /// A double-quoted string. The only escape is `\"`; every other backslash is kept as-is.
    StringLiteral,
    /// An HTML/XML literal `<...>`; angle brackets nest.
    XmlLiteral,
    /// Letters, digits and underscores, not beginning with a digit.
    Identifier,
    /// `->`
    DirectedEdge,
    /// `--`
    UndirectedEdge,
    /// Always the last token. Carries any trailing trivia as its leading trivia.
    EndOfFile,
    StrictKeyword,
    GraphKeyword,
    DigraphKeyword,
    SubgraphKeyword,
    NodeKeyword,
    EdgeKeyword,
    /// A run of white space, including new lines.
    WhiteSpaceTrivia,
    /// `// ...` up to, but not including, the new line.
    SingleLineCommentTrivia,
    /// `/* ... */`
    MultiLineCommentTrivia,
    /// A `#` line, such as `#line 34`, not including the new line.
    PreprocessorDirectiveTrivia,
}

impl SyntaxKind {
    pub const KEYWORDS: [SyntaxKind; 6] = [
        SyntaxKind::StrictKeyword,
        SyntaxKind::GraphKeyword,
        SyntaxKind::DigraphKeyword,
        SyntaxKind::SubgraphKeyword,
        SyntaxKind::NodeKeyword,
        SyntaxKind::EdgeKeyword,
    ];

    /// Any of the four forms DOT accepts as an ID.
    pub fn is_identifier(self) -> bool {
        match self {
            SyntaxKind::Identifier
            | SyntaxKind::StringLiteral
            | SyntaxKind::XmlLiteral
            | SyntaxKind::NumeralLiteral => true,
            _ => false,
        }
    }

    pub fn is_edge(self) -> bool {
        match self {
            SyntaxKind::DirectedEdge | SyntaxKind::UndirectedEdge => true,
            _ => false,
        }
    }

    pub fn is_trivia(self) -> bool {
        match self {
            SyntaxKind::WhiteSpaceTrivia
            | SyntaxKind::SingleLineCommentTrivia
            | SyntaxKind::MultiLineCommentTrivia
            | SyntaxKind::PreprocessorDirectiveTrivia => true,
            _ => false,
        }
    }

    pub fn is_keyword(self) -> bool {
        Self::KEYWORDS.contains(&self)
    }

    /// The fixed text of punctuation and keywords (keywords in lowercase).
    /// Kinds whose text varies return `None`.
    pub fn text(self) -> Option<&'static str> {
        Some(match self {
            SyntaxKind::Equals => "=",
            SyntaxKind::OpenBrace => "{",
            SyntaxKind::CloseBrace => "}",
            SyntaxKind::OpenBracket => "[",
            SyntaxKind::CloseBracket => "]",
            SyntaxKind::Colon => ":",
            SyntaxKind::Semicolon => ";",
            SyntaxKind::Comma => ",",
            SyntaxKind::DirectedEdge => "->",
            SyntaxKind::UndirectedEdge => "--",
            SyntaxKind::StrictKeyword => "strict",
            SyntaxKind::GraphKeyword => "graph",
            SyntaxKind::DigraphKeyword => "digraph",
            SyntaxKind::SubgraphKeyword => "subgraph",
            SyntaxKind::NodeKeyword => "node",
            SyntaxKind::EdgeKeyword => "edge",
            _ => return None,
        })
    }

    /// The inverse of [`SyntaxKind::text`]. Keywords match regardless of case.
    pub fn from_text(text: &str) -> Option<SyntaxKind> {
        let kind = match text {
            "=" => SyntaxKind::Equals,
            "{" => SyntaxKind::OpenBrace,
            "}" => SyntaxKind::CloseBrace,
            "[" => SyntaxKind::OpenBracket,
            "]" => SyntaxKind::CloseBracket,
            ":" => SyntaxKind::Colon,
            ";" => SyntaxKind::Semicolon,
            "," => SyntaxKind::Comma,
            "->" => SyntaxKind::DirectedEdge,
            "--" => SyntaxKind::UndirectedEdge,
            _ => return Self::keyword_from_text(text),
        };
        Some(kind)
    }

    pub fn keyword_from_text(text: &str) -> Option<SyntaxKind> {
        // The longest keyword is "subgraph"; skip the lowercase copy for anything longer.
        if text.len() > 8 {
            return None;
        }
        match text.to_lowercase().as_str() {
            "strict" => Some(SyntaxKind::StrictKeyword),
            "graph" => Some(SyntaxKind::GraphKeyword),
            "digraph" => Some(SyntaxKind::DigraphKeyword),
            "subgraph" => Some(SyntaxKind::SubgraphKeyword),
            "node" => Some(SyntaxKind::NodeKeyword),
            "edge" => Some(SyntaxKind::EdgeKeyword),
            _ => None,
        }
    }

    /// A short human-readable name, used in error messages.
    pub fn description(self) -> &'static str {
        match self {
            SyntaxKind::NumeralLiteral => "numeral",
            SyntaxKind::StringLiteral => "string literal",
            SyntaxKind::XmlLiteral => "XML literal",
            SyntaxKind::Identifier => "identifier",
            SyntaxKind::EndOfFile => "end of file",
            SyntaxKind::WhiteSpaceTrivia => "white space",
            SyntaxKind::SingleLineCommentTrivia => "single-line comment",
            SyntaxKind::MultiLineCommentTrivia => "multi-line comment",
            SyntaxKind::PreprocessorDirectiveTrivia => "preprocessor directive",
            kind => kind.text().unwrap_or("token"),
        }
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.text() {
            Some(text) => write!(fmt, "`{}`", text),
            None => fmt.write_str(self.description()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GraphKind {
    Graph,
    Digraph,
}

impl GraphKind {
    pub fn keyword(self) -> SyntaxKind {
        match self {
            GraphKind::Graph => SyntaxKind::GraphKeyword,
            GraphKind::Digraph => SyntaxKind::DigraphKeyword,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Directed,
    Undirected,
}

impl EdgeKind {
    pub fn operator(self) -> SyntaxKind {
        match self {
            EdgeKind::Directed => SyntaxKind::DirectedEdge,
            EdgeKind::Undirected => SyntaxKind::UndirectedEdge,
        }
    }
}

/// The keyword that introduces an attribute statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeKeyword {
    Graph,
    Node,
    Edge,
}

impl AttributeKeyword {
    pub fn keyword(self) -> SyntaxKind {
        match self {
            AttributeKeyword::Graph => SyntaxKind::GraphKeyword,
            AttributeKeyword::Node => SyntaxKind::NodeKeyword,
            AttributeKeyword::Edge => SyntaxKind::EdgeKeyword,
        }
    }
}
