use crate::error::Error;
use crate::facts::is_identifier_char;
use crate::kind::SyntaxKind;
use crate::text::{LinePosition, LinePositionSpan, SourceLocation, SourceText, TextSpan};
use crate::token::SyntaxToken;
use core::iter::Peekable;
use core::str::CharIndices;
use log::trace;
use std::collections::VecDeque;

#[derive(Clone, Copy)]
struct Mark {
    offset: usize,
    position: LinePosition,
}

/// Splits DOT source text into [`SyntaxToken`]s, attaching white space,
/// comments and preprocessor lines to the following token as leading trivia.
pub struct Lexer<'a> {
    text: &'a str,
    chars: Peekable<CharIndices<'a>>,
    line: usize,
    column: usize,
    // Only white space has been seen since the last new line.
    line_is_blank: bool,
    peeked: Option<SyntaxToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.char_indices().peekable(),
            line: 1,
            column: 1,
            line_is_blank: true,
            peeked: None,
        }
    }

    pub fn from_source(source: &'a SourceText) -> Self {
        Self::new(source.as_str())
    }

    /// Consumes the next token.
    pub fn read_token(&mut self) -> Result<SyntaxToken, Error> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.lex(),
        }
    }

    /// Returns the next token without consuming it.
    pub fn peek_token(&mut self) -> Result<&SyntaxToken, Error> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.lex()?,
        };
        Ok(self.peeked.get_or_insert(token))
    }

    pub fn peek_kind(&mut self) -> Result<SyntaxKind, Error> {
        Ok(self.peek_token()?.kind())
    }

    /// Reads every remaining token, ending with [`SyntaxKind::EndOfFile`].
    ///
    /// With `promote_trivia`, leading trivia is detached from each token and
    /// yielded on its own just before it:
    ///
    /// ```text
    /// ID  →  `=`  →  ID  →  EOF
    /// ↑       ↑      ↑
    /// SPACE   SPACE  SPACE
    ///
    /// becomes
    ///
    /// SPACE → ID → SPACE → `=` → SPACE → ID → EOF
    /// ```
    pub fn read_tokens(self, promote_trivia: bool) -> Tokens<'a> {
        Tokens {
            lexer: self,
            promote_trivia,
            pending: VecDeque::new(),
            done: false,
        }
    }

    fn mark(&mut self) -> Mark {
        Mark {
            offset: self.offset(),
            position: LinePosition {
                line: self.line,
                character: self.column,
            },
        }
    }

    fn offset(&mut self) -> usize {
        match self.chars.peek() {
            Some(&(offset, _)) => offset,
            None => self.text.len(),
        }
    }

    fn peekc(&mut self) -> Option<char> {
        Some(self.chars.peek()?.1)
    }

    // Looks one char past peekc().
    fn peekc2(&self) -> Option<char> {
        let mut ic = self.chars.clone();
        ic.next();
        Some(ic.next()?.1)
    }

    fn nextc(&mut self) -> Option<char> {
        let (_, c) = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
            self.line_is_blank = true;
        } else {
            self.column += 1;
            if !c.is_whitespace() {
                self.line_is_blank = false;
            }
        }
        Some(c)
    }

    fn consumec(&mut self) {
        self.nextc();
    }

    fn consume_while(&mut self, f: impl Fn(char) -> bool) {
        while let Some(c) = self.peekc() {
            if !f(c) {
                break;
            }
            self.consumec();
        }
    }

    fn finish(
        &mut self,
        start: Mark,
        kind: SyntaxKind,
        value: Option<String>,
        leading_trivia: Vec<SyntaxToken>,
    ) -> SyntaxToken {
        let end = self.mark();
        let span = TextSpan::from_bounds(start.offset, end.offset);
        let source_text = self.text[start.offset..end.offset].to_string();
        trace!("{:?} {:?} at {}", kind, source_text, span);
        SyntaxToken::parsed(
            kind,
            SourceLocation {
                span,
                line_span: LinePositionSpan {
                    start: start.position,
                    end: end.position,
                },
            },
            source_text,
            value,
            leading_trivia,
        )
    }

    fn lex(&mut self) -> Result<SyntaxToken, Error> {
        let mut leading_trivia = Vec::new();
        while let Some(trivia) = self.lex_trivia() {
            leading_trivia.push(trivia);
        }
        self.lex_token(leading_trivia)
    }

    fn lex_trivia(&mut self) -> Option<SyntaxToken> {
        let start = self.mark();
        let kind = match self.peekc()? {
            c if c.is_whitespace() => {
                self.consume_while(char::is_whitespace);
                SyntaxKind::WhiteSpaceTrivia
            }
            '/' => match self.peekc2() {
                Some('/') => {
                    // The new line is not part of the comment.
                    self.consume_while(|c| c != '\n');
                    SyntaxKind::SingleLineCommentTrivia
                }
                Some('*') => {
                    self.consumec();
                    self.consumec();
                    // An unterminated comment runs to the end of the input.
                    while let Some(c) = self.nextc() {
                        if c == '*' && self.peekc() == Some('/') {
                            self.consumec();
                            break;
                        }
                    }
                    SyntaxKind::MultiLineCommentTrivia
                }
                _ => return None,
            },
            '#' if self.line_is_blank => {
                self.consume_while(|c| c != '\n');
                SyntaxKind::PreprocessorDirectiveTrivia
            }
            _ => return None,
        };
        Some(self.finish(start, kind, None, Vec::new()))
    }

    fn lex_token(&mut self, leading_trivia: Vec<SyntaxToken>) -> Result<SyntaxToken, Error> {
        let start = self.mark();
        let c = match self.nextc() {
            Some(c) => c,
            None => return Ok(self.finish(start, SyntaxKind::EndOfFile, None, leading_trivia)),
        };

        let (kind, value) = match c {
            '=' => (SyntaxKind::Equals, None),
            '{' => (SyntaxKind::OpenBrace, None),
            '}' => (SyntaxKind::CloseBrace, None),
            '[' => (SyntaxKind::OpenBracket, None),
            ']' => (SyntaxKind::CloseBracket, None),
            ':' => (SyntaxKind::Colon, None),
            ';' => (SyntaxKind::Semicolon, None),
            ',' => (SyntaxKind::Comma, None),
            '-' => match self.peekc() {
                Some('-') => {
                    self.consumec();
                    (SyntaxKind::UndirectedEdge, None)
                }
                Some('>') => {
                    self.consumec();
                    (SyntaxKind::DirectedEdge, None)
                }
                Some(c) if c == '.' || c.is_ascii_digit() => {
                    self.lex_numeral(String::from("-"), false)
                }
                _ => {
                    return Err(Error::tokenize(
                        "expected `--`, `->` or a numeral after `-`",
                        start.position,
                    ))
                }
            },
            '"' => self.lex_quoted_string(start)?,
            '<' => self.lex_xml_literal(start)?,
            '#' => {
                return Err(Error::tokenize(
                    "a preprocessor directive must be the first thing on its line",
                    start.position,
                ))
            }
            '/' => {
                return Err(Error::tokenize(
                    "expected `//` or `/*` to begin a comment",
                    start.position,
                ))
            }
            c if c == '.' || c.is_ascii_digit() => self.lex_numeral(c.to_string(), c == '.'),
            c if is_identifier_char(c, true) => self.lex_identifier(c),
            c => {
                return Err(Error::tokenize(
                    format!("unrecognized character {:?}", c),
                    start.position,
                ))
            }
        };

        Ok(self.finish(start, kind, value, leading_trivia))
    }

    // Greedy within one run of digits containing at most one dot. A second dot
    // ends the token, so "1.2.3" lexes as "1.2" and ".3".
    fn lex_numeral(&mut self, mut buf: String, mut seen_dot: bool) -> (SyntaxKind, Option<String>) {
        while let Some(c) = self.peekc() {
            if !seen_dot && c == '.' {
                seen_dot = true;
            } else if !c.is_ascii_digit() {
                break;
            }
            self.consumec();
            buf.push(c);
        }
        (SyntaxKind::NumeralLiteral, Some(buf))
    }

    fn lex_quoted_string(&mut self, start: Mark) -> Result<(SyntaxKind, Option<String>), Error> {
        let mut s = String::new();
        loop {
            match self.nextc() {
                Some('"') => break,
                Some('\\') => {
                    // `\"` is the only escape sequence; any other pair is kept verbatim.
                    match self.nextc() {
                        Some('"') => s.push('"'),
                        Some(c) => {
                            s.push('\\');
                            s.push(c);
                        }
                        None => return Err(unterminated_string(start)),
                    }
                }
                Some(c) => s.push(c),
                None => return Err(unterminated_string(start)),
            }
        }
        Ok((SyntaxKind::StringLiteral, Some(s)))
    }

    fn lex_xml_literal(&mut self, start: Mark) -> Result<(SyntaxKind, Option<String>), Error> {
        let mut s = String::new();
        let mut depth: usize = 0;
        loop {
            match self.nextc() {
                Some('<') => depth += 1,
                Some('>') => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                Some(_) => {}
                None => {
                    return Err(Error::tokenize(
                        "XML literal was not terminated",
                        start.position,
                    ))
                }
            }
        }
        // Everything between the outer brackets, nested brackets included.
        let inner_start = start.offset + '<'.len_utf8();
        let inner_end = self.offset() - '>'.len_utf8();
        s.push_str(&self.text[inner_start..inner_end]);
        Ok((SyntaxKind::XmlLiteral, Some(s)))
    }

    fn lex_identifier(&mut self, c: char) -> (SyntaxKind, Option<String>) {
        let mut ident = String::new();
        ident.push(c);
        while let Some(c) = self.peekc() {
            if is_identifier_char(c, false) {
                self.consumec();
                ident.push(c);
            } else {
                break;
            }
        }
        let kind = SyntaxKind::keyword_from_text(&ident).unwrap_or(SyntaxKind::Identifier);
        (kind, Some(ident))
    }
}

fn unterminated_string(start: Mark) -> Error {
    Error::tokenize("quoted string was not terminated", start.position)
}

/// The iterator returned by [`Lexer::read_tokens`]. Ends after the end-of-file
/// token or after the first error.
pub struct Tokens<'a> {
    lexer: Lexer<'a>,
    promote_trivia: bool,
    pending: VecDeque<SyntaxToken>,
    done: bool,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<SyntaxToken, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.pop_front() {
            return Some(Ok(token));
        }
        if self.done {
            return None;
        }

        let token = match self.lexer.read_token() {
            Ok(token) => token,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };
        if token.kind() == SyntaxKind::EndOfFile {
            self.done = true;
        }

        if !self.promote_trivia {
            return Some(Ok(token));
        }
        let (trivia, token) = token.detach_trivia();
        self.pending.extend(trivia);
        self.pending.push_back(token);
        self.pending.pop_front().map(Ok)
    }
}

impl<'a> core::iter::FusedIterator for Tokens<'a> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::init_test;
    use SyntaxKind::*;

    fn lex_all(input: &str) -> Result<Vec<SyntaxToken>, Error> {
        Lexer::new(input).read_tokens(false).collect()
    }

    #[test]
    fn test_basic() {
        init_test();

        fn case(input: &str, expected: &[(SyntaxKind, &str)]) {
            println!("case: input = {:?}", input);
            let tokens = lex_all(input).unwrap();
            let actual: Vec<(SyntaxKind, &str)> = tokens
                .iter()
                .filter(|t| t.kind() != EndOfFile)
                .map(|t| (t.kind(), t.source_text().unwrap()))
                .collect();
            assert_eq!(actual, expected);
        }

        case("", &[]);
        case(" ", &[]);
        case("{", &[(OpenBrace, "{")]);
        case(
            "{}[]",
            &[(OpenBrace, "{"), (CloseBrace, "}"), (OpenBracket, "["), (CloseBracket, "]")],
        );
        case("=:;,", &[(Equals, "="), (Colon, ":"), (Semicolon, ";"), (Comma, ",")]);
        case("\"foo\"", &[(StringLiteral, "\"foo\"")]);
        case(
            "foo -> bar -- baz",
            &[
                (Identifier, "foo"),
                (DirectedEdge, "->"),
                (Identifier, "bar"),
                (UndirectedEdge, "--"),
                (Identifier, "baz"),
            ],
        );
        case(
            "digraph { mumble \"frotz\" = [sides=17] }",
            &[
                (DigraphKeyword, "digraph"),
                (OpenBrace, "{"),
                (Identifier, "mumble"),
                (StringLiteral, "\"frotz\""),
                (Equals, "="),
                (OpenBracket, "["),
                (Identifier, "sides"),
                (Equals, "="),
                (NumeralLiteral, "17"),
                (CloseBracket, "]"),
                (CloseBrace, "}"),
            ],
        );
        case("a->-1", &[(Identifier, "a"), (DirectedEdge, "->"), (NumeralLiteral, "-1")]);
        case(
            "a:n:sw",
            &[
                (Identifier, "a"),
                (Colon, ":"),
                (Identifier, "n"),
                (Colon, ":"),
                (Identifier, "sw"),
            ],
        );
        // Numerals are ASCII digits only; other decimal digits may continue an
        // identifier but cannot start a token.
        case("a\u{663}1", &[(Identifier, "a\u{663}1")]);
    }

    #[test]
    fn single_char_spans() {
        let input = "{}[]=:;,";
        let mut lexer = Lexer::new(input);
        for (i, c) in input.chars().enumerate() {
            let token = lexer.read_token().unwrap();
            assert_eq!(token.source_text(), Some(c.to_string().as_str()));
            assert_eq!(token.kind().text(), Some(c.to_string().as_str()));
            let location = token.location().unwrap();
            assert_eq!(location.span, TextSpan::new(i, 1));
            assert_eq!(location.line_span.start.character, i + 1);
        }
        assert_eq!(lexer.read_token().unwrap().kind(), EndOfFile);
    }

    #[test]
    fn literal_values() {
        fn case(input: &str, expected_kind: SyntaxKind, expected_values: &[&str]) {
            println!("case: input = {:?}", input);
            let tokens = lex_all(input).unwrap();
            let values: Vec<&str> = tokens
                .iter()
                .filter(|t| t.kind() != EndOfFile)
                .map(|t| {
                    assert_eq!(t.kind(), expected_kind, "token {:?}", t);
                    t.value().unwrap()
                })
                .collect();
            assert_eq!(values, expected_values);
        }

        case("a", Identifier, &["a"]);
        case("a aa a0 _0A", Identifier, &["a", "aa", "a0", "_0A"]);
        case("\u{fffd}x \u{e9}t\u{e9}", Identifier, &["\u{fffd}x", "\u{e9}t\u{e9}"]);
        case("\"\"", StringLiteral, &[""]);
        case("\"\\\"\"", StringLiteral, &["\""]);
        case("\"\\\"\\\"\"", StringLiteral, &["\"\""]);
        case("\"hello world\"", StringLiteral, &["hello world"]);
        case("\"hello \\\"world\\\"\"", StringLiteral, &["hello \"world\""]);
        case("\"random\\r\\te\\l\\nscapes\"", StringLiteral, &["random\\r\\te\\l\\nscapes"]);
        case("\"back\\\\slash\"", StringLiteral, &["back\\\\slash"]);
        case("\"multi\nline\"", StringLiteral, &["multi\nline"]);
        case("0", NumeralLiteral, &["0"]);
        case("12", NumeralLiteral, &["12"]);
        case("-0", NumeralLiteral, &["-0"]);
        case("-.5", NumeralLiteral, &["-.5"]);
        case(".5", NumeralLiteral, &[".5"]);
        case("0.5", NumeralLiteral, &["0.5"]);
        case("-0.5", NumeralLiteral, &["-0.5"]);
        case("-000.500", NumeralLiteral, &["-000.500"]);
        case("1.2.3.4", NumeralLiteral, &["1.2", ".3", ".4"]);
        case("1.2.3-.4", NumeralLiteral, &["1.2", ".3", "-.4"]);
        case("<>", XmlLiteral, &[""]);
        case("<><><>", XmlLiteral, &["", "", ""]);
        case("<a><><b><><c>", XmlLiteral, &["a", "", "b", "", "c"]);
        case("<<a/>><><<b/>>", XmlLiteral, &["<a/>", "", "<b/>"]);
        case("<<a/>><><<b/>><><<c/>>", XmlLiteral, &["<a/>", "", "<b/>", "", "<c/>"]);
        case("<<![CDATA[woo]]>>", XmlLiteral, &["<![CDATA[woo]]>"]);
        case(
            "<<table>\n  <tr><td>x</td></tr>\n</table>>",
            XmlLiteral,
            &["<table>\n  <tr><td>x</td></tr>\n</table>"],
        );
    }

    #[test]
    fn keywords() {
        fn case(input: &str, expected: SyntaxKind) {
            let token = Lexer::new(input).read_token().unwrap();
            assert_eq!(token.kind(), expected, "input = {:?}", input);
            assert_eq!(token.value(), Some(input));
        }

        case("strict", StrictKeyword);
        case("graph", GraphKeyword);
        case("Graph", GraphKeyword);
        case("digraph", DigraphKeyword);
        case("DIGRAPH", DigraphKeyword);
        case("subgraph", SubgraphKeyword);
        case("node", NodeKeyword);
        case("edge", EdgeKeyword);
        case("graphs", Identifier);

        // Compass points are ordinary identifiers.
        for &compass in ["n", "ne", "e", "se", "s", "sw", "w", "nw", "c", "_"].iter() {
            case(compass, Identifier);
        }
    }

    #[test]
    fn trivia() {
        fn case(input: &str, expected: &[(SyntaxKind, &str)]) {
            println!("case: input = {:?}", input);
            let token = Lexer::new(input).read_token().unwrap();
            assert_eq!(token.kind(), EndOfFile);
            let actual: Vec<(SyntaxKind, &str)> = token
                .leading_trivia()
                .iter()
                .map(|t| (t.kind(), t.source_text().unwrap()))
                .collect();
            assert_eq!(actual, expected);
        }

        let ws = WhiteSpaceTrivia;
        let line = SingleLineCommentTrivia;
        let multi = MultiLineCommentTrivia;

        case("//", &[(line, "//")]);
        case("//\n", &[(line, "//"), (ws, "\n")]);
        case("    //    \n", &[(ws, "    "), (line, "//    "), (ws, "\n")]);
        case("    \n\n\n\n    ", &[(ws, "    \n\n\n\n    ")]);
        case("////", &[(line, "////")]);
        case("//\n//", &[(line, "//"), (ws, "\n"), (line, "//")]);
        case("/* hello */", &[(multi, "/* hello */")]);
        case("/** *//***//****/", &[(multi, "/** */"), (multi, "/***/"), (multi, "/****/")]);
        case("/**\n**/\n//*\n", &[(multi, "/**\n**/"), (ws, "\n"), (line, "//*"), (ws, "\n")]);
        case("/* never closed", &[(multi, "/* never closed")]);
        case("\u{a0}\u{2003}", &[(ws, "\u{a0}\u{2003}")]);
    }

    #[test]
    fn preprocessor_directives() {
        fn case(input: &str, expected: &[&str]) {
            println!("case: input = {:?}", input);
            let tokens: Vec<SyntaxToken> = Lexer::new(input)
                .read_tokens(true)
                .collect::<Result<_, _>>()
                .unwrap();
            let (eof, tokens) = tokens.split_last().unwrap();
            assert_eq!(eof.kind(), EndOfFile);
            for token in tokens.iter().chain(Some(eof)) {
                assert!(token.leading_trivia().is_empty());
            }
            let actual: Vec<&str> = tokens.iter().map(|t| t.source_text().unwrap()).collect();
            assert_eq!(actual, expected);
            for token in tokens.iter() {
                let expected_kind = if token.source_text().unwrap().trim().is_empty() {
                    WhiteSpaceTrivia
                } else {
                    PreprocessorDirectiveTrivia
                };
                assert_eq!(token.kind(), expected_kind);
            }
        }

        case("#", &["#"]);
        case("#\n", &["#", "\n"]);
        case(" #", &[" ", "#"]);
        case("  \t#", &["  \t", "#"]);
        case("   \t  #", &["   \t  ", "#"]);
        case(" #\n", &[" ", "#", "\n"]);
        case("   \t  #\n", &["   \t  ", "#", "\n"]);
        case("   \t  #line 34\n", &["   \t  ", "#line 34", "\n"]);
        case("#if 0", &["#if 0"]);
    }

    #[test]
    fn invalid_preprocessor_directive() {
        assert!(lex_all("#line 34\ngraph { }").is_ok());
        assert!(lex_all("graph { }\n  #line 34\n").is_ok());

        match lex_all("graph { } #line 34") {
            Err(Error::Tokenize { position, .. }) => {
                assert_eq!(position, LinePosition { line: 1, character: 11 });
            }
            other => panic!("expected a tokenize error, got {:?}", other),
        }
    }

    #[test]
    fn errors() {
        fn case(input: &str, line: usize, character: usize) {
            println!("case: input = {:?}", input);
            match lex_all(input) {
                Err(Error::Tokenize { position, message }) => {
                    println!("error: {}", message);
                    assert_eq!(position, LinePosition { line, character });
                }
                other => panic!("expected a tokenize error, got {:?}", other),
            }
        }

        case("\"unterminated string", 1, 1);
        case("a \"ends with escape\\", 1, 3);
        case("<<a>", 1, 1);
        case("graph {\n  a ? b\n}", 2, 5);
        case("a / b", 1, 3);
        case("a - b", 1, 3);
        case("x\n  @", 2, 3);
        case("graph { \u{663} }", 1, 9);
        case("a -> -\u{663}", 1, 6);
        case("1\u{663}", 1, 2);
    }

    #[test]
    fn promoted_trivia_sequence() {
        let kinds: Vec<SyntaxKind> = Lexer::new(" a = /* c */ b\n")
            .read_tokens(true)
            .map(|t| t.unwrap().kind())
            .collect();
        assert_eq!(
            kinds,
            [
                WhiteSpaceTrivia,
                Identifier,
                WhiteSpaceTrivia,
                Equals,
                WhiteSpaceTrivia,
                MultiLineCommentTrivia,
                WhiteSpaceTrivia,
                Identifier,
                WhiteSpaceTrivia,
                EndOfFile,
            ]
        );
    }

    #[test]
    fn tokens_stop_after_error() {
        let mut tokens = Lexer::new("a ? b").read_tokens(false);
        assert_eq!(tokens.next().unwrap().unwrap().kind(), Identifier);
        assert!(tokens.next().unwrap().is_err());
        assert!(tokens.next().is_none());
    }

    #[test]
    fn peek_token() {
        let mut lexer = Lexer::new("graph { a -> b c -> d }");
        let expected = [
            GraphKeyword,
            OpenBrace,
            Identifier,
            DirectedEdge,
            Identifier,
            Identifier,
            DirectedEdge,
            Identifier,
            CloseBrace,
            EndOfFile,
        ];
        for &kind in expected.iter() {
            assert_eq!(lexer.peek_kind().unwrap(), kind);
            assert_eq!(lexer.peek_kind().unwrap(), kind);
            assert_eq!(lexer.read_token().unwrap().kind(), kind);
        }
        // Reading past the end keeps producing end-of-file.
        assert_eq!(lexer.read_token().unwrap().kind(), EndOfFile);
    }

    #[test]
    fn line_spans() {
        let mut lexer = Lexer::new("graph {\n  a\n}");
        lexer.read_token().unwrap();
        lexer.read_token().unwrap();
        let a = lexer.read_token().unwrap();
        let location = a.location().unwrap();
        assert_eq!(location.span, TextSpan::new(10, 1));
        assert_eq!(location.line_span.start, LinePosition { line: 2, character: 3 });
        assert_eq!(location.line_span.end, LinePosition { line: 2, character: 4 });
        assert_eq!(a.leading_trivia()[0].source_text(), Some("\n  "));
    }
}
