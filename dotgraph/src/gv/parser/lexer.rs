//! The Lexer implementation for the GraphViz file format.

use super::ast::CommentKind;
use crate::core::base::{Location, Position};
use crate::gv::escape::split_lines;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    EOF,
    Identifier(String),
    Numeral(String),
    QuotedString(String),
    Html(String),
    Comment(CommentKind, String),
    GraphKW,
    NodeKW,
    EdgeKW,
    DigraphKW,
    StrictKW,
    SubgraphKW,
    Equal,
    Colon,
    Comma,
    Semicolon,
    ArrowRight,
    ArrowLine,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
    Error(String),
}

impl Token {
    /// A short description of the token, for error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::EOF => "the end of the input".to_string(),
            Token::Identifier(s) | Token::Numeral(s) => format!("'{}'", s),
            Token::QuotedString(s) => format!("\"{}\"", s),
            Token::Html(_) => "an HTML-like string".to_string(),
            Token::Comment(..) => "a comment".to_string(),
            Token::GraphKW => "'graph'".to_string(),
            Token::NodeKW => "'node'".to_string(),
            Token::EdgeKW => "'edge'".to_string(),
            Token::DigraphKW => "'digraph'".to_string(),
            Token::StrictKW => "'strict'".to_string(),
            Token::SubgraphKW => "'subgraph'".to_string(),
            Token::Equal => "'='".to_string(),
            Token::Colon => "':'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Semicolon => "';'".to_string(),
            Token::ArrowRight => "'->'".to_string(),
            Token::ArrowLine => "'--'".to_string(),
            Token::OpenBracket => "'['".to_string(),
            Token::CloseBracket => "']'".to_string(),
            Token::OpenBrace => "'{'".to_string(),
            Token::CloseBrace => "'}'".to_string(),
            Token::Error(_) => "an invalid token".to_string(),
        }
    }
}

/// A saved lexer position, used for backtracking.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    idx: usize,
    line: usize,
    column: usize,
}

#[derive(Debug, Clone)]
pub struct Lexer {
    input: Vec<char>,
    // The index of 'ch' in the input.
    idx: usize,
    line: usize,
    column: usize,
    pub ch: char,
    // The position of the first char of the last token.
    tok_start: Position,
    max_html_depth: usize,
}

/// The default limit on the nesting of '<' in HTML-like strings.
pub const DEFAULT_MAX_HTML_DEPTH: usize = 100;

impl Lexer {
    pub fn from_string(input: &str) -> Self {
        let chars = input.chars().collect();
        Lexer::new(chars)
    }

    pub fn new(input: Vec<char>) -> Self {
        let ch = input.first().copied().unwrap_or('\0');
        Self {
            input,
            idx: 0,
            line: 1,
            column: 1,
            ch,
            tok_start: Position::start(),
            max_html_depth: DEFAULT_MAX_HTML_DEPTH,
        }
    }

    /// Sets the maximum nesting of '<' in HTML-like strings. The delimiting
    /// pair counts as the first level.
    pub fn with_max_html_depth(mut self, depth: usize) -> Self {
        self.max_html_depth = depth;
        self
    }

    /// The position of the current char.
    pub fn position(&self) -> Position {
        Position::new(self.idx, self.line, self.column)
    }

    /// The source range of the last token returned by `next_token`.
    pub fn token_location(&self) -> Location {
        Location::new(self.tok_start, self.position())
    }

    pub fn has_next(&self) -> bool {
        self.idx < self.input.len()
    }

    fn peek(&self, n: usize) -> char {
        self.input.get(self.idx + n).copied().unwrap_or('\0')
    }

    pub fn read_char(&mut self) {
        if !self.has_next() {
            return;
        }
        if self.ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.idx += 1;
        self.ch = self.input.get(self.idx).copied().unwrap_or('\0');
    }

    fn save(&self) -> Cursor {
        Cursor {
            idx: self.idx,
            line: self.line,
            column: self.column,
        }
    }

    fn restore(&mut self, cursor: Cursor) {
        self.idx = cursor.idx;
        self.line = cursor.line;
        self.column = cursor.column;
        self.ch = self.input.get(self.idx).copied().unwrap_or('\0');
    }

    pub fn skip_whitespace(&mut self) -> bool {
        let mut changed = false;
        while self.has_next() && (self.ch.is_whitespace() || self.ch == '\u{FEFF}')
        {
            self.read_char();
            changed = true;
        }
        changed
    }

    // Reads the rest of the line, and consumes the line terminator.
    fn read_line_comment(&mut self, kind: CommentKind) -> Token {
        let mut result = String::new();
        while self.has_next() && self.ch != '\n' {
            result.push(self.ch);
            self.read_char();
        }
        // Consume the '\n'.
        self.read_char();
        let text = result.trim_end();
        let text = text.strip_prefix(' ').unwrap_or(text);
        Token::Comment(kind, text.to_string())
    }

    fn read_block_comment(&mut self) -> Token {
        // Consume the '/*'.
        self.read_char();
        self.read_char();
        let mut result = String::new();
        loop {
            if !self.has_next() {
                return Token::Error("Unterminated block comment".to_string());
            }
            if self.ch == '*' && self.peek(1) == '/' {
                self.read_char();
                self.read_char();
                break;
            }
            result.push(self.ch);
            self.read_char();
        }
        Token::Comment(CommentKind::Block, normalize_block_comment(&result))
    }

    pub fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while self.has_next() && is_id_char(self.ch) {
            result.push(self.ch);
            self.read_char();
        }
        result
    }

    pub fn read_number(&mut self) -> String {
        let mut result = String::new();
        let mut period = false;
        while self.has_next() && (self.ch.is_ascii_digit() || self.ch == '.') {
            // Only allow one period in each number.
            if self.ch == '.' {
                if !period {
                    period = true;
                } else {
                    break;
                }
            }
            result.push(self.ch);
            self.read_char();
        }
        result
    }

    // Reads one "..." part into \p result.
    fn read_quoted_part(&mut self, result: &mut String) -> Result<(), String> {
        // Consume the opening quote.
        self.read_char();
        loop {
            if !self.has_next() {
                return Err("Unterminated quoted string".to_string());
            }
            match self.ch {
                '"' => {
                    self.read_char();
                    return Ok(());
                }
                '\\' => {
                    let next = self.peek(1);
                    if next == '\n' {
                        // Line continuation.
                        self.read_char();
                        self.read_char();
                    } else if next == '\r' && self.peek(2) == '\n' {
                        self.read_char();
                        self.read_char();
                        self.read_char();
                    } else {
                        // Keep the escape sequence as written.
                        result.push('\\');
                        self.read_char();
                        if self.has_next() {
                            result.push(self.ch);
                            self.read_char();
                        }
                    }
                }
                ch => {
                    result.push(ch);
                    self.read_char();
                }
            }
        }
    }

    /// Reads a quoted string and the strings that are appended to it with
    /// '+'.
    pub fn read_string(&mut self) -> Token {
        let mut result = String::new();
        loop {
            if let Err(msg) = self.read_quoted_part(&mut result) {
                return Token::Error(msg);
            }
            let cursor = self.save();
            self.skip_whitespace();
            if self.ch != '+' {
                self.restore(cursor);
                return Token::QuotedString(result);
            }
            // Consume the '+'.
            self.read_char();
            self.skip_whitespace();
            if self.ch != '"' {
                return Token::Error(
                    "Expected a quoted string after '+'".to_string(),
                );
            }
        }
    }

    /// Reads an HTML-like string. The current char is the opening '<'.
    pub fn read_html(&mut self) -> Token {
        let mut result = String::new();
        let mut depth: usize = 0;
        loop {
            if !self.has_next() {
                return Token::Error("Unterminated HTML-like string".to_string());
            }
            match self.ch {
                '<' => {
                    depth += 1;
                    if depth > self.max_html_depth {
                        return Token::Error(format!(
                            "HTML-like string is nested deeper than {} levels",
                            self.max_html_depth
                        ));
                    }
                    if depth > 1 {
                        result.push('<');
                    }
                }
                '>' => {
                    depth -= 1;
                    if depth == 0 {
                        self.read_char();
                        return Token::Html(result);
                    }
                    result.push('>');
                }
                ch => result.push(ch),
            }
            self.read_char();
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.tok_start = self.position();

        if !self.has_next() {
            return Token::EOF;
        }

        let tok: Token;
        match self.ch {
            '=' => {
                tok = Token::Equal;
            }
            ';' => {
                tok = Token::Semicolon;
            }
            ':' => {
                tok = Token::Colon;
            }
            '[' => {
                tok = Token::OpenBracket;
            }
            ']' => {
                tok = Token::CloseBracket;
            }
            '{' => {
                tok = Token::OpenBrace;
            }
            '}' => {
                tok = Token::CloseBrace;
            }
            ',' => {
                tok = Token::Comma;
            }
            '"' => {
                return self.read_string();
            }
            '<' => {
                return self.read_html();
            }
            '#' => {
                self.read_char();
                return self.read_line_comment(CommentKind::Macro);
            }
            '/' => match self.peek(1) {
                '*' => {
                    return self.read_block_comment();
                }
                '/' => {
                    self.read_char();
                    self.read_char();
                    return self.read_line_comment(CommentKind::Slash);
                }
                _ => {
                    tok = Token::Error("Unexpected character '/'".to_string());
                }
            },
            '-' => {
                let next = self.peek(1);
                match next {
                    '>' => {
                        self.read_char();
                        tok = Token::ArrowRight;
                    }
                    '-' => {
                        self.read_char();
                        tok = Token::ArrowLine;
                    }
                    _ => {
                        if next.is_ascii_digit()
                            || (next == '.' && self.peek(2).is_ascii_digit())
                        {
                            self.read_char();
                            let mut num = String::from("-");
                            num.push_str(&self.read_number());
                            return Token::Numeral(num);
                        }
                        tok = Token::Error("Unexpected character '-'".to_string());
                    }
                }
            }
            _ => {
                if is_id_start(self.ch) {
                    let name = self.read_identifier();
                    return match name.to_ascii_lowercase().as_str() {
                        "graph" => Token::GraphKW,
                        "node" => Token::NodeKW,
                        "edge" => Token::EdgeKW,
                        "digraph" => Token::DigraphKW,
                        "strict" => Token::StrictKW,
                        "subgraph" => Token::SubgraphKW,
                        _ => Token::Identifier(name),
                    };
                }
                if self.ch.is_ascii_digit()
                    || (self.ch == '.' && self.peek(1).is_ascii_digit())
                {
                    return Token::Numeral(self.read_number());
                }
                tok = Token::Error(format!("Unexpected character '{}'", self.ch));
            }
        }
        self.read_char();
        tok
    }
}

fn is_id_start(ch: char) -> bool {
    ch.is_ascii_alphabetic()
        || ch == '_'
        || ((ch as u32) >= 0x80 && ch != '\u{FEFF}')
}

fn is_id_char(ch: char) -> bool {
    is_id_start(ch) || ch.is_ascii_digit()
}

/// Removes the '*' gutter that is commonly used in block comments, and the
/// blank lines around the text.
fn normalize_block_comment(raw: &str) -> String {
    let lines: Vec<&str> = split_lines(raw)
        .into_iter()
        .map(|line| {
            let line = line.trim_start();
            let line = match line.strip_prefix('*') {
                Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
                None => line,
            };
            line.trim_end()
        })
        .collect();
    let first = lines.iter().position(|l| !l.is_empty());
    let last = lines.iter().rposition(|l| !l.is_empty());
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_tokens(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::from_string(input);
        let mut result = Vec::new();
        loop {
            let tok = lexer.next_token();
            if tok == Token::EOF {
                return result;
            }
            let is_error = matches!(tok, Token::Error(_));
            result.push(tok);
            if is_error {
                return result;
            }
        }
    }

    #[test]
    fn keywords_ignore_case() {
        let toks = all_tokens("STRICT DiGraph Subgraph NODE edge graph");
        assert_eq!(
            toks,
            vec![
                Token::StrictKW,
                Token::DigraphKW,
                Token::SubgraphKW,
                Token::NodeKW,
                Token::EdgeKW,
                Token::GraphKW
            ]
        );
    }

    #[test]
    fn identifiers_and_numbers() {
        let toks = all_tokens("_a1 ünïcode 12 -3.5 .5 -.25");
        assert_eq!(
            toks,
            vec![
                Token::Identifier("_a1".to_string()),
                Token::Identifier("ünïcode".to_string()),
                Token::Numeral("12".to_string()),
                Token::Numeral("-3.5".to_string()),
                Token::Numeral(".5".to_string()),
                Token::Numeral("-.25".to_string()),
            ]
        );
    }

    #[test]
    fn quoted_strings() {
        let toks = all_tokens(r#""a \"b\" \\ c" "x" + "y" + "z""#);
        assert_eq!(
            toks,
            vec![
                Token::QuotedString(r#"a \"b\" \\ c"#.to_string()),
                Token::QuotedString("xyz".to_string()),
            ]
        );
        let toks = all_tokens("\"line\\\ncontinued\"");
        assert_eq!(toks, vec![Token::QuotedString("linecontinued".to_string())]);
    }

    #[test]
    fn bad_strings() {
        assert!(matches!(all_tokens("\"abc").pop(), Some(Token::Error(_))));
        assert!(matches!(all_tokens("\"a\" + b").pop(), Some(Token::Error(_))));
    }

    #[test]
    fn html_strings() {
        let toks = all_tokens("<<b>bold</b>> <x>");
        assert_eq!(
            toks,
            vec![
                Token::Html("<b>bold</b>".to_string()),
                Token::Html("x".to_string())
            ]
        );
        assert!(matches!(all_tokens("<<b>").pop(), Some(Token::Error(_))));
    }

    #[test]
    fn html_depth_limit() {
        let deep = format!("{}{}", "<".repeat(5), ">".repeat(5));
        let mut lexer = Lexer::from_string(&deep).with_max_html_depth(5);
        assert!(matches!(lexer.next_token(), Token::Html(_)));
        let mut lexer = Lexer::from_string(&deep).with_max_html_depth(4);
        assert!(matches!(lexer.next_token(), Token::Error(_)));
    }

    #[test]
    fn comments() {
        let toks = all_tokens("/* block */ // slash  \n# macro\na");
        assert_eq!(
            toks,
            vec![
                Token::Comment(CommentKind::Block, "block".to_string()),
                Token::Comment(CommentKind::Slash, "slash".to_string()),
                Token::Comment(CommentKind::Macro, "macro".to_string()),
                Token::Identifier("a".to_string()),
            ]
        );
        assert!(matches!(all_tokens("/* open").pop(), Some(Token::Error(_))));
    }

    #[test]
    fn block_comment_gutter() {
        let toks = all_tokens("/**\n * first\n *\n * second\n */");
        assert_eq!(
            toks,
            vec![Token::Comment(
                CommentKind::Block,
                "first\n\nsecond".to_string()
            )]
        );
    }

    #[test]
    fn locations() {
        let mut lexer = Lexer::from_string("a ->\n  b");
        lexer.next_token();
        let loc = lexer.token_location();
        assert_eq!((loc.start.line, loc.start.column), (1, 1));
        assert_eq!(loc.end.offset, 1);
        lexer.next_token();
        let loc = lexer.token_location();
        assert_eq!((loc.start.column, loc.end.column), (3, 5));
        lexer.next_token();
        let loc = lexer.token_location();
        assert_eq!((loc.start.line, loc.start.column), (2, 3));
        assert_eq!(loc.start.offset, 7);
    }

    #[test]
    fn slash_comment_ends_on_next_line() {
        let mut lexer = Lexer::from_string("// c\nx");
        lexer.next_token();
        let loc = lexer.token_location();
        assert_eq!(loc.start.line, 1);
        assert_eq!(loc.end.line, 2);
    }
}
