//! The errors that the parser, the AST builder, the graph model and the
//! converters can report.

use super::base::Location;
use std::fmt;
use thiserror::Error;

/// The raw failure reported by the recursive-descent parser. This is kept
/// as the `source()` of the `SyntaxError` that wraps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    /// What the parser was looking for.
    pub expected: String,
    /// A description of the token that was found instead.
    pub found: String,
    /// The char offset of the offending token.
    pub offset: usize,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected {} but found {} at offset {}",
            self.expected, self.found, self.offset
        )
    }
}

impl std::error::Error for ParseFailure {}

/// Malformed DOT text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct SyntaxError {
    pub message: String,
    pub location: Location,
    pub filename: Option<String>,
    #[source]
    pub cause: ParseFailure,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(filename) = &self.filename {
            write!(f, "{}:", filename)?;
        }
        write!(f, "{}: {}", self.location.start, self.message)
    }
}

impl SyntaxError {
    /// Renders the line that contains the error, followed by a line with a
    /// '^' marker under the offending column.
    pub fn snippet(&self, source: &str) -> String {
        let line_no = self.location.start.line;
        let line = source.lines().nth(line_no.saturating_sub(1)).unwrap_or("");
        let mut result = String::new();
        result.push_str(line);
        result.push('\n');
        for _ in 1..self.location.start.column {
            result.push(' ');
        }
        result.push('^');
        result
    }
}

/// All of the errors reported by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DotError {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("the number of AST nodes exceeded the limit of {limit}")]
    NodeCountExceeded { limit: usize },

    #[error("invalid edge target: {0}")]
    EdgeTarget(String),

    #[error("unknown attribute `{key}` for {kind}")]
    Validation { key: String, kind: String },

    #[error("can't convert the AST: {0}")]
    Conversion(String),
}

#[test]
fn test_syntax_error_display() {
    use super::base::Position;
    let loc = Location::new(Position::new(8, 2, 3), Position::new(9, 2, 4));
    let cause = ParseFailure {
        expected: "'{'".to_string(),
        found: "';'".to_string(),
        offset: 8,
    };
    let err = SyntaxError {
        message: "Expected '{'".to_string(),
        location: loc,
        filename: Some("g.dot".to_string()),
        cause: cause.clone(),
    };
    assert_eq!(err.to_string(), "g.dot:2:3: Expected '{'");

    let anonymous = SyntaxError {
        filename: None,
        ..err.clone()
    };
    assert_eq!(anonymous.to_string(), "2:3: Expected '{'");

    let source = std::error::Error::source(&err).unwrap();
    assert_eq!(source.to_string(), cause.to_string());
}

#[test]
fn test_syntax_error_snippet() {
    use super::base::Position;
    let loc = Location::new(Position::new(14, 2, 5), Position::new(15, 2, 6));
    let err = SyntaxError {
        message: "oops".to_string(),
        location: loc,
        filename: None,
        cause: ParseFailure {
            expected: "x".to_string(),
            found: "y".to_string(),
            offset: 14,
        },
    };
    let snippet = err.snippet("digraph {\n a -- b;\n}");
    assert_eq!(snippet, " a -- b;\n    ^");
}
