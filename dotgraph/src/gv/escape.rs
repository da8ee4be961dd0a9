//! String transformations that make untrusted text safe to embed in DOT
//! output: quoted literals, HTML-like labels and comments.
//!
//! None of the functions in this module can fail, and they accept any
//! unicode input.

use super::parser::ast::CommentKind;
use super::parser::lexer::DEFAULT_MAX_HTML_DEPTH;

/// The zero-width space that is inserted between '*' and '/' in block
/// comments.
pub const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// Removes the NUL chars from \p value. Renderers treat NUL as the end of
/// the string, so anything after it could be smuggled past a reviewer.
pub fn strip_nul(value: &str) -> String {
    value.chars().filter(|ch| *ch != '\0').collect()
}

/// Escapes \p value so that it can be placed between double quotes.
///
/// Line breaks become `\r` and `\n`, and bare quotes become `\"`. A quote
/// that is already escaped by an odd run of backslashes is left alone.
/// Every other backslash is doubled, except for a single backslash in front
/// of a char that `unescape` keeps as written (like the `\l` of GraphViz
/// labels). The output never ends with an odd run of backslashes, so the
/// closing quote can't be escaped by the content.
pub fn escape(value: &str) -> String {
    let chars: Vec<char> = strip_nul(value).chars().collect();
    let mut result = String::with_capacity(chars.len());
    let mut idx = 0;
    while idx < chars.len() {
        let ch = chars[idx];
        match ch {
            '\\' => {
                let start = idx;
                while idx < chars.len() && chars[idx] == '\\' {
                    idx += 1;
                }
                let run = idx - start;
                let next = chars.get(idx).copied();
                let count = match next {
                    // The last backslash escapes the quote.
                    Some('"') if run % 2 == 1 => run,
                    Some(c) if run == 1 && !decodes_after_backslash(c) => 1,
                    _ => run * 2,
                };
                for _ in 0..count {
                    result.push('\\');
                }
                if let Some('"') = next {
                    if run % 2 == 0 {
                        result.push('\\');
                    }
                    result.push('"');
                    idx += 1;
                }
                continue;
            }
            '"' => result.push_str("\\\""),
            '\r' => result.push_str("\\r"),
            '\n' => result.push_str("\\n"),
            _ => result.push(ch),
        }
        idx += 1;
    }
    result
}

// Returns true if `unescape` decodes the pair '\\' \p ch. The line breaks
// are included because `escape` writes them with a leading backslash.
fn decodes_after_backslash(ch: char) -> bool {
    matches!(ch, 'n' | 'r' | '\n' | '\r')
}

/// Converts the body of a parsed quoted string into the text it stands
/// for: `\\`, `\"`, `\n` and `\r` are decoded, every other backslash pair
/// is kept as written. This is the inverse of `escape`, except for quotes
/// that were already escaped in the input of `escape`.
pub fn unescape(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }
    result
}

/// Makes \p value safe to embed in a comment of kind \p kind. Block
/// comments can't contain the terminator "*/", so a zero-width space is
/// placed between the two chars.
pub fn escape_comment(value: &str, kind: CommentKind) -> String {
    let stripped = strip_nul(value);
    match kind {
        CommentKind::Block => {
            let mut terminator = String::new();
            terminator.push('*');
            terminator.push(ZERO_WIDTH_SPACE);
            terminator.push('/');
            stripped.replace("*/", &terminator)
        }
        CommentKind::Slash | CommentKind::Macro => stripped,
    }
}

/// Returns true if \p value, once trimmed, looks like `<...>` and the angle
/// brackets are balanced such that the first '<' is closed by the last
/// '>'. This is stricter than matching `^<.+>$`: "<b>x</b>" is rejected
/// because its first '<' closes early. Only such values can be printed as
/// HTML-like labels without letting the content escape the label. Values
/// nested deeper than the lexer accepts are rejected too.
pub fn is_html_like(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.len() < 3 || !trimmed.starts_with('<') || !trimmed.ends_with('>')
    {
        return false;
    }
    let last = trimmed.len() - 1;
    let mut depth: usize = 0;
    for (idx, ch) in trimmed.char_indices() {
        match ch {
            '<' => {
                depth += 1;
                if depth > DEFAULT_MAX_HTML_DEPTH {
                    return false;
                }
            }
            '>' => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
                if depth == 0 && idx != last {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// Splits \p value into lines. "\r\n", "\r" and "\n" all end a line.
pub fn split_lines(value: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let bytes = value.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        match bytes[idx] {
            b'\n' => {
                lines.push(&value[start..idx]);
                start = idx + 1;
            }
            b'\r' => {
                lines.push(&value[start..idx]);
                if idx + 1 < bytes.len() && bytes[idx + 1] == b'\n' {
                    idx += 1;
                }
                start = idx + 1;
            }
            _ => {}
        }
        idx += 1;
    }
    lines.push(&value[start..]);
    lines
}
