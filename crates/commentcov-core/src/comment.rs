//! Comment groups and their text
//!
//! A [`CommentGroup`] is a run of adjacent `//` or `/* */` comments, found
//! once per file by the Go frontend and read by every classification. Its
//! text follows Go's `CommentGroup.Text` rules: comment markers are removed,
//! compiler directives are dropped, blank lines are squeezed, and the result
//! ends with a newline.

use crate::position::Block;
use facet::Facet;

/// A run of adjacent comments with its span and normalized text
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
pub struct CommentGroup {
    /// Text with markers stripped (see [`comment_text`] and [`normalize`])
    pub comment: String,
    /// Span from the first comment's start to the last comment's end
    pub block: Block,
}

impl CommentGroup {
    pub fn new(comment: impl Into<String>, block: Block) -> Self {
        Self {
            comment: comment.into(),
            block,
        }
    }

    /// Build a group from raw comment tokens (`// ...` or `/* ... */`)
    pub fn from_raw<'a>(raw: impl IntoIterator<Item = &'a str>, block: Block) -> Self {
        let text = comment_text(raw);
        Self::new(normalize(&text), block)
    }

    /// Whether this group documents anything.
    ///
    /// Groups made only of a lint suppression (`// nolint:funlen`) or only of
    /// directives (`//go:generate ...`) carry no documentation.
    pub fn is_documentation(&self) -> bool {
        !self.comment.is_empty() && !is_only_nolint_annotation(&self.comment)
    }
}

/// Strip leading spaces from comment text
pub fn normalize(text: &str) -> &str {
    text.trim_start_matches(' ')
}

/// Whether the text consists of a single `nolint:` annotation and nothing else
pub fn is_only_nolint_annotation(text: &str) -> bool {
    let rows: Vec<&str> = text.split('\n').collect();
    match rows.as_slice() {
        [only] => normalize(only).starts_with("nolint:"),
        [first, ""] => normalize(first).starts_with("nolint:"),
        _ => false,
    }
}

/// Join raw comment tokens into documentation text.
pub fn comment_text<'a>(raw: impl IntoIterator<Item = &'a str>) -> String {
    let mut lines: Vec<&str> = Vec::new();

    for comment in raw {
        let body = if let Some(rest) = comment.strip_prefix("//") {
            if let Some(rest) = rest.strip_prefix(' ') {
                rest
            } else if is_directive(rest) {
                continue;
            } else {
                rest
            }
        } else if let Some(rest) = comment.strip_prefix("/*") {
            rest.strip_suffix("*/").unwrap_or(rest)
        } else {
            comment
        };

        lines.extend(body.split('\n').map(strip_trailing_whitespace));
    }

    // Drop leading blank lines and squeeze interior runs of them
    let mut kept: Vec<&str> = Vec::with_capacity(lines.len() + 1);
    for line in lines {
        if !line.is_empty() || kept.last().is_some_and(|prev| !prev.is_empty()) {
            kept.push(line);
        }
    }

    if kept.last().is_some_and(|last| !last.is_empty()) {
        kept.push("");
    }

    kept.join("\n")
}

/// Whether a `//` comment body (marker removed, no leading space) is a
/// compiler directive such as `go:generate`, `nolint:lll` or `line foo.go:1`.
fn is_directive(body: &str) -> bool {
    if body.starts_with("line ") || body.starts_with("extern ") || body.starts_with("export ") {
        return true;
    }

    let bytes = body.as_bytes();
    let Some(colon) = body.find(':') else {
        return false;
    };
    if colon == 0 || colon + 1 >= bytes.len() {
        return false;
    }

    bytes[..=colon + 1]
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != colon)
        .all(|(_, b)| b.is_ascii_lowercase() || b.is_ascii_digit())
}

fn strip_trailing_whitespace(line: &str) -> &str {
    line.trim_end_matches([' ', '\t', '\n', '\r'])
}
