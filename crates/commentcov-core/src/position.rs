//! Source positions and spans
//!
//! Lines and columns are 1-based and columns count bytes, the same way Go's
//! `token.Position` reports them. A [`Block`] end is the position right after
//! the construct, so the identifier `MyVar` starting at column 5 ends at
//! column 10.

use facet::Facet;

/// A single point in a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Facet)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: u32,
    /// Byte column (1-indexed)
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The span of one syntactic construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Facet)]
#[facet(rename_all = "camelCase")]
pub struct Block {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl Block {
    /// Span from `start` up to (not including) `end`
    pub fn new(start: Position, end: Position) -> Self {
        Self {
            start_line: start.line,
            start_column: start.column,
            end_line: end.line,
            end_column: end.column,
        }
    }

    /// Zero-width block, as used for the package clause
    pub fn point(at: Position) -> Self {
        Self::new(at, at)
    }

    pub fn start(&self) -> Position {
        Position::new(self.start_line, self.start_column)
    }

    pub fn end(&self) -> Position {
        Position::new(self.end_line, self.end_column)
    }

    /// Whether start and end coincide
    pub fn is_point(&self) -> bool {
        self.start() == self.end()
    }

    /// Whether `other` lies within this block's lines, ignoring columns
    pub fn spans_lines_of(&self, other: &Block) -> bool {
        self.start_line <= other.start_line && other.end_line <= self.end_line
    }
}

impl std::fmt::Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start(), self.end())
    }
}
