//! Row/column coordinates over a text source.
//!
//! Rows are zero-based line indices. Columns are zero-based byte offsets into the line, which is
//! all the scanner needs since every delimiter it cares about is ASCII.

use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
/// A point in a text source, ordered by row then column.
pub struct Position {
    /// Zero-based line index.
    pub row: usize,
    /// Zero-based byte offset within the line.
    pub column: usize,
}

impl Position {
    #[must_use]
    /// Creates a position from its row and column.
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
/// Half-open span `[start, end)` between two positions.
pub struct Range {
    /// First position inside the range.
    pub start: Position,
    /// First position past the range.
    pub end: Position,
}

impl Range {
    #[must_use]
    /// Creates a range, swapping the endpoints if they arrive out of order.
    pub fn new(start: Position, end: Position) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
