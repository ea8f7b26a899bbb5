//! Line-oriented access to document text.
//!
//! The scanner and title parser never touch a file directly; they read through [`TextSource`],
//! which exposes just what an editor buffer would: lines by row, their lengths, the next
//! non-blank row and the text between two positions. [`Buffer`] is the in-memory implementation
//! used for files on disk and for tests.

use crate::error::{Error, Result};
use crate::position::{Position, Range};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
/// Identity of a text source, normally the canonical path of the file it was read from.
pub struct SourceId(String);

impl SourceId {
    #[must_use]
    /// Wraps an arbitrary name, e.g. for an unsaved buffer or an in-memory document.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    /// Identifies a file by its canonical path, or by the path as given if it cannot be resolved.
    pub fn from_path(path: &Path) -> Self {
        let resolved = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        Self(resolved.to_string_lossy().into_owned())
    }

    #[must_use]
    /// The identifier as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    /// The identifier read as a filesystem path.
    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only line access the outline engine needs from a document.
pub trait TextSource {
    /// Identity used for cycle detection and for tagging outline nodes.
    fn id(&self) -> &SourceId;

    /// Whole content, lines joined by `\n`.
    fn text(&self) -> &str;

    /// Raw text of a line without its terminator, `None` past the end of the content.
    fn line_for_row(&self, row: usize) -> Option<&str>;

    /// Length in bytes of a line, zero past the end of the content.
    fn line_length(&self, row: usize) -> usize {
        self.line_for_row(row).map_or(0, str::len)
    }

    /// First row after `row` holding something other than whitespace.
    fn next_non_blank_row(&self, row: usize) -> Option<usize>;

    /// Raw text between two positions, `None` if the range does not lie on line data.
    fn text_in_range(&self, range: Range) -> Option<&str>;

    /// Maps a byte offset into [`TextSource::text`] to a row and column.
    fn position_at(&self, offset: usize) -> Option<Position>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A document held in memory with a precomputed line index.
pub struct Buffer {
    id: SourceId,
    text: String,
    line_starts: Vec<usize>,
}

impl Buffer {
    #[must_use]
    /// Creates a buffer from text, normalising CRLF line endings to LF.
    pub fn new(id: SourceId, text: impl Into<String>) -> Self {
        let mut text: String = text.into();
        if text.contains('\r') {
            text = text.replace("\r\n", "\n");
        }
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            id,
            text,
            line_starts,
        }
    }

    /// Reads a file into a buffer identified by its canonical path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if the file cannot be read as UTF-8 text.
    pub fn open(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(SourceId::from_path(path), text))
    }

    #[must_use]
    /// Number of lines, counting a trailing empty line after a final newline.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    fn line_span(&self, row: usize) -> Option<(usize, usize)> {
        let start = *self.line_starts.get(row)?;
        let end = self
            .line_starts
            .get(row + 1)
            .map_or(self.text.len(), |next| next - 1);
        Some((start, end))
    }

    fn offset_of(&self, position: Position) -> Option<usize> {
        let (start, end) = self.line_span(position.row)?;
        let offset = start + position.column;
        (offset <= end).then_some(offset)
    }
}

impl TextSource for Buffer {
    fn id(&self) -> &SourceId {
        &self.id
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn line_for_row(&self, row: usize) -> Option<&str> {
        let (start, end) = self.line_span(row)?;
        self.text.get(start..end)
    }

    fn next_non_blank_row(&self, row: usize) -> Option<usize> {
        (row + 1..self.line_count()).find(|&candidate| {
            self.line_for_row(candidate)
                .is_some_and(|line| !line.trim().is_empty())
        })
    }

    fn text_in_range(&self, range: Range) -> Option<&str> {
        let start = self.offset_of(range.start)?;
        let end = self.offset_of(range.end)?;
        self.text.get(start..end)
    }

    fn position_at(&self, offset: usize) -> Option<Position> {
        if offset > self.text.len() {
            return None;
        }
        let row = self.line_starts.partition_point(|&start| start <= offset) - 1;
        Some(Position::new(row, offset - self.line_starts[row]))
    }
}

#[cfg(test)]
#[path = "tests/source.rs"]
mod tests;
