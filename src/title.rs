//! Turning a scanner match into a heading title or an inclusion target.
//!
//! The parser walks the source with an explicit cursor. Every step takes a [`Position`] and
//! hands back the next one, or `None` when the text runs out or stops looking like a command.
//! A `None` anywhere means the match was noise (commented out, escaped, unterminated) and the
//! outcome is [`ParseOutcome::Rejected`]; nothing is reported for it.
//!
//! Cursors always sit on a real character. Stepping past the end of a line lands on column 0
//! of the next non-blank line, so line breaks and blank lines read as plain whitespace.

use crate::error::{Error, Result};
use crate::outline::OutlineNode;
use crate::position::{Position, Range};
use crate::scanner::RawMatch;
use crate::source::TextSource;

#[derive(Clone, Debug, PartialEq, Eq)]
/// What a single scanner match turned out to be.
pub enum ParseOutcome {
    /// A sectioning command with its cleaned title.
    Heading(OutlineNode),
    /// An `\include` or `\input` naming another file.
    Inclusion(InclusionTarget),
    /// Not a genuine command; skip it.
    Rejected,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// The argument of an inclusion command and where the command sits.
pub struct InclusionTarget {
    /// Path as written between the braces, comments and surplus whitespace removed.
    pub path: String,
    /// Position of the command's backslash.
    pub anchor: Position,
}

/// Parses the arguments following one [`RawMatch`].
pub struct TitleParser<'s, S: TextSource + ?Sized> {
    raw: RawMatch,
    source: &'s S,
}

impl<'s, S: TextSource + ?Sized> TitleParser<'s, S> {
    #[must_use]
    /// Prepares to parse `raw`, which must have been produced by scanning `source`.
    pub fn new(raw: RawMatch, source: &'s S) -> Self {
        Self { raw, source }
    }

    /// Validates the match and extracts its title or inclusion target.
    ///
    /// # Errors
    ///
    /// Only fails if the source cannot produce text for a range built from its own lines.
    pub fn parse(&self) -> Result<ParseOutcome> {
        let Some(text) = self.title_text()? else {
            return Ok(ParseOutcome::Rejected);
        };
        if text.is_empty() {
            return Ok(ParseOutcome::Rejected);
        }

        let anchor = self.raw.range.start;
        Ok(match self.raw.keyword.level() {
            Some(level) => ParseOutcome::Heading(OutlineNode {
                title: text,
                level,
                anchor,
                source: self.source.id().clone(),
            }),
            None => ParseOutcome::Inclusion(InclusionTarget { path: text, anchor }),
        })
    }

    fn title_text(&self) -> Result<Option<String>> {
        if !self.is_genuine() {
            return Ok(None);
        }
        let Some(mut cursor) = self.skip_blank(self.raw.delimiter()) else {
            return Ok(None);
        };

        // A short title is balanced like the real one but never shown.
        if self.byte_at(cursor) == Some(b'[') {
            let short = self
                .advance(cursor)
                .and_then(|start| self.find_close(start, b']'))
                .and_then(|close| self.advance(close))
                .and_then(|after| self.skip_blank(after));
            let Some(after) = short else {
                return Ok(None);
            };
            cursor = after;
        }

        if self.byte_at(cursor) != Some(b'{') {
            return Ok(None);
        }
        let Some(start) = self.advance(cursor) else {
            return Ok(None);
        };
        let Some(close) = self.find_close(start, b'}') else {
            return Ok(None);
        };
        self.extract(Range::new(start, close)).map(Some)
    }

    /// Rejects matches behind an odd run of backslashes or after a `%` on the same line.
    fn is_genuine(&self) -> bool {
        let start = self.raw.range.start;
        let Some(line) = self.source.line_for_row(start.row) else {
            return false;
        };
        let bytes = line.as_bytes();
        let mut i = 0;
        while i < start.column {
            match bytes.get(i) {
                Some(b'\\') => {
                    i += 1;
                    if i == start.column {
                        return false;
                    }
                }
                Some(b'%') | None => return false,
                Some(_) => {}
            }
            i += 1;
        }
        true
    }

    fn byte_at(&self, position: Position) -> Option<u8> {
        self.source
            .line_for_row(position.row)?
            .as_bytes()
            .get(position.column)
            .copied()
    }

    fn char_at(&self, position: Position) -> Option<char> {
        self.source
            .line_for_row(position.row)?
            .get(position.column..)?
            .chars()
            .next()
    }

    /// Moves one byte forward, wrapping onto the next non-blank line at the end of a line.
    fn advance(&self, position: Position) -> Option<Position> {
        self.advance_by(position, 1)
    }

    fn advance_by(&self, position: Position, width: usize) -> Option<Position> {
        let mut row = position.row;
        let mut column = position.column + width;
        loop {
            let length = self.source.line_length(row);
            if column < length {
                return Some(Position::new(row, column));
            }
            column -= length;
            row = self.source.next_non_blank_row(row)?;
        }
    }

    fn next_line(&self, position: Position) -> Option<Position> {
        let row = self.source.next_non_blank_row(position.row)?;
        Some(Position::new(row, 0))
    }

    /// Skips whitespace and comments, stopping on the first other character.
    fn skip_blank(&self, mut cursor: Position) -> Option<Position> {
        loop {
            match self.char_at(cursor) {
                Some('%') => cursor = self.next_line(cursor)?,
                Some(c) if c.is_whitespace() => {
                    cursor = self.advance_by(cursor, c.len_utf8())?;
                }
                _ => return Some(cursor),
            }
        }
    }

    /// Finds the `terminator` closing the group that starts at `start`.
    ///
    /// Braces and brackets nest independently; an opener of either kind must be closed before
    /// the terminator counts.
    fn find_close(&self, start: Position, terminator: u8) -> Option<Position> {
        let mut open = [0_i32; 2];
        let slot = |closer: u8| usize::from(closer == b']');
        let mut cursor = start;
        loop {
            let byte = self.byte_at(cursor)?;
            match byte {
                b'}' | b']' if byte == terminator && open[slot(byte)] == 0 => {
                    return Some(cursor);
                }
                b'}' | b']' => open[slot(byte)] -= 1,
                b'{' => open[slot(b'}')] += 1,
                b'[' => open[slot(b']')] += 1,
                b'\\' => cursor = self.advance(cursor)?,
                b'%' => {
                    cursor = self.next_line(cursor)?;
                    continue;
                }
                _ => {}
            }
            cursor = self.advance(cursor)?;
        }
    }

    fn extract(&self, range: Range) -> Result<String> {
        let raw = self
            .source
            .text_in_range(range)
            .ok_or_else(|| Error::RangeOutOfBounds {
                source_id: self.source.id().clone(),
                range,
            })?;
        Ok(clean_title(raw))
    }
}

/// Drops comments, unescapes `\%` and collapses whitespace runs to single spaces.
#[must_use]
pub fn clean_title(raw: &str) -> String {
    let mut kept = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('%') => kept.push('%'),
                Some(escaped) => {
                    kept.push('\\');
                    kept.push(escaped);
                }
                None => kept.push('\\'),
            },
            '%' => {
                if chars.by_ref().any(|skipped| skipped == '\n') {
                    kept.push('\n');
                }
            }
            _ => kept.push(c),
        }
    }
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "tests/title.rs"]
mod tests;
