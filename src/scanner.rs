//! Candidate sectioning and inclusion commands.
//!
//! The scanner is deliberately generous: it reports anything that looks like `\section{`,
//! `\chapter*[`, `\input{` and friends, including occurrences inside comments or behind an
//! escaped backslash. Telling real commands apart is the title parser's job.

use crate::position::{Position, Range};
use crate::source::TextSource;
use once_cell::sync::Lazy;
use regex::Regex;

/// Backslash, keyword, then whitespace and whole-line comments up to the opening `{` or `[`.
/// The final alternative catches a command whose argument only starts after a comment line.
static COMMAND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\\(part|chapter|(?:sub){0,2}section|(?:sub)?paragraph|include|input)(?:\s*(?:%.*\s*)*\*?\s*(?:%.*\s*)*\{|\s*(?:%.*\s*)*\[|\s*%)",
    )
    .unwrap()
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Command names the scanner recognises.
pub enum Keyword {
    /// `\part`
    Part,
    /// `\chapter`
    Chapter,
    /// `\section`
    Section,
    /// `\subsection`
    Subsection,
    /// `\subsubsection`
    Subsubsection,
    /// `\paragraph`
    Paragraph,
    /// `\subparagraph`
    Subparagraph,
    /// `\include`
    Include,
    /// `\input`
    Input,
}

impl Keyword {
    #[must_use]
    /// Looks a keyword up by its command name, without the backslash.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "part" => Self::Part,
            "chapter" => Self::Chapter,
            "section" => Self::Section,
            "subsection" => Self::Subsection,
            "subsubsection" => Self::Subsubsection,
            "paragraph" => Self::Paragraph,
            "subparagraph" => Self::Subparagraph,
            "include" => Self::Include,
            "input" => Self::Input,
            _ => return None,
        })
    }

    #[must_use]
    /// Outline level, 1 for `\part` down to 7 for `\subparagraph`; `None` for inclusions.
    pub fn level(self) -> Option<u8> {
        match self {
            Self::Part => Some(1),
            Self::Chapter => Some(2),
            Self::Section => Some(3),
            Self::Subsection => Some(4),
            Self::Subsubsection => Some(5),
            Self::Paragraph => Some(6),
            Self::Subparagraph => Some(7),
            Self::Include | Self::Input => None,
        }
    }

    #[must_use]
    /// Whether the command splices in another file.
    pub fn is_inclusion(self) -> bool {
        matches!(self, Self::Include | Self::Input)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// One occurrence of the command pattern.
pub struct RawMatch {
    /// Command that matched.
    pub keyword: Keyword,
    /// From the backslash to just past the `{`, `[` or `%` that closed the match.
    pub range: Range,
}

impl RawMatch {
    #[must_use]
    /// Position of the delimiter that ended the match.
    pub fn delimiter(&self) -> Position {
        let end = self.range.end;
        Position::new(end.row, end.column.saturating_sub(1))
    }
}

/// Yields every candidate command in `source`, in source order.
pub fn scan<S: TextSource + ?Sized>(source: &S) -> impl Iterator<Item = RawMatch> + '_ {
    COMMAND.captures_iter(source.text()).filter_map(move |captures| {
        let whole = captures.get(0)?;
        let keyword = Keyword::from_name(captures.get(1)?.as_str())?;
        // The trailing-comment form only applies to headings.
        if keyword.is_inclusion() && whole.as_str().ends_with('%') {
            return None;
        }
        Some(RawMatch {
            keyword,
            range: Range::new(
                source.position_at(whole.start())?,
                source.position_at(whole.end())?,
            ),
        })
    })
}

#[cfg(test)]
#[path = "tests/scanner.rs"]
mod tests;
