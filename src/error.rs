//! Failures that escape a build.
//!
//! Malformed markup is not an error: lookalike commands, unterminated groups and unresolved
//! inclusions are skipped while scanning. Only the environment failing us ends up here.

use crate::position::Range;
use crate::source::SourceId;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Environment failures surfaced to whoever asked for an outline.
pub enum Error {
    /// The root document (or a file named on the command line) could not be read.
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        /// File that failed to open.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A text source handed out line data that does not cover a range built from it.
    #[error("range {range} lies outside source '{source_id}'")]
    RangeOutOfBounds {
        /// Source that broke its contract.
        source_id: SourceId,
        /// Range it could not produce text for.
        range: Range,
    },
    /// An explicitly requested configuration file did not parse.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Update frequency label outside High, Medium, Low and On Save Only.
    #[error("unknown update frequency '{0}'")]
    UnknownFrequency(String),
    /// Terminal I/O failure in the interactive view.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
