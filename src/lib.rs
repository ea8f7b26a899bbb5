//! latex-outline: section outlines for LaTeX documents.
//!
//! The engine scans a document for sectioning commands (`\part` down to `\subparagraph`),
//! rejects lookalikes that are commented out or escaped, extracts each heading's title and
//! follows `\include`/`\input` into the files they name, producing one document-ordered list of
//! [`OutlineNode`]s. The hierarchy is implied by levels and recovered by [`Outline`].
//!
//! ```no_run
//! use latex_outline::{DocumentTreeBuilder, MemoryResolver, Buffer, SourceId};
//!
//! let resolver = MemoryResolver::new().with("intro.tex", "\\subsection{Nested}");
//! let root = Buffer::new(SourceId::new("main.tex"), "\\section{Start}\n\\input{intro}");
//! let nodes = DocumentTreeBuilder::new(resolver).build(&root).unwrap();
//! assert_eq!(nodes[1].title, "Nested");
//! ```
#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod builder;
pub mod config;
pub mod error;
pub mod outline;
pub mod position;
pub mod resolve;
pub mod scanner;
pub mod schedule;
pub mod source;
pub mod title;
pub mod ui;
pub mod watch;

pub use builder::{BuildOutput, DocumentTreeBuilder, InclusionContext};
pub use error::{Error, Result};
pub use outline::{Outline, OutlineNode};
pub use position::{Position, Range};
pub use resolve::{FsResolver, MemoryResolver, NoInclusions, Resolver};
pub use source::{Buffer, SourceId, TextSource};
