//! Assembling the outline of a document and everything it includes.
//!
//! The builder scans a source, keeps the headings the title parser accepts and, at each
//! `\include` or `\input`, splices in the outline of the included source right where the
//! command sits. Each call returns its own list; the including call concatenates.

use crate::error::Result;
use crate::outline::OutlineNode;
use crate::position::Position;
use crate::resolve::{FsResolver, Resolver};
use crate::scanner::scan;
use crate::source::{Buffer, SourceId, TextSource};
use crate::title::{InclusionTarget, ParseOutcome, TitleParser};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug)]
/// Where an included source was pulled in from.
///
/// Contexts chain back to the root, so the full inclusion path is available for cycle checks
/// and for reporting which file referenced a problem target.
pub struct InclusionContext<'a> {
    /// Position of the inclusion command in the including source.
    pub handle_start: Position,
    /// Source containing the inclusion command.
    pub parent: &'a SourceId,
    /// Context of the including source itself, `None` when it is the root.
    pub outer: Option<&'a InclusionContext<'a>>,
}

impl InclusionContext<'_> {
    #[must_use]
    /// Whether `id` is already being expanded somewhere along this chain.
    pub fn contains(&self, id: &SourceId) -> bool {
        self.parent == id || self.outer.is_some_and(|outer| outer.contains(id))
    }

    #[must_use]
    /// Number of inclusions between the root and the source this context leads into.
    pub fn depth(&self) -> usize {
        1 + self.outer.map_or(0, InclusionContext::depth)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// A build's headings together with every source it read.
pub struct BuildOutput {
    /// Headings in document order.
    pub nodes: Vec<OutlineNode>,
    /// The root first, then each resolved inclusion in the order it was reached, whether or not
    /// it contributed headings.
    pub sources: Vec<SourceId>,
}

/// Builds outlines, following inclusions through a [`Resolver`].
pub struct DocumentTreeBuilder<R> {
    resolver: R,
    follow_inclusions: bool,
}

impl<R: Resolver> DocumentTreeBuilder<R> {
    #[must_use]
    /// Builder resolving inclusions with `resolver`.
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            follow_inclusions: true,
        }
    }

    #[must_use]
    /// Whether `\include` and `\input` are descended into; they are by default.
    pub fn follow_inclusions(mut self, follow: bool) -> Self {
        self.follow_inclusions = follow;
        self
    }

    /// Outline of `root` and, transitively, of every source it includes.
    ///
    /// Malformed markup never fails the build; offending commands are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error only when a source breaks the [`TextSource`] contract.
    pub fn build<S: TextSource + ?Sized>(&self, root: &S) -> Result<Vec<OutlineNode>> {
        self.build_with_sources(root).map(|output| output.nodes)
    }

    /// Like [`Self::build`], also listing the sources read along the way.
    ///
    /// # Errors
    ///
    /// Returns an error only when a source breaks the [`TextSource`] contract.
    pub fn build_with_sources<S: TextSource + ?Sized>(&self, root: &S) -> Result<BuildOutput> {
        debug!(root = %root.id(), "building outline");
        let mut sources = vec![root.id().clone()];
        let nodes = self.append_from(root, None, &mut sources)?;
        debug!(
            root = %root.id(),
            headings = nodes.len(),
            sources = sources.len(),
            "outline built"
        );
        Ok(BuildOutput { nodes, sources })
    }

    /// Reads `path` and builds its outline.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Read`] if the root file cannot be read.
    pub fn build_file(&self, path: &Path) -> Result<Vec<OutlineNode>> {
        self.build_file_with_sources(path).map(|output| output.nodes)
    }

    /// Reads `path` and builds its outline, listing the sources read.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Read`] if the root file cannot be read.
    pub fn build_file_with_sources(&self, path: &Path) -> Result<BuildOutput> {
        let root = Buffer::open(path)?;
        self.build_with_sources(&root)
    }

    fn append_from<S: TextSource + ?Sized>(
        &self,
        source: &S,
        context: Option<&InclusionContext<'_>>,
        sources: &mut Vec<SourceId>,
    ) -> Result<Vec<OutlineNode>> {
        let mut nodes = Vec::new();
        for raw in scan(source) {
            match TitleParser::new(raw, source).parse()? {
                ParseOutcome::Heading(node) => nodes.push(node),
                ParseOutcome::Inclusion(target) if self.follow_inclusions => {
                    nodes.extend(self.descend(source, &target, context, sources)?);
                }
                ParseOutcome::Inclusion(_) | ParseOutcome::Rejected => {}
            }
        }
        Ok(nodes)
    }

    fn descend<S: TextSource + ?Sized>(
        &self,
        source: &S,
        target: &InclusionTarget,
        outer: Option<&InclusionContext<'_>>,
        sources: &mut Vec<SourceId>,
    ) -> Result<Vec<OutlineNode>> {
        let Some(included) = self.resolver.resolve(&target.path, source.id()) else {
            return Ok(Vec::new());
        };
        if !sources.contains(included.id()) {
            sources.push(included.id().clone());
        }
        let context = InclusionContext {
            handle_start: target.anchor,
            parent: source.id(),
            outer,
        };
        if context.contains(included.id()) {
            warn!(
                included = %included.id(),
                from = %context.parent,
                at = %context.handle_start,
                "inclusion cycle cut"
            );
            return Ok(Vec::new());
        }
        debug!(
            included = %included.id(),
            depth = context.depth(),
            "descending into inclusion"
        );
        self.append_from(&included, Some(&context), sources)
    }
}

impl DocumentTreeBuilder<FsResolver> {
    #[must_use]
    /// Builder for a file on disk, resolving inclusions relative to its directory.
    pub fn for_file(root: &Path, extensions: Vec<String>) -> Self {
        Self::new(FsResolver::for_root(root, extensions))
    }
}

#[cfg(test)]
#[path = "tests/builder.rs"]
mod tests;
