//! Outline nodes and the tree they imply.
//!
//! A build produces a flat list of [`OutlineNode`] in document order. The hierarchy is never
//! stored by the builder: a node's parent is the nearest earlier node with a strictly smaller
//! level. [`Outline`] recovers those links once so that renderers and navigation can ask for
//! parents, children and siblings by index, the same way the section list of a markdown
//! navigator keeps `parent_index` and `children_indices` next to each heading.

use crate::position::Position;
use crate::source::SourceId;
use serde::Serialize;
use std::fmt::Write;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// One heading of the document outline.
pub struct OutlineNode {
    /// Heading text, comment-free with whitespace collapsed.
    pub title: String,
    /// 1 for `\part` through 7 for `\subparagraph`.
    pub level: u8,
    /// Position of the command's backslash in its own source.
    pub anchor: Position,
    /// Source the heading was found in.
    pub source: SourceId,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Document-ordered headings with their derived parent/child links.
pub struct Outline {
    nodes: Vec<OutlineNode>,
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
}

impl Outline {
    #[must_use]
    /// Links each node to the nearest preceding node of a smaller level.
    pub fn new(nodes: Vec<OutlineNode>) -> Self {
        let mut parents = Vec::with_capacity(nodes.len());
        let mut children = vec![Vec::new(); nodes.len()];
        let mut roots = Vec::new();
        // Most recent node still open at each depth, outermost first.
        let mut open: Vec<usize> = Vec::new();

        for (i, node) in nodes.iter().enumerate() {
            while open.last().is_some_and(|&top| nodes[top].level >= node.level) {
                open.pop();
            }
            let parent = open.last().copied();
            match parent {
                Some(p) => children[p].push(i),
                None => roots.push(i),
            }
            parents.push(parent);
            open.push(i);
        }

        Self {
            nodes,
            parents,
            children,
            roots,
        }
    }

    #[must_use]
    /// All nodes in document order.
    pub fn nodes(&self) -> &[OutlineNode] {
        &self.nodes
    }

    #[must_use]
    /// Node at `index`.
    pub fn get(&self, index: usize) -> Option<&OutlineNode> {
        self.nodes.get(index)
    }

    #[must_use]
    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    /// Whether the document has no headings.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    /// Nodes without a parent, in document order.
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    #[must_use]
    /// Containing heading of `index`.
    pub fn parent(&self, index: usize) -> Option<usize> {
        self.parents.get(index).copied().flatten()
    }

    #[must_use]
    /// Directly nested headings of `index`.
    pub fn children(&self, index: usize) -> &[usize] {
        self.children.get(index).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    /// Whether anything is nested under `index`.
    pub fn has_children(&self, index: usize) -> bool {
        !self.children(index).is_empty()
    }

    #[must_use]
    /// Ancestors of `index`, nearest first.
    pub fn ancestors(&self, index: usize) -> Vec<usize> {
        std::iter::successors(self.parent(index), |&i| self.parent(i)).collect()
    }

    #[must_use]
    /// Number of ancestors; roots sit at depth 0.
    pub fn depth(&self, index: usize) -> usize {
        self.ancestors(index).len()
    }

    fn siblings(&self, index: usize) -> &[usize] {
        match self.parent(index) {
            Some(parent) => self.children(parent),
            None => &self.roots,
        }
    }

    #[must_use]
    /// Following node sharing the same parent.
    pub fn next_sibling(&self, index: usize) -> Option<usize> {
        let siblings = self.siblings(index);
        let at = siblings.iter().position(|&i| i == index)?;
        siblings.get(at + 1).copied()
    }

    #[must_use]
    /// Preceding node sharing the same parent.
    pub fn prev_sibling(&self, index: usize) -> Option<usize> {
        let siblings = self.siblings(index);
        let at = siblings.iter().position(|&i| i == index)?;
        at.checked_sub(1).map(|before| siblings[before])
    }

    #[must_use]
    /// Distinct sources contributing headings, in first-seen order.
    pub fn sources(&self) -> Vec<&SourceId> {
        let mut seen: Vec<&SourceId> = Vec::new();
        for node in &self.nodes {
            if !seen.contains(&&node.source) {
                seen.push(&node.source);
            }
        }
        seen
    }

    #[must_use]
    /// Heading enclosing `cursor` in `source`: the last one whose anchor is not after it.
    ///
    /// Returns `None` when the cursor comes before every heading of that source.
    pub fn node_at(&self, source: &SourceId, cursor: Position) -> Option<usize> {
        self.nodes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, node)| &node.source == source && node.anchor <= cursor)
            .map(|(i, _)| i)
    }

    #[must_use]
    /// Box-drawing prefix for every node; roots get none.
    pub fn tree_prefixes(&self) -> Vec<String> {
        (0..self.nodes.len())
            .map(|index| {
                if self.parent(index).is_none() {
                    return String::new();
                }
                let mut prefix = String::new();
                // Roots draw no guide column, so skip the outermost ancestor.
                let mut lineage = self.ancestors(index);
                lineage.pop();
                for ancestor in lineage.into_iter().rev() {
                    if self.next_sibling(ancestor).is_some() {
                        prefix.push_str("│   ");
                    } else {
                        prefix.push_str("    ");
                    }
                }
                if self.next_sibling(index).is_some() {
                    prefix.push_str("├── ");
                } else {
                    prefix.push_str("└── ");
                }
                prefix
            })
            .collect()
    }

    #[must_use]
    /// Plain-text tree, one heading per line, with `marked` flagged by a leading `>`.
    pub fn render(&self, marked: Option<usize>) -> String {
        let mut out = String::new();
        for (index, prefix) in self.tree_prefixes().iter().enumerate() {
            let marker = if Some(index) == marked { "> " } else { "  " };
            let _ = writeln!(out, "{marker}{prefix}{}", self.nodes[index].title);
        }
        out
    }
}

#[cfg(test)]
#[path = "tests/outline.rs"]
mod tests;
