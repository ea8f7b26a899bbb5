//! The state machine behind the interactive outline view.
//!
//! The view needs a single source of truth that can be interrogated and mutated as the user
//! navigates. Selection is an index into the outline's document-ordered nodes; collapsing a
//! heading hides its descendants without touching the outline itself. A rebuild swaps the outline
//! out wholesale and keeps the selection by index, since nodes carry no identity across builds.

use crate::outline::{Outline, OutlineNode};
use crate::position::Position;
use crate::source::SourceId;
use std::collections::HashSet;

/// Selection, folding and status for one root document's outline.
pub struct AppState {
    /// Latest outline of the document.
    pub outline: Outline,
    /// Root document the cursor refers to.
    pub root: SourceId,
    /// Selected node, an index into the outline.
    pub current_index: usize,
    /// Headings whose descendants are hidden.
    pub collapsed: HashSet<usize>,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    /// Editing position in the root document the selection follows, if any.
    pub cursor: Option<Position>,
}

impl AppState {
    #[must_use]
    /// Initialises the view with everything expanded and the first heading selected.
    pub fn new(outline: Outline, root: SourceId) -> Self {
        Self {
            outline,
            root,
            current_index: 0,
            collapsed: HashSet::new(),
            message: None,
            cursor: None,
        }
    }

    #[must_use]
    /// The selected heading, if the outline has any.
    pub fn current(&self) -> Option<&OutlineNode> {
        self.outline.get(self.current_index)
    }

    #[must_use]
    /// Whether `index` is folded away under a collapsed ancestor.
    pub fn is_hidden(&self, index: usize) -> bool {
        self.outline
            .ancestors(index)
            .iter()
            .any(|ancestor| self.collapsed.contains(ancestor))
    }

    #[must_use]
    /// Indices currently shown, in document order.
    pub fn visible_nodes(&self) -> Vec<usize> {
        (0..self.outline.len())
            .filter(|&i| !self.is_hidden(i))
            .collect()
    }

    #[must_use]
    /// Next shown heading after the selection.
    pub fn find_next_visible(&self) -> Option<usize> {
        ((self.current_index + 1)..self.outline.len()).find(|&i| !self.is_hidden(i))
    }

    #[must_use]
    /// Previous shown heading before the selection.
    pub fn find_prev_visible(&self) -> Option<usize> {
        (0..self.current_index).rev().find(|&i| !self.is_hidden(i))
    }

    #[must_use]
    /// Moves to the containing heading in the document hierarchy.
    pub fn navigate_to_parent(&self) -> Option<usize> {
        self.outline.parent(self.current_index)
    }

    #[must_use]
    /// Descends to the first nested heading.
    pub fn navigate_to_first_child(&self) -> Option<usize> {
        self.outline.children(self.current_index).first().copied()
    }

    #[must_use]
    /// Finds the next heading with the same parent.
    pub fn navigate_to_next_sibling(&self) -> Option<usize> {
        self.outline.next_sibling(self.current_index)
    }

    #[must_use]
    /// Finds the previous heading with the same parent.
    pub fn navigate_to_prev_sibling(&self) -> Option<usize> {
        self.outline.prev_sibling(self.current_index)
    }

    #[must_use]
    /// Jumps to the first heading in the document.
    pub fn navigate_to_first(&self) -> Option<usize> {
        (!self.outline.is_empty()).then_some(0)
    }

    #[must_use]
    /// Jumps to the last shown heading in the document.
    pub fn navigate_to_last(&self) -> Option<usize> {
        self.visible_nodes().last().copied()
    }

    /// Folds or unfolds the selected heading. Returns whether anything changed.
    pub fn toggle_collapse(&mut self) -> bool {
        if !self.outline.has_children(self.current_index) {
            return false;
        }
        if !self.collapsed.remove(&self.current_index) {
            self.collapsed.insert(self.current_index);
        }
        true
    }

    /// Folds the selection if it is open, otherwise moves to its parent.
    pub fn collapse_or_parent(&mut self) {
        if self.outline.has_children(self.current_index)
            && !self.collapsed.contains(&self.current_index)
        {
            self.collapsed.insert(self.current_index);
        } else if let Some(parent) = self.navigate_to_parent() {
            self.current_index = parent;
        }
    }

    /// Unfolds the selection if it is folded, otherwise moves to its first child.
    pub fn expand_or_child(&mut self) {
        if self.collapsed.remove(&self.current_index) {
            return;
        }
        if let Some(child) = self.navigate_to_first_child() {
            self.current_index = child;
        }
    }

    /// Selects `index`, unfolding its ancestors so it is shown.
    pub fn reveal(&mut self, index: usize) {
        for ancestor in self.outline.ancestors(index) {
            self.collapsed.remove(&ancestor);
        }
        self.current_index = index;
    }

    /// Follows an editing position: selects the heading enclosing it in the root document.
    ///
    /// Before the first heading the selection is left alone.
    pub fn sync_to_cursor(&mut self, cursor: Position) {
        self.cursor = Some(cursor);
        if let Some(index) = self.outline.node_at(&self.root, cursor) {
            self.reveal(index);
        }
    }

    /// Swaps in a freshly built outline.
    ///
    /// The selection survives by index while it is still in range; folds on headings that no
    /// longer exist are dropped. A tracked cursor is re-applied afterwards.
    pub fn replace_outline(&mut self, outline: Outline) {
        let len = outline.len();
        self.outline = outline;
        if self.current_index >= len {
            self.current_index = len.saturating_sub(1);
        }
        self.collapsed
            .retain(|&i| i < len && self.outline.has_children(i));
        if let Some(cursor) = self.cursor {
            self.sync_to_cursor(cursor);
        }
    }

    #[must_use]
    /// Human-readable `file:line:column` (1-based) of a heading.
    pub fn location(&self, index: usize) -> Option<String> {
        let node = self.outline.get(index)?;
        Some(format!(
            "{}:{}:{}",
            node.source,
            node.anchor.row + 1,
            node.anchor.column + 1
        ))
    }

    /// Reports where the selected heading lives and moves the tracked cursor there.
    pub fn jump(&mut self) -> Option<String> {
        let location = self.location(self.current_index)?;
        let anchor = self
            .current()
            .filter(|node| node.source == self.root)
            .map(|node| node.anchor);
        if anchor.is_some() {
            self.cursor = anchor;
        }
        self.message = Some(location.clone());
        Some(location)
    }

    #[must_use]
    /// Titles from the outermost ancestor down to the selection.
    pub fn breadcrumb(&self) -> Vec<&str> {
        let mut trail: Vec<&str> = self
            .outline
            .ancestors(self.current_index)
            .iter()
            .filter_map(|&i| self.outline.get(i))
            .map(|node| node.title.as_str())
            .collect();
        trail.reverse();
        if let Some(node) = self.current() {
            trail.push(&node.title);
        }
        trail
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
