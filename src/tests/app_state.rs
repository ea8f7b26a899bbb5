use super::AppState;
use crate::outline::{Outline, OutlineNode};
use crate::position::Position;
use crate::source::SourceId;

fn node(source: &str, title: &str, level: u8, row: usize) -> OutlineNode {
    OutlineNode {
        title: title.to_string(),
        level,
        anchor: Position::new(row, 0),
        source: SourceId::new(source),
    }
}

/// Intro(2) > Background(3) > History(4), Method(3); Appendix(2) from another file.
fn state() -> AppState {
    let outline = Outline::new(vec![
        node("main.tex", "Intro", 2, 0),
        node("main.tex", "Background", 3, 4),
        node("main.tex", "History", 4, 8),
        node("main.tex", "Method", 3, 12),
        node("appendix.tex", "Appendix", 2, 0),
    ]);
    AppState::new(outline, SourceId::new("main.tex"))
}

#[test]
fn test_linear_navigation_skips_collapsed() {
    let mut app = state();
    assert_eq!(app.find_next_visible(), Some(1));

    app.current_index = 1;
    assert!(app.toggle_collapse());
    assert_eq!(app.visible_nodes(), vec![0, 1, 3, 4]);
    assert_eq!(app.find_next_visible(), Some(3));

    app.current_index = 3;
    assert_eq!(app.find_prev_visible(), Some(1));
    assert_eq!(app.navigate_to_last(), Some(4));
    assert_eq!(app.navigate_to_first(), Some(0));
}

#[test]
fn test_hierarchy_navigation() {
    let mut app = state();
    assert_eq!(app.navigate_to_first_child(), Some(1));
    assert_eq!(app.navigate_to_next_sibling(), Some(4));
    assert_eq!(app.navigate_to_parent(), None);

    app.current_index = 3;
    assert_eq!(app.navigate_to_parent(), Some(0));
    assert_eq!(app.navigate_to_prev_sibling(), Some(1));
    assert_eq!(app.navigate_to_next_sibling(), None);
}

#[test]
fn test_toggle_on_leaf_does_nothing() {
    let mut app = state();
    app.current_index = 2;

    assert!(!app.toggle_collapse());
    assert!(app.collapsed.is_empty());
}

#[test]
fn test_collapse_or_parent_then_expand_or_child() {
    let mut app = state();
    app.current_index = 2;

    app.collapse_or_parent();
    assert_eq!(app.current_index, 1);

    app.collapse_or_parent();
    assert!(app.collapsed.contains(&1));
    assert!(app.is_hidden(2));

    app.expand_or_child();
    assert!(!app.collapsed.contains(&1));
    assert_eq!(app.current_index, 1);

    app.expand_or_child();
    assert_eq!(app.current_index, 2);
}

#[test]
fn test_sync_to_cursor_reveals_enclosing_heading() {
    let mut app = state();
    app.collapsed.insert(0);
    app.collapsed.insert(1);

    app.sync_to_cursor(Position::new(9, 3));
    assert_eq!(app.current_index, 2);
    assert!(!app.is_hidden(2));

    app.current_index = 3;
    app.sync_to_cursor(Position::new(0, 0));
    assert_eq!(app.current_index, 0);
}

#[test]
fn test_replace_outline_keeps_selection_in_range() {
    let mut app = state();
    app.current_index = 4;
    app.collapsed.insert(1);

    app.replace_outline(Outline::new(vec![
        node("main.tex", "Intro", 2, 0),
        node("main.tex", "Method", 3, 12),
    ]));

    assert_eq!(app.current_index, 1);
    assert!(app.collapsed.is_empty());
}

#[test]
fn test_replace_outline_follows_tracked_cursor() {
    let mut app = state();
    app.sync_to_cursor(Position::new(13, 0));
    assert_eq!(app.current_index, 3);

    app.replace_outline(Outline::new(vec![
        node("main.tex", "Intro", 2, 0),
        node("main.tex", "Inserted", 3, 2),
        node("main.tex", "Background", 3, 6),
        node("main.tex", "Method", 3, 14),
    ]));

    assert_eq!(app.current_index, 2);
}

#[test]
fn test_jump_reports_location_and_moves_cursor() {
    let mut app = state();
    app.current_index = 3;

    assert_eq!(app.jump().as_deref(), Some("main.tex:13:1"));
    assert_eq!(app.message.as_deref(), Some("main.tex:13:1"));
    assert_eq!(app.cursor, Some(Position::new(12, 0)));

    app.current_index = 4;
    assert_eq!(app.jump().as_deref(), Some("appendix.tex:1:1"));
    assert_eq!(app.cursor, Some(Position::new(12, 0)));
}

#[test]
fn test_breadcrumb() {
    let mut app = state();
    app.current_index = 2;

    assert_eq!(app.breadcrumb(), vec!["Intro", "Background", "History"]);
    assert_eq!(app.current().map(|n| n.level), Some(4));
}

#[test]
fn test_empty_outline() {
    let app = AppState::new(Outline::default(), SourceId::new("main.tex"));

    assert!(app.current().is_none());
    assert!(app.breadcrumb().is_empty());
    assert_eq!(app.navigate_to_first(), None);
    assert_eq!(app.location(0), None);
}
