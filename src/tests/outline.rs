use super::{Outline, OutlineNode};
use crate::position::Position;
use crate::source::SourceId;

fn node(title: &str, level: u8, row: usize) -> OutlineNode {
    node_in("main.tex", title, level, row)
}

fn node_in(source: &str, title: &str, level: u8, row: usize) -> OutlineNode {
    OutlineNode {
        title: title.to_string(),
        level,
        anchor: Position::new(row, 0),
        source: SourceId::new(source),
    }
}

fn book() -> Outline {
    Outline::new(vec![
        node("A", 2, 0),
        node("B", 3, 2),
        node("C", 4, 4),
        node("D", 3, 6),
        node("E", 2, 8),
    ])
}

#[test]
fn test_parents_and_children() {
    let outline = book();

    assert_eq!(outline.roots(), &[0, 4]);
    assert_eq!(outline.parent(0), None);
    assert_eq!(outline.parent(1), Some(0));
    assert_eq!(outline.parent(2), Some(1));
    assert_eq!(outline.parent(3), Some(0));
    assert_eq!(outline.children(0), &[1, 3]);
    assert!(outline.has_children(1));
    assert!(!outline.has_children(2));
    assert_eq!(outline.children(42), &[] as &[usize]);
}

#[test]
fn test_skipped_levels_attach_to_nearest_smaller() {
    let outline = Outline::new(vec![node("a", 3, 0), node("b", 5, 1), node("c", 4, 2)]);

    assert_eq!(outline.parent(1), Some(0));
    assert_eq!(outline.parent(2), Some(0));
    assert_eq!(outline.children(0), &[1, 2]);
}

#[test]
fn test_ancestors_depth_and_siblings() {
    let outline = book();

    assert_eq!(outline.ancestors(2), vec![1, 0]);
    assert_eq!(outline.depth(2), 2);
    assert_eq!(outline.depth(4), 0);
    assert_eq!(outline.next_sibling(1), Some(3));
    assert_eq!(outline.prev_sibling(3), Some(1));
    assert_eq!(outline.next_sibling(3), None);
    assert_eq!(outline.next_sibling(0), Some(4));
    assert_eq!(outline.prev_sibling(0), None);
}

#[test]
fn test_node_at_finds_enclosing_heading() {
    let outline = Outline::new(vec![
        node("Intro", 3, 2),
        node_in("ch.tex", "Included", 4, 0),
        node("Body", 3, 10),
    ]);
    let main = SourceId::new("main.tex");

    assert_eq!(outline.node_at(&main, Position::new(0, 0)), None);
    assert_eq!(outline.node_at(&main, Position::new(2, 0)), Some(0));
    assert_eq!(outline.node_at(&main, Position::new(5, 3)), Some(0));
    assert_eq!(outline.node_at(&main, Position::new(12, 0)), Some(2));
    assert_eq!(
        outline.node_at(&SourceId::new("ch.tex"), Position::new(3, 0)),
        Some(1)
    );
}

#[test]
fn test_sources_in_first_seen_order() {
    let outline = Outline::new(vec![
        node("Intro", 3, 2),
        node_in("ch.tex", "Included", 4, 0),
        node("Body", 3, 10),
    ]);

    assert_eq!(
        outline.sources(),
        vec![&SourceId::new("main.tex"), &SourceId::new("ch.tex")]
    );
}

#[test]
fn test_render_draws_tree() {
    assert_eq!(
        book().render(Some(2)),
        "  A\n  ├── B\n> │   └── C\n  └── D\n  E\n"
    );
}

#[test]
fn test_tree_prefixes_close_finished_branches() {
    let outline = Outline::new(vec![node("A", 2, 0), node("B", 3, 1), node("C", 4, 2)]);

    assert_eq!(outline.tree_prefixes(), vec!["", "└── ", "    └── "]);
}

#[test]
fn test_empty_outline() {
    let outline = Outline::new(Vec::new());

    assert!(outline.is_empty());
    assert!(outline.roots().is_empty());
    assert_eq!(outline.render(None), "");
}
