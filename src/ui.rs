//! The UI renders the application state into a navigable outline.
//!
//! One screen: a breadcrumb of the selection's ancestors, the outline as a tree drawn with
//! box-drawing characters, and a help bar that doubles as the status line.

use crate::app_state::AppState;
use crate::schedule::UpdateFrequency;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Fold marker shown before a heading's title.
fn fold_marker(app: &AppState, index: usize) -> &'static str {
    if !app.outline.has_children(index) {
        "  "
    } else if app.collapsed.contains(&index) {
        "▸ "
    } else {
        "▾ "
    }
}

/// Style for a heading by level; parts and chapters stand out.
fn level_style(level: u8) -> Style {
    match level {
        1 => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
        2 => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        3 => Style::default().fg(Color::Blue),
        _ => Style::default(),
    }
}

/// Renders the outline view.
pub fn draw(f: &mut Frame, app: &AppState, frequency: UpdateFrequency) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Breadcrumb
            Constraint::Min(0),    // Outline
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let breadcrumb = Paragraph::new(app.breadcrumb().join(" > "))
        .block(Block::default().borders(Borders::ALL).title("Navigation"));
    f.render_widget(breadcrumb, chunks[0]);

    let title = format!("Document Tree ({})", frequency.label());
    let block = Block::default().borders(Borders::ALL).title(title);

    if app.outline.is_empty() {
        let empty = Paragraph::new("No headings found").block(block);
        f.render_widget(empty, chunks[1]);
    } else {
        let prefixes = app.outline.tree_prefixes();
        let visible = app.visible_nodes();

        let items: Vec<ListItem> = visible
            .iter()
            .map(|&i| {
                let node = &app.outline.nodes()[i];
                let mut title_style = level_style(node.level);
                if node.source != app.root {
                    title_style = title_style.add_modifier(Modifier::ITALIC);
                }
                let line = Line::from(vec![
                    Span::styled(prefixes[i].clone(), Style::default().fg(Color::DarkGray)),
                    Span::raw(fold_marker(app, i)),
                    Span::styled(node.title.clone(), title_style),
                ]);
                ListItem::new(line)
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state =
            ListState::default().with_selected(visible.iter().position(|&i| i == app.current_index));
        f.render_stateful_widget(list, chunks[1], &mut state);
    }

    let help = app.message.clone().unwrap_or_else(|| {
        "↑/↓: Navigate | ←/→: Fold/Parent/Child | Shift+↑/↓: Siblings | Enter: Locate | r: Rescan | q: Quit"
            .to_string()
    });
    let help_widget = Paragraph::new(help).block(Block::default().borders(Borders::ALL));
    f.render_widget(help_widget, chunks[2]);
}
