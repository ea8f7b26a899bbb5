//! latex-outline: print or browse the section outline of a LaTeX document.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use latex_outline::app_state::AppState;
use latex_outline::config::Config;
use latex_outline::schedule::{RescanScheduler, Trigger, UpdateFrequency};
use latex_outline::watch::FileWatch;
use latex_outline::{
    ui, Buffer, BuildOutput, DocumentTreeBuilder, Error, FsResolver, Outline, Position, SourceId, TextSource,
};
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Upper bound on how long the view waits for input before checking files again.
const WATCH_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "latex-outline")]
#[command(about = "Section outline of a LaTeX document, across \\input and \\include", long_about = None)]
struct Args {
    /// Root document of the outline
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Print the outline nodes as JSON
    #[arg(long, conflicts_with = "interactive")]
    json: bool,

    /// Mark the heading enclosing this position of the root file (1-based)
    #[arg(long, value_name = "LINE:COLUMN", value_parser = parse_cursor)]
    cursor: Option<Position>,

    /// Browse the outline interactively, rescanning as files change
    #[arg(long, short = 'i')]
    interactive: bool,

    /// Do not descend into \include and \input
    #[arg(long)]
    no_follow: bool,

    /// Rescan frequency: High, Medium, Low or "On Save Only"
    #[arg(long, value_name = "LABEL")]
    frequency: Option<String>,

    /// Configuration file (defaults to latex-outline.toml when present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn parse_cursor(raw: &str) -> Result<Position, String> {
    let (line, column) = raw.split_once(':').unwrap_or((raw, "1"));
    let line: usize = line
        .trim()
        .parse()
        .map_err(|_| format!("invalid line '{line}'"))?;
    let column: usize = column
        .trim()
        .parse()
        .map_err(|_| format!("invalid column '{column}'"))?;
    if line == 0 || column == 0 {
        return Err("line and column are 1-based".to_string());
    }
    Ok(Position::new(line - 1, column - 1))
}

fn init_logging(interactive: bool) {
    // Log lines would tear the alternate screen, so the view stays quiet unless asked.
    let fallback = if interactive {
        "off"
    } else {
        "latex_outline=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.interactive);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("latex-outline: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    let mut cfg = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    // Override config with command line args
    if args.no_follow {
        cfg.follow_inclusions = false;
    }
    if let Some(label) = args.frequency {
        cfg.update_frequency = label;
    }
    let frequency = cfg.frequency()?;

    let builder = DocumentTreeBuilder::for_file(&args.path, cfg.file_extensions.clone())
        .follow_inclusions(cfg.follow_inclusions);
    let root = Buffer::open(&args.path)?;
    let BuildOutput { nodes, sources } = builder.build_with_sources(&root)?;
    let outline = Outline::new(nodes);
    let root_id = root.id().clone();

    if args.interactive {
        let mut state = AppState::new(outline, root_id);
        if let Some(cursor) = args.cursor {
            state.sync_to_cursor(cursor);
        }
        return run_tui(state, &builder, &args.path, &sources, frequency);
    }

    if args.json {
        let json = serde_json::to_string_pretty(outline.nodes()).map_err(io::Error::other)?;
        println!("{json}");
    } else if outline.is_empty() {
        eprintln!("No headings found in {}", args.path.display());
    } else {
        let marked = args
            .cursor
            .and_then(|cursor| outline.node_at(&root_id, cursor));
        print!("{}", outline.render(marked));
    }
    Ok(())
}

/// Every file a build read, headings or not.
fn watched_paths(sources: &[SourceId]) -> Vec<PathBuf> {
    sources
        .iter()
        .map(|source| source.as_path().to_path_buf())
        .collect()
}

fn run_tui(
    mut app: AppState,
    builder: &DocumentTreeBuilder<FsResolver>,
    root_path: &Path,
    sources: &[SourceId],
    frequency: UpdateFrequency,
) -> Result<(), Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, builder, root_path, sources, frequency);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    if let Some(location) = app.location(app.current_index) {
        println!("{location}");
    }
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    builder: &DocumentTreeBuilder<FsResolver>,
    root_path: &Path,
    sources: &[SourceId],
    frequency: UpdateFrequency,
) -> Result<(), Error> {
    let mut scheduler = RescanScheduler::new(frequency);
    let mut watch = FileWatch::new(watched_paths(sources));

    loop {
        terminal.draw(|f| ui::draw(f, app, frequency))?;

        let timeout = scheduler
            .time_until_due(Instant::now())
            .map_or(WATCH_INTERVAL, |due| due.min(WATCH_INTERVAL));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !handle_key(app, &mut scheduler, key) {
                    return Ok(());
                }
            }
        }

        if watch.changed() {
            scheduler.file_changed(Instant::now());
        }
        if scheduler.take_due(Instant::now()) {
            // A failed rescan keeps the previous outline and watch list.
            match builder.build_file_with_sources(root_path) {
                Ok(output) => {
                    app.replace_outline(Outline::new(output.nodes));
                    watch.retarget(watched_paths(&output.sources));
                }
                Err(e) => app.message = Some(format!("Rescan failed: {e}")),
            }
        }
    }
}

/// Applies one key press. Returns `false` when the view should close.
fn handle_key(app: &mut AppState, scheduler: &mut RescanScheduler, key: KeyEvent) -> bool {
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    app.message = None;

    let target = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return false,
        KeyCode::Up if shift => app.navigate_to_prev_sibling(),
        KeyCode::Up | KeyCode::Char('k') => app.find_prev_visible(),
        KeyCode::Down if shift => app.navigate_to_next_sibling(),
        KeyCode::Down | KeyCode::Char('j') => app.find_next_visible(),
        KeyCode::Home => app.navigate_to_first(),
        KeyCode::End => app.navigate_to_last(),
        KeyCode::Left | KeyCode::Char('h') => {
            app.collapse_or_parent();
            None
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.expand_or_child();
            None
        }
        KeyCode::Char(' ') => {
            app.toggle_collapse();
            None
        }
        KeyCode::Enter => {
            app.jump();
            None
        }
        KeyCode::Char('r') => {
            scheduler.request(Trigger::Saved, Instant::now());
            app.message = Some("Rescanning".to_string());
            None
        }
        _ => None,
    };

    if let Some(index) = target {
        app.current_index = index;
    }
    true
}
