mod app;
mod config;
mod drag;
mod error;
mod icon;
mod input;
mod kanban_board;
mod logging;
mod task;
mod ui;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{error, info};

use crate::app::{App, AppOptions};
use crate::config::Config;
use crate::kanban_board::{BoardSeed, BoardStore, CategorySelector};

#[derive(Parser)]
#[command(name = "kanban-board", version, about = "Terminal kanban board with drag-and-drop cards")]
struct Cli {
    /// Config file (defaults to <config dir>/kanban-board/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON seed file with the boards to load
    #[arg(long, global = true)]
    seed: Option<PathBuf>,

    /// Board to open first
    #[arg(long, global = true)]
    category: Option<String>,

    /// Log file (the terminal itself is never logged to)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive board (default)
    Tui,
    /// Print the columns of one board
    List {
        /// Board to print; falls back to the first board when unknown
        #[arg(long)]
        category: Option<String>,
    },
    /// Print every board with its task count
    Categories,
    /// Validate a seed file and report what it contains
    CheckSeed { path: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(Config::default_path);
    let config = match &config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.log_file.clone())
        .unwrap_or_else(Config::default_log_file);
    let _guard = logging::init(&log_file, &config.log_level)?;
    info!(config = ?config_path, "starting kanban-board");

    let seed_path = cli.seed.clone().or_else(|| config.seed.clone());

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            let store = load_store(seed_path.as_deref())?;
            let options = AppOptions {
                theme: config.theme,
                sidebar_collapsed: config.sidebar_collapsed,
                initial_category: cli.category.or(config.default_category),
            };
            run_tui(App::new(store, options))
        }
        Command::List { category } => {
            let store = load_store(seed_path.as_deref())?;
            let wanted = category.or(cli.category).or(config.default_category);
            list_tasks(&store, wanted.as_deref());
            Ok(())
        }
        Command::Categories => {
            let store = load_store(seed_path.as_deref())?;
            for cat in store.categories() {
                println!("{} {} ({} tasks)", cat.icon.glyph(), cat.name, cat.task_count());
            }
            Ok(())
        }
        Command::CheckSeed { path } => {
            let store = load_store(Some(&path))?;
            println!(
                "{}: {} boards, {} tasks, ok",
                path.display(),
                store.categories().len(),
                store.task_count()
            );
            Ok(())
        }
    }
}

fn load_store(seed_path: Option<&Path>) -> anyhow::Result<BoardStore> {
    let seed = match seed_path {
        Some(path) => BoardSeed::from_path(path)
            .with_context(|| format!("failed to load seed {}", path.display()))?,
        None => BoardSeed::builtin().context("built-in seed is invalid")?,
    };
    BoardStore::from_seed(seed).context("seed failed validation")
}

fn list_tasks(store: &BoardStore, category: Option<&str>) {
    let selector = CategorySelector::new(store, category);
    let Some(cat) = store.category(selector.active()) else {
        return;
    };
    println!("{}", cat.name);
    for column in &cat.columns {
        println!("{} ({}):", column.title, column.tasks.len());
        for task in &column.tasks {
            println!("- [#{}] {} ({})", task.id, task.title, task.description);
        }
    }
}

fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        error!(%err, "event loop failed");
    }
    info!(revision = app.store.revision(), "exiting, board discarded");
    result.context("terminal event loop failed")
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let action = input::map_key(key, &app.mode, app.focus);
            app.apply(action);
            if app.should_quit {
                return Ok(());
            }
        }
    }
}
