mod api;
mod app;
mod data;
mod format;
mod modal;
mod notifier;
mod settings;
mod theme;
mod ui;
mod view;

use anyhow::{Context, Result};
use api::HttpTaskApi;
use app::App;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use theme::{ThemeController, ThemeStore};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "tarefas-board",
    about = "Terminal client for the tarefas task list"
)]
struct Cli {
    /// Backend base URL (serves /api/tarefas)
    #[arg(short, long)]
    api_url: Option<String>,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// File holding the persisted theme preference
    #[arg(long)]
    state_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = settings::Settings::load();

    // CLI args override config, config overrides defaults.
    let api_url = cli
        .api_url
        .or(cfg.api_url)
        .unwrap_or_else(|| settings::DEFAULT_API_URL.to_string());
    let log_file = cli
        .log_file
        .or(cfg.log_file)
        .unwrap_or_else(settings::default_log_file);
    let state_file = cli.state_file.or(cfg.state_file).or_else(settings::default_state_file);

    let _log_guard = init_tracing(&log_file)?;
    tracing::info!(%api_url, log_file = %log_file.display(), "starting tarefas-board");

    let api = HttpTaskApi::new(&api_url).context("building HTTP client")?;
    let store = match state_file {
        Some(path) => ThemeStore::at(path),
        None => ThemeStore::in_memory(),
    };
    let theme = ThemeController::init(store);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(Arc::new(api), api_url, theme);
    app.load();

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "exiting after error");
    }
    result
}

/// File-backed subscriber; the terminal belongs to the UI.
fn init_tracing(log_file: &Path) -> Result<WorkerGuard> {
    let dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let file_name = log_file
        .file_name()
        .context("log file path has no file name")?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let init_result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init();
    if let Err(e) = init_result {
        eprintln!("Warning: tracing already initialised: {}", e);
    }

    Ok(guard)
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.tick();
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Poll for events with short timeout so finished requests show up promptly
        let timeout = Duration::from_millis(250);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
