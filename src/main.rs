mod api;
mod app;
mod config;
mod discs;
mod handlers;
mod notify;
mod status;
mod ui;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::{io, time::Duration};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use api::HttpPlayerApi;
use app::{App, ViewMode};
use handlers::{handle_key_event, KeyAction};
use status::spawn_status_poller;
use ui::{
    render_album_detail_view, render_browse_view, render_settings_view, render_status_bar, Theme,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let config = config::Config::load()?;
    let api = HttpPlayerApi::new(&config.server.url);

    let (tx, rx) = mpsc::unbounded_channel();
    let poller = spawn_status_poller(
        api.clone(),
        tx,
        Duration::from_millis(config.server.poll_interval_ms),
    );

    let mut app = App::new(config, Box::new(api), rx);
    app.init().await;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    poller.abort();

    res
}

// The terminal is taken over by the UI, so logs go to a file next to the
// config. Filter via RUST_LOG, default info.
fn init_logging() -> Result<()> {
    let log_path = config::Config::config_path()?.with_file_name("baton.log");
    let log_file = std::fs::File::create(&log_path)
        .with_context(|| format!("Failed to create log file at {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
{
    loop {
        app.drain_status_events();

        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match handle_key_event(app, key).await {
                    KeyAction::Quit => return Ok(()),
                    KeyAction::Continue => {}
                }
            }
        }
    }
}

fn render_ui(f: &mut Frame, app: &mut App) {
    let theme = Theme;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(f.area());

    match app.view {
        ViewMode::Browse => render_browse_view(f, &app.browse, chunks[0], &theme),
        ViewMode::AlbumDetail => render_album_detail_view(f, &app.album_detail, chunks[0], &theme),
        ViewMode::Settings => render_settings_view(f, &app.config, chunks[0], &theme),
    }

    let snapshot = app.status.get().clone();
    let volume = app.volume;
    let show_volume = app.config.ui.show_volume_controls;
    render_status_bar(
        f,
        app.notices.current(),
        &snapshot,
        volume,
        show_volume,
        chunks[1],
        &theme,
    );
}
