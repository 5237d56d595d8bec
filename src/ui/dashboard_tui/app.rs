use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::core::telemetry::{DashboardView, HttpSnapshotSource, TelemetryRuntime};

use super::event_handler::DashboardEvent;
use super::render::render_ui;

/// How often the UI redraws and polls the keyboard
const UI_POLL: Duration = Duration::from_millis(100);

/// Dashboard application state
pub struct DashboardApp {
    pub view: Arc<DashboardView>,
    pub endpoint: String,
    pub interval_ms: u64,
    pub should_quit: bool,
    pub show_help: bool,
    pub show_model_ids: bool,
}

impl DashboardApp {
    pub fn new(endpoint: String, interval_ms: u64) -> Self {
        Self {
            view: Arc::new(DashboardView::new()),
            endpoint,
            interval_ms,
            should_quit: false,
            show_help: false,
            show_model_ids: false,
        }
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::Quit => self.should_quit = true,
            DashboardEvent::ToggleHelp => self.show_help = !self.show_help,
            DashboardEvent::ToggleModelIds => self.show_model_ids = !self.show_model_ids,
            DashboardEvent::None => {}
        }
    }
}

/// Configuration for the dashboard app
#[derive(Debug, Clone)]
pub struct DashboardAppConfig {
    pub base_url: String,
    pub interval: Duration,
    pub request_timeout: Duration,
}

/// Run the dashboard TUI until the user quits
pub fn run_dashboard_app(config: DashboardAppConfig) -> Result<()> {
    let source = HttpSnapshotSource::new(&config.base_url, config.request_timeout)
        .context("Failed to create telemetry client")?;
    let mut app = DashboardApp::new(
        source.url().to_string(),
        config.interval.as_millis() as u64,
    );
    let runtime =
        TelemetryRuntime::start(source, config.interval).context("Failed to start polling")?;

    let outcome = with_terminal(
        setup_terminal,
        abort_setup,
        |terminal| event_loop(terminal, &mut app, &runtime),
        restore_terminal,
    );

    runtime.shutdown();
    outcome
}

type DashboardTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Run `body` on the terminal built by `setup`, then always `restore` it.
/// When `setup` fails, `abort` undoes whatever it already changed.
/// The body's error wins over a restore error.
fn with_terminal<T>(
    setup: impl FnOnce() -> Result<T>,
    abort: impl FnOnce(),
    body: impl FnOnce(&mut T) -> Result<()>,
    restore: impl FnOnce(&mut T) -> Result<()>,
) -> Result<()> {
    let mut terminal = match setup() {
        Ok(terminal) => terminal,
        Err(e) => {
            abort();
            return Err(e);
        }
    };

    let result = body(&mut terminal);
    let restored = restore(&mut terminal);
    result.and(restored)
}

fn setup_terminal() -> Result<DashboardTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("Failed to create terminal")
}

fn abort_setup() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}

/// Run every restore step, reporting the first failure.
fn restore_terminal(terminal: &mut DashboardTerminal) -> Result<()> {
    let raw = disable_raw_mode().context("Failed to disable raw mode");
    let screen = execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen");
    let cursor = terminal.show_cursor().context("Failed to show cursor");
    raw.and(screen).and(cursor)
}

fn event_loop(
    terminal: &mut DashboardTerminal,
    app: &mut DashboardApp,
    runtime: &TelemetryRuntime,
) -> Result<()> {
    loop {
        app.view = runtime.latest();
        terminal.draw(|frame| render_ui(frame, &*app))?;

        if event::poll(UI_POLL).context("Event poll failed")? {
            if let Event::Key(key) = event::read().context("Event read failed")? {
                if key.kind == KeyEventKind::Press {
                    app.handle_event(DashboardEvent::from_key(key.code));
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
