//! `TermTask` — terminal to-do list with a chat assistant.
//!
//! Launches the TUI against either a local in-process task store or a
//! remote task service, selected by configuration. Configuration via CLI
//! flags, environment variables, or config file
//! (`~/.config/termtask/config.toml`).
//!
//! ```bash
//! # Local session (state lives and dies with the process)
//! cargo run --bin termtask
//!
//! # Remote session against a running task service
//! cargo run --bin termtask -- --server-url http://127.0.0.1:8080
//!
//! # Or via environment variable
//! TERMTASK_SERVER_URL=http://127.0.0.1:8080 cargo run --bin termtask
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use termtask::app::{App, AppAction};
use termtask::config::{CliArgs, ClientConfig};
use termtask::session::{Session, SessionEvent, TaskBackend};
use termtask::sync::RemoteStore;
use termtask::ui;
use termtask_core::MemoryStore;
use termtask_core::chat::Role;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > config file > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!("termtask starting");

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, &config).await;

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("termtask exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the
/// terminal). Returns a [`WorkerGuard`] that must be held until shutdown
/// to ensure all buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("termtask.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &ClientConfig,
) -> io::Result<()> {
    // Backend selection: a configured server URL means a remote session.
    let backend = match config.server_url.as_deref() {
        Some(url) => TaskBackend::Remote(RemoteStore::new(url)),
        None => TaskBackend::Local(MemoryStore::new()),
    };
    let label = backend.describe();
    tracing::info!(backend = %label, "session backend selected");

    let (session, mut events_rx) = Session::new(backend, config.reply_delay, config.event_buffer);
    let mut app = App::new(label, &config.timestamp_format);

    // Initial load of the task list.
    session.refresh();

    loop {
        // Step 1: Draw the UI frame.
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Step 2: Drain all pending session events (non-blocking).
        drain_session_events(&mut app, &mut events_rx);

        // Step 3: Poll for terminal input events.
        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(action) = app.handle_key_event(key) {
                dispatch(action, &session, &mut app);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Dispatches a user action to the session.
fn dispatch(action: AppAction, session: &Session, app: &mut App) {
    match action {
        AppAction::AddTask(title) => session.add_task(&title),
        AppAction::ToggleTask(id, completed) => session.toggle_task(id, completed),
        AppAction::DeleteTask(id) => session.delete_task(id),
        AppAction::Refresh => session.refresh(),
        AppAction::SendChat(text) => {
            let token = app.begin_chat_exchange(&text);
            session.send_chat(text, token);
        }
    }
}

/// Drain all pending `SessionEvent`s and apply them to the app.
fn drain_session_events(app: &mut App, rx: &mut mpsc::Receiver<SessionEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event {
            SessionEvent::TasksRefreshed(tasks) => {
                app.set_tasks(tasks);
                // A successful refetch supersedes any stale failure notice.
                app.status_line = None;
            }
            SessionEvent::ReplyReady {
                token,
                reply,
                function_result,
            } => {
                app.transcript.resolve_pending(token, reply);
                if let Some(extra) = function_result {
                    app.transcript.post(Role::Assistant, extra);
                }
                app.scroll_chat_to_bottom();
            }
            SessionEvent::OpFailed { context, error } => {
                app.status_line = Some(format!("{context} failed: {error}"));
            }
        }
    }
}
