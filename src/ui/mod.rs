//! TUI module using ratatui.
//!
//! Owns the terminal and the event loop. Key events become [`crate::app::Action`]s for the
//! controller; the [`Command`]s it returns are executed here, with long-running
//! work spawned onto the tokio runtime and reported back as [`BackendEvent`]s.

pub mod components;
pub mod input;

use std::io::{self, Stdout};
use std::panic::PanicHookInfo;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::agent::{self, GeminiProvider, SummaryProvider};
use crate::app::{App, BackendEvent, Command};
use crate::config::Config;
use crate::{clipboard, export, ingest};

type Tui = Terminal<CrosstermBackend<Stdout>>;
type PanicHook = Arc<dyn Fn(&PanicHookInfo<'_>) + Send + Sync + 'static>;

/// Shared handles the command executor needs.
struct Runtime {
    config: Arc<Config>,
    provider: Arc<dyn SummaryProvider>,
    events: UnboundedSender<BackendEvent>,
}

/// Run the TUI until the user quits. `initial_file` is ingested on startup.
pub async fn run(config: Config, initial_file: Option<PathBuf>) -> anyhow::Result<()> {
    let provider: Arc<dyn SummaryProvider> = Arc::new(GeminiProvider::new(&config)?);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let runtime = Runtime {
        config: Arc::new(config),
        provider,
        events: event_tx,
    };

    let mut terminal = enter_terminal()?;

    let original_hook = install_panic_hook();

    let mut app = App::new();
    let startup = match initial_file.and_then(|path| app.upload(path)) {
        Some(cmd) => execute_command(cmd, &runtime, &mut terminal, &mut app),
        None => Ok(()),
    };

    let tick_rate = Duration::from_millis(100);
    let result = startup.and_then(|()| loop {
        if let Err(e) = terminal.draw(|f| components::render(f, &mut app)) {
            break Err(e.into());
        }

        while let Ok(evt) = event_rx.try_recv() {
            app.handle_backend_event(evt);
        }

        match event::poll(tick_rate) {
            Ok(true) => {
                let action = match event::read() {
                    Ok(evt) => input::map_event(&evt, &app.input_mode),
                    Err(e) => break Err(e.into()),
                };
                if let Some(cmd) = app.update(action) {
                    if let Err(e) = execute_command(cmd, &runtime, &mut terminal, &mut app) {
                        break Err(e);
                    }
                }
            }
            Ok(false) => {}
            Err(e) => break Err(e.into()),
        }

        if app.should_quit {
            break Ok(());
        }
    });

    let left = leave_terminal(&mut terminal);
    restore_panic_hook(original_hook);
    left?;
    result
}

/// Install a hook that restores the terminal before printing a UI-thread panic.
/// Panics on worker threads (e.g. a caught pdf-extract panic) leave the UI running.
fn install_panic_hook() -> PanicHook {
    let original_hook: PanicHook = Arc::from(std::panic::take_hook());
    let chained = Arc::clone(&original_hook);
    let ui_thread = std::thread::current().id();
    std::panic::set_hook(Box::new(move |panic_info| {
        if std::thread::current().id() == ui_thread {
            let _ = leave_terminal_raw();
            chained(panic_info);
        } else {
            tracing::error!("background panic: {panic_info}");
        }
    }));
    original_hook
}

fn restore_panic_hook(original_hook: PanicHook) {
    let _ = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| original_hook(panic_info)));
}

fn execute_command(
    cmd: Command,
    runtime: &Runtime,
    terminal: &mut Tui,
    app: &mut App,
) -> anyhow::Result<()> {
    match cmd {
        Command::Ingest { generation, path } => {
            let tx = runtime.events.clone();
            tokio::spawn(async move {
                let result = ingest::ingest_file(&path).await;
                let _ = tx.send(BackendEvent::IngestFinished { generation, result });
            });
        }
        Command::Summarize {
            sequence,
            text,
            tone,
        } => {
            let tx = runtime.events.clone();
            let provider = Arc::clone(&runtime.provider);
            let config = Arc::clone(&runtime.config);
            tokio::spawn(async move {
                let result = agent::summarize(provider.as_ref(), &text, tone, &config).await;
                let _ = tx.send(BackendEvent::SummaryFinished {
                    sequence,
                    original_text: text,
                    result,
                });
            });
        }
        Command::CopyToClipboard(summary) => {
            let event = match clipboard::copy_to(&mut io::stdout(), &summary) {
                Ok(()) => BackendEvent::Copied,
                Err(e) => {
                    tracing::warn!(error = %e, "clipboard copy failed");
                    BackendEvent::CopyFailed
                }
            };
            app.handle_backend_event(event);
        }
        Command::Download(summary) => {
            let today = export::today();
            let event = match export::save_summary(&runtime.config.export.dir, &summary, today) {
                Ok(path) => BackendEvent::Saved(path),
                Err(e) => {
                    tracing::error!(error = %e, "failed to save summary");
                    BackendEvent::SaveFailed
                }
            };
            app.handle_backend_event(event);
        }
        Command::OpenEditor(text) => {
            leave_terminal(terminal)?;
            let edited = edit::edit(&text);
            *terminal = enter_terminal()?;
            let event = match edited {
                Ok(new_text) => BackendEvent::Edited(Some(new_text)),
                Err(e) => {
                    tracing::warn!(error = %e, "external editor failed");
                    BackendEvent::Edited(None)
                }
            };
            app.handle_backend_event(event);
        }
    }
    Ok(())
}

fn enter_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableBracketedPaste,
        EnableMouseCapture
    )?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }
    Ok(terminal)
}

fn leave_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    leave_terminal_raw()?;
    terminal.show_cursor()?;
    Ok(())
}

fn leave_terminal_raw() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableBracketedPaste,
        DisableMouseCapture
    )
}
