//! Tracing setup.
//!
//! The TUI owns the terminal, so it logs to a daily file under the user data
//! directory. One-shot CLI commands log to stderr.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "lexibrief=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Directory holding the rolling log files.
pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lexibrief")
        .join("logs")
}

/// Log to `<data dir>/lexibrief/logs/lexibrief.log.<date>`.
///
/// Keep the returned guard alive for the life of the program so buffered
/// lines are flushed on exit.
pub fn init_file() -> anyhow::Result<WorkerGuard> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir)?;
    let appender = tracing_appender::rolling::daily(&dir, "lexibrief.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))?;
    Ok(guard)
}

/// Log to stderr, leaving stdout for the brief itself.
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}
