//! Tracing setup: a non-blocking file writer per session.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Platform cache directory for session logs.
///
/// - macOS: `~/Library/Caches/battle/logs`
/// - Linux: `~/.cache/battle/logs` (or `$XDG_CACHE_HOME/battle/logs`)
/// - Windows: `%LOCALAPPDATA%\battle\logs`
/// - Fallback: `/tmp/battle/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "battle")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/battle"))
        .join("logs")
}

/// `session_id` or a timestamp-based one.
pub fn session_id(configured: Option<&str>) -> String {
    match configured {
        Some(id) => id.to_string(),
        None => {
            let secs = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default();
            format!("session_{secs}")
        }
    }
}

/// Installs the global subscriber writing to `{session_dir}/client.log`.
///
/// Stdout belongs to the battle narration, so nothing is logged to the
/// terminal. Keep the returned guard alive until exit to flush the file.
pub fn setup_logging(session_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(session_dir)
        .with_context(|| format!("Failed to create log directory: {}", session_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(session_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!("Log file: {}/client.log", session_dir.display());
    Ok(guard)
}
