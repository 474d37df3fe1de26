//! Log output for the CLI.
//!
//! Console mode ([`init_cli`]) writes human-readable lines to stderr. File
//! mode ([`init_file`]) writes JSON lines to a daily-rotated file only, so
//! stderr stays clean for scripts that read the command's output. Both
//! honour `RUST_LOG` and fall back to the configured level.

use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Prefix of the rotated log files; the date is appended per day.
pub const LOG_FILE_PREFIX: &str = "spinwheel.log";

/// Keeps the background log writer alive.
///
/// Dropping it flushes buffered entries, so hold it until the process exits.
pub struct LoggingGuard {
    _guard: WorkerGuard,
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Send JSON logs to `{logs_dir}/spinwheel.log.YYYY-MM-DD`.
///
/// # Errors
///
/// Returns an error if the logs directory cannot be created or a global
/// subscriber is already installed.
pub fn init_file(logs_dir: &Path, default_level: &str) -> anyhow::Result<LoggingGuard> {
    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("failed to create logs directory {}", logs_dir.display()))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter(default_level))
        .with_writer(writer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;

    Ok(LoggingGuard { _guard: guard })
}

/// Send human-readable logs to stderr.
///
/// A subscriber that is already installed wins; the refusal is logged
/// through it at debug level.
pub fn init_cli(default_level: &str) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(std::io::stderr)
        .try_init();
    if let Err(e) = installed {
        tracing::debug!(error = %e, "keeping existing log subscriber");
    }
}
