//! Logging for aura
//!
//! The CLI writes to a daily-rotated `aura.log` in the XDG state directory
//! (see [`Config::log_path`]). `RUST_LOG`, when set, overrides the
//! configured level.

use crate::config::{Config, LoggingConfig};
use crate::error::{Error, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keeps the background log writer alive; pending lines flush on drop.
#[must_use = "logging stops when the guard is dropped"]
pub struct LoggingGuard {
    _guard: WorkerGuard,
}

/// Route `tracing` output to the rotating log file.
pub fn init(config: &LoggingConfig) -> Result<LoggingGuard> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => level_filter(&config.level)?,
    };

    let log_path = Config::log_path();
    let log_dir = Config::state_dir();
    std::fs::create_dir_all(&log_dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("aura.log")
        .max_log_files(config.max_files.max(1))
        .build(&log_dir)
        .map_err(|e| Error::Config(format!("cannot open {}: {}", log_path.display(), e)))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .init();

    tracing::debug!(path = %log_path.display(), level = %config.level, "aura logging started");
    Ok(LoggingGuard { _guard: guard })
}

/// Test output through the harness writer. Safe to call more than once.
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Filter for a configured level such as `info` or `aura_core=debug`.
fn level_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|e| Error::Config(format!("logging.level {:?} is not a valid filter: {}", level, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter_accepts_levels_and_directives() {
        assert!(level_filter("info").is_ok());
        assert!(level_filter("warn,aura_core::analytics=debug").is_ok());
    }

    #[test]
    fn test_level_filter_rejects_garbage() {
        let err = level_filter("aura_core=loudest").unwrap_err();
        assert!(err.to_string().contains("logging.level"));
    }

    #[test]
    fn test_init_test_twice() {
        init_test();
        init_test();
        tracing::debug!("still logging");
    }
}
