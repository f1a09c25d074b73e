//! Logging setup.
//!
//! `RUST_LOG` wins over the configured level.  With a log directory the output
//! goes to a daily rolling file through a non-blocking writer, so the render
//! loop never waits on disk.

use std::path::PathBuf;

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber.
///
/// Returns the appender's `WorkerGuard` when logging to a file; keep it alive
/// until `main` returns or buffered lines are lost.  A second call is a no-op.
pub fn init_logging(level: &str, log_dir: Option<PathBuf>) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    match log_dir {
        Some(dir) => {
            if let Err(e) = std::fs::create_dir_all(&dir) {
                eprintln!("cannot create log directory {}: {}", dir.display(), e);
                return None;
            }
            let file_appender = tracing_appender::rolling::daily(&dir, "hand_dodge.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            let result = tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_line_number(true)
                        .with_ansi(false)
                        .with_writer(non_blocking),
                )
                .try_init();
            if result.is_err() {
                return None;
            }

            info!(log_level = level, dir = %dir.display(), "logging to file");
            Some(guard)
        }
        None => {
            let result = tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .try_init();
            if result.is_ok() {
                info!(log_level = level, "logging to stderr");
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stderr_logging_returns_no_guard() {
        assert!(init_logging("debug", None).is_none());
        tracing::info!("still usable after init");
    }

    #[test]
    fn file_logging_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("logs");
        // Another test may already own the global subscriber; the directory
        // is created either way.
        let guard = init_logging("info", Some(dir.clone()));
        assert!(dir.is_dir());
        drop(guard);
    }
}
