//! Logging infrastructure for CareAtlas.
//!
//! Structured logging with dual output:
//! - Writes to `logs/careatlas.log` (cleared on session start)
//! - Also prints to stderr so CLI output on stdout stays parseable
//! - Configurable via the RUST_LOG environment variable

use std::fs;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard will flush and close the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initialize the logging system.
///
/// Creates the log directory if needed, clears the previous log file,
/// and sets up output to both the file and stderr.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or the log
/// file cannot be cleared.
pub fn init_logging(log_dir: &str, log_file: &str) -> Result<LoggingGuard, io::Error> {
    fs::create_dir_all(log_dir)?;

    // Clear the previous session's log
    let log_path = Path::new(log_dir).join(log_file);
    fs::write(&log_path, "")?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .compact();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(true)
        .compact();

    // Defaults to INFO if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // init_logging installs a global subscriber and can only run once
    // per process, so these tests cover the file operations it relies
    // on rather than the subscriber itself.

    #[test]
    fn test_creates_directory_and_clears_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("nested").join("logs");
        let dir_str = dir.to_str().unwrap();

        fs::create_dir_all(dir_str).unwrap();
        let log_path = dir.join("test.log");
        fs::write(&log_path, "old session data").unwrap();

        fs::write(&log_path, "").unwrap();
        assert_eq!(fs::read_to_string(&log_path).unwrap(), "");
    }
}
