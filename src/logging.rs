//! File logging for the TUI
//!
//! Stdout belongs to the terminal UI, so everything goes through a non-blocking
//! file writer. Keep the returned guard alive until exit so buffered lines flush.

use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const DEFAULT_FILTER: &str = "info";

#[derive(Clone, Debug)]
pub struct LogConfig {
    pub file: PathBuf,
    /// `RUST_LOG`-style directive, e.g. `spikeguide=debug`.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            filter: DEFAULT_FILTER.to_string(),
        }
    }
}

pub fn default_log_file() -> PathBuf {
    std::env::temp_dir().join("spikeguide.log")
}

pub fn init(config: &LogConfig) -> io::Result<WorkerGuard> {
    let directory = config
        .file
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = config
        .file
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "log file has no name"))?;
    std::fs::create_dir_all(directory)?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_new(&config.filter)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))?;

    tracing::info!(file = %config.file.display(), "logging initialized");
    Ok(guard)
}
