//! Logging initialization.

use crate::config::LoggingConfig;
use std::path::Path;
use time::{format_description::well_known::Rfc3339, UtcOffset};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Keeps the file writer flushing. Hold it until `main` returns.
#[must_use]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Build the filter: the configured level wins over `RUST_LOG`, `info` is the fallback.
pub fn env_filter(log_level: Option<&str>) -> EnvFilter {
    match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    }
}

/// Install the global subscriber: compact stdout output plus an optional log file.
pub fn init(config: &LoggingConfig) -> anyhow::Result<LogGuard> {
    // Must be read before any other thread is spawned
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let timer = OffsetTime::new(offset, Rfc3339);

    let stdout_layer = fmt::layer()
        .with_target(false)
        .with_timer(timer.clone())
        .compact();

    let (file_layer, guard) = match config.log_file.as_deref() {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(file_appender(path));
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_timer(timer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter(config.log_level.as_deref()))
        .with(stdout_layer)
        .with(file_layer)
        .try_init()?;

    Ok(LogGuard { _file: guard })
}

fn file_appender(path: &Path) -> tracing_appender::rolling::RollingFileAppender {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "hotswap.log".into());
    tracing_appender::rolling::never(dir, file_name)
}
