//! Tracing subscriber setup.

use crate::config::{LogFormat, Settings};
use file_rotate::compression::Compression;
use file_rotate::suffix::AppendCount;
use file_rotate::{ContentLimit, FileRotate};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Size at which the log file is rotated.
pub const LOG_FILE_MAX_BYTES: usize = 10 * 1024 * 1024;

/// Rotated log files kept next to the active one.
pub const LOG_FILE_BACKUPS: usize = 5;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot create log directory for {path}: {source}")]
    LogDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Init(#[from] TryInitError),
}

/// Keeps the background log file writer running.
///
/// Dropping it flushes buffered lines, so hold it until the process exits.
#[must_use]
#[derive(Debug, Default)]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Filter used when `RUST_LOG` is not set.
pub fn default_directives(settings: &Settings) -> String {
    format!(
        "warn,sava_commerce={level},sava_auth={level},sava_store={level},sava_storefront={level},sava_cli={level}",
        level = settings.log_level
    )
}

/// Size-rotated log file: `app.log`, then `app.log.1` up to `app.log.5`.
pub fn rotating_file(path: &Path) -> Result<FileRotate<AppendCount>, LoggingError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| LoggingError::LogDir {
            path: path.to_path_buf(),
            source,
        })?;
    }

    Ok(FileRotate::new(
        path,
        AppendCount::new(LOG_FILE_BACKUPS),
        ContentLimit::BytesSurpassed(LOG_FILE_MAX_BYTES),
        Compression::None,
        #[cfg(unix)]
        None,
    ))
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level. JSON output is used when
/// `LOG_FORMAT=json`, human-readable text otherwise. Console logs go to
/// stderr so command output on stdout stays clean. With `LOG_FILE` set,
/// plain-text lines carrying source locations are also appended to that
/// file through a background writer.
pub fn init(settings: &Settings) -> Result<LoggingGuard, LoggingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(settings)));

    let json = settings.log_format == LogFormat::Json;
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(settings.debug)
            .with_writer(std::io::stderr)
    });

    let (file_writer, file_guard) = match &settings.log_file {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(rotating_file(path)?);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };
    let file_layer = file_writer.map(|writer| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
            .with_writer(writer)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(file_layer)
        .try_init()?;

    Ok(LoggingGuard { _file: file_guard })
}
