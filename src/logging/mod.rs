// Logging module - tracing subscriber setup
//
// Logs always go to stdout. When file logging is enabled, a second JSON layer
// writes to rolling files through a non-blocking writer.
//
// Precedence for the filter: RUST_LOG env var > config file > default "info"

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogRotation, LoggingConfig, APP_NAME};

/// Filter used when RUST_LOG is not set
pub fn default_filter(config: &LoggingConfig) -> String {
    format!(
        "{}={},tower_http=debug,axum=debug",
        APP_NAME, config.level
    )
}

/// Filter built from the configured level, falling back to `info` when the
/// level does not parse
pub fn config_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_new(default_filter(config)).unwrap_or_else(|e| {
        // Subscriber is not installed yet, so this has to go to stderr
        eprintln!(
            "Warning: Invalid log level '{}' ({}), using info",
            config.level, e
        );
        EnvFilter::new(default_filter(&LoggingConfig::default()))
    })
}

/// Install the global subscriber.
///
/// The returned guard must be kept alive for the duration of the program so
/// buffered file logs are flushed on exit.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| config_filter(config));

    let (file_writer, guard) = match file_writer(config) {
        Some((writer, guard)) => (Some(writer), Some(guard)),
        None => (None, None),
    };

    // File layer uses JSON format for structured log parsing
    let file_layer = file_writer.map(|writer| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    guard
}

/// Rolling file writer, or None if file logging is off or unusable
fn file_writer(
    config: &LoggingConfig,
) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    if !config.file_enabled {
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&config.file_dir) {
        // Subscriber is not installed yet, so this has to go to stderr
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            config.file_dir, e
        );
        return None;
    }

    let appender = match config.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&config.file_dir, &config.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&config.file_dir, &config.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&config.file_dir, &config.file_prefix)
        }
    };

    // Writes happen on a background thread
    Some(tracing_appender::non_blocking(appender))
}
