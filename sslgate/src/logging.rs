use std::io::{self, IsTerminal};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize structured JSON logging with environment-based filtering.
///
/// Log level filtering comes from the environment (defaults to "info" when
/// unset); event fields are flattened for cleaner output.
pub fn init_normal_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .json()
        .flatten_event(true)
        .init();

    tracing::info!("logger initialized");
}

/// One-call bootstrap: pretty output on a terminal, JSON otherwise.
pub fn init_logging() {
    if io::stdout().is_terminal() {
        init_pretty_logging();
    } else {
        init_normal_logging();
    }
}

fn init_pretty_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).init();

    tracing::info!("logger initialized");
}

/// A fast way of adding rotated file logging to an application.
///
/// Writes daily-rotated JSON logs named `<file_name_prefix>.*` under
/// `directory` through a non-blocking writer. The returned guard must be held
/// for the lifetime of the application; dropping it flushes and stops the
/// background writer.
pub fn init_file_logging(directory: impl AsRef<Path>, file_name_prefix: &str) -> WorkerGuard {
    let appender = tracing_appender::rolling::daily(directory, file_name_prefix);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .json()
        .flatten_event(true)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    tracing::info!("logger initialized");

    guard
}
