use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

pub const LOG_FILE_NAME: &str = "setlist.log";

/// Send `tracing` output to `<dir>/setlist.log`. The terminal belongs to the
/// TUI, so nothing is ever written to stdout or stderr.
///
/// `RUST_LOG` takes precedence over `logging.level`. Keep the returned guard
/// alive until exit or buffered lines are lost.
pub fn init_logging(
    dir: &Path,
    settings: &LoggingSettings,
) -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;

    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_writer(file_writer)
        .with_target(true)
        .with_ansi(false)
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(guard)
}
