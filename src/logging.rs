use crate::config::LogConfig;
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber that appends to the configured log
/// file.  If no log file is configured, nothing is installed and all log
/// events are discarded.
///
/// The filter is taken from `RUST_LOG` if set, otherwise from
/// `config.level`.
pub(crate) fn init(config: &LogConfig) -> Result<(), LogError> {
    let Some(ref path) = config.file else {
        return Ok(());
    };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)?,
    };
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(LogError::Install)
}

#[derive(Debug, Error)]
pub(crate) enum LogError {
    #[error("invalid log level directive")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("failed to open log file")]
    Open(#[from] std::io::Error),
    #[error("failed to install logger")]
    Install(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}
