//! Process-wide subscriber setup for binaries embedding the library.
//!
//! The library itself only emits through `tracing` and `log`; nothing in it
//! installs a subscriber.

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use crate::config::{LogFormat, LoggingConfig};

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid log filter '{directive}': {source}")]
    Filter {
        directive: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("A global subscriber is already installed")]
    AlreadyInstalled(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("Failed to bridge log records: {0}")]
    LogBridge(#[from] tracing_log::log_tracer::SetLoggerError),
}

/// Filter from `RUST_LOG`, falling back to the configured level.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level).map_err(|source| LoggingError::Filter {
        directive: config.level.clone(),
        source,
    })
}

fn fmt_layer(format: LogFormat) -> Box<dyn Layer<Registry> + Send + Sync> {
    match format {
        LogFormat::Text => fmt::layer().with_target(true).boxed(),
        LogFormat::Json => fmt::layer().json().with_current_span(true).boxed(),
    }
}

/// Installs the global subscriber and routes `log` records into it.
///
/// A second call returns [`LoggingError::AlreadyInstalled`] and leaves the
/// first subscriber in place.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = build_filter(config)?;
    let subscriber = tracing_subscriber::registry()
        .with(fmt_layer(config.format))
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;
    tracing_log::LogTracer::init()?;
    Ok(())
}
