//! Tracing subscriber setup shared by the binaries

use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{Result, SpamError};

/// Install the global subscriber, writing to stdout.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &LoggingConfig) -> Result<()> {
    install(config, std::io::stdout)
}

/// Same as [`init`] but writes to stderr, for tools whose stdout is data
pub fn init_stderr(config: &LoggingConfig) -> Result<()> {
    install(config, std::io::stderr)
}

fn install<W>(config: &LoggingConfig, writer: W) -> Result<()>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| default_filter(&config.level))
        .map_err(|e| SpamError::Config(format!("Invalid log level '{}': {}", config.level, e)))?;

    let registry = tracing_subscriber::registry().with(filter);
    let layer = fmt::layer().with_writer(writer);
    let installed = match config.format {
        LogFormat::Pretty => registry.with(layer.pretty()).try_init(),
        LogFormat::Compact => registry.with(layer.compact()).try_init(),
        LogFormat::Json => registry.with(layer.json()).try_init(),
    };

    installed.map_err(|e| SpamError::Config(format!("Failed to set tracing subscriber: {}", e)))
}

fn default_filter(level: &str) -> std::result::Result<EnvFilter, tracing_subscriber::filter::ParseError> {
    EnvFilter::try_new(format!("spam_rs={level},tower_http={level}"))
}
