//! Tracing setup for eventcal.
//!
//! Skipped records are logged at debug level, unparsable dates at warn level
//! and per-run totals at info level. The binary calls [`init_tracing`] once:
//!
//! ```ignore
//! use eventcal_core::tracing::{init_tracing, TracingConfig};
//!
//! let config = if debug { TracingConfig::cli_debug() } else { TracingConfig::cli() };
//! init_tracing(config)?;
//! ```

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// Failed to set global subscriber
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    /// Failed to parse env filter directive
    #[error("failed to parse env filter: {0}")]
    EnvFilter(#[from] tracing_subscriber::filter::ParseError),
}

/// Output format for tracing logs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingOutputFormat {
    /// Multi-line human-readable output
    #[default]
    Pretty,
    /// One line per event
    Compact,
    /// Newline-delimited JSON
    Json,
}

/// Configuration for tracing initialization
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Level for eventcal crates when RUST_LOG is not set
    pub default_level: Level,
    pub output_format: TracingOutputFormat,
    /// Include file/line information
    pub include_location: bool,
    /// Include the module path
    pub include_target: bool,
    pub include_timestamp: bool,
    /// Custom env filter directive (overrides default_level if set)
    pub env_filter: Option<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_level: Level::INFO,
            output_format: TracingOutputFormat::Pretty,
            include_location: false,
            include_target: true,
            include_timestamp: true,
            env_filter: None,
        }
    }
}

impl TracingConfig {
    /// Quiet CLI output: warnings only, one line each, no timestamps.
    #[must_use]
    pub fn cli() -> Self {
        Self {
            default_level: Level::WARN,
            output_format: TracingOutputFormat::Compact,
            include_location: false,
            include_target: false,
            include_timestamp: false,
            env_filter: None,
        }
    }

    /// Verbose CLI output for `--debug`.
    #[must_use]
    pub fn cli_debug() -> Self {
        Self {
            default_level: Level::DEBUG,
            output_format: TracingOutputFormat::Compact,
            include_location: true,
            include_target: true,
            include_timestamp: false,
            env_filter: None,
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: TracingOutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Directive used when neither `env_filter` nor RUST_LOG is set.
    fn default_directive(&self) -> String {
        format!("eventcal={}", self.default_level)
    }
}

/// Builds the filter: `env_filter` if set, else `RUST_LOG`, else the default level.
fn build_filter(config: &TracingConfig) -> Result<EnvFilter, TracingError> {
    match config.env_filter {
        Some(ref directive) => Ok(EnvFilter::try_new(directive)?),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.default_directive()))),
    }
}

/// One stderr formatting layer for the configured format.
fn fmt_layer(config: &TracingConfig) -> BoxedLayer {
    let base = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_target(config.include_target);

    match (config.output_format, config.include_timestamp) {
        (TracingOutputFormat::Pretty, true) => base.pretty().boxed(),
        (TracingOutputFormat::Pretty, false) => base.pretty().without_time().boxed(),
        (TracingOutputFormat::Compact, true) => base.compact().boxed(),
        (TracingOutputFormat::Compact, false) => base.compact().without_time().boxed(),
        (TracingOutputFormat::Json, true) => base.json().boxed(),
        (TracingOutputFormat::Json, false) => base.json().without_time().boxed(),
    }
}

/// Installs the global subscriber. Call once, before any record is read.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed or if the
/// env filter directive is invalid.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let filter = build_filter(&config)?;
    let subscriber = tracing_subscriber::registry()
        .with(fmt_layer(&config))
        .with(filter);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
