//! CLI error types.

use eventcal_core::{FormatError, RecordError, TracingError};
use eventcal_sources::SourceError;
use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that end a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid combination of command-line arguments.
    #[error("invalid arguments: {0}")]
    Usage(String),

    /// A source file could not be read.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// An export could not be written.
    #[error("export error: {0}")]
    Format(#[from] FormatError),

    /// A date given to `parse-date` did not resolve.
    #[error("{0}")]
    Date(#[from] RecordError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("logging setup failed: {0}")]
    Tracing(#[from] TracingError),

    /// Nothing to build from.
    #[error("no sources given; pass --roster, --table or --feed, or add [[sources]] to the config")]
    NoSources,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn wraps_source_errors() {
        let err: CliError = SourceError::MissingColumn {
            path: PathBuf::from("swamis.csv"),
            column: "App".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "source error: swamis.csv: missing column \"App\""
        );
    }

    #[test]
    fn date_errors_display_unwrapped() {
        let err: CliError = RecordError::EmptyOrSentinelDate.into();
        assert_eq!(err.to_string(), RecordError::EmptyOrSentinelDate.to_string());
    }
}
