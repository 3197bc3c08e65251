//! Error types for reading event sources.
//!
//! Every variant carries the path of the file being read so the CLI can
//! point at the offending input.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// An error that occurred while reading a source file.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The file could not be opened or read.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid CSV.
    #[error("{}: invalid CSV: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The file is not a valid event feed.
    #[error("{}: invalid JSON feed: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A roster is missing one of its configured header columns.
    #[error("{}: missing column {column:?}", path.display())]
    MissingColumn { path: PathBuf, column: String },
}

impl SourceError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns the path of the file that failed.
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. }
            | Self::Csv { path, .. }
            | Self::Json { path, .. }
            | Self::MissingColumn { path, .. } => path,
        }
    }
}

/// A specialized Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_path() {
        let err = SourceError::MissingColumn {
            path: PathBuf::from("/tmp/roster.csv"),
            column: "Maharaj".into(),
        };
        assert_eq!(err.to_string(), "/tmp/roster.csv: missing column \"Maharaj\"");
        assert_eq!(err.path(), Path::new("/tmp/roster.csv"));
    }

    #[test]
    fn io_error_keeps_source() {
        let err = SourceError::io(
            Path::new("feed.json"),
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert!(err.to_string().starts_with("feed.json: "));
        assert!(std::error::Error::source(&err).is_some());
    }
}
