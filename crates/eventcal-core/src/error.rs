//! Record-level error types.
//!
//! None of these abort a run. Each one causes a single raw record to be
//! skipped and counted in the [`RunReport`](crate::pipeline::RunReport).

use thiserror::Error;

/// Why a raw record did not become an [`EventRecord`](crate::event::EventRecord).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The date string matched none of the accepted formats.
    #[error("could not parse date: {0:?}")]
    UnparsableDate(String),

    /// The date was empty or the "-" marker.
    #[error("no date given")]
    EmptyOrSentinelDate,

    /// The cleaned title was below the minimum length.
    #[error("title too short after cleanup: {0:?}")]
    TitleTooShort(String),
}

impl RecordError {
    /// Returns true if this skip deserves a user-visible diagnostic.
    ///
    /// Missing dates and short titles are expected noise in scraped data.
    pub fn is_diagnostic(&self) -> bool {
        matches!(self, Self::UnparsableDate(_))
    }
}
