//! Run driver: raw records in, finalized calendar out.
//!
//! ```text
//! RawRecord ──▶ DateResolver ──▶ EventNormalizer ──▶ CalendarAggregator ──▶ CalendarIndex
//!                    │                  │                    │
//!                    └──────── RecordError / duplicate ──────┴──▶ RunReport
//! ```
//!
//! Every failure is settled at record level; a run always ends with a
//! complete twelve-month index.

use serde::Serialize;
use tracing::{debug, info};

use crate::calendar::{CalendarAggregator, CalendarIndex, Ingest};
use crate::date::DateResolver;
use crate::error::RecordError;
use crate::normalize::EventNormalizer;
use crate::raw_record::RawRecord;

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Raw records handed to the pipeline.
    pub received: usize,
    /// Records placed in the calendar.
    pub accepted: usize,
    /// Records dropped as same-month duplicates.
    pub duplicates: usize,
    /// Records whose date matched no format.
    pub skipped_unparsable: usize,
    /// Records with an empty or "-" date.
    pub skipped_no_date: usize,
    /// Records whose cleaned title was too short.
    pub skipped_short_title: usize,
}

impl RunReport {
    /// Records that became an event, including merged duplicates.
    pub fn processed(&self) -> usize {
        self.accepted + self.duplicates
    }

    /// Records that could not become an event.
    pub fn skipped(&self) -> usize {
        self.skipped_unparsable + self.skipped_no_date + self.skipped_short_title
    }

    fn record_skip(&mut self, error: &RecordError) {
        match error {
            RecordError::UnparsableDate(_) => self.skipped_unparsable += 1,
            RecordError::EmptyOrSentinelDate => self.skipped_no_date += 1,
            RecordError::TitleTooShort(_) => self.skipped_short_title += 1,
        }
    }
}

/// One normalization run.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    normalizer: EventNormalizer,
    aggregator: CalendarAggregator,
    report: RunReport,
}

impl Pipeline {
    pub fn new(normalizer: EventNormalizer) -> Self {
        Self {
            normalizer,
            ..Default::default()
        }
    }

    pub fn report(&self) -> &RunReport {
        &self.report
    }

    /// Feeds raw records resolved with `resolver` into the calendar.
    pub fn ingest<I>(&mut self, resolver: &DateResolver, records: I)
    where
        I: IntoIterator<Item = RawRecord>,
    {
        for raw in records {
            self.report.received += 1;
            match self.normalizer.normalize_raw(resolver, &raw) {
                Ok(record) => match self.aggregator.ingest(record) {
                    Ingest::Added => self.report.accepted += 1,
                    Ingest::Duplicate => self.report.duplicates += 1,
                },
                Err(error) => {
                    if !error.is_diagnostic() {
                        debug!(subject = %raw.subject, %error, "skipping record");
                    }
                    self.report.record_skip(&error);
                }
            }
        }
    }

    /// Finalizes the calendar and returns it with the run counters.
    pub fn finish(self) -> (CalendarIndex, RunReport) {
        let report = self.report;
        info!(
            received = report.received,
            accepted = report.accepted,
            duplicates = report.duplicates,
            skipped = report.skipped(),
            "calendar built"
        );
        (self.aggregator.into_index(), report)
    }
}
