//! Core types: months, dates, events, the monthly calendar and its exports

pub mod calendar;
pub mod date;
pub mod error;
pub mod event;
pub mod format;
pub mod month;
pub mod normalize;
pub mod pipeline;
pub mod raw_record;
pub mod tracing;

pub use calendar::{AggregatorState, CalendarAggregator, CalendarIndex, Ingest};
pub use date::{DateProfile, DateResolver, NO_DATE_MARKER, ResolvedDate, UnknownProfile};
pub use error::RecordError;
pub use event::{Category, EventEntry, EventRecord, title_key};
pub use format::{
    FormatError, FormatResult, OutputFormat, ReportOptions, format_html, format_planner,
    format_summary, html_escape, render, write_csv, write_to,
};
pub use month::{Month, UnknownMonth};
pub use normalize::{DEFAULT_MIN_TITLE_LENGTH, EventNormalizer, clean_title};
pub use pipeline::{Pipeline, RunReport};
pub use raw_record::RawRecord;
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
