//! EventSource trait and file-backed implementations.
//!
//! This crate turns input files into raw records for the eventcal pipeline:
//!
//! - [`EventSource`] - The trait every input kind implements
//! - [`RosterCsvSource`] - Appearance/disappearance rosters
//! - [`ObservanceTableSource`] - Two-column observance tables
//! - [`CardFeedSource`] - JSON card feeds
//! - [`SourceSpec`] - Config-level description that opens a source
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  roster.csv  │   │  table.csv   │   │  feed.json   │
//! └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!        │                  │                  │
//!        └──────── EventSource::records ───────┘
//!                           │
//!                           ▼
//!              RawRecord + DateProfile ──▶ eventcal_core::Pipeline
//! ```
//!
//! # Example
//!
//! ```ignore
//! use eventcal_core::{DateResolver, Pipeline};
//! use eventcal_sources::SourceSpec;
//!
//! let source = SourceSpec::roster("swamis.csv").open();
//! let mut pipeline = Pipeline::default();
//! pipeline.ingest(&DateResolver::new(source.profile()), source.records()?);
//! let (index, report) = pipeline.finish();
//! ```

pub mod error;
pub mod feed;
pub mod roster;
pub mod source;
pub mod table;

pub use error::{SourceError, SourceResult};
pub use feed::{CardFeedSource, FeedCard};
pub use roster::{RosterColumns, RosterCsvSource};
pub use source::{EventSource, SourceKind, SourceSpec};
pub use table::{ObservanceTableSource, split_events};
