//! Observance tables exported as CSV.
//!
//! Rows come in three shapes:
//!
//! ```text
//! 4 Jan,"World Braille Day"                      date cell, event cell
//! January,26 January,Republic Day                month, date, event
//! "World Braille Day- 4th January 2025"          single "<event>- <date>" line
//! ```
//!
//! An event cell may hold several observances separated by line breaks or
//! runs of two or more spaces. Header rows are recognized by their date cell
//! ("Dates", "Days", "Date") and skipped.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use csv::StringRecord;
use eventcal_core::{DateProfile, Month, RawRecord};
use regex::Regex;
use tracing::{debug, info};

use crate::error::{SourceError, SourceResult};
use crate::source::{EventSource, display_name, read_file};

/// Event parts this short are layout debris, not observances.
const MIN_PART_LENGTH: usize = 4;

static PART_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\n\s*|\s{2,}").expect("Invalid part separator regex"));

/// "World Braille Day- 4th January 2025"
static EVENT_DASH_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(.+?)\s*[-–]\s*(\d{1,2}(?:st|nd|rd|th)?\s+[a-z]+)\b")
        .expect("Invalid event-date line regex")
});

/// Observance table read with the observance date profile.
#[derive(Debug, Clone)]
pub struct ObservanceTableSource {
    path: PathBuf,
    name: String,
}

impl ObservanceTableSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            name: display_name(&path),
            path,
        }
    }

    /// Parses table text already in memory.
    pub fn parse(&self, content: &str) -> SourceResult<Vec<RawRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| SourceError::csv(&self.path, e))?;
            self.parse_row(&row, &mut records);
        }

        info!(source = %self.name, records = records.len(), "read observance table");
        Ok(records)
    }

    fn parse_row(&self, row: &StringRecord, out: &mut Vec<RawRecord>) {
        let cells: Vec<&str> = row.iter().map(str::trim).collect();
        match cells.as_slice() {
            [] => {}
            [line] => {
                if let Some(record) = parse_dash_line(line) {
                    out.push(record);
                }
            }
            [month, date, event, ..] if Month::from_name(month).is_some() => {
                self.push_cell(date, event, out);
            }
            [date, event, ..] => self.push_cell(date, event, out),
        }
    }

    fn push_cell(&self, date: &str, event: &str, out: &mut Vec<RawRecord>) {
        if is_header(date) || !date.chars().any(|c| c.is_ascii_digit()) {
            debug!(source = %self.name, date, "skipping row without a date");
            return;
        }
        out.extend(
            split_events(event)
                .into_iter()
                .map(|part| RawRecord::new(part, date)),
        );
    }
}

impl EventSource for ObservanceTableSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn profile(&self) -> DateProfile {
        DateProfile::Observance
    }

    fn records(&self) -> SourceResult<Vec<RawRecord>> {
        let content = read_file(&self.path)?;
        self.parse(&content)
    }
}

fn is_header(date: &str) -> bool {
    date.contains("Dates") || date.contains("Days") || date.eq_ignore_ascii_case("date")
}

/// Splits an event cell into its individual observances.
pub fn split_events(cell: &str) -> Vec<&str> {
    PART_SEPARATOR
        .split(cell)
        .map(str::trim)
        .filter(|part| part.chars().count() >= MIN_PART_LENGTH)
        .collect()
}

fn parse_dash_line(line: &str) -> Option<RawRecord> {
    let caps = EVENT_DASH_DATE.captures(line)?;
    let event = caps.get(1)?.as_str().trim();
    let date = caps.get(2)?.as_str().trim();
    (event.chars().count() >= MIN_PART_LENGTH).then(|| RawRecord::new(event, date))
}
