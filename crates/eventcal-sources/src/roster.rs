//! CSV roster of appearance and disappearance dates.
//!
//! ```text
//! Maharaj,App,Disapp
//! Srila Prabhupada,1 September 1896,14 November 1977
//! Radhanath Swami,7 December 1950,-
//! ```
//!
//! Each named row yields up to two records: one tagged "Appearance" and one
//! tagged "Disappearance". Empty cells and the "-" marker produce nothing.

use std::path::{Path, PathBuf};

use csv::StringRecord;
use eventcal_core::{DateProfile, NO_DATE_MARKER, RawRecord};
use tracing::{debug, info};

use crate::error::{SourceError, SourceResult};
use crate::source::{EventSource, display_name, read_file};

/// Header names of the three roster columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterColumns {
    pub name: String,
    pub appearance: String,
    pub disappearance: String,
}

impl Default for RosterColumns {
    fn default() -> Self {
        Self {
            name: "Maharaj".into(),
            appearance: "App".into(),
            disappearance: "Disapp".into(),
        }
    }
}

/// Column positions resolved against an actual header row.
struct ColumnIndex {
    name: usize,
    appearance: usize,
    disappearance: usize,
}

/// Roster file read with the standard date profile.
#[derive(Debug, Clone)]
pub struct RosterCsvSource {
    path: PathBuf,
    name: String,
    columns: RosterColumns,
}

impl RosterCsvSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            name: display_name(&path),
            path,
            columns: RosterColumns::default(),
        }
    }

    /// Builder method to override the header names.
    pub fn with_columns(mut self, columns: RosterColumns) -> Self {
        self.columns = columns;
        self
    }

    pub fn columns(&self) -> &RosterColumns {
        &self.columns
    }

    /// Parses roster text already in memory.
    pub fn parse(&self, content: &str) -> SourceResult<Vec<RawRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| SourceError::csv(&self.path, e))?
            .clone();
        let index = self.resolve_columns(&headers)?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| SourceError::csv(&self.path, e))?;
            let cell = |i: usize| row.get(i).map(str::trim).unwrap_or_default();

            let subject = cell(index.name);
            if subject.is_empty() {
                debug!(source = %self.name, "skipping roster row without a name");
                continue;
            }

            for (column, role) in [
                (index.appearance, "Appearance"),
                (index.disappearance, "Disappearance"),
            ] {
                let date = cell(column);
                if has_date(date) {
                    records.push(RawRecord::new(subject, date).with_role(role));
                }
            }
        }

        info!(source = %self.name, records = records.len(), "read roster");
        Ok(records)
    }

    fn resolve_columns(&self, headers: &StringRecord) -> SourceResult<ColumnIndex> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| header_matches(h, column))
                .ok_or_else(|| SourceError::MissingColumn {
                    path: self.path.clone(),
                    column: column.to_string(),
                })
        };
        Ok(ColumnIndex {
            name: find(&self.columns.name)?,
            appearance: find(&self.columns.appearance)?,
            disappearance: find(&self.columns.disappearance)?,
        })
    }
}

impl EventSource for RosterCsvSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn profile(&self) -> DateProfile {
        DateProfile::Standard
    }

    fn records(&self) -> SourceResult<Vec<RawRecord>> {
        let content = read_file(&self.path)?;
        self.parse(&content)
    }
}

fn has_date(cell: &str) -> bool {
    !cell.is_empty() && cell != NO_DATE_MARKER
}

/// Header comparison ignoring case, surrounding blanks and a UTF-8 BOM.
fn header_matches(header: &str, column: &str) -> bool {
    header
        .trim_start_matches('\u{feff}')
        .trim()
        .eq_ignore_ascii_case(column.trim())
}
