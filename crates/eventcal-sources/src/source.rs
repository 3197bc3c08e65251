//! EventSource trait and source descriptors.
//!
//! An [`EventSource`] turns one input file into [`RawRecord`]s and names the
//! [`DateProfile`] its dates are written in. A [`SourceSpec`] is the
//! serializable description of a source, as found in the config file or
//! built from CLI flags.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use eventcal_core::{DateProfile, RawRecord};
use serde::{Deserialize, Serialize};

use crate::error::{SourceError, SourceResult};
use crate::feed::CardFeedSource;
use crate::roster::{RosterColumns, RosterCsvSource};
use crate::table::ObservanceTableSource;

/// A file that yields raw event records.
pub trait EventSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Date profile for resolving this source's dates.
    fn profile(&self) -> DateProfile;

    /// Reads every raw record, in file order.
    fn records(&self) -> SourceResult<Vec<RawRecord>>;
}

/// Kind of input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// CSV roster with appearance and disappearance columns.
    Roster,
    /// Two-column observance table.
    Table,
    /// JSON card feed.
    Feed,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Roster => "roster",
            Self::Table => "table",
            Self::Feed => "feed",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "roster" => Ok(Self::Roster),
            "table" => Ok(Self::Table),
            "feed" => Ok(Self::Feed),
            other => Err(format!(
                "unknown source kind {other:?} (expected roster, table or feed)"
            )),
        }
    }
}

/// Serializable description of one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub kind: SourceKind,
    pub path: PathBuf,
    /// Roster column holding the person's name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_column: Option<String>,
    /// Roster column holding the appearance date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appearance_column: Option<String>,
    /// Roster column holding the disappearance date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disappearance_column: Option<String>,
}

impl SourceSpec {
    pub fn new(kind: SourceKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
            name_column: None,
            appearance_column: None,
            disappearance_column: None,
        }
    }

    pub fn roster(path: impl Into<PathBuf>) -> Self {
        Self::new(SourceKind::Roster, path)
    }

    pub fn table(path: impl Into<PathBuf>) -> Self {
        Self::new(SourceKind::Table, path)
    }

    pub fn feed(path: impl Into<PathBuf>) -> Self {
        Self::new(SourceKind::Feed, path)
    }

    /// Roster columns, falling back to the defaults for unset names.
    pub fn columns(&self) -> RosterColumns {
        let defaults = RosterColumns::default();
        RosterColumns {
            name: self.name_column.clone().unwrap_or(defaults.name),
            appearance: self.appearance_column.clone().unwrap_or(defaults.appearance),
            disappearance: self
                .disappearance_column
                .clone()
                .unwrap_or(defaults.disappearance),
        }
    }

    /// Builds the source this spec describes. The file is not read yet.
    pub fn open(&self) -> Box<dyn EventSource> {
        match self.kind {
            SourceKind::Roster => {
                Box::new(RosterCsvSource::new(&self.path).with_columns(self.columns()))
            }
            SourceKind::Table => Box::new(ObservanceTableSource::new(&self.path)),
            SourceKind::Feed => Box::new(CardFeedSource::new(&self.path)),
        }
    }
}

/// Reads a whole file, mapping failures to [`SourceError::Io`].
pub(crate) fn read_file(path: &Path) -> SourceResult<String> {
    std::fs::read_to_string(path).map_err(|e| SourceError::io(path, e))
}

/// File stem used as a source name in logs.
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
