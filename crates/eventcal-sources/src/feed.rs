//! JSON card feeds.
//!
//! Two layouts are accepted:
//!
//! ```json
//! {"success": true, "events": [{"date": "January 10, 2025, Friday", "name": "Putrada Ekadashi"}]}
//! [{"date": "January 10, 2025, Friday", "name": "Putrada Ekadashi"}]
//! ```
//!
//! A feed reporting `"success": false` carries no events; it is logged and
//! read as empty.

use std::path::{Path, PathBuf};

use eventcal_core::{DateProfile, RawRecord};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{SourceError, SourceResult};
use crate::source::{EventSource, display_name, read_file};

/// One event card.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedCard {
    pub date: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeedDocument {
    Envelope {
        #[serde(default = "default_success")]
        success: bool,
        #[serde(default)]
        events: Vec<FeedCard>,
        #[serde(default)]
        error: Option<String>,
    },
    Cards(Vec<FeedCard>),
}

fn default_success() -> bool {
    true
}

/// Card feed read with the observance date profile.
#[derive(Debug, Clone)]
pub struct CardFeedSource {
    path: PathBuf,
    name: String,
}

impl CardFeedSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            name: display_name(&path),
            path,
        }
    }

    /// Parses feed text already in memory.
    pub fn parse(&self, content: &str) -> SourceResult<Vec<RawRecord>> {
        let document: FeedDocument =
            serde_json::from_str(content).map_err(|e| SourceError::json(&self.path, e))?;

        let cards = match document {
            FeedDocument::Envelope {
                success: false,
                error,
                ..
            } => {
                warn!(
                    source = %self.name,
                    error = error.as_deref().unwrap_or("unknown error"),
                    "feed reports failure, ignoring it"
                );
                Vec::new()
            }
            FeedDocument::Envelope { events, .. } => events,
            FeedDocument::Cards(cards) => cards,
        };

        let records: Vec<RawRecord> = cards
            .into_iter()
            .map(|card| RawRecord::new(card.name.trim(), card.date.trim()))
            .collect();
        info!(source = %self.name, records = records.len(), "read card feed");
        Ok(records)
    }
}

impl EventSource for CardFeedSource {
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
