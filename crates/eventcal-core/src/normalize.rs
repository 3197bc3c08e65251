//! RawRecord to EventRecord conversion.
//!
//! The normalization process:
//! 1. Resolves the raw date with the source's [`DateResolver`]
//! 2. Maps the role tag onto a [`Category`]
//! 3. Builds the title: `"{subject} - {suffix}"` for role-tagged records,
//!    the cleaned subject for generic ones
//! 4. Drops titles shorter than the minimum length

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::date::{DateResolver, ResolvedDate};
use crate::error::RecordError;
use crate::event::{Category, EventRecord};
use crate::raw_record::RawRecord;

/// Titles shorter than this are scraping noise (stray punctuation, cut cells).
pub const DEFAULT_MIN_TITLE_LENGTH: usize = 4;

/// "World Braille Day- 4th January 2025" -> "World Braille Day"
static TRAILING_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(.+?)\s*[-–]\s*\d{1,2}(?:st|nd|rd|th)?\s+(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?(?:\s.*)?$",
    )
    .expect("Invalid trailing date regex")
});

static DISALLOWED_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s()&-]").expect("Invalid title charset regex"));

/// Builds [`EventRecord`]s from raw subjects.
#[derive(Debug, Clone)]
pub struct EventNormalizer {
    min_title_length: usize,
}

impl Default for EventNormalizer {
    fn default() -> Self {
        Self {
            min_title_length: DEFAULT_MIN_TITLE_LENGTH,
        }
    }
}

impl EventNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the minimum title length for generic records.
    pub fn with_min_title_length(mut self, length: usize) -> Self {
        self.min_title_length = length;
        self
    }

    pub fn min_title_length(&self) -> usize {
        self.min_title_length
    }

    /// Builds a record from a subject, an already resolved date and a category.
    pub fn build(
        &self,
        subject: &str,
        date: ResolvedDate,
        category: Category,
    ) -> Result<EventRecord, RecordError> {
        let title = match category.title_suffix() {
            Some(suffix) => {
                let subject = collapse_whitespace(subject);
                if subject.is_empty() {
                    return Err(RecordError::TitleTooShort(subject));
                }
                format!("{subject} - {suffix}")
            }
            None => {
                let title = clean_title(subject);
                if title.chars().count() < self.min_title_length {
                    return Err(RecordError::TitleTooShort(title));
                }
                title
            }
        };

        Ok(EventRecord::new(title, category, date))
    }

    /// Resolves and builds one raw record.
    ///
    /// Unknown role tags are treated as generic.
    pub fn normalize_raw(
        &self,
        resolver: &DateResolver,
        raw: &RawRecord,
    ) -> Result<EventRecord, RecordError> {
        let date = resolver.resolve(&raw.date)?;
        let category = match raw.role.as_deref() {
            None => Category::Generic,
            Some(role) => Category::from_role(role).unwrap_or_else(|| {
                debug!(role, subject = %raw.subject, "unknown role tag, treating as generic");
                Category::Generic
            }),
        };
        self.build(&raw.subject, date, category)
    }
}

/// Cleans a scraped observance name.
///
/// Removes a trailing "- 4th January" style date fragment, collapses
/// whitespace and strips characters other than word characters, whitespace,
/// `-`, `(`, `)` and `&`.
pub fn clean_title(text: &str) -> String {
    let collapsed = collapse_whitespace(text);
    let without_date = match TRAILING_DATE.captures(&collapsed) {
        Some(caps) => caps[1].to_string(),
        None => collapsed,
    };
    let stripped = DISALLOWED_CHARS.replace_all(&without_date, "");
    collapse_whitespace(&stripped)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
