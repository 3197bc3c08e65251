//! Normalized event types.
//!
//! - [`Category`]: the closed set of event kinds
//! - [`EventRecord`]: one normalized calendar entry
//! - [`EventEntry`]: the exported shape of a record (`date`, `event`, `month`, `type`)

use serde::{Deserialize, Serialize, Serializer};

use crate::date::ResolvedDate;
use crate::month::Month;

/// What kind of day an event marks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Birth anniversary.
    Appearance,
    /// Death anniversary.
    Disappearance,
    /// Any observance without a role.
    #[default]
    Generic,
}

impl Category {
    /// Maps a free-form role tag onto a category.
    ///
    /// Returns `None` for tags that are not recognized; callers treat those
    /// as [`Category::Generic`].
    pub fn from_role(role: &str) -> Option<Self> {
        match role.trim().to_lowercase().as_str() {
            "appearance" | "app" | "appearance day" => Some(Self::Appearance),
            "disappearance" | "disapp" | "disappearance day" => Some(Self::Disappearance),
            "" | "generic" => Some(Self::Generic),
            _ => None,
        }
    }

    /// Suffix appended to the subject in the title, e.g. "Appearance Day".
    pub fn title_suffix(&self) -> Option<&'static str> {
        match self {
            Self::Appearance => Some("Appearance Day"),
            Self::Disappearance => Some("Disappearance Day"),
            Self::Generic => None,
        }
    }

    /// Value of the exported `type` field; generic events have none.
    pub fn type_tag(&self) -> Option<&'static str> {
        match self {
            Self::Appearance => Some("appearance"),
            Self::Disappearance => Some("disappearance"),
            Self::Generic => None,
        }
    }

    /// Returns true if the category carries a role.
    pub fn is_role(&self) -> bool {
        !matches!(self, Self::Generic)
    }
}

/// A normalized calendar entry.
///
/// Records are immutable once built; construct them through
/// [`EventNormalizer`](crate::normalize::EventNormalizer) or [`EventRecord::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    title: String,
    category: Category,
    date: ResolvedDate,
    display_date: String,
}

impl EventRecord {
    /// Creates a record; the display date is derived from `date`.
    pub fn new(title: impl Into<String>, category: Category, date: ResolvedDate) -> Self {
        Self {
            title: title.into(),
            category,
            display_date: date.display(),
            date,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn date(&self) -> ResolvedDate {
        self.date
    }

    /// Canonical date rendering, e.g. "01 September".
    pub fn display_date(&self) -> &str {
        &self.display_date
    }

    pub fn month(&self) -> Month {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// Key under which two records in one month count as the same event.
    pub fn dedup_key(&self) -> (String, String) {
        (self.display_date.to_lowercase(), title_key(&self.title))
    }

    /// Returns the exported view of this record.
    pub fn to_entry(&self) -> EventEntry {
        EventEntry {
            date: self.display_date.clone(),
            event: self.title.clone(),
            month: self.month().name().to_string(),
            kind: self.category.type_tag().map(str::to_string),
        }
    }
}

impl Serialize for EventRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_entry().serialize(serializer)
    }
}

/// Exported shape of an [`EventRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEntry {
    /// Display date, e.g. "01 September".
    pub date: String,
    /// Event title.
    pub event: String,
    /// Capitalized month name.
    pub month: String,
    /// "appearance" or "disappearance"; absent for generic events.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Case- and punctuation-insensitive form of a title.
pub fn title_key(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}
