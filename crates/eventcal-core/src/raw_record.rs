//! Raw input records.
//!
//! A [`RawRecord`] is what a source hands to the pipeline: a subject, an
//! un-normalized date string and an optional free-form role. Nothing here is
//! validated; duplicates and malformed dates are expected.

use serde::{Deserialize, Serialize};

/// One un-normalized event as read from a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Person or observance name, possibly with markup noise.
    pub subject: String,
    /// Date as written in the source.
    pub date: String,
    /// Role tag such as "Appearance" or "Disappearance".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl RawRecord {
    /// Creates a record without a role.
    pub fn new(subject: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            date: date.into(),
            role: None,
        }
    }

    /// Builder method to set the role tag.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_and_without_role() {
        let plain = RawRecord::new("World Braille Day", "4th January");
        assert_eq!(plain.role, None);

        let tagged = RawRecord::new("Srila Prabhupada", "1 September 1896").with_role("Appearance");
        assert_eq!(tagged.role.as_deref(), Some("Appearance"));
    }

    #[test]
    fn role_is_optional_in_json() {
        let record: RawRecord =
            serde_json::from_str(r#"{"subject": "Yoga Day", "date": "21 Jun"}"#).unwrap();
        assert_eq!(record, RawRecord::new("Yoga Day", "21 Jun"));

        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("role"));
    }
}
