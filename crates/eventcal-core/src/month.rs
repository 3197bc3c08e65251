//! Calendar month identifiers.
//!
//! [`Month`] is the bucket key of the calendar. It parses from full or
//! abbreviated English names and renders as the capitalized full name, the
//! lowercase key used in exported JSON, or the three-letter abbreviation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A calendar month.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All twelve months in calendar order.
    pub const ALL: [Month; 12] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
    ];

    /// Returns the month for a 1-based month number.
    pub fn from_number(number: u32) -> Option<Self> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    /// Returns the 1-based month number.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    /// Returns the 0-based position in [`Month::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Capitalized full name, e.g. "September".
    pub fn name(self) -> &'static str {
        match self {
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
        }
    }

    /// Lowercase full name, e.g. "september".
    pub fn key(self) -> &'static str {
        match self {
            Self::January => "january",
            Self::February => "february",
            Self::March => "march",
            Self::April => "april",
            Self::May => "may",
            Self::June => "june",
            Self::July => "july",
            Self::August => "august",
            Self::September => "september",
            Self::October => "october",
            Self::November => "november",
            Self::December => "december",
        }
    }

    /// Three-letter abbreviation, e.g. "Sep".
    pub fn abbrev(self) -> &'static str {
        &self.name()[..3]
    }

    /// Largest day number the month can hold in any year.
    ///
    /// February allows 29 because the calendar is not tied to a year.
    pub fn max_days(self) -> u32 {
        match self {
            Self::February => 29,
            Self::April | Self::June | Self::September | Self::November => 30,
            _ => 31,
        }
    }

    /// Parses a full or abbreviated English month name, case-insensitively.
    ///
    /// Accepts "September", "sep", "Sept" and a trailing period ("Sep.").
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().trim_end_matches('.').to_lowercase();
        if lower.len() < 3 {
            return None;
        }
        Self::ALL.into_iter().find(|month| {
            let key = month.key();
            lower == key
                || lower == key[..3]
                || (*month == Self::September && lower == "sept")
        })
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = UnknownMonth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownMonth(s.to_string()))
    }
}

/// Error returned when a string is not a month name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown month name: {0:?}")]
pub struct UnknownMonth(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_round_trip() {
        for (i, month) in Month::ALL.iter().enumerate() {
            assert_eq!(month.number() as usize, i + 1);
            assert_eq!(Month::from_number(month.number()), Some(*month));
        }
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(13), None);
    }

    #[test]
    fn parses_full_and_abbreviated_names() {
        assert_eq!(Month::from_name("September"), Some(Month::September));
        assert_eq!(Month::from_name("sep"), Some(Month::September));
        assert_eq!(Month::from_name("Sept"), Some(Month::September));
        assert_eq!(Month::from_name("FEB"), Some(Month::February));
        assert_eq!(Month::from_name("Jun."), Some(Month::June));
        assert_eq!(Month::from_name("may"), Some(Month::May));
    }

    #[test]
    fn rejects_non_month_names() {
        assert_eq!(Month::from_name(""), None);
        assert_eq!(Month::from_name("Ja"), None);
        assert_eq!(Month::from_name("Septembre"), None);
        assert_eq!(Month::from_name("Wednesday"), None);
        assert!("Smarch".parse::<Month>().is_err());
    }

    #[test]
    fn renders_names() {
        assert_eq!(Month::March.name(), "March");
        assert_eq!(Month::March.key(), "march");
        assert_eq!(Month::March.abbrev(), "Mar");
        assert_eq!(Month::March.to_string(), "March");
    }

    #[test]
    fn max_days_are_perpetual() {
        assert_eq!(Month::February.max_days(), 29);
        assert_eq!(Month::April.max_days(), 30);
        assert_eq!(Month::December.max_days(), 31);
    }
}
