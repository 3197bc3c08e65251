//! Date resolution for human-written event dates.
//!
//! Sources write dates in many shapes ("17 September 1945", "15/3/2002",
//! "December 17, 2025, Wednesday", "04 Jun", "4th January"). A
//! [`DateResolver`] owns an ordered table of pure matchers for one
//! [`DateProfile`] and returns the first match as a [`ResolvedDate`].
//!
//! The year is kept on the resolved value when the input carries one, but
//! the calendar itself only buckets by month and day.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::RecordError;
use crate::month::Month;

/// The marker sources use for "no date".
pub const NO_DATE_MARKER: &str = "-";

/// "4th January", "21st June 2025", "4 Jan."
static ORDINAL_DAY_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,2})(?:st|nd|rd|th)?\s+([a-z]+)\.?(?:,?\s+(\d{4}))?$")
        .expect("Invalid ordinal date regex")
});

/// "January 4", "Jan 4th", "June 21, 2025", "January 4, 2025 Saturday"
static MONTH_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([a-z]+)\.?\s+(\d{1,2})(?:st|nd|rd|th)?(?:,?\s+(\d{4}))?(?:,?\s+(?:mon|tues|wednes|thurs|fri|satur|sun)day)?$")
        .expect("Invalid month-day regex")
});

/// A canonical (month, day) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedDate {
    month: Month,
    day: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    year: Option<i32>,
}

impl ResolvedDate {
    /// Creates a yearless date, checking the day against the month.
    pub fn new(month: Month, day: u32) -> Option<Self> {
        (1..=month.max_days()).contains(&day).then_some(Self {
            month,
            day,
            year: None,
        })
    }

    /// Creates a date that must exist in the given year.
    pub fn with_year(year: i32, month: Month, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month.number(), day).map(Self::from_naive)
    }

    /// Creates a date from a full calendar date, keeping the year.
    pub fn from_naive(date: NaiveDate) -> Self {
        Self {
            month: Month::ALL[date.month0() as usize],
            day: date.day(),
            year: Some(date.year()),
        }
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// The year written in the source, if there was one.
    pub fn year(&self) -> Option<i32> {
        self.year
    }

    /// Canonical rendering with a two-digit day, e.g. "01 September".
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ResolvedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02} {}", self.day, self.month.name())
    }
}

/// Which matcher table a resolver uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateProfile {
    /// Year-bearing dates from rosters: "17 September 1945", "15/3/2002".
    #[default]
    Standard,
    /// Observance listings: "04 Jun", "December 17, 2025, Wednesday", "4th January".
    Observance,
}

impl DateProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Observance => "observance",
        }
    }
}

impl fmt::Display for DateProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateProfile {
    type Err = UnknownProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "observance" => Ok(Self::Observance),
            _ => Err(UnknownProfile(s.to_string())),
        }
    }
}

/// Error returned when a profile name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown date profile {0:?} (expected \"standard\" or \"observance\")")]
pub struct UnknownProfile(pub String);

/// One entry of a matcher table.
struct DateFormat {
    name: &'static str,
    matches: fn(&str) -> Option<ResolvedDate>,
}

const STANDARD_FORMATS: &[DateFormat] = &[
    DateFormat {
        name: "day full-month year",
        matches: day_full_month_year,
    },
    DateFormat {
        name: "day abbreviated-month year",
        matches: day_abbrev_month_year,
    },
    DateFormat {
        name: "day/month/year",
        matches: day_slash_month_year,
    },
    DateFormat {
        name: "day-month-year",
        matches: day_dash_month_year,
    },
    DateFormat {
        name: "full-month day year",
        matches: full_month_day_year,
    },
    DateFormat {
        name: "abbreviated-month day year",
        matches: abbrev_month_day_year,
    },
    DateFormat {
        name: "slash split",
        matches: slash_split,
    },
];

const OBSERVANCE_FORMATS: &[DateFormat] = &[
    DateFormat {
        name: "day abbreviated-month",
        matches: compact_day_month,
    },
    DateFormat {
        name: "month day, year, weekday",
        matches: month_day_year_weekday,
    },
    DateFormat {
        name: "ordinal day month",
        matches: ordinal_day_month,
    },
    DateFormat {
        name: "month day",
        matches: month_day,
    },
];

fn strptime(s: &str, fmt: &str) -> Option<ResolvedDate> {
    NaiveDate::parse_from_str(s, fmt)
        .ok()
        .map(ResolvedDate::from_naive)
}

fn day_full_month_year(s: &str) -> Option<ResolvedDate> {
    strptime(s, "%d %B %Y")
}

fn day_abbrev_month_year(s: &str) -> Option<ResolvedDate> {
    strptime(s, "%d %b %Y")
}

fn day_slash_month_year(s: &str) -> Option<ResolvedDate> {
    strptime(s, "%d/%m/%Y")
}

fn day_dash_month_year(s: &str) -> Option<ResolvedDate> {
    strptime(s, "%d-%m-%Y")
}

fn full_month_day_year(s: &str) -> Option<ResolvedDate> {
    strptime(s, "%B %d %Y")
}

fn abbrev_month_day_year(s: &str) -> Option<ResolvedDate> {
    strptime(s, "%b %d %Y")
}

/// Last resort for "15 / 3 / 2002" style input with stray spaces.
fn slash_split(s: &str) -> Option<ResolvedDate> {
    let parts: Vec<&str> = s.split('/').map(str::trim).collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };
    let month = Month::from_number(month.parse().ok()?)?;
    ResolvedDate::with_year(year.parse().ok()?, month, day.parse().ok()?)
}

fn compact_day_month(s: &str) -> Option<ResolvedDate> {
    let mut parts = s.split_whitespace();
    let (day, month) = (parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    ResolvedDate::new(Month::from_name(month)?, day.parse().ok()?)
}

/// "December 17, 2025, Wednesday": anything after the second comma is dropped.
fn month_day_year_weekday(s: &str) -> Option<ResolvedDate> {
    let mut parts = s.split(',');
    let month_day = parts.next()?.trim();
    let year = parts.next()?.trim();
    strptime(&format!("{month_day}, {year}"), "%B %d, %Y")
}

fn ordinal_day_month(s: &str) -> Option<ResolvedDate> {
    let caps = ORDINAL_DAY_MONTH.captures(s)?;
    from_parts(&caps[2], &caps[1], caps.get(3).map(|m| m.as_str()))
}

fn month_day(s: &str) -> Option<ResolvedDate> {
    let caps = MONTH_DAY.captures(s)?;
    from_parts(&caps[1], &caps[2], caps.get(3).map(|m| m.as_str()))
}

fn from_parts(month: &str, day: &str, year: Option<&str>) -> Option<ResolvedDate> {
    let month = Month::from_name(month)?;
    let day = day.parse().ok()?;
    match year {
        Some(year) => ResolvedDate::with_year(year.parse().ok()?, month, day),
        None => ResolvedDate::new(month, day),
    }
}

/// Resolves raw date strings against one profile's matcher table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateResolver {
    profile: DateProfile,
}

impl DateResolver {
    pub fn new(profile: DateProfile) -> Self {
        Self { profile }
    }

    /// Resolver for roster dates.
    pub fn standard() -> Self {
        Self::new(DateProfile::Standard)
    }

    /// Resolver for observance listings.
    pub fn observance() -> Self {
        Self::new(DateProfile::Observance)
    }

    pub fn profile(&self) -> DateProfile {
        self.profile
    }

    fn formats(&self) -> &'static [DateFormat] {
        match self.profile {
            DateProfile::Standard => STANDARD_FORMATS,
            DateProfile::Observance => OBSERVANCE_FORMATS,
        }
    }

    /// Resolves a raw date string.
    ///
    /// Empty input and the "-" marker are reported as
    /// [`RecordError::EmptyOrSentinelDate`] without a warning. Anything else
    /// that no matcher accepts is logged at warn level and reported as
    /// [`RecordError::UnparsableDate`].
    pub fn resolve(&self, raw: &str) -> Result<ResolvedDate, RecordError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == NO_DATE_MARKER {
            debug!(raw_date = raw, "no date given");
            return Err(RecordError::EmptyOrSentinelDate);
        }

        match self.match_formats(trimmed) {
            Some(date) => Ok(date),
            None => {
                warn!(raw_date = trimmed, profile = %self.profile, "could not parse date");
                Err(RecordError::UnparsableDate(trimmed.to_string()))
            }
        }
    }

    /// Runs the matcher table without any logging or sentinel handling.
    pub fn match_formats(&self, s: &str) -> Option<ResolvedDate> {
        self.formats().iter().find_map(|format| {
            let date = (format.matches)(s)?;
            trace!(input = s, format = format.name, "date matched");
            Some(date)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: Month, day: u32) -> ResolvedDate {
        ResolvedDate::with_year(year, month, day).unwrap()
    }

    mod resolved_date {
        use super::*;

        #[test]
        fn validates_day_against_month() {
            assert!(ResolvedDate::new(Month::February, 29).is_some());
            assert!(ResolvedDate::new(Month::February, 30).is_none());
            assert!(ResolvedDate::new(Month::April, 31).is_none());
            assert!(ResolvedDate::new(Month::May, 0).is_none());
        }

        #[test]
        fn year_bound_dates_use_the_real_calendar() {
            assert!(ResolvedDate::with_year(2024, Month::February, 29).is_some());
            assert!(ResolvedDate::with_year(2025, Month::February, 29).is_none());
        }

        #[test]
        fn displays_two_digit_day() {
            let date = ResolvedDate::new(Month::September, 1).unwrap();
            assert_eq!(date.display(), "01 September");
            assert_eq!(date.to_string(), "01 September");
            assert_eq!(ymd(1945, Month::September, 17).display(), "17 September");
        }
    }

    mod standard_profile {
        use super::*;

        fn resolve(s: &str) -> Result<ResolvedDate, RecordError> {
            DateResolver::standard().resolve(s)
        }

        #[test]
        fn day_full_month_year() {
            assert_eq!(resolve("17 September 1945"), Ok(ymd(1945, Month::September, 17)));
        }

        #[test]
        fn day_abbreviated_month_year() {
            assert_eq!(resolve("25 Feb 1950"), Ok(ymd(1950, Month::February, 25)));
        }

        #[test]
        fn day_slash_month_year() {
            assert_eq!(resolve("15/3/2002"), Ok(ymd(2002, Month::March, 15)));
            assert_eq!(resolve("05/11/1998"), Ok(ymd(1998, Month::November, 5)));
        }

        #[test]
        fn day_dash_month_year() {
            assert_eq!(resolve("15-03-2002"), Ok(ymd(2002, Month::March, 15)));
        }

        #[test]
        fn month_first_forms() {
            assert_eq!(resolve("September 17 1945"), Ok(ymd(1945, Month::September, 17)));
            assert_eq!(resolve("Feb 25 1950"), Ok(ymd(1950, Month::February, 25)));
        }

        #[test]
        fn day_first_and_month_first_agree() {
            let a = resolve("17 September 1945").unwrap();
            let b = resolve("September 17 1945").unwrap();
            assert_eq!((a.month(), a.day()), (b.month(), b.day()));
            assert_eq!(a.month().key(), "september");
        }

        #[test]
        fn slash_split_tolerates_spaces() {
            assert_eq!(resolve("15 / 3 / 2002"), Ok(ymd(2002, Month::March, 15)));
        }

        #[test]
        fn trims_surrounding_whitespace() {
            assert_eq!(resolve("  1 September 1896 "), Ok(ymd(1896, Month::September, 1)));
        }

        #[test]
        fn keeps_year_for_round_trip() {
            assert_eq!(resolve("17 September 1945").unwrap().year(), Some(1945));
        }

        #[test]
        fn sentinel_and_empty_are_silent_skips() {
            assert_eq!(resolve("-"), Err(RecordError::EmptyOrSentinelDate));
            assert_eq!(resolve(""), Err(RecordError::EmptyOrSentinelDate));
            assert_eq!(resolve("   "), Err(RecordError::EmptyOrSentinelDate));
        }

        #[test]
        fn garbage_is_unparsable() {
            assert_eq!(
                resolve("sometime in spring"),
                Err(RecordError::UnparsableDate("sometime in spring".into()))
            );
            assert!(resolve("31/2/2001").is_err());
            assert!(resolve("1/2").is_err());
            assert!(resolve("a/b/c").is_err());
        }

        #[test]
        fn rejects_observance_forms() {
            assert!(resolve("04 Jun").is_err());
            assert!(resolve("December 17, 2025, Wednesday").is_err());
        }
    }

    mod observance_profile {
        use super::*;

        fn resolve(s: &str) -> Result<ResolvedDate, RecordError> {
            DateResolver::observance().resolve(s)
        }

        #[test]
        fn compact_day_month() {
            assert_eq!(resolve("04 Jun"), Ok(ResolvedDate::new(Month::June, 4).unwrap()));
            assert_eq!(resolve("27 Jan"), Ok(ResolvedDate::new(Month::January, 27).unwrap()));
        }

        #[test]
        fn discards_weekday_after_second_comma() {
            assert_eq!(
                resolve("December 17, 2025, Wednesday"),
                Ok(ymd(2025, Month::December, 17))
            );
            assert_eq!(resolve("March 1, 2025"), Ok(ymd(2025, Month::March, 1)));
        }

        #[test]
        fn discards_weekday_without_second_comma() {
            assert_eq!(
                resolve("January 4, 2025 Wednesday"),
                Ok(ymd(2025, Month::January, 4))
            );
            assert_eq!(resolve("Jan 4 Sunday"), Ok(ResolvedDate::new(Month::January, 4).unwrap()));
            assert!(matches!(
                resolve("January 4, 2025 Someday"),
                Err(RecordError::UnparsableDate(_))
            ));
        }

        #[test]
        fn ordinal_day_month() {
            assert_eq!(
                resolve("4th January"),
                Ok(ResolvedDate::new(Month::January, 4).unwrap())
            );
            assert_eq!(resolve("21st June 2025"), Ok(ymd(2025, Month::June, 21)));
        }

        #[test]
        fn month_then_day() {
            assert_eq!(
                resolve("January 4"),
                Ok(ResolvedDate::new(Month::January, 4).unwrap())
            );
        }

        #[test]
        fn rejects_impossible_days() {
            assert!(resolve("31 Apr").is_err());
            assert!(resolve("30 Feb").is_err());
        }

        #[test]
        fn sentinel_is_silent_skip() {
            assert_eq!(resolve("-"), Err(RecordError::EmptyOrSentinelDate));
        }
    }

    #[test]
    fn profile_parses_from_str() {
        assert_eq!("standard".parse(), Ok(DateProfile::Standard));
        assert_eq!("Observance".parse(), Ok(DateProfile::Observance));
        assert!("lunar".parse::<DateProfile>().is_err());
        assert_eq!(DateResolver::default().profile(), DateProfile::Standard);
    }
}
