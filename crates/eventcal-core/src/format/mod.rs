//! Output formatting for the finalized calendar.
//!
//! This module renders a [`CalendarIndex`] in several formats:
//! - **JSON**: the index keyed by lowercase month name
//! - **CSV**: one `Month,Date,Event,Type` row per event
//! - **Summary**: per-month event counts for the terminal
//! - **HTML**: a standalone report page
//! - **Planner**: a day-by-day listing of every month that has events
//! - **JavaScript**: a `const calendarData = {1: [...]}` object literal for web pages
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use eventcal_core::CalendarAggregator;
//! use eventcal_core::format::{render, OutputFormat, ReportOptions};
//!
//! let index = CalendarAggregator::new().into_index();
//! let generated_at = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let options = ReportOptions::new("Event Calendar", generated_at);
//! let csv = render(OutputFormat::Csv, &index, &options).unwrap();
//! assert_eq!(csv, "Month,Date,Event,Type\n");
//! ```

mod html;


use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::CalendarIndex;
use crate::event::{Category, EventRecord};

pub use html::format_html;

const RULE_WIDTH: usize = 60;

/// Errors raised while writing an export.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("unknown output format {0:?} (expected json, csv, summary, html, planner or javascript)")]
    UnknownFormat(String),
}

/// Result type for export operations.
pub type FormatResult<T> = Result<T, FormatError>;

/// The export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Json,
    Csv,
    /// Plain-text per-month counts.
    Summary,
    /// Standalone HTML report.
    Html,
    /// Day-by-day month listing.
    Planner,
    /// Object literal keyed by month number.
    Javascript,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 6] = [
        Self::Json,
        Self::Csv,
        Self::Summary,
        Self::Html,
        Self::Planner,
        Self::Javascript,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Summary => "summary",
            Self::Html => "html",
            Self::Planner => "planner",
            Self::Javascript => "javascript",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Summary | Self::Planner => "txt",
            Self::Html => "html",
            Self::Javascript => "js",
        }
    }

    /// File name for this format; text formats get a suffix so they don't collide.
    pub fn file_name(&self, basename: &str) -> String {
        match self {
            Self::Summary | Self::Planner => {
                format!("{}_{}.{}", basename, self.as_str(), self.extension())
            }
            _ => format!("{}.{}", basename, self.extension()),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == lower)
            .ok_or_else(|| FormatError::UnknownFormat(s.to_string()))
    }
}

/// Presentation settings shared by the report formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Calendar title, used in the summary banner and HTML heading.
    pub title: String,
    /// Timestamp printed in the HTML statistics block.
    pub generated_at: NaiveDateTime,
}

impl ReportOptions {
    pub fn new(title: impl Into<String>, generated_at: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            generated_at,
        }
    }
}

/// Writes `index` in `format` to `writer`.
pub fn write_to<W: Write>(
    format: OutputFormat,
    index: &CalendarIndex,
    mut writer: W,
    options: &ReportOptions,
) -> FormatResult<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, index)?;
            writer.write_all(b"\n")?;
        }
        OutputFormat::Csv => write_csv(index, &mut writer)?,
        OutputFormat::Summary => writer.write_all(format_summary(index, &options.title).as_bytes())?,
        OutputFormat::Html => writer.write_all(format_html(index, options).as_bytes())?,
        OutputFormat::Planner => writer.write_all(format_planner(index).as_bytes())?,
        OutputFormat::Javascript => writer.write_all(format_javascript(index).as_bytes())?,
    }
    writer.flush()?;
    Ok(())
}

/// Renders `index` in `format` to a string.
pub fn render(
    format: OutputFormat,
    index: &CalendarIndex,
    options: &ReportOptions,
) -> FormatResult<String> {
    let mut buf = Vec::new();
    write_to(format, index, &mut buf, options)?;
    Ok(String::from_utf8(buf)?)
}

/// Writes one `Month,Date,Event,Type` row per event, January first.
pub fn write_csv<W: Write>(index: &CalendarIndex, writer: W) -> FormatResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Month", "Date", "Event", "Type"])?;
    for event in index.events() {
        wtr.write_record([
            event.month().name(),
            event.display_date(),
            event.title(),
            event.category().type_tag().unwrap_or(""),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Per-month event counts framed by a banner.
///
/// Months holding appearance or disappearance events also show the split.
pub fn format_summary(index: &CalendarIndex, title: &str) -> String {
    let banner = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("{}\n", banner));
    out.push_str(&format!("{} SUMMARY\n", title.to_uppercase()));
    out.push_str(&format!("{}\n", banner));

    for (month, events) in index.iter() {
        out.push_str(&format!("{:12}: {:3} events", month.name(), events.len()));
        let (app, dis) = role_counts(events);
        if app + dis > 0 {
            out.push_str(&format!(" ({} app, {} dis)", app, dis));
        }
        out.push('\n');
    }

    out.push_str(&format!("{}\n", "-".repeat(RULE_WIDTH)));
    out.push_str(&format!("{:12}: {:3} events", "Total", index.len()));
    let app = index.count(Category::Appearance);
    let dis = index.count(Category::Disappearance);
    if app + dis > 0 {
        out.push_str(&format!(
            " ({} appearances, {} disappearances)",
            app, dis
        ));
    }
    out.push('\n');
    out.push_str(&format!("{}\n", banner));
    out
}

/// Day-by-day listing of every month that has events.
///
/// The first event of a day goes on the day line; further same-day events
/// follow indented, in insertion order.
pub fn format_planner(index: &CalendarIndex) -> String {
    let mut out = String::new();
    for (month, events) in index.iter().filter(|(_, events)| !events.is_empty()) {
        out.push_str(&format!("{} Planner\n\n", month.abbrev()));
        for day in 1..=month.max_days() {
            let mut titles = events
                .iter()
                .filter(|e| e.day() == day)
                .map(EventRecord::title);
            match titles.next() {
                Some(primary) => {
                    out.push_str(&format!("{}. {}\n", day, primary));
                    for secondary in titles {
                        out.push_str(&format!("   {}\n", secondary));
                    }
                }
                None => out.push_str(&format!("{}.\n", day)),
            }
        }
        out.push('\n');
    }
    out
}

/// Name of the object declared by [`format_javascript`].
pub const JAVASCRIPT_OBJECT_NAME: &str = "calendarData";

/// Months with events as a JavaScript object literal keyed by month number.
///
/// ```text
/// const calendarData = {
///     6: [{date: '04 June', name: 'International Day of Innocent Children'}],
/// };
/// ```
pub fn format_javascript(index: &CalendarIndex) -> String {
    let mut out = format!("const {} = {{\n", JAVASCRIPT_OBJECT_NAME);
    for (month, events) in index.iter().filter(|(_, events)| !events.is_empty()) {
        let entries: Vec<String> = events
            .iter()
            .map(|e| {
                format!(
                    "{{date: '{}', name: '{}'}}",
                    js_escape(e.display_date()),
                    js_escape(e.title())
                )
            })
            .collect();
        out.push_str(&format!("    {}: [{}],\n", month.number(), entries.join(", ")));
    }
    out.push_str("};\n");
    out
}

/// Escapes text for a single-quoted JavaScript string.
fn js_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

/// (appearances, disappearances) in a slice of events.
fn role_counts(events: &[EventRecord]) -> (usize, usize) {
    events
        .iter()
        .fold((0, 0), |(app, dis), e| match e.category() {
            Category::Appearance => (app + 1, dis),
            Category::Disappearance => (app, dis + 1),
            Category::Generic => (app, dis),
        })
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarAggregator;
    use crate::date::ResolvedDate;
    use crate::month::Month;

    fn record(title: &str, category: Category, month: Month, day: u32) -> EventRecord {
        EventRecord::new(title, category, ResolvedDate::new(month, day).unwrap())
    }

    mod output_format {
        use super::*;

        #[test]
        fn parses_names() {
            assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
            assert_eq!(" HTML ".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
            assert!(matches!(
                "pdf".parse::<OutputFormat>(),
                Err(FormatError::UnknownFormat(_))
            ));
        }

        #[test]
        fn file_names_do_not_collide() {
            let names: Vec<String> = OutputFormat::ALL
                .iter()
                .map(|f| f.file_name("calendar"))
                .collect();
            assert_eq!(
                names,
                vec![
                    "calendar.json",
                    "calendar.csv",
                    "calendar_summary.txt",
                    "calendar.html",
                    "calendar_planner.txt",
                    "calendar.js",
                ]
            );
        }

        #[test]
        fn deserializes_from_snake_case() {
            let formats: Vec<OutputFormat> = serde_json::from_str(r#"["planner","csv"]"#).unwrap();
            assert_eq!(formats, vec![OutputFormat::Planner, OutputFormat::Csv]);
        }
    }

    mod javascript {
        use super::*;

        #[test]
        fn keys_non_empty_months_by_number() {
            let mut aggregator = CalendarAggregator::new();
            aggregator.ingest(record("World Environment Day", Category::Generic, Month::June, 5));
            aggregator.ingest(record(
                "International Day of Innocent Children",
                Category::Generic,
                Month::June,
                4,
            ));
            aggregator.ingest(record("Human Rights Day", Category::Generic, Month::December, 10));
            let output = format_javascript(&aggregator.into_index());

            assert_eq!(
                output,
                "const calendarData = {\n\
                 \x20   6: [{date: '04 June', name: 'International Day of Innocent Children'}, \
                 {date: '05 June', name: 'World Environment Day'}],\n\
                 \x20   12: [{date: '10 December', name: 'Human Rights Day'}],\n\
                 };\n"
            );
        }

        #[test]
        fn escapes_quotes_and_backslashes() {
            assert_eq!(js_escape(r"Children's Day \ India"), r"Children\'s Day \\ India");
        }

        #[test]
        fn parses_name() {
            assert_eq!(
                "javascript".parse::<OutputFormat>().unwrap(),
                OutputFormat::Javascript
            );
        }
    }

    mod csv_output {
        use super::*;

        #[test]
        fn writes_rows_in_calendar_order() {
            let mut aggregator = CalendarAggregator::new();
            aggregator.ingest(record("Gandhi Jayanti", Category::Generic, Month::October, 2));
            aggregator.ingest(record(
                "Srila Prabhupada - Appearance Day",
                Category::Appearance,
                Month::September,
                1,
            ));
            let index = aggregator.into_index();

            let mut buf = Vec::new();
            write_csv(&index, &mut buf).unwrap();
            assert_eq!(
                String::from_utf8(buf).unwrap(),
                "Month,Date,Event,Type\n\
                 September,01 September,Srila Prabhupada - Appearance Day,appearance\n\
                 October,02 October,Gandhi Jayanti,\n"
            );
        }

        #[test]
        fn quotes_fields_with_commas() {
            let mut aggregator = CalendarAggregator::new();
            aggregator.ingest(record("Science, Tech & Society", Category::Generic, Month::May, 11));
            let mut buf = Vec::new();
            write_csv(&aggregator.into_index(), &mut buf).unwrap();
            assert!(String::from_utf8(buf).unwrap().contains("\"Science, Tech & Society\""));
        }
    }

    mod planner {
        use super::*;

        #[test]
        fn lists_every_day_with_secondary_events_indented() {
            let mut aggregator = CalendarAggregator::new();
            aggregator.ingest(record("Gita Jayanti", Category::Generic, Month::December, 1));
            aggregator.ingest(record("Mokshada Ekadashi", Category::Generic, Month::December, 1));
            aggregator.ingest(record("Christmas Day", Category::Generic, Month::December, 25));
            let output = format_planner(&aggregator.into_index());

            let lines: Vec<&str> = output.lines().collect();
            assert_eq!(lines[0], "Dec Planner");
            assert_eq!(lines[1], "");
            assert_eq!(lines[2], "1. Gita Jayanti");
            assert_eq!(lines[3], "   Mokshada Ekadashi");
            assert_eq!(lines[4], "2.");
            assert!(lines.contains(&"25. Christmas Day"));
            assert_eq!(lines.iter().rev().find(|l| !l.is_empty()), Some(&"31."));
            assert!(output.ends_with("31.\n\n"));
        }

        #[test]
        fn skips_empty_months() {
            let index = CalendarAggregator::new().into_index();
            assert_eq!(format_planner(&index), "");
        }

        #[test]
        fn february_has_twenty_nine_days() {
            let mut aggregator = CalendarAggregator::new();
            aggregator.ingest(record("Leap Day", Category::Generic, Month::February, 29));
            let output = format_planner(&aggregator.into_index());
            assert!(output.contains("29. Leap Day\n"));
            assert!(!output.contains("30."));
        }
    }

    #[test]
    fn role_counts_split_categories() {
        let events = vec![
            record("A - Appearance Day", Category::Appearance, Month::May, 1),
            record("B - Appearance Day", Category::Appearance, Month::May, 2),
            record("C - Disappearance Day", Category::Disappearance, Month::May, 3),
            record("Labour Day", Category::Generic, Month::May, 1),
        ];
        assert_eq!(role_counts(&events), (2, 1));
    }

    #[test]
    fn html_escape_special_chars() {
        assert_eq!(html_escape("<b>A & B</b>"), "&lt;b&gt;A &amp; B&lt;/b&gt;");
        assert_eq!(html_escape("it's \"x\""), "it&#x27;s &quot;x&quot;");
    }
}
