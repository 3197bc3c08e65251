//! Standalone HTML report.

use crate::calendar::CalendarIndex;
use crate::event::{Category, EventRecord};
use crate::month::Month;

use super::{ReportOptions, html_escape, role_counts};

const STYLE: &str = r#"
        body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; line-height: 1.6; margin: 0; padding: 20px; background: #f4f4f8; }
        .container { max-width: 1200px; margin: 0 auto; background: white; border-radius: 15px; overflow: hidden; }
        .header { background: #ff6b35; color: white; padding: 30px; text-align: center; }
        .content { padding: 30px; }
        .stats { background: #fff5f0; padding: 20px; border-radius: 10px; margin-bottom: 30px; text-align: center; }
        .month-section { margin-bottom: 40px; border: 1px solid #e0e0e0; border-radius: 10px; overflow: hidden; }
        .month-header { background: #ff9a56; color: white; padding: 15px 20px; font-size: 1.5em; font-weight: bold; }
        .events-table { width: 100%; border-collapse: collapse; }
        .events-table th { background: #f8f9fa; padding: 12px; text-align: left; border-bottom: 2px solid #dee2e6; }
        .events-table td { padding: 12px; border-bottom: 1px solid #dee2e6; }
        .date-cell { font-weight: bold; white-space: nowrap; width: 150px; }
        .appearance { background: #e8f5e8; }
        .disappearance { background: #fff3cd; }
"#;

/// Renders the calendar as a self-contained HTML page.
///
/// Only months with events get a section. Every piece of event text is
/// escaped.
pub fn format_html(index: &CalendarIndex, options: &ReportOptions) -> String {
    let title = html_escape(&options.title);
    let appearances = index.count(Category::Appearance);
    let disappearances = index.count(Category::Disappearance);

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("    <meta charset=\"UTF-8\">\n");
    out.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    out.push_str(&format!("    <title>{}</title>\n", title));
    out.push_str(&format!("    <style>{}    </style>\n", STYLE));
    out.push_str("</head>\n<body>\n<div class=\"container\">\n");
    out.push_str(&format!(
        "    <div class=\"header\"><h1>{}</h1></div>\n",
        title
    ));
    out.push_str("    <div class=\"content\">\n");

    out.push_str("        <div class=\"stats\">\n            <h3>Statistics</h3>\n");
    out.push_str(&format!(
        "            <p>Total Events: <strong>{}</strong>",
        index.len()
    ));
    if appearances + disappearances > 0 {
        out.push_str(&format!(
            " | Appearances: <strong>{}</strong> | Disappearances: <strong>{}</strong>",
            appearances, disappearances
        ));
    }
    out.push_str("</p>\n");
    out.push_str(&format!(
        "            <p>Generated on: <strong>{}</strong></p>\n",
        options.generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str("        </div>\n");

    for (month, events) in index.iter().filter(|(_, events)| !events.is_empty()) {
        month_section(&mut out, month, events);
    }

    out.push_str("    </div>\n</div>\n</body>\n</html>\n");
    out
}

fn month_section(out: &mut String, month: Month, events: &[EventRecord]) {
    let (app, dis) = role_counts(events);
    let with_roles = app + dis > 0;

    out.push_str("        <div class=\"month-section\">\n");
    out.push_str(&format!(
        "            <div class=\"month-header\">{} ({} events",
        month.name(),
        events.len()
    ));
    if with_roles {
        out.push_str(&format!(" - {} app, {} dis", app, dis));
    }
    out.push_str(")</div>\n");

    out.push_str("            <table class=\"events-table\">\n");
    out.push_str("                <thead><tr><th>Date</th><th>Event</th><th>Type</th></tr></thead>\n");
    out.push_str("                <tbody>\n");
    for event in events {
        let category = event.category();
        let class = category.type_tag().unwrap_or("generic");
        let type_display = match category {
            Category::Appearance => "Appearance",
            Category::Disappearance => "Disappearance",
            Category::Generic => "",
        };
        out.push_str(&format!(
            "                    <tr class=\"{}\"><td class=\"date-cell\">{}</td><td class=\"event-cell\">{}</td><td>{}</td></tr>\n",
            class,
            html_escape(event.display_date()),
            html_escape(event.title()),
            type_display
        ));
    }
    out.push_str("                </tbody>\n            </table>\n        </div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarAggregator;
    use crate::date::ResolvedDate;
    use chrono::NaiveDate;

    fn options() -> ReportOptions {
        let generated_at = NaiveDate::from_ymd_opt(2025, 7, 4)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        ReportOptions::new("Maharaj <Days>", generated_at)
    }

    fn index() -> CalendarIndex {
        let mut aggregator = CalendarAggregator::new();
        aggregator.ingest(EventRecord::new(
            "Radhanath Swami - Appearance Day",
            Category::Appearance,
            ResolvedDate::new(Month::December, 7).unwrap(),
        ));
        aggregator.ingest(EventRecord::new(
            "Rivers & <Lakes> Day",
            Category::Generic,
            ResolvedDate::new(Month::March, 14).unwrap(),
        ));
        aggregator.into_index()
    }

    #[test]
    fn escapes_title_and_event_text() {
        let html = format_html(&index(), &options());
        assert!(html.contains("<title>Maharaj &lt;Days&gt;</title>"));
        assert!(html.contains("Rivers &amp; &lt;Lakes&gt; Day"));
        assert!(!html.contains("<Lakes>"));
    }

    #[test]
    fn includes_statistics_and_timestamp() {
        let html = format_html(&index(), &options());
        assert!(html.contains("Total Events: <strong>2</strong>"));
        assert!(html.contains("Appearances: <strong>1</strong>"));
        assert!(html.contains("Generated on: <strong>2025-07-04 09:30:00</strong>"));
    }

    #[test]
    fn renders_only_non_empty_months() {
        let html = format_html(&index(), &options());
        assert!(html.contains("December (1 events - 1 app, 0 dis)"));
        assert!(html.contains("March (1 events)"));
        assert!(!html.contains("January ("));
        assert!(html.contains("<tr class=\"appearance\">"));
        assert!(html.contains("<tr class=\"generic\">"));
    }

    #[test]
    fn generic_calendar_has_no_role_statistics() {
        let html = format_html(&CalendarAggregator::new().into_index(), &options());
        assert!(html.contains("Total Events: <strong>0</strong></p>"));
        assert!(!html.contains("Appearances"));
        assert!(html.trim_end().ends_with("</html>"));
    }
}
