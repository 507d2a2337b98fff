//! Date helper functions

use chrono::NaiveDate;

/// Formats accepted for post dates, tried in order
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse the calendar date out of a front-matter date string
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Format a post date the way the post grid shows it ("February 10, 2022")
///
/// Unparseable dates are shown as written.
pub fn long_date(s: &str) -> String {
    match parse_date(s) {
        Some(d) => d.format("%B %-d, %Y").to_string(),
        None => s.to_string(),
    }
}

/// Value for a `<time datetime="...">` attribute
pub fn iso_date(s: &str) -> String {
    match parse_date(s) {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => s.to_string(),
    }
}
