//! Show start-time parsing and formatting.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

use crate::types::Timestamp;

/// Naive formats accepted from the show form, interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parse a submitted start time. RFC 3339 input keeps its offset; naive
/// date-times are taken as UTC.
///
/// ```
/// use trifold_core::schedule::parse_start_time;
/// assert!(parse_start_time("2035-04-01 20:00:00").is_some());
/// assert!(parse_start_time("2035-04-01T20:00:00-05:00").is_some());
/// assert!(parse_start_time("next friday").is_none());
/// ```
pub fn parse_start_time(input: &str) -> Option<Timestamp> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// `YYYY-MM-DD HH:MM:SS`, used on venue and artist detail pages.
pub fn format_listing(ts: &Timestamp) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// RFC 3339 with second precision, used on the show listing.
pub fn format_iso(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}
