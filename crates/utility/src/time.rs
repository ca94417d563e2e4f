//! Timestamp normalisation and relative age rendering.
//!
//! Feeds deliver observation times either as ISO-8601 text (with a `Z`,
//! with an offset or without any zone) or as milliseconds since the Unix
//! epoch. Everything is folded into `DateTime<Utc>` here so that callers
//! never sniff formats themselves.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

pub const UNKNOWN: &str = "unknown";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];
const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Parse a raw timestamp. Returns `None` for anything unparseable.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    parse_iso(raw).or_else(|| raw.parse::<i64>().ok().and_then(from_epoch_millis))
}

pub fn from_epoch_millis(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}

fn parse_iso(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date_time) = DateTime::parse_from_rfc3339(raw) {
        return Some(date_time.with_timezone(&Utc));
    }

    // a trailing `Z` outside of strict RFC 3339 (e.g. space separated)
    let (body, utc_designator) = match raw.strip_suffix('Z').or_else(|| raw.strip_suffix('z')) {
        Some(body) => (body, true),
        None => (raw, false),
    };

    if !utc_designator {
        for format in OFFSET_FORMATS {
            if let Ok(date_time) = DateTime::parse_from_str(body, format) {
                return Some(date_time.with_timezone(&Utc));
            }
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(body, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(body, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Render how long ago `point` was, relative to the current time.
pub fn format_relative(point: Option<DateTime<Utc>>) -> String {
    format_relative_at(point, Utc::now())
}

pub fn format_relative_at(point: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(point) = point else {
        return UNKNOWN.to_owned();
    };

    let seconds = (now - point).num_seconds();
    if seconds < 60 {
        "just now".to_owned()
    } else if seconds < 3600 {
        plural(seconds / 60, "min")
    } else if seconds < 86400 {
        plural(seconds / 3600, "hour")
    } else {
        plural(seconds / 86400, "day")
    }
}

fn plural(count: i64, unit: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{suffix} ago")
}
