//! Timestamp normalization.
//!
//! Date-bearing fields on stored documents are not uniform: documents written
//! by this server carry RFC 3339 strings, imported legacy documents carry
//! rich timestamp objects (`{"seconds": …}`), author-entered dates are plain
//! `YYYY-MM-DD` strings, and some tooling wrote raw epoch numbers. Every
//! consumer goes through this module so a malformed value degrades to a safe
//! default instead of an `Invalid Date` artifact.

use serde_json::Value;
use time::{Date, Month, OffsetDateTime, format_description::well_known::Rfc3339};

/// Today's date as `YYYY-MM-DD`.
pub fn today_ymd() -> String {
    format_date(OffsetDateTime::now_utc().date())
}

/// Current write timestamp as an RFC 3339 string, the shape the store stamps
/// into `createdAt`/`updatedAt`.
pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| today_ymd())
}

/// Normalize any timestamp shape to `YYYY-MM-DD`, or `None` when the value
/// carries no usable date.
pub fn to_ymd(value: &Value) -> Option<String> {
    to_date(value).map(format_date)
}

/// Normalize any timestamp shape to `YYYY-MM-DD`, falling back to today.
pub fn ymd_or_today(value: &Value) -> String {
    to_ymd(value).unwrap_or_else(today_ymd)
}

/// Comparable epoch-seconds key for ordering records by a date field.
/// Missing and malformed values order before everything real.
pub fn sort_key(value: &Value) -> Option<i64> {
    match value {
        Value::Object(map) => object_seconds(map),
        Value::Number(n) => n.as_f64().and_then(parse_epoch),
        Value::String(s) => {
            if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
                return Some(dt.unix_timestamp());
            }
            parse_ymd(s).map(|d| d.midnight().assume_utc().unix_timestamp())
        }
        _ => None,
    }
}

/// Human-facing long date (`January 15, 2024`) for page metadata.
pub fn long_date(value: &Value) -> String {
    match to_date(value) {
        Some(d) => format!("{} {}, {}", d.month(), d.day(), d.year()),
        None => "Unknown date".to_string(),
    }
}

fn to_date(value: &Value) -> Option<Date> {
    match value {
        Value::Object(map) => object_seconds(map).and_then(epoch_to_date),
        Value::Number(n) => n.as_f64().and_then(parse_epoch).and_then(epoch_to_date),
        Value::String(s) => {
            if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
                return Some(dt.date());
            }
            parse_ymd(s)
        }
        _ => None,
    }
}

/// Rich timestamp objects store epoch seconds under `seconds` or `_seconds`.
fn object_seconds(map: &serde_json::Map<String, Value>) -> Option<i64> {
    map.get("seconds")
        .or_else(|| map.get("_seconds"))
        .and_then(Value::as_f64)
        .and_then(parse_epoch)
}

/// Epoch values above ~2001-09-09 in milliseconds are treated as milliseconds.
fn parse_epoch(n: f64) -> Option<i64> {
    if !n.is_finite() {
        return None;
    }
    let secs = if n.abs() >= 1e12 { n / 1000.0 } else { n };
    Some(secs as i64)
}

fn epoch_to_date(secs: i64) -> Option<Date> {
    OffsetDateTime::from_unix_timestamp(secs)
        .ok()
        .map(|dt| dt.date())
}

/// Parse a leading `YYYY-MM-DD`, tolerating trailing text such as a time
/// component the RFC 3339 parser rejected.
fn parse_ymd(s: &str) -> Option<Date> {
    let b = s.as_bytes();
    if b.len() < 10 || b[4] != b'-' || b[7] != b'-' {
        return None;
    }
    let year: i32 = std::str::from_utf8(&b[..4]).ok()?.parse().ok()?;
    let month: u8 = std::str::from_utf8(&b[5..7]).ok()?.parse().ok()?;
    let day: u8 = std::str::from_utf8(&b[8..10]).ok()?.parse().ok()?;
    Date::from_calendar_date(year, Month::try_from(month).ok()?, day).ok()
}

fn format_date(d: Date) -> String {
    format!("{:04}-{:02}-{:02}", d.year(), u8::from(d.month()), d.day())
}
