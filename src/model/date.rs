// File: ./src/model/date.rs
// Plain calendar-date helpers: parsing, canonical formatting, range expansion.
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

/// Plain (year, month, day) value. No time of day, no timezone.
pub type CalendarDate = NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses the date forms a config file or store record may carry.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD` and a date-time whose date part is
/// taken as-is (no timezone conversion).
pub fn parse_date(input: &str) -> Option<CalendarDate> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y/%m/%d") {
        return Some(d);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    // RFC 3339 with offset or fractional seconds: keep the written date.
    if s.len() > 10 && s.as_bytes()[10] == b'T' {
        return s.get(..10).and_then(|p| NaiveDate::parse_from_str(p, DATE_FORMAT).ok());
    }
    None
}

/// Canonical `YYYY-MM-DD` text for a loosely written date.
/// Returns an empty string when the input is not a date.
pub fn format_date(input: &str) -> String {
    parse_date(input).map(canonical).unwrap_or_default()
}

pub fn canonical(date: CalendarDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Every date from `start` to `end` inclusive, ascending.
/// Empty when `start > end`.
pub fn expand_range(start: CalendarDate, end: CalendarDate) -> Vec<CalendarDate> {
    if start > end {
        return Vec::new();
    }
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// Text variant of [`expand_range`]: an unparsable bound yields an empty range.
pub fn expand_range_str(start: &str, end: &str) -> Vec<CalendarDate> {
    match (parse_date(start), parse_date(end)) {
        (Some(s), Some(e)) => expand_range(s, e),
        _ => Vec::new(),
    }
}

/// 0 = Sunday (first day of the week) .. 6 = Saturday.
pub fn weekday_of(date: CalendarDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// The Sunday on or before `date`.
pub fn week_start(date: CalendarDate) -> CalendarDate {
    date - Duration::days(weekday_of(date) as i64)
}

/// The Saturday on or after `date`.
pub fn week_end(date: CalendarDate) -> CalendarDate {
    date + Duration::days(6 - weekday_of(date) as i64)
}

/// Short `M/D(Wd)` form used in exported tables, e.g. `9/2(Mon)`.
pub fn format_short(date: CalendarDate, weekday_names: &[String; 7]) -> String {
    format!(
        "{}/{}({})",
        date.month(),
        date.day(),
        weekday_names[weekday_of(date) as usize]
    )
}

pub fn default_weekday_names() -> [String; 7] {
    ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"].map(String::from)
}
