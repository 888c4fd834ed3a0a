// File: ./src/model/resolver.rs
// Infers a full date from a year-less `M/D` or `M-D` token.
use crate::model::date::CalendarDate;
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static MONTH_DAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^0-9])([0-9]{1,2})[/-]([0-9]{1,2})(?:[^0-9]|$)").expect("valid month/day regex")
});

/// First `(month, day)` pair in the token, unvalidated.
pub fn extract_month_day(token: &str) -> Option<(u32, u32)> {
    let caps = MONTH_DAY_RE.captures(token)?;
    let month = caps.get(1)?.as_str().parse().ok()?;
    let day = caps.get(2)?.as_str().parse().ok()?;
    Some((month, day))
}

/// Resolves `token` against the calendar window `[range_start, range_end]`.
///
/// Tries the year of `range_start`, then (for a window crossing New Year)
/// the year of `range_end`. When neither lands inside the window the first
/// candidate is returned anyway so that no imported row is dropped; callers
/// may see a date outside the window.
///
/// Returns `None` when the token has no month/day pair or the pair is not a
/// real date in either candidate year.
pub fn resolve_import_date(
    token: &str,
    range_start: CalendarDate,
    range_end: CalendarDate,
) -> Option<CalendarDate> {
    let (month, day) = extract_month_day(token)?;
    let in_range = |d: &CalendarDate| range_start <= *d && *d <= range_end;

    let first = NaiveDate::from_ymd_opt(range_start.year(), month, day);
    if let Some(d) = first.filter(in_range) {
        return Some(d);
    }

    let second = if range_end.year() != range_start.year() {
        NaiveDate::from_ymd_opt(range_end.year(), month, day)
    } else {
        None
    };
    if let Some(d) = second.filter(in_range) {
        return Some(d);
    }

    // Lenient fallback. Feb 29 may only exist in the second year.
    if first.is_none() && second.is_some() {
        log::debug!("'{}' only valid in {}, using it out of range", token, range_end.year());
        return second;
    }
    if first.is_some() {
        log::debug!("'{}' resolved outside the configured range", token);
    }
    first
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_month_day_forms() {
        assert_eq!(extract_month_day("9/2"), Some((9, 2)));
        assert_eq!(extract_month_day("12-25"), Some((12, 25)));
        assert_eq!(extract_month_day("9/2(Mon)"), Some((9, 2)));
        assert_eq!(extract_month_day("on 10/31 evening"), Some((10, 31)));
        assert_eq!(extract_month_day("2024-09-01"), Some((9, 1)));
        assert_eq!(extract_month_day("123/4"), None);
        assert_eq!(extract_month_day("tomorrow"), None);
    }
}
