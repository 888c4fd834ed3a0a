// File: ./src/model/week.rs
// Semester week numbering and labels.
use crate::model::date::{CalendarDate, week_start};
use crate::model::semester::SemesterConfig;
use chrono::Duration;

/// Where a week falls relative to the semester window.
/// Each variant carries its own counter, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekKind {
    Pre(i64),
    Regular(i64),
    Post(i64),
}

/// Week index of `date` relative to `anchor`.
///
/// The anchor is moved back to its week start first, so boundaries always
/// fall on Sunday. The anchor's own week is 1, the week before it is 0, then
/// -1 and so on: `floor(days / 7) + 1`.
pub fn week_index_of(date: CalendarDate, anchor: CalendarDate) -> i64 {
    let adjusted = week_start(anchor);
    let days = (date - adjusted).num_days();
    days.div_euclid(7) + 1
}

/// Sunday..Saturday span of a week index. Inverse of [`week_index_of`].
pub fn week_date_range(week_index: i64, anchor: CalendarDate) -> (CalendarDate, CalendarDate) {
    let start = week_start(anchor) + Duration::weeks(week_index - 1);
    (start, start + Duration::days(6))
}

/// Checked in order: pre-semester, post-semester (only with a configured
/// `semester_end`), then regular.
pub fn classify(week_index: i64, config: &SemesterConfig) -> WeekKind {
    if week_index < 1 {
        return WeekKind::Pre(1 - week_index);
    }
    if let Some(end) = config.semester_end {
        let end_index = week_index_of(end, config.anchor());
        if week_index > end_index {
            return WeekKind::Post(week_index - end_index);
        }
    }
    WeekKind::Regular(week_index)
}

pub fn label_of(week_index: i64, config: &SemesterConfig) -> String {
    match classify(week_index, config) {
        WeekKind::Pre(n) => format!("{}{}", config.pre_label, config.ordinal(n)),
        WeekKind::Post(n) => format!("{}{}", config.post_label, config.ordinal(n)),
        WeekKind::Regular(n) => config.ordinal(n),
    }
}

/// Label for the week containing `date`.
pub fn label_for_date(date: CalendarDate, config: &SemesterConfig) -> String {
    label_of(week_index_of(date, config.anchor()), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> CalendarDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_anchor_mid_week_aligns_to_sunday() {
        // Anchor on Wednesday 2024-09-04; its week starts Sunday 2024-09-01.
        let anchor = d(2024, 9, 4);
        assert_eq!(week_index_of(d(2024, 9, 1), anchor), 1);
        assert_eq!(week_index_of(d(2024, 9, 7), anchor), 1);
        assert_eq!(week_index_of(d(2024, 9, 8), anchor), 2);
        assert_eq!(week_index_of(d(2024, 8, 31), anchor), 0);
        assert_eq!(week_index_of(d(2024, 8, 24), anchor), -1);
        assert_eq!(week_index_of(d(2024, 8, 25), anchor), 0);
    }

    #[test]
    fn test_classify_order() {
        let mut cfg = SemesterConfig::with_range(d(2024, 8, 1), d(2025, 1, 31));
        cfg.semester_start = Some(d(2024, 9, 2));
        cfg.semester_end = Some(d(2024, 9, 20));
        assert_eq!(classify(0, &cfg), WeekKind::Pre(1));
        assert_eq!(classify(-2, &cfg), WeekKind::Pre(3));
        assert_eq!(classify(3, &cfg), WeekKind::Regular(3));
        assert_eq!(classify(4, &cfg), WeekKind::Post(1));
    }
}
