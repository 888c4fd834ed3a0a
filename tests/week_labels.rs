// Tests for semester week numbering and labels.
use chrono::{Duration, NaiveDate};
use schoolcal::model::SemesterConfig;
use schoolcal::model::date::expand_range;
use schoolcal::model::week::{label_for_date, label_of, week_date_range, week_index_of};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn fall_config() -> SemesterConfig {
    let mut cfg = SemesterConfig::with_range(d(2024, 8, 18), d(2025, 1, 31));
    cfg.semester_start = Some(d(2024, 9, 2)); // Monday; week 1 starts Sun 2024-09-01
    cfg.semester_end = Some(d(2024, 12, 20));
    cfg
}

#[test]
fn test_week_index_monotonic_and_steps_every_seven_days() {
    let anchor = d(2024, 9, 4);
    let days = expand_range(d(2024, 6, 1), d(2025, 3, 1));
    for pair in days.windows(2) {
        let a = week_index_of(pair[0], anchor);
        let b = week_index_of(pair[1], anchor);
        assert!(b >= a);
        assert!(b - a <= 1);
    }
    for day in &days {
        assert_eq!(
            week_index_of(*day + Duration::days(7), anchor),
            week_index_of(*day, anchor) + 1
        );
    }
}

#[test]
fn test_week_date_range_contains_date() {
    let anchor = d(2024, 9, 4);
    for day in expand_range(d(2024, 7, 1), d(2025, 2, 1)) {
        let idx = week_index_of(day, anchor);
        let (start, end) = week_date_range(idx, anchor);
        assert!(start <= day && day <= end, "{} not in {}..{}", day, start, end);
        assert_eq!((end - start).num_days(), 6);
        assert_eq!(week_index_of(start, anchor), idx);
        assert_eq!(week_index_of(end, anchor), idx);
    }
}

#[test]
fn test_labels_pre_regular_post() {
    let cfg = fall_config();
    assert_eq!(label_for_date(d(2024, 9, 1), &cfg), "Week 1");
    assert_eq!(label_for_date(d(2024, 9, 8), &cfg), "Week 2");
    // The week right before week 1 is pre-semester week 1.
    assert_eq!(label_for_date(d(2024, 8, 31), &cfg), "Pre-semester Week 1");
    assert_eq!(label_for_date(d(2024, 8, 24), &cfg), "Pre-semester Week 2");
    // 2024-12-20 is a Friday in week 16 (Sun 12-15 .. Sat 12-21).
    assert_eq!(label_for_date(d(2024, 12, 21), &cfg), "Week 16");
    assert_eq!(label_for_date(d(2024, 12, 22), &cfg), "Post-semester Week 1");
    assert_eq!(label_for_date(d(2025, 1, 5), &cfg), "Post-semester Week 3");
}

#[test]
fn test_no_post_label_without_semester_end() {
    let mut cfg = fall_config();
    cfg.semester_end = None;
    for idx in 1..200 {
        let label = label_of(idx, &cfg);
        assert!(!label.starts_with(&cfg.post_label), "index {} gave {}", idx, label);
    }
    assert_eq!(label_of(60, &cfg), "Week 60");
}

#[test]
fn test_anchor_falls_back_to_range_start() {
    let cfg = SemesterConfig::with_range(d(2024, 9, 4), d(2024, 10, 31));
    assert_eq!(cfg.anchor(), d(2024, 9, 4));
    assert_eq!(label_for_date(d(2024, 9, 1), &cfg), "Week 1");
    assert_eq!(label_for_date(d(2024, 8, 30), &cfg), "Pre-semester Week 1");
}

#[test]
fn test_custom_labels() {
    let mut cfg = fall_config();
    cfg.week_label = "第{n}週".to_string();
    cfg.pre_label = "預備".to_string();
    cfg.post_label = "寒假".to_string();
    assert_eq!(label_of(3, &cfg), "第3週");
    assert_eq!(label_of(0, &cfg), "預備第1週");
    assert_eq!(label_of(17, &cfg), "寒假第1週");
}
