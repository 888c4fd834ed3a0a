// Tests for the merged-row table aggregation.
use chrono::NaiveDate;
use schoolcal::model::week::week_index_of;
use schoolcal::model::{DepartmentFilter, Event, SemesterConfig};
use schoolcal::table::{aggregate, build_table, prepare_events};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn event(id: &str, date: NaiveDate, dept: &str) -> Event {
    Event {
        id: id.to_string(),
        date,
        department: dept.to_string(),
        section: String::new(),
        content: format!("event {}", id),
        created_at: 0,
        author_id: String::new(),
    }
}

/// Anchor Sunday 2024-09-01: week 5 is 09-29..10-05, week 6 starts 10-06.
fn config() -> SemesterConfig {
    SemesterConfig::with_range(d(2024, 9, 1), d(2025, 1, 31))
}

fn spans(rows: &[schoolcal::table::MergedRow]) -> (Vec<usize>, Vec<usize>) {
    (
        rows.iter().map(|r| r.week_span).collect(),
        rows.iter().map(|r| r.date_span).collect(),
    )
}

#[test]
fn test_week_spans_5_5_6() {
    let cfg = config();
    let events = vec![
        event("a", d(2024, 9, 30), "X"),
        event("b", d(2024, 10, 2), "X"),
        event("c", d(2024, 10, 7), "X"),
    ];
    let indices: Vec<i64> = events.iter().map(|e| week_index_of(e.date, cfg.anchor())).collect();
    assert_eq!(indices, vec![5, 5, 6]);

    let rows = aggregate(&events, &cfg);
    let (week, date) = spans(&rows);
    assert_eq!(week, vec![2, 0, 1]);
    assert_eq!(date, vec![1, 1, 1]);
    assert_eq!(rows[0].week_label, "Week 5");
    assert_eq!(rows[2].week_label, "Week 6");
}

#[test]
fn test_date_spans_group_independently() {
    let cfg = config();
    let events = vec![
        event("a", d(2024, 10, 2), "X"),
        event("b", d(2024, 10, 2), "X"),
        event("c", d(2024, 10, 7), "X"),
    ];
    let (week, date) = spans(&aggregate(&events, &cfg));
    assert_eq!(week, vec![2, 0, 1]);
    assert_eq!(date, vec![2, 0, 1]);

    let events = vec![
        event("a", d(2024, 9, 29), "X"),
        event("b", d(2024, 10, 1), "X"),
        event("c", d(2024, 10, 1), "X"),
        event("d", d(2024, 10, 6), "X"),
    ];
    let (week, date) = spans(&aggregate(&events, &cfg));
    assert_eq!(week, vec![3, 0, 0, 1]);
    assert_eq!(date, vec![1, 2, 0, 1]);
}

#[test]
fn test_spans_cover_every_row() {
    let cfg = config();
    let events: Vec<Event> = (0..40)
        .map(|i| event(&i.to_string(), d(2024, 9, 1) + chrono::Duration::days(i / 3), "X"))
        .collect();
    let rows = aggregate(&events, &cfg);
    assert_eq!(rows.iter().map(|r| r.week_span).sum::<usize>(), rows.len());
    assert_eq!(rows.iter().map(|r| r.date_span).sum::<usize>(), rows.len());
    assert_eq!(rows[0].week_span, 21); // 7 days x 3 events
}

#[test]
fn test_prepare_is_stable_and_filters() {
    let events = vec![
        event("late", d(2024, 10, 9), "A"),
        event("first-same-day", d(2024, 10, 1), "A"),
        event("other-dept", d(2024, 10, 1), "B"),
        event("second-same-day", d(2024, 10, 1), "A"),
    ];
    let ids = |list: Vec<Event>| list.into_iter().map(|e| e.id).collect::<Vec<_>>();

    assert_eq!(
        ids(prepare_events(&events, &DepartmentFilter::All)),
        vec!["first-same-day", "other-dept", "second-same-day", "late"]
    );
    assert_eq!(
        ids(prepare_events(&events, &DepartmentFilter::Only("A".to_string()))),
        vec!["first-same-day", "second-same-day", "late"]
    );
}

#[test]
fn test_build_table_preserves_sorted_order() {
    let cfg = config();
    let events = vec![
        event("c", d(2024, 10, 7), "A"),
        event("a", d(2024, 9, 30), "A"),
        event("b", d(2024, 9, 30), "A"),
    ];
    let rows = build_table(&cfg, &events, &DepartmentFilter::All);
    let ids: Vec<&str> = rows.iter().map(|r| r.event.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    let (week, date) = spans(&rows);
    assert_eq!(week, vec![2, 0, 1]);
    assert_eq!(date, vec![2, 0, 1]);
}

#[test]
fn test_empty_input() {
    assert!(build_table(&config(), &[], &DepartmentFilter::All).is_empty());
}
