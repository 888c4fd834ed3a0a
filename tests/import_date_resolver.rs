// Tests for resolving year-less import dates.
use chrono::NaiveDate;
use schoolcal::model::resolver::resolve_import_date;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn test_invalid_month_day_is_no_match() {
    assert_eq!(resolve_import_date("2/30", d(2024, 9, 1), d(2025, 1, 31)), None);
    assert_eq!(resolve_import_date("13/01", d(2024, 9, 1), d(2025, 1, 31)), None);
    assert_eq!(resolve_import_date("no date here", d(2024, 9, 1), d(2025, 1, 31)), None);
    assert_eq!(resolve_import_date("", d(2024, 9, 1), d(2025, 1, 31)), None);
}

#[test]
fn test_resolves_in_start_year() {
    assert_eq!(
        resolve_import_date("12/25", d(2024, 9, 1), d(2025, 1, 31)),
        Some(d(2024, 12, 25))
    );
    assert_eq!(
        resolve_import_date("9-1", d(2024, 9, 1), d(2025, 1, 31)),
        Some(d(2024, 9, 1))
    );
}

#[test]
fn test_range_spanning_new_year_uses_end_year() {
    assert_eq!(
        resolve_import_date("1/10", d(2024, 9, 1), d(2025, 1, 31)),
        Some(d(2025, 1, 10))
    );
    assert_eq!(
        resolve_import_date("1/31(Fri)", d(2024, 9, 1), d(2025, 1, 31)),
        Some(d(2025, 1, 31))
    );
}

#[test]
fn test_out_of_range_falls_back_to_start_year() {
    // Neither 2024-06-15 nor 2025-06-15 is inside the window.
    assert_eq!(
        resolve_import_date("6/15", d(2024, 9, 1), d(2025, 1, 31)),
        Some(d(2024, 6, 15))
    );
    // Single-year window: no second attempt.
    assert_eq!(
        resolve_import_date("1/10", d(2025, 2, 1), d(2025, 6, 30)),
        Some(d(2025, 1, 10))
    );
}

#[test]
fn test_exported_date_cells_resolve() {
    assert_eq!(
        resolve_import_date("9/2(Mon)", d(2024, 8, 25), d(2025, 1, 31)),
        Some(d(2024, 9, 2))
    );
    assert_eq!(
        resolve_import_date("10/9(三)", d(2024, 8, 25), d(2025, 1, 31)),
        Some(d(2024, 10, 9))
    );
}

#[test]
fn test_leap_day_only_valid_in_end_year() {
    // 2023-02-29 does not exist, 2024-02-29 does.
    assert_eq!(
        resolve_import_date("2/29", d(2023, 9, 1), d(2024, 1, 31)),
        Some(d(2024, 2, 29))
    );
    assert_eq!(
        resolve_import_date("2/29", d(2023, 9, 1), d(2024, 6, 30)),
        Some(d(2024, 2, 29))
    );
}
