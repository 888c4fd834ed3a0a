// File: ./src/grid.rs
// Month-style grid: the configured range padded to whole weeks.
use crate::model::date::{CalendarDate, canonical, expand_range, week_end, week_start, weekday_of};
use crate::model::week::{label_of, week_index_of};
use crate::model::{DepartmentFilter, Event, SemesterConfig};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
pub struct DisplayDay {
    pub date: CalendarDate,
    /// 0 = Sunday .. 6 = Saturday
    pub weekday: u32,
    pub events: Vec<Event>,
    /// Inside the unpadded configured range.
    pub in_range: bool,
    pub week_index: i64,
}

impl DisplayDay {
    pub fn is_weekend(&self) -> bool {
        self.weekday == 0 || self.weekday == 6
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DisplayWeek {
    pub days: Vec<DisplayDay>,
}

impl DisplayWeek {
    pub fn week_index(&self) -> i64 {
        self.days.first().map(|d| d.week_index).unwrap_or_default()
    }

    pub fn label(&self, config: &SemesterConfig) -> String {
        label_of(self.week_index(), config)
    }

    /// `YYYY-MM-DD - YYYY-MM-DD` of the first and last day shown.
    pub fn caption(&self) -> String {
        match (self.days.first(), self.days.last()) {
            (Some(first), Some(last)) => {
                format!("{} - {}", canonical(first.date), canonical(last.date))
            }
            _ => String::new(),
        }
    }

    pub fn event_count(&self) -> usize {
        self.days.iter().map(|d| d.events.len()).sum()
    }
}

/// Expands the config's range into display weeks with each day's events.
///
/// Returns no weeks for a reversed range.
pub fn build_grid(
    config: &SemesterConfig,
    events: &[Event],
    filter: &DepartmentFilter,
) -> Vec<DisplayWeek> {
    if config.range_start > config.range_end {
        return Vec::new();
    }

    let mut by_date: HashMap<CalendarDate, Vec<&Event>> = HashMap::new();
    for event in events.iter().filter(|e| filter.matches(e)) {
        by_date.entry(event.date).or_default().push(event);
    }

    let anchor = config.anchor();
    let days: Vec<DisplayDay> = expand_range(week_start(config.range_start), week_end(config.range_end))
        .into_iter()
        .map(|date| DisplayDay {
            date,
            weekday: weekday_of(date),
            events: by_date
                .get(&date)
                .map(|list| list.iter().map(|e| (*e).clone()).collect())
                .unwrap_or_default(),
            in_range: config.contains(date),
            week_index: week_index_of(date, anchor),
        })
        .collect();

    let weeks = partition_weeks(days);
    log::debug!(
        "Grid built: {} weeks, {} events placed",
        weeks.len(),
        weeks.iter().map(DisplayWeek::event_count).sum::<usize>()
    );
    weeks
}

/// Cuts after every 7th day and after the final day.
fn partition_weeks(days: Vec<DisplayDay>) -> Vec<DisplayWeek> {
    let total = days.len();
    let mut weeks = Vec::new();
    let mut current = Vec::with_capacity(7);
    for (i, day) in days.into_iter().enumerate() {
        current.push(day);
        if current.len() == 7 || i + 1 == total {
            weeks.push(DisplayWeek {
                days: std::mem::take(&mut current),
            });
        }
    }
    weeks
}
