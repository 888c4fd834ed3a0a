// File: ./src/table.rs
// Dense printable table: date-sorted rows with merged week and date cells.
use crate::model::week::{label_of, week_index_of};
use crate::model::{DepartmentFilter, Event, SemesterConfig};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct MergedRow {
    pub event: Event,
    pub week_index: i64,
    pub week_label: String,
    /// Rows covered by the week cell starting here; 0 when covered by a row above.
    pub week_span: usize,
    /// Same as `week_span`, for the date cell.
    pub date_span: usize,
}

/// Filters by department and sorts ascending by date.
/// The sort is stable, so same-day events keep their relative order.
pub fn prepare_events(events: &[Event], filter: &DepartmentFilter) -> Vec<Event> {
    let mut rows: Vec<Event> = events.iter().filter(|e| filter.matches(e)).cloned().collect();
    rows.sort_by_key(|e| e.date);
    rows
}

/// Run lengths of equal consecutive keys, written on the first member of each
/// run; every other member gets 0.
pub fn run_spans<K: PartialEq>(keys: &[K]) -> Vec<usize> {
    let mut spans = vec![0; keys.len()];
    let mut head = 0;
    for i in 1..=keys.len() {
        if i == keys.len() || keys[i] != keys[head] {
            spans[head] = i - head;
            head = i;
        }
    }
    spans
}

/// Builds the merge plan for an already sorted, filtered list.
/// Output order equals input order.
pub fn aggregate(sorted: &[Event], config: &SemesterConfig) -> Vec<MergedRow> {
    let anchor = config.anchor();
    let week_indices: Vec<i64> = sorted.iter().map(|e| week_index_of(e.date, anchor)).collect();
    let dates: Vec<_> = sorted.iter().map(|e| e.date).collect();

    let week_spans = run_spans(&week_indices);
    let date_spans = run_spans(&dates);

    sorted
        .iter()
        .zip(week_indices)
        .zip(week_spans.into_iter().zip(date_spans))
        .map(|((event, week_index), (week_span, date_span))| MergedRow {
            event: event.clone(),
            week_index,
            week_label: label_of(week_index, config),
            week_span,
            date_span,
        })
        .collect()
}

/// [`prepare_events`] followed by [`aggregate`].
pub fn build_table(
    config: &SemesterConfig,
    events: &[Event],
    filter: &DepartmentFilter,
) -> Vec<MergedRow> {
    let rows = aggregate(&prepare_events(events, filter), config);
    log::debug!("Table built: {} rows ({})", rows.len(), filter);
    rows
}
