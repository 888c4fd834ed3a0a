// File: ./src/view.rs
//! Recompute entry point for hosts.
//!
//! Hosts call [`CalendarView::compute`] with the full current event set and
//! config every time either changes. Nothing is cached here, so a fresh
//! snapshot always yields a consistent view.
use crate::grid::{DisplayWeek, build_grid};
use crate::model::{DepartmentFilter, Event, SemesterConfig};
use crate::table::{MergedRow, build_table};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CalendarView {
    pub weeks: Vec<DisplayWeek>,
    pub rows: Vec<MergedRow>,
    /// Events in the snapshot falling outside the configured range.
    pub out_of_range: usize,
}

impl CalendarView {
    pub fn compute(events: &[Event], config: &SemesterConfig, filter: &DepartmentFilter) -> Self {
        let out_of_range = events
            .iter()
            .filter(|e| filter.matches(e) && !config.contains(e.date))
            .count();
        Self {
            weeks: build_grid(config, events, filter),
            rows: build_table(config, events, filter),
            out_of_range,
        }
    }
}
