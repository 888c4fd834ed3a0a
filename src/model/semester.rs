// File: ./src/model/semester.rs
use crate::model::date::{CalendarDate, canonical};
use chrono::{Local, Months};
use serde::{Deserialize, Serialize};

fn default_name() -> String {
    "Semester".to_string()
}
fn default_range_start() -> CalendarDate {
    Local::now().date_naive()
}
fn default_range_end() -> CalendarDate {
    let today = Local::now().date_naive();
    today.checked_add_months(Months::new(6)).unwrap_or(today)
}
fn default_pre_label() -> String {
    "Pre-semester ".to_string()
}
fn default_post_label() -> String {
    "Post-semester ".to_string()
}
fn default_week_label() -> String {
    "Week {n}".to_string()
}

/// Displayed window plus the anchor window that defines week 1..N.
///
/// Passed by reference into every computation; nothing keeps a copy between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_range_start")]
    pub range_start: CalendarDate,
    #[serde(default = "default_range_end")]
    pub range_end: CalendarDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester_start: Option<CalendarDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester_end: Option<CalendarDate>,
    #[serde(default = "default_pre_label")]
    pub pre_label: String,
    #[serde(default = "default_post_label")]
    pub post_label: String,
    /// Ordinal template; `{n}` is replaced with the week number.
    #[serde(default = "default_week_label")]
    pub week_label: String,
}

impl Default for SemesterConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            range_start: default_range_start(),
            range_end: default_range_end(),
            semester_start: None,
            semester_end: None,
            pre_label: default_pre_label(),
            post_label: default_post_label(),
            week_label: default_week_label(),
        }
    }
}

impl SemesterConfig {
    /// Range-only config with default labels and no semester window.
    pub fn with_range(range_start: CalendarDate, range_end: CalendarDate) -> Self {
        Self {
            range_start,
            range_end,
            ..Self::default()
        }
    }

    /// Week-1 reference: `semester_start`, or `range_start` when unset.
    pub fn anchor(&self) -> CalendarDate {
        self.semester_start.unwrap_or(self.range_start)
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.range_start <= date && date <= self.range_end
    }

    pub fn ordinal(&self, n: i64) -> String {
        if self.week_label.contains("{n}") {
            self.week_label.replace("{n}", &n.to_string())
        } else {
            format!("{}{}", self.week_label, n)
        }
    }

    /// Human-readable problems, empty when the config is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.range_start > self.range_end {
            problems.push(format!(
                "range start {} is after range end {}",
                canonical(self.range_start),
                canonical(self.range_end)
            ));
        }
        if let (Some(s), Some(e)) = (self.semester_start, self.semester_end)
            && s > e
        {
            problems.push(format!(
                "semester start {} is after semester end {}",
                canonical(s),
                canonical(e)
            ));
        }
        problems
    }
}
