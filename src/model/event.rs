// File: ./src/model/event.rs
use crate::model::date::CalendarDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Department used when an imported row leaves the column blank.
pub const OTHER_DEPARTMENT: &str = "Other";

/// One dated announcement as held by the event store.
///
/// The core only reads these; create/delete go through `store::EventStore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub date: CalendarDate,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub content: String,
    /// Milliseconds since the Unix epoch.
    #[serde(default, alias = "timestamp")]
    pub created_at: i64,
    #[serde(default)]
    pub author_id: String,
}

/// An event that has not been given an id yet (manual entry or a CSV row).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub date: CalendarDate,
    pub department: String,
    pub section: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub name: String,
    #[serde(default)]
    pub sections: Vec<String>,
}

impl Department {
    pub fn new(name: &str, sections: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            sections: sections.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// First listed section, used when none is given explicitly.
    pub fn default_section(&self) -> &str {
        self.sections.first().map(String::as_str).unwrap_or("")
    }
}

pub fn default_departments() -> Vec<Department> {
    vec![
        Department::new(
            "Academic Affairs",
            &["Curriculum", "Registration", "Equipment", "Information"],
        ),
        Department::new(
            "Student Affairs",
            &["Activities", "Discipline", "Health", "Athletics"],
        ),
        Department::new("General Affairs", &["Documents", "Operations", "Cashier"]),
        Department::new("Counseling", &["Guidance", "Records", "Special Education"]),
        Department::new("Personnel", &["Personnel"]),
        Department::new("Accounting", &["Accounting"]),
        Department::new("Principal's Office", &["Principal"]),
    ]
}

/// Which department's events a view shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DepartmentFilter {
    #[default]
    All,
    Only(String),
}

impl DepartmentFilter {
    /// `None`, empty, `all` or `ALL` mean no filtering.
    pub fn parse(input: Option<&str>) -> Self {
        match input.map(str::trim) {
            None | Some("") => Self::All,
            Some(s) if s.eq_ignore_ascii_case("all") => Self::All,
            Some(s) => Self::Only(s.to_string()),
        }
    }

    pub fn matches(&self, event: &Event) -> bool {
        match self {
            Self::All => true,
            Self::Only(dept) => event.department == *dept,
        }
    }
}

impl fmt::Display for DepartmentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All departments"),
            Self::Only(dept) => write!(f, "{}", dept),
        }
    }
}
