// File: ./src/model/mod.rs
pub mod date;
pub mod event;
pub mod resolver;
pub mod semester;
pub mod week;

pub use date::CalendarDate;
pub use event::{Department, DepartmentFilter, Event, NewEvent};
pub use semester::SemesterConfig;
pub use week::WeekKind;
