// File: ./src/store.rs
//! Host-side event collection.
//!
//! Holds the latest full snapshot of events and forwards create/delete
//! requests to [`LocalStorage`]. Every write refreshes the snapshot from
//! what was actually persisted, so views are always recomputed from a
//! complete set rather than a diff.
use crate::codec::{import_rows, parse_file};
use crate::context::AppContext;
use crate::model::{Event, NewEvent, SemesterConfig};
use crate::storage::LocalStorage;
use anyhow::{Result, bail};
use chrono::Utc;
use std::sync::Arc;
use std::time::SystemTime;

/// Outcome of a bulk import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    /// Rows whose date could not be resolved or whose content was blank.
    pub skipped: usize,
    /// Rows that mapped fine but could not be written.
    pub failed: usize,
}

#[derive(Debug, Clone)]
pub struct EventStore {
    ctx: Arc<dyn AppContext>,
    events: Vec<Event>,
    loaded_at: Option<SystemTime>,
}

/// `"{millis}_{first five chars of author}"`, suffixed on collision.
fn make_id(created_at: i64, author_id: &str, existing: &[Event]) -> String {
    let prefix: String = author_id.chars().take(5).collect();
    let base = format!("{}_{}", created_at, prefix);
    if !existing.iter().any(|e| e.id == base) {
        return base;
    }
    (2..)
        .map(|n| format!("{}-{}", base, n))
        .find(|candidate| !existing.iter().any(|e| e.id == *candidate))
        .unwrap_or(base)
}

impl EventStore {
    pub fn open(ctx: Arc<dyn AppContext>) -> Result<Self> {
        let mut store = Self {
            ctx,
            events: Vec::new(),
            loaded_at: None,
        };
        store.reload()?;
        Ok(store)
    }

    /// The full current event set.
    pub fn snapshot(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn reload(&mut self) -> Result<()> {
        self.loaded_at = LocalStorage::events_modified(self.ctx.as_ref());
        self.events = LocalStorage::load_events(self.ctx.as_ref())?;
        log::debug!("Loaded {} events", self.events.len());
        Ok(())
    }

    /// Reloads only when the file changed since the last load.
    /// Returns whether a new snapshot was taken.
    pub fn refresh_if_changed(&mut self) -> Result<bool> {
        let modified = LocalStorage::events_modified(self.ctx.as_ref());
        if modified.is_some() && modified != self.loaded_at {
            self.reload()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Persists a new event and returns its id.
    pub fn create(&mut self, new_event: NewEvent, author_id: &str) -> Result<String> {
        if new_event.content.trim().is_empty() {
            bail!("Event content must not be empty");
        }
        let created_at = Utc::now().timestamp_millis();
        let (id, events) = LocalStorage::update_events(self.ctx.as_ref(), |events| {
            let id = make_id(created_at, author_id, events);
            events.push(Event {
                id: id.clone(),
                date: new_event.date,
                department: new_event.department,
                section: new_event.section,
                content: new_event.content,
                created_at,
                author_id: author_id.to_string(),
            });
            Ok(id)
        })?;
        self.events = events;
        self.loaded_at = LocalStorage::events_modified(self.ctx.as_ref());
        log::info!("Created event {}", id);
        Ok(id)
    }

    /// Returns false when no event had this id.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let (removed, events) = LocalStorage::update_events(self.ctx.as_ref(), |events| {
            let before = events.len();
            events.retain(|e| e.id != id);
            Ok(events.len() != before)
        })?;
        self.events = events;
        self.loaded_at = LocalStorage::events_modified(self.ctx.as_ref());
        if removed {
            log::info!("Deleted event {}", id);
        } else {
            log::warn!("Delete requested for unknown event {}", id);
        }
        Ok(removed)
    }

    /// Parses a CSV export/template and writes each usable row as its own
    /// create. Neither unusable rows nor failed writes stop the batch.
    pub fn import_csv(
        &mut self,
        text: &str,
        config: &SemesterConfig,
        author_id: &str,
    ) -> ImportReport {
        let batch = import_rows(&parse_file(text), config);
        let mut report = ImportReport {
            skipped: batch.skipped,
            ..Default::default()
        };
        for new_event in batch.events {
            match self.create(new_event, author_id) {
                Ok(_) => report.imported += 1,
                Err(e) => {
                    log::warn!("Import write failed: {:#}", e);
                    report.failed += 1;
                }
            }
        }
        log::info!(
            "Import finished: {} imported, {} skipped, {} failed",
            report.imported,
            report.skipped,
            report.failed
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(id: &str) -> Event {
        Event {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
            department: String::new(),
            section: String::new(),
            content: String::new(),
            created_at: 0,
            author_id: String::new(),
        }
    }

    #[test]
    fn test_make_id_uses_author_prefix_and_avoids_collisions() {
        assert_eq!(make_id(1000, "abcdefgh", &[]), "1000_abcde");
        let existing = vec![event("1000_abcde"), event("1000_abcde-2")];
        assert_eq!(make_id(1000, "abcdefgh", &existing), "1000_abcde-3");
    }
}
