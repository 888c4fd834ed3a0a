// File: ./src/storage.rs
// Manages local file storage for the event collection.
//
// ⚠️ VERSION BUMP REQUIRED:
// Changes to the Event struct serialization require incrementing
// EVENTS_STORAGE_VERSION below.
use crate::context::AppContext;
use crate::model::Event;
use anyhow::{Context, Result};
use fs2::FileExt;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

// Version history:
// - v1: camelCase records, `createdAt` in milliseconds
const EVENTS_STORAGE_VERSION: u32 = 1;

#[derive(Serialize)]
struct EventStorageData<'a> {
    version: u32,
    events: &'a [Event],
}

pub struct LocalStorage;

impl LocalStorage {
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut name = file_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        file_path.with_file_name(name)
    }

    /// Runs `f` while holding an exclusive lock on a sibling `.lock` file.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {:?}", lock_path))?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Decodes records one by one; a record that does not deserialize is
    /// logged and left out instead of failing the whole file.
    fn decode(json: &str) -> Result<Vec<Event>> {
        let root: Value = serde_json::from_str(json)?;
        let records = match root {
            Value::Object(mut map) => {
                let version = map.get("version").and_then(Value::as_u64).unwrap_or(0);
                if version > EVENTS_STORAGE_VERSION as u64 {
                    log::warn!(
                        "Event file version {} is newer than supported v{}",
                        version,
                        EVENTS_STORAGE_VERSION
                    );
                }
                match map.remove("events") {
                    Some(Value::Array(items)) => items,
                    _ => Vec::new(),
                }
            }
            // Unversioned: a bare array of records.
            Value::Array(items) => items,
            _ => anyhow::bail!("Unexpected event file layout"),
        };

        let mut events = Vec::with_capacity(records.len());
        for record in records {
            match serde_json::from_value::<Event>(record) {
                Ok(e) => events.push(e),
                Err(e) => log::warn!("Skipping malformed event record: {}", e),
            }
        }
        Ok(events)
    }

    fn load_unlocked(path: &Path) -> Result<Vec<Event>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read events file {:?}", path))?;
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }
        Self::decode(&json).with_context(|| format!("Failed to parse events file {:?}", path))
    }

    fn save_unlocked(path: &Path, events: &[Event]) -> Result<()> {
        let data = EventStorageData {
            version: EVENTS_STORAGE_VERSION,
            events,
        };
        let json = serde_json::to_string_pretty(&data)?;
        Self::atomic_write(path, json)
    }

    pub fn load_events(ctx: &dyn AppContext) -> Result<Vec<Event>> {
        let path = ctx.get_events_path()?;
        Self::with_lock(&path, || Self::load_unlocked(&path))
    }

    pub fn save_events(ctx: &dyn AppContext, events: &[Event]) -> Result<()> {
        let path = ctx.get_events_path()?;
        Self::with_lock(&path, || Self::save_unlocked(&path, events))
    }

    /// Read-modify-write under a single lock, so concurrent writers cannot
    /// lose each other's changes. Returns the collection as written.
    pub fn update_events<F, T>(ctx: &dyn AppContext, f: F) -> Result<(T, Vec<Event>)>
    where
        F: FnOnce(&mut Vec<Event>) -> Result<T>,
    {
        let path = ctx.get_events_path()?;
        Self::with_lock(&path, || {
            let mut events = Self::load_unlocked(&path)?;
            let out = f(&mut events)?;
            Self::save_unlocked(&path, &events)?;
            Ok((out, events))
        })
    }

    /// Modification time of the events file, used by pollers to spot changes.
    pub fn events_modified(ctx: &dyn AppContext) -> Option<std::time::SystemTime> {
        let path = ctx.get_events_path().ok()?;
        fs::metadata(path).and_then(|m| m.modified()).ok()
    }
}
