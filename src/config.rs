// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::model::date::{default_weekday_names, parse_date};
use crate::model::event::default_departments;
use crate::model::{Department, SemesterConfig};
use crate::storage::LocalStorage;
use anyhow::{Error, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;

fn default_log_level() -> String {
    "info".to_string()
}

/// Keys accepted by [`Config::set_field`].
pub const SETTABLE_KEYS: &[&str] = &[
    "name",
    "range_start",
    "range_end",
    "semester_start",
    "semester_end",
    "pre_label",
    "post_label",
    "week_label",
    "author_id",
    "log_level",
];

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Config {
    /// Identity stamped on created events.
    #[serde(default)]
    pub author_id: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Sunday first.
    #[serde(default = "default_weekday_names")]
    pub weekday_names: [String; 7],
    #[serde(default)]
    pub semester: SemesterConfig,
    #[serde(default = "default_departments")]
    pub departments: Vec<Department>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            author_id: String::new(),
            log_level: default_log_level(),
            weekday_names: default_weekday_names(),
            semester: SemesterConfig::default(),
            departments: default_departments(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path)
            .map_err(|e| anyhow!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;

        Ok(config)
    }

    /// First run gets defaults; a present but broken file is still an error.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(cfg) => Ok(cfg),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::info!("No config file yet, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Whether the error means the config file does not exist.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }
        err.chain().any(|cause| {
            cause
                .downcast_ref::<std::io::Error>()
                .is_some_and(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
        })
    }

    /// Save configuration using an explicit context.
    /// An empty `author_id` is filled with a fresh id first.
    pub fn save(&mut self, ctx: &dyn AppContext) -> Result<()> {
        let problems = self.semester.validate();
        if !problems.is_empty() {
            return Err(anyhow!("Invalid semester settings: {}", problems.join("; ")));
        }
        self.ensure_author_id();
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(&*self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        log::info!("Config saved to {}", path.display());
        Ok(())
    }

    pub fn ensure_author_id(&mut self) -> &str {
        if self.author_id.trim().is_empty() {
            self.author_id = uuid::Uuid::new_v4().simple().to_string();
        }
        &self.author_id
    }

    pub fn department(&self, name: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.name == name)
    }

    /// Sets one scalar setting from its text form.
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<()> {
        let date = |v: &str| parse_date(v).ok_or_else(|| anyhow!("'{}' is not a date (YYYY-MM-DD)", v));
        let opt_date = |v: &str| -> Result<_> {
            if v.trim().is_empty() {
                Ok(None)
            } else {
                date(v).map(Some)
            }
        };
        let sem = &mut self.semester;
        match key {
            "name" => sem.name = value.to_string(),
            "range_start" => sem.range_start = date(value)?,
            "range_end" => sem.range_end = date(value)?,
            "semester_start" => sem.semester_start = opt_date(value)?,
            "semester_end" => sem.semester_end = opt_date(value)?,
            "pre_label" => sem.pre_label = value.to_string(),
            "post_label" => sem.post_label = value.to_string(),
            "week_label" => sem.week_label = value.to_string(),
            "author_id" => self.author_id = value.trim().to_string(),
            "log_level" => self.log_level = value.trim().to_lowercase(),
            _ => {
                return Err(anyhow!(
                    "Unknown setting '{}' (expected one of: {})",
                    key,
                    SETTABLE_KEYS.join(", ")
                ));
            }
        }
        Ok(())
    }
}
