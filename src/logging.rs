// File: ./src/logging.rs
//! File logger bootstrap.
//!
//! Logs go to `schoolcal.log` in the data directory (appended). Init is
//! once per process; later calls are no-ops.
use crate::context::AppContext;
use anyhow::{Context, Result, anyhow};
use log::LevelFilter;
use once_cell::sync::OnceCell;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::OpenOptions;
use std::path::PathBuf;

static LOG_PATH: OnceCell<PathBuf> = OnceCell::new();

pub fn parse_level(level: &str) -> Result<LevelFilter> {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => Ok(LevelFilter::Off),
        "error" => Ok(LevelFilter::Error),
        "warn" | "warning" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        other => Err(anyhow!("Unsupported log level '{}'", other)),
    }
}

pub fn init(ctx: &dyn AppContext, level: &str) -> Result<()> {
    let filter = parse_level(level)?;
    if LOG_PATH.get().is_some() {
        return Ok(());
    }

    let path = ctx.get_log_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();
    WriteLogger::init(filter, config, file).map_err(|e| anyhow!("Logger init failed: {}", e))?;
    let _ = LOG_PATH.set(path);

    log::info!("schoolcal v{} started (level {})", env!("CARGO_PKG_VERSION"), filter);
    Ok(())
}

/// Where logs are written, once [`init`] has succeeded.
pub fn log_path() -> Option<&'static PathBuf> {
    LOG_PATH.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("INFO").unwrap(), LevelFilter::Info);
        assert_eq!(parse_level(" warning ").unwrap(), LevelFilter::Warn);
        assert!(parse_level("loud").is_err());
    }
}
