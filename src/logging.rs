//! Tracing setup for the `simfin` binary

use chrono::{Local, NaiveDate};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::errors::{HarnessError, Result};

pub const PROCESS_STARTED: &str = "******************** Process Started ********************";
pub const PROCESS_ENDED: &str = "******************** Process Ended ********************";

/// Map a configured level token onto a filter directive.
///
/// Accepts the usual tracing names plus `warning`, `fatal` and `unknown`.
pub fn level_directive(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" | "fatal" | "unknown" => Ok("error"),
        "off" => Ok("off"),
        other => Err(HarnessError::configuration(format!(
            "unsupported log level '{}'",
            other
        ))),
    }
}

fn filter_for(directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
}

/// The log file for `date`: `simfin.log` becomes `simfin.2025-02-06.log`
pub fn dated_log_file(log_file: &Path, date: NaiveDate) -> PathBuf {
    let stem = log_file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("simfin");
    let name = match log_file.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}.{}.{}", stem, date.format("%Y-%m-%d"), ext),
        None => format!("{}.{}", stem, date.format("%Y-%m-%d")),
    };
    log_file.with_file_name(name)
}

/// Append log lines to today's file for `log_file` at the configured level.
/// A new file starts each day.
pub fn init_file_logging(config: &LoggingConfig, log_file: &Path) -> Result<()> {
    let level = config
        .level
        .as_deref()
        .ok_or_else(|| HarnessError::configuration("log level not defined"))?;
    let directive = level_directive(level)?;

    let log_file = dated_log_file(log_file, Local::now().date_naive());
    let file = OpenOptions::new().create(true).append(true).open(&log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter_for(directive))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| HarnessError::configuration(format!("unable to install logger: {}", e)))
}

/// Console-only logging used when the logging section cannot be applied
pub fn init_fallback_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for("warn"))
        .with_writer(std::io::stderr)
        .try_init();
}
