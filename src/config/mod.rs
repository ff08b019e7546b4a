//! Configuration access
//!
//! The harness reads a single YAML document with three top-level sections:
//!
//! ```yaml
//! simfin:
//!   regions: [us, de, cn]
//!   time-frames: [annual, quarterly, ttm]
//!   companies: [standard, bank, insurance]
//!   others: [markets, industries]
//! database:
//!   database: simfin
//!   user: simfin_dev_user
//!   password: secret
//! logging:
//!   level: debug
//!   file_name: simfin.log
//! ```
//!
//! [`ConfigFile`] is loaded once and passed around by reference. The typed
//! accessors return whatever is present; checking the inner structure is the
//! job of [`crate::verify`].

pub mod paths;

pub use paths::{list_files, AppPaths};

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::{HarnessError, Result};

pub const SIMFIN_SECTION: &str = "simfin";
pub const DATABASE_SECTION: &str = "database";
pub const LOGGING_SECTION: &str = "logging";

/// Naming parameters for the SimFin bulk files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimFinConfig {
    pub regions: Vec<String>,
    pub time_frames: Vec<String>,
    pub companies: Vec<String>,
    pub others: Vec<String>,
}

/// Credentials for the staging database
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub database: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

/// Log level and log file name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

/// A parsed configuration document
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
    root: Mapping,
}

impl ConfigFile {
    /// Read and parse the configuration file at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(HarnessError::file_not_found(path));
        }

        let text = fs::read_to_string(path)?;
        let config = Self::parse(&text, path)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration text; `origin` is only used for messages
    pub fn parse(text: &str, origin: impl Into<PathBuf>) -> Result<Self> {
        let path = origin.into();
        let value: Value = serde_yaml::from_str(text).map_err(|e| {
            HarnessError::configuration(format!("invalid syntax in {}: {}", path.display(), e))
        })?;

        match value {
            Value::Mapping(root) => Ok(Self { path, root }),
            Value::Null => Ok(Self {
                path,
                root: Mapping::new(),
            }),
            _ => Err(HarnessError::configuration(format!(
                "{} does not contain a mapping of sections",
                path.display()
            ))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the named top-level section
    pub fn load_section(&self, name: &str) -> Result<&Mapping> {
        match self.root.get(name) {
            Some(Value::Mapping(section)) => Ok(section),
            Some(_) => Err(HarnessError::configuration(format!(
                "section '{}' is not a mapping",
                name
            ))),
            None => Err(HarnessError::configuration(format!(
                "section '{}' missing from {}",
                name,
                self.path.display()
            ))),
        }
    }

    pub fn simfin(&self) -> Result<SimFinConfig> {
        let section = self.load_section(SIMFIN_SECTION)?;

        Ok(SimFinConfig {
            regions: string_list(section, "regions"),
            time_frames: string_list(section, "time-frames"),
            companies: string_list(section, "companies"),
            others: string_list(section, "others"),
        })
    }

    pub fn database(&self) -> Result<DatabaseConfig> {
        let section = self.load_section(DATABASE_SECTION)?;

        Ok(DatabaseConfig {
            database: scalar(section, "database"),
            user: scalar(section, "user"),
            password: scalar(section, "password"),
        })
    }

    pub fn logging(&self) -> Result<LoggingConfig> {
        let section = self.load_section(LOGGING_SECTION)?;

        Ok(LoggingConfig {
            level: scalar(section, "level"),
            file: scalar(section, "file_name"),
        })
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn scalar(section: &Mapping, key: &str) -> Option<String> {
    section.get(key).and_then(scalar_text)
}

// Non-list values come back empty; the verifier reports them.
fn string_list(section: &Mapping, key: &str) -> Vec<String> {
    match section.get(key) {
        Some(Value::Sequence(items)) => items.iter().filter_map(scalar_text).collect(),
        _ => Vec::new(),
    }
}
