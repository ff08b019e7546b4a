//! Environment verification
//!
//! Every check produces a [`VerificationResult`]. Problems inside a section are
//! collected as discrepancies so one pass reports all of them; only the loss
//! of a whole section (or of the config file) collapses into a single
//! "entire section missing" entry.

pub mod files;
pub mod report;

pub use files::{check_files, FilePresence, MissingFile};

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::fmt;
use tracing::debug;

use crate::config::{ConfigFile, DATABASE_SECTION, LOGGING_SECTION, SIMFIN_SECTION};
use crate::errors::HarnessError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Section {
    SimFin,
    Logging,
    Database,
    Files,
}

impl Section {
    fn config_key(self) -> &'static str {
        match self {
            Section::SimFin => SIMFIN_SECTION,
            Section::Logging => LOGGING_SECTION,
            Section::Database => DATABASE_SECTION,
            Section::Files => "files",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::SimFin => "SimFin",
            Section::Logging => "Logging",
            Section::Database => "Database",
            Section::Files => "Files",
        };
        f.write_str(name)
    }
}

/// Outcome of one check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationResult {
    pub section: Section,
    pub discrepancies: Vec<String>,
}

impl VerificationResult {
    pub fn new(section: Section, discrepancies: Vec<String>) -> Self {
        Self {
            section,
            discrepancies,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.discrepancies.is_empty()
    }

    pub fn contains(&self, discrepancy: &str) -> bool {
        self.discrepancies.iter().any(|d| d == discrepancy)
    }
}

/// What a present key must hold
#[derive(Debug, Clone, Copy)]
enum Shape {
    Any,
    /// A non-empty sequence; `label` prefixes the shape messages
    NonEmptyList { label: &'static str },
}

#[derive(Debug, Clone, Copy)]
struct KeyRule {
    key: &'static str,
    missing: &'static str,
    shape: Shape,
}

const SIMFIN_RULES: &[KeyRule] = &[
    KeyRule {
        key: "regions",
        missing: "Regions definition section missing",
        shape: Shape::NonEmptyList { label: "Regions" },
    },
    KeyRule {
        key: "time-frames",
        missing: "Time frames definition section missing",
        shape: Shape::NonEmptyList { label: "Time Frames" },
    },
    KeyRule {
        key: "companies",
        missing: "Companies definition section missing",
        shape: Shape::NonEmptyList { label: "Companies" },
    },
    KeyRule {
        key: "others",
        missing: "Others definition section missing",
        shape: Shape::NonEmptyList { label: "Others" },
    },
];

const LOGGING_RULES: &[KeyRule] = &[
    KeyRule {
        key: "file_name",
        missing: "File name not defined",
        shape: Shape::Any,
    },
    KeyRule {
        key: "level",
        missing: "Log level not defined",
        shape: Shape::Any,
    },
];

const DATABASE_RULES: &[KeyRule] = &[
    KeyRule {
        key: "database",
        missing: "Database name not defined",
        shape: Shape::Any,
    },
    KeyRule {
        key: "user",
        missing: "User name not defined",
        shape: Shape::Any,
    },
    KeyRule {
        key: "password",
        missing: "User password not defined",
        shape: Shape::Any,
    },
];

/// Runs the per-section configuration checks.
///
/// Built from the outcome of loading the config file so an unreadable file is
/// reported per section instead of aborting the run.
#[derive(Debug, Clone, Copy)]
pub struct ConfigVerifier<'a> {
    source: Result<&'a ConfigFile, &'a HarnessError>,
}

impl<'a> ConfigVerifier<'a> {
    pub fn new(source: Result<&'a ConfigFile, &'a HarnessError>) -> Self {
        Self { source }
    }

    pub fn check_simfin(&self) -> VerificationResult {
        self.check(Section::SimFin, SIMFIN_RULES)
    }

    pub fn check_logging(&self) -> VerificationResult {
        self.check(Section::Logging, LOGGING_RULES)
    }

    pub fn check_database(&self) -> VerificationResult {
        self.check(Section::Database, DATABASE_RULES)
    }

    fn section(&self, name: &str) -> Option<&'a Mapping> {
        let config = match self.source {
            Ok(config) => config,
            Err(e) => {
                debug!("Configuration unavailable for {} check: {}", name, e);
                return None;
            }
        };

        match config.load_section(name) {
            Ok(section) => Some(section),
            Err(e) => {
                debug!("{}", e);
                None
            }
        }
    }

    fn check(&self, section: Section, rules: &[KeyRule]) -> VerificationResult {
        debug!("{} check executed", section);

        let key = section.config_key();
        let discrepancies = match self.section(key) {
            Some(values) => apply_rules(values, rules),
            None => vec![format!("Entire {} section missing from config file", key)],
        };

        let result = VerificationResult::new(section, discrepancies);
        if result.is_valid() {
            debug!("{} check OK", section);
        } else {
            debug!("{} check failed!", section);
        }
        result
    }
}

fn apply_rules(values: &Mapping, rules: &[KeyRule]) -> Vec<String> {
    let mut discrepancies: Vec<String> = rules
        .iter()
        .filter(|rule| !values.contains_key(rule.key))
        .map(|rule| rule.missing.to_string())
        .collect();

    for rule in rules {
        let (Some(value), Shape::NonEmptyList { label }) = (values.get(rule.key), rule.shape) else {
            continue;
        };

        if !value.is_sequence() {
            discrepancies.push(format!("{} definition is not a list", label));
        }
        if is_empty(value) {
            discrepancies.push(format!("{} definition is empty", label));
        }
        if has_non_text_entry(value) {
            discrepancies.push(format!("{} definition contains a non-text entry", label));
        }
    }

    discrepancies
}

// The typed accessors drop these entries.
fn has_non_text_entry(value: &Value) -> bool {
    match value {
        Value::Sequence(items) => items.iter().any(|item| {
            matches!(
                item,
                Value::Null | Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_)
            )
        }),
        _ => false,
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Sequence(items) => items.is_empty(),
        Value::Mapping(map) => map.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
