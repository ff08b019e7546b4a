//! SimFin bulk file naming
//!
//! SimFin publishes one archive per data set. The names follow a fixed
//! convention which [`NameBuilder`] expands from the `simfin` config section:
//!
//! - `{other}.{ext}` for master files (markets, industries, ...)
//! - `{region}-companies.{ext}`
//! - `{region}-shareprices-daily.{ext}`
//! - `{region}-{statement}-{time_frame}.{ext}` for standard companies
//! - `{region}-{statement}-{company_type}-{time_frame}.{ext}` otherwise

use crate::config::SimFinConfig;

pub const DEFAULT_EXTENSION: &str = "zip";
pub const STANDARD_COMPANY: &str = "standard";

/// Financial statements in the order they are emitted
pub const STATEMENTS: [&str; 3] = ["income", "cashflow", "balance"];

/// File names keyed by identifier, in insertion order
///
/// Inserting an existing key overwrites its value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameMap {
    entries: Vec<(String, String)>,
}

impl NameMap {
    pub fn insert(&mut self, key: impl Into<String>, name: impl Into<String>) {
        let key = key.into();
        let name = name.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = name,
            None => self.entries.push((key, name)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, name)| name.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, name)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, name)| (k.as_str(), name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Expands a [`SimFinConfig`] into the file names SimFin publishes.
///
/// Pure and deterministic: the same config always yields the same names in the
/// same order. Empty lists produce no names rather than an error.
#[derive(Debug, Clone, Copy)]
pub struct NameBuilder<'a> {
    config: &'a SimFinConfig,
}

impl<'a> NameBuilder<'a> {
    pub fn new(config: &'a SimFinConfig) -> Self {
        Self { config }
    }

    pub fn regions(&self) -> Vec<String> {
        self.config.regions.clone()
    }

    pub fn time_frames(&self) -> Vec<String> {
        self.config.time_frames.clone()
    }

    /// Master files such as markets and industries
    pub fn others(&self, ext: &str) -> NameMap {
        let mut names = NameMap::default();
        for other in &self.config.others {
            names.insert(other.as_str(), format!("{}.{}", other, ext));
        }
        names
    }

    pub fn companies(&self, ext: &str) -> NameMap {
        self.per_region("companies", ext)
    }

    pub fn share_prices(&self, ext: &str) -> NameMap {
        self.per_region("shareprices-daily", ext)
    }

    /// Every financial statement file, grouped by region then company type.
    ///
    /// Within one region/company pair all income variants come first, then
    /// cashflow, then balance, each across every time frame.
    pub fn statements(&self, ext: &str) -> Vec<String> {
        let cfg = self.config;
        let mut files = Vec::with_capacity(
            cfg.regions.len() * cfg.companies.len() * cfg.time_frames.len() * STATEMENTS.len(),
        );

        for region in &cfg.regions {
            for company_type in &cfg.companies {
                for statement in STATEMENTS {
                    for time_frame in &cfg.time_frames {
                        files.push(statement_file(region, statement, company_type, time_frame, ext));
                    }
                }
            }
        }

        files
    }

    /// The full ordered list: others, companies, share prices, statements
    pub fn all(&self, ext: &str) -> Vec<String> {
        let cfg = self.config;
        let mut files = Vec::with_capacity(Self::expected_count(cfg));

        files.extend(cfg.others.iter().map(|other| format!("{}.{}", other, ext)));
        files.extend(cfg.regions.iter().map(|region| format!("{}-companies.{}", region, ext)));
        files.extend(
            cfg.regions
                .iter()
                .map(|region| format!("{}-shareprices-daily.{}", region, ext)),
        );
        files.extend(self.statements(ext));

        files
    }

    /// Number of names [`NameBuilder::all`] produces for `config`
    pub fn expected_count(config: &SimFinConfig) -> usize {
        config.others.len()
            + config.regions.len() * 2
            + config.regions.len() * config.companies.len() * config.time_frames.len() * STATEMENTS.len()
    }

    fn per_region(&self, data_set: &str, ext: &str) -> NameMap {
        let mut names = NameMap::default();
        for region in &self.config.regions {
            names.insert(region.as_str(), format!("{}-{}.{}", region, data_set, ext));
        }
        names
    }
}

fn statement_file(region: &str, statement: &str, company_type: &str, time_frame: &str, ext: &str) -> String {
    if company_type == STANDARD_COMPANY {
        format!("{}-{}-{}.{}", region, statement, time_frame, ext)
    } else {
        format!("{}-{}-{}-{}.{}", region, statement, company_type, time_frame, ext)
    }
}
