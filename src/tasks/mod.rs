//! Commands behind the `simfin` binary
//!
//! [`Harness`] owns the installation layout and the configuration loaded at
//! start-up. Each command logs a begin/end banner so a log file reads as a
//! sequence of commands.

pub mod files;
pub mod staging;

pub use staging::ImportStats;

use clap::ValueEnum;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::{list_files, AppPaths, ConfigFile, SimFinConfig};
use crate::errors::{HarnessError, Result};
use crate::names::{NameBuilder, DEFAULT_EXTENSION};
use crate::verify::{check_files, ConfigVerifier, FilePresence, Section, VerificationResult};

/// Sections accepted by `simfin verify`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VerifySection {
    All,
    Simfin,
    Logging,
    Database,
    Files,
}

pub(crate) fn command_started(name: &str) {
    info!("-------------------- Executing {} Command --------------------", name);
}

pub(crate) fn command_ended(name: &str) {
    info!("-------------------- {} Command Ended --------------------", name);
}

pub struct Harness {
    paths: AppPaths,
    config: Result<ConfigFile>,
}

impl Harness {
    pub fn new(paths: AppPaths, config: Result<ConfigFile>) -> Self {
        Self { paths, config }
    }

    /// Load `config.yml` from the installation root. A missing or malformed
    /// file is kept as an error so `verify` can still report it.
    pub fn load(paths: AppPaths) -> Self {
        let config = ConfigFile::load(paths.config_file());
        Self::new(paths, config)
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    pub fn config(&self) -> Result<&ConfigFile> {
        self.config.as_ref().map_err(|e| match e {
            HarnessError::FileNotFound { path } => HarnessError::file_not_found(path.clone()),
            other => HarnessError::configuration(other.to_string()),
        })
    }

    pub fn simfin(&self) -> Result<SimFinConfig> {
        self.config()?.simfin()
    }

    /// Run the selected checks; `All` runs every section in a fixed order
    pub fn verify(&self, section: VerifySection) -> Vec<VerificationResult> {
        command_started("Verify");

        let verifier = ConfigVerifier::new(self.config.as_ref());
        let results = match section {
            VerifySection::All => vec![
                verifier.check_simfin(),
                verifier.check_logging(),
                verifier.check_database(),
                self.verify_files(),
            ],
            VerifySection::Simfin => vec![verifier.check_simfin()],
            VerifySection::Logging => vec![verifier.check_logging()],
            VerifySection::Database => vec![verifier.check_database()],
            VerifySection::Files => vec![self.verify_files()],
        };

        command_ended("Verify");
        results
    }

    /// Compare the expected download names with the downloads folder
    pub fn file_presence(&self) -> Result<FilePresence> {
        let simfin = self.simfin()?;
        let expected = NameBuilder::new(&simfin).all(DEFAULT_EXTENSION);
        let present = list_files(&self.paths.downloads()?, DEFAULT_EXTENSION)?;

        debug!(
            "Checking {} expected files against {} downloaded files",
            expected.len(),
            present.len()
        );
        Ok(check_files(&expected, &present))
    }

    pub fn verify_files(&self) -> VerificationResult {
        let simfin_check = ConfigVerifier::new(self.config.as_ref()).check_simfin();
        if !simfin_check.is_valid() {
            return VerificationResult::new(Section::Files, simfin_check.discrepancies);
        }

        match self.file_presence() {
            Ok(presence) => presence.to_result(),
            Err(e) => VerificationResult::new(
                Section::Files,
                vec![format!("Unable to read the downloads folder: {}", e)],
            ),
        }
    }

    /// Every expected file name with the given extension
    pub fn names(&self, ext: &str) -> Result<Vec<String>> {
        let simfin = self.simfin()?;
        Ok(NameBuilder::new(&simfin).all(ext))
    }

    pub fn downloads(&self) -> Result<PathBuf> {
        self.paths.downloads()
    }
}
