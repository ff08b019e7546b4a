//! Loading the downloads into the staging schema

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{error, info};

use super::{command_ended, command_started, Harness};
use crate::database::{self, table_name};
use crate::errors::{HarnessError, Result};
use crate::names::DEFAULT_EXTENSION;
use crate::tasks::files::extract_csv_files;

pub const DEFAULT_BUILD_PROCEDURE: &str = "build_database";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub archives_extracted: usize,
    pub tables_imported: usize,
    pub rows_imported: u64,
    pub errors: usize,
}

impl Harness {
    /// Extract every expected archive into `temp/` and return the CSV paths
    pub fn extract_downloads(&self) -> Result<(usize, Vec<PathBuf>)> {
        let presence = self.file_presence()?;
        if !presence.is_valid() {
            return Err(HarnessError::MissingDownloads(presence.missing.len()));
        }

        let downloads = self.paths.downloads()?;
        let temp = self.paths.temp()?;

        let mut seen = HashSet::new();
        let mut archives = self.names(DEFAULT_EXTENSION)?;
        archives.retain(|name| seen.insert(name.clone()));

        let mut csv_files = Vec::new();
        for archive in &archives {
            csv_files.extend(extract_csv_files(&downloads.join(archive), &temp)?);
        }
        info!(
            "Extracted {} CSV files from {} archives",
            csv_files.len(),
            archives.len()
        );

        Ok((archives.len(), csv_files))
    }

    /// Truncate and reload one staging table per extracted CSV file.
    ///
    /// A failing table is logged and counted; the remaining tables still load.
    pub async fn import(&self) -> Result<ImportStats> {
        command_started("Import");

        let db = self.config()?.database()?;
        database::connect_options(&db)?;
        let (archives, csv_files) = self.extract_downloads()?;
        let mut stats = ImportStats {
            archives_extracted: archives,
            ..ImportStats::default()
        };

        let pb = ProgressBar::new(csv_files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>4}/{len:4} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        for csv in &csv_files {
            let file_name = csv
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();
            let table = table_name(&file_name);
            pb.set_message(file_name.clone());

            match database::import_table(&table, csv, &db).await {
                Ok(rows) => {
                    stats.tables_imported += 1;
                    stats.rows_imported += rows;
                    info!("Imported {} rows from {} into staging.{}", rows, file_name, table);
                }
                Err(e) => {
                    stats.errors += 1;
                    error!("Import of {} failed: {}", file_name, e);
                }
            }
            pb.inc(1);
        }
        pb.finish_with_message("import complete");

        command_ended("Import");
        Ok(stats)
    }

    /// Run the staging build procedure
    pub async fn build(&self, procedure: &str) -> Result<()> {
        command_started("Build");

        let db = self.config()?.database()?;
        database::execute_stored_procedure(procedure, &db).await?;
        info!("Stored procedure staging.{} completed", procedure);

        command_ended("Build");
        Ok(())
    }

    /// Dump the staging database into `archive/`
    pub fn backup(&self) -> Result<PathBuf> {
        command_started("Backup");

        let db = self.config()?.database()?;
        let path = database::backup_database(&db, &self.paths.archive()?)?;

        command_ended("Backup");
        Ok(path)
    }
}
