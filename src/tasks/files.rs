//! Folder housekeeping: clean, samples, archive and zip extraction

use chrono::Utc;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zip::ZipArchive;

use super::{command_ended, command_started, Harness};
use crate::config::list_files;
use crate::errors::Result;

fn remove_matching(dir: &Path, ext: &str) -> Result<usize> {
    let names = list_files(dir, ext)?;
    for name in &names {
        let file = dir.join(name);
        fs::remove_file(&file)?;
        debug!("Deleted {}", file.display());
    }
    Ok(names.len())
}

fn copy_matching(from: &Path, to: &Path, ext: &str) -> Result<usize> {
    let names = list_files(from, ext)?;
    for name in &names {
        fs::copy(from.join(name), to.join(name))?;
        debug!("Copied {} to {}", name, to.display());
    }
    Ok(names.len())
}

/// Extract the CSV entries of a SimFin archive into `dest`, flattening any
/// folders inside the archive
pub fn extract_csv_files(archive_path: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    let mut archive = ZipArchive::new(File::open(archive_path)?)?;
    let mut extracted = Vec::new();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }

        let Some(file_name) = entry
            .enclosed_name()
            .and_then(|p| p.file_name().map(|n| n.to_owned()))
        else {
            warn!("Skipping unsafe entry {} in {}", entry.name(), archive_path.display());
            continue;
        };

        let target = dest.join(file_name);
        if target.extension().and_then(|e| e.to_str()) != Some("csv") {
            continue;
        }

        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
        debug!("Extracted {} from {}", target.display(), archive_path.display());
        extracted.push(target);
    }

    Ok(extracted)
}

impl Harness {
    /// Delete `temp/*.csv` and `downloads/*.zip`
    pub fn clean(&self) -> Result<usize> {
        command_started("Clean");

        let removed = remove_matching(&self.paths.temp()?, "csv")?
            + remove_matching(&self.paths.downloads()?, "zip")?;
        info!("Removed {} files", removed);

        command_ended("Clean");
        Ok(removed)
    }

    /// Replace the downloads with the provider sample archives
    pub fn samples(&self) -> Result<usize> {
        command_started("Samples");

        self.clean()?;
        let copied = copy_matching(&self.paths.samples()?, &self.paths.downloads()?, "zip")?;
        if copied == 0 {
            warn!("No sample files found in {}", self.paths.samples()?.display());
        }

        command_ended("Samples");
        Ok(copied)
    }

    /// Copy the downloads into a timestamped folder under `archive/`.
    ///
    /// Returns `None` when there is nothing to archive.
    pub fn archive(&self) -> Result<Option<PathBuf>> {
        command_started("Archive");

        let downloads = self.paths.downloads()?;
        let outcome = if list_files(&downloads, "zip")?.is_empty() {
            warn!("Nothing to archive in {}", downloads.display());
            None
        } else {
            let stamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
            let folder = self.paths.archive()?.join(stamp);
            fs::create_dir_all(&folder)?;

            let copied = copy_matching(&downloads, &folder, "zip")?;
            info!("Archived {} files to {}", copied, folder.display());
            Some(folder)
        };

        command_ended("Archive");
        Ok(outcome)
    }
}
