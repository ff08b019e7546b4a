use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::Result;

/// Environment variable naming the installation root
pub const HOME_ENV_VAR: &str = "SIMFIN_HOME";
pub const CONFIG_FILE_NAME: &str = "config.yml";
pub const DEFAULT_LOG_FILE: &str = "simfin.log";

/// Folder layout of an installation
///
/// ```text
/// <root>/config.yml
/// <root>/data/{downloads,temp,archive,logs,samples}
/// ```
///
/// Folder accessors create the folder on first use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    root: PathBuf,
}

impl AppPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the root from `SIMFIN_HOME` (a `.env` file is honoured),
    /// falling back to the current working directory
    pub fn discover() -> Result<Self> {
        dotenvy::dotenv().ok();

        let root = match std::env::var(HOME_ENV_VAR) {
            Ok(value) if !value.trim().is_empty() => PathBuf::from(value),
            _ => std::env::current_dir()?,
        };

        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    pub fn data(&self) -> Result<PathBuf> {
        ensure_folder(self.root.join("data"))
    }

    pub fn logs(&self) -> Result<PathBuf> {
        ensure_folder(self.data()?.join("logs"))
    }

    pub fn downloads(&self) -> Result<PathBuf> {
        ensure_folder(self.data()?.join("downloads"))
    }

    pub fn temp(&self) -> Result<PathBuf> {
        ensure_folder(self.data()?.join("temp"))
    }

    pub fn archive(&self) -> Result<PathBuf> {
        ensure_folder(self.data()?.join("archive"))
    }

    /// Provider sample files copied by the `samples` command
    pub fn samples(&self) -> Result<PathBuf> {
        ensure_folder(self.data()?.join("samples"))
    }

    pub fn log_file(&self, file_name: Option<&str>) -> Result<PathBuf> {
        Ok(self.logs()?.join(file_name.unwrap_or(DEFAULT_LOG_FILE)))
    }
}

fn ensure_folder(folder: PathBuf) -> Result<PathBuf> {
    fs::create_dir_all(&folder)?;
    Ok(folder)
}

/// Sorted base names of the files in `dir` with extension `ext`
pub fn list_files(dir: &Path, ext: &str) -> Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(ext) {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_string());
        }
    }

    names.sort();
    Ok(names)
}
