use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the harness.
///
/// Only conditions that stop a single operation are raised. Problems found
/// while verifying configuration or downloads are collected as discrepancies
/// in a [`crate::verify::VerificationResult`] instead.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A required file, such as the configuration source, does not exist
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The configuration source is malformed or a named section is absent
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to {action} - {source}")]
    Database {
        action: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Backup failed: {0}")]
    Backup(String),

    /// Raised by `import` when the downloads folder is incomplete
    #[error("{0} expected download files are missing")]
    MissingDownloads(usize),
}

impl HarnessError {
    pub fn configuration(message: impl Into<String>) -> Self {
        HarnessError::Configuration(message.into())
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        HarnessError::FileNotFound { path: path.into() }
    }
}

pub type Result<T> = std::result::Result<T, HarnessError>;
