//! Harness for staging SimFin bulk downloads.
//!
//! The pieces that matter are [`names::NameBuilder`], which expands the
//! `simfin` config section into the file names SimFin publishes, and
//! [`verify`], which checks the configuration and the downloads folder before
//! anything is imported. The rest is glue: config loading, folders, logging,
//! the staging database and the `simfin` command set.

pub mod config;
pub mod database;
pub mod errors;
pub mod logging;
pub mod names;
pub mod tasks;
pub mod verify;

pub use config::{AppPaths, ConfigFile, DatabaseConfig, LoggingConfig, SimFinConfig};
pub use errors::{HarnessError, Result};
pub use names::{NameBuilder, NameMap};
pub use tasks::{Harness, VerifySection};
pub use verify::{ConfigVerifier, VerificationResult};
