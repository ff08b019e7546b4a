//! Staging database access
//!
//! Every operation opens its own PostgreSQL connection, runs its statements
//! and closes the connection again on every path. Nothing is pooled.

use chrono::Utc;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;
use std::path::{Path, PathBuf};
use std::process::Command;
use tokio::fs::File;
use tracing::{debug, error, info, warn};

use crate::config::DatabaseConfig;
use crate::errors::{HarnessError, Result};

pub const STAGING_SCHEMA: &str = "staging";

/// Staging table that receives a data file: the file stem with `-` replaced
/// by `_`, so `us-income-bank-annual.csv` loads into `us_income_bank_annual`
pub fn table_name(file_name: &str) -> String {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(file_name);
    let stem = base.split('.').next().unwrap_or(base);
    stem.replace('-', "_")
}

fn checked_identifier(name: &str) -> Result<&str> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(name)
    } else {
        Err(HarnessError::configuration(format!(
            "'{}' is not a valid staging identifier",
            name
        )))
    }
}

pub fn truncate_statement(table: &str) -> Result<String> {
    Ok(format!(
        "truncate table {}.{} restart identity;",
        STAGING_SCHEMA,
        checked_identifier(table)?
    ))
}

/// SimFin CSVs are `;` separated with a header row
pub fn copy_statement(table: &str) -> Result<String> {
    Ok(format!(
        "COPY {}.{} FROM STDIN WITH (FORMAT csv, HEADER true, DELIMITER ';')",
        STAGING_SCHEMA,
        checked_identifier(table)?
    ))
}

pub fn procedure_statement(procedure: &str) -> Result<String> {
    Ok(format!(
        "call {}.{}();",
        STAGING_SCHEMA,
        checked_identifier(procedure)?
    ))
}

fn required<'a>(value: &'a Option<String>, what: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| HarnessError::configuration(format!("{} not defined", what)))
}

pub fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions> {
    Ok(PgConnectOptions::new()
        .database(required(&config.database, "Database name")?)
        .username(required(&config.user, "User name")?)
        .password(required(&config.password, "User password")?))
}

fn db_error(action: impl Into<String>) -> impl FnOnce(sqlx::Error) -> HarnessError {
    let action = action.into();
    move |source| HarnessError::Database { action, source }
}

async fn connect(config: &DatabaseConfig) -> Result<PgConnection> {
    let options = connect_options(config)?;
    PgConnection::connect_with(&options)
        .await
        .map_err(db_error("connect to the staging database"))
}

async fn close(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        warn!("Failed to close database connection cleanly: {}", e);
    }
}

/// Replace the contents of `staging.<table>` with the rows of `csv_path`.
///
/// The file is streamed into `COPY`, never held in memory whole. Returns the
/// number of rows copied.
pub async fn import_table(table: &str, csv_path: &Path, config: &DatabaseConfig) -> Result<u64> {
    let truncate = truncate_statement(table)?;
    let copy = copy_statement(table)?;
    let file = File::open(csv_path).await?;

    let mut conn = connect(config).await?;
    let outcome = load_table(&mut conn, table, &truncate, &copy, file).await;
    close(conn).await;

    match &outcome {
        Ok(rows) => debug!("Imported {} rows into {}.{}", rows, STAGING_SCHEMA, table),
        Err(e) => error!("Failed to import data to table {} - {}", table, e),
    }
    outcome
}

async fn load_table(
    conn: &mut PgConnection,
    table: &str,
    truncate: &str,
    copy: &str,
    file: File,
) -> Result<u64> {
    sqlx::query(truncate)
        .execute(&mut *conn)
        .await
        .map_err(db_error(format!("truncate {}.{}", STAGING_SCHEMA, table)))?;

    let action = format!("copy data into {}.{}", STAGING_SCHEMA, table);
    let mut copy_in = conn
        .copy_in_raw(copy)
        .await
        .map_err(db_error(action.clone()))?;

    let sent = copy_in.read_from(file).await.map(|_| ());
    if let Err(e) = sent {
        if let Err(abort_err) = copy_in.abort(e.to_string()).await {
            debug!("COPY abort reported: {}", abort_err);
        }
        return Err(db_error(action)(e));
    }

    copy_in.finish().await.map_err(db_error(action))
}

/// Run `call staging.<procedure>()`
pub async fn execute_stored_procedure(procedure: &str, config: &DatabaseConfig) -> Result<()> {
    let sql = procedure_statement(procedure)?;

    let mut conn = connect(config).await?;
    let outcome = sqlx::query(&sql)
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(db_error(format!("execute stored procedure {}", procedure)));
    close(conn).await;

    if let Err(e) = &outcome {
        error!("Failed to execute stored procedure {} - {}", procedure, e);
    }
    outcome
}

pub fn backup_file_name(database: &str, timestamp: &str) -> String {
    format!("{}_{}.sql", database, timestamp)
}

/// Dump the staging database with `pg_dump` into `dest_dir`
pub fn backup_database(config: &DatabaseConfig, dest_dir: &Path) -> Result<PathBuf> {
    let database = required(&config.database, "Database name")?;
    let user = required(&config.user, "User name")?;
    let password = required(&config.password, "User password")?;

    let timestamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
    let backup_path = dest_dir.join(backup_file_name(database, &timestamp));

    info!("Dumping database {} to {}", database, backup_path.display());
    let output = Command::new("pg_dump")
        .arg("--username")
        .arg(user)
        .arg("--file")
        .arg(&backup_path)
        .arg(database)
        .env("PGPASSWORD", password)
        .output()
        .map_err(|e| HarnessError::Backup(format!("failed to run pg_dump: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(HarnessError::Backup(stderr.trim().to_string()));
    }

    let size = std::fs::metadata(&backup_path)?.len();
    if size == 0 {
        return Err(HarnessError::Backup(format!(
            "{} is empty",
            backup_path.display()
        )));
    }

    info!("Backup written: {} ({} bytes)", backup_path.display(), size);
    Ok(backup_path)
}
