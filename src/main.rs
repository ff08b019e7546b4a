use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::{error, info, warn};

use simfin_harness::config::{AppPaths, ConfigFile};
use simfin_harness::logging::{self, PROCESS_ENDED, PROCESS_STARTED};
use simfin_harness::names::DEFAULT_EXTENSION;
use simfin_harness::tasks::staging::DEFAULT_BUILD_PROCEDURE;
use simfin_harness::tasks::{Harness, VerifySection};
use simfin_harness::verify::report;

/// SimFin bulk download staging harness
#[derive(Parser)]
#[command(name = "simfin")]
#[command(version)]
#[command(about = "Verify, archive and import SimFin bulk downloads into the staging database")]
#[command(long_about = "
Reads config.yml from the installation root (SIMFIN_HOME, or the current
directory) and works on the folders under <root>/data.

Examples:
  simfin verify              # every check
  simfin verify files        # are all expected downloads present?
  simfin import && simfin build
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Confirm the environment is ready for operations
    Verify {
        #[arg(value_enum, default_value_t = VerifySection::All)]
        section: VerifySection,

        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every file name the configuration expects
    Names {
        #[arg(long, default_value = DEFAULT_EXTENSION)]
        ext: String,
    },
    /// Copy the SimFin sample files to the downloads folder
    Samples,
    /// Make a backup copy of the files in the downloads folder
    Archive,
    /// Import the downloaded files into the staging tables
    Import,
    /// Build the database from the imported staging tables
    Build {
        #[arg(long, default_value = DEFAULT_BUILD_PROCEDURE)]
        procedure: String,
    },
    /// Back up the staging database with pg_dump
    Backup,
    /// Delete the files in the temp and downloads folders
    Clean,
}

fn setup_logging(paths: &AppPaths, config: &simfin_harness::Result<ConfigFile>) {
    let installed = config
        .as_ref()
        .map_err(|e| e.to_string())
        .and_then(|cfg| cfg.logging().map_err(|e| e.to_string()))
        .and_then(|logging| {
            let log_file = paths
                .log_file(logging.file.as_deref())
                .map_err(|e| e.to_string())?;
            logging::init_file_logging(&logging, &log_file).map_err(|e| e.to_string())
        });

    if let Err(reason) = installed {
        logging::init_fallback_logging();
        warn!("Unable to configure logging: {}", reason);
    }
}

async fn run(harness: &Harness, command: Commands) -> Result<bool> {
    match command {
        Commands::Verify { section, json } => {
            let results = harness.verify(section);
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                results.iter().for_each(report::print_result);
                if results.len() > 1 {
                    report::print_summary(&results);
                }
            }
            Ok(results.iter().all(|r| r.is_valid()))
        }
        Commands::Names { ext } => {
            for name in harness.names(&ext).context("Unable to build file names")? {
                println!("{}", name);
            }
            Ok(true)
        }
        Commands::Samples => {
            let copied = harness.samples().context("Samples command failed")?;
            println!("📦 Copied {} sample files to the downloads folder", copied);
            Ok(copied > 0)
        }
        Commands::Archive => match harness.archive().context("Archive command failed")? {
            Some(folder) => {
                println!("📦 Downloads archived to {}", folder.display());
                Ok(true)
            }
            None => {
                println!("⚠️  Nothing to archive");
                Ok(true)
            }
        },
        Commands::Import => {
            let stats = harness.import().await.context("Import command failed")?;
            println!(
                "✅ Imported {} tables ({} rows) from {} archives",
                stats.tables_imported, stats.rows_imported, stats.archives_extracted
            );
            if stats.errors > 0 {
                println!("❌ {} tables failed to import, see the log for details", stats.errors);
            }
            Ok(stats.errors == 0)
        }
        Commands::Build { procedure } => {
            harness.build(&procedure).await.context("Build command failed")?;
            println!("✅ Build procedure staging.{} completed", procedure);
            Ok(true)
        }
        Commands::Backup => {
            let path = harness.backup().context("Backup command failed")?;
            println!("💾 Backup written to {}", path.display());
            Ok(true)
        }
        Commands::Clean => {
            let removed = harness.clean().context("Clean command failed")?;
            println!("🧹 Removed {} files", removed);
            Ok(true)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let paths = match AppPaths::discover() {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("❌ Unable to locate the installation root: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = ConfigFile::load(paths.config_file());
    setup_logging(&paths, &config);
    info!("{}", PROCESS_STARTED);

    let harness = Harness::new(paths, config);
    let outcome = run(&harness, cli.command).await;

    let code = match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    };

    info!("{}", PROCESS_ENDED);
    code
}
