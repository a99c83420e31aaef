//! Binary entry point for sheetport.
//!
//! Edits, imports and exports dynamic tables stored in a local SQLite database.

mod logging;
mod output;
mod settings;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sheetport_core::{CellValue, ColumnType, TableStore};
use sheetport_services::{ImportExportService, TableService};
use sheetport_storage::{DirectoryDownload, PathSource, SqliteTableStore};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use crate::logging::LoggingConfig;
use crate::settings::Settings;

/// Sheetport - dynamic tables with CSV and JSON import/export.
#[derive(Parser)]
#[command(name = "sheetport")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the settings file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database holding the tables.
    #[arg(long, global = true, env = "SHEETPORT_DB")]
    db: Option<PathBuf>,

    /// Directory exported files are written to.
    #[arg(long, global = true, env = "SHEETPORT_DOWNLOAD_DIR")]
    download_dir: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Print a table.
    Show {
        /// Table id.
        table: String,
    },

    /// Export a table to a file in the download directory.
    Export {
        /// Table id.
        table: String,

        /// Output format: csv or json.
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Base name of the exported file.
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Replace a table with the content of a CSV or JSON file.
    Import {
        /// Table id.
        table: String,

        /// File to import.
        file: PathBuf,
    },

    /// Append a column.
    AddColumn {
        /// Table id.
        table: String,

        /// Column name.
        name: String,

        /// Column type: number, text, boolean, date, link or email.
        #[arg(short = 't', long = "type", default_value = "text")]
        column_type: ColumnType,
    },

    /// Remove a column.
    DeleteColumn {
        /// Table id.
        table: String,

        /// Column id.
        column: String,
    },

    /// Append a row of default values.
    AddRow {
        /// Table id.
        table: String,
    },

    /// Remove a row.
    DeleteRow {
        /// Table id.
        table: String,

        /// Row id.
        row: String,
    },

    /// Set one cell; the value is converted to the column's type.
    SetCell {
        /// Table id.
        table: String,

        /// Row id.
        row: String,

        /// Column id.
        column: String,

        /// New value.
        value: String,
    },

    /// Delete a table.
    Delete {
        /// Table id.
        table: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(db) = cli.db {
        settings.database_path = db;
    }
    if let Some(dir) = cli.download_dir {
        settings.download_dir = dir;
    }

    let _log_guard = logging::init(&LoggingConfig::from_settings(
        &settings.logging,
        cli.verbose,
    ))?;

    let store: Arc<dyn TableStore> = Arc::new(
        SqliteTableStore::open(&settings.database_path).with_context(|| {
            format!(
                "Failed to open table database at {:?}",
                settings.database_path
            )
        })?,
    );

    match cli.command {
        Commands::Show { table } => {
            let service = TableService::new(store);
            let table = service.load_or_create(&table).await?;
            println!("{}", output::render_table(&table));
        }

        Commands::Export {
            table,
            format,
            name,
        } => {
            let download = Arc::new(DirectoryDownload::new(&settings.download_dir));
            let service = ImportExportService::new(store, download.clone());
            match service.export(&table, &format, name.as_deref()).await {
                Ok(exported) => {
                    println!("{}", exported.success_message());
                    println!("{}", download.target_path(&exported.filename).display());
                }
                Err(e) => {
                    eprintln!("Export failed: {}", e);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }

        Commands::Import { table, file } => {
            let download = Arc::new(DirectoryDownload::new(&settings.download_dir));
            let service = ImportExportService::new(store, download);
            let source = PathSource::new(file);
            match service.import(&source, &table).await {
                Ok(result) => println!("Successfully imported {} rows!", result.imported),
                Err(e) => {
                    eprintln!("Import failed: {}", e);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }

        Commands::AddColumn {
            table,
            name,
            column_type,
        } => {
            let service = TableService::new(store);
            let column = service.add_column(&table, &name, column_type).await?;
            println!("Added column '{}' ({})", column.name, column.id);
        }

        Commands::DeleteColumn { table, column } => {
            let service = TableService::new(store);
            service.delete_column(&table, &column).await?;
            println!("Deleted column {}", column);
        }

        Commands::AddRow { table } => {
            let service = TableService::new(store);
            let row = service.add_row(&table).await?;
            println!("Added row {} ({})", row.serial_no, row.id);
        }

        Commands::DeleteRow { table, row } => {
            let service = TableService::new(store);
            service.delete_row(&table, &row).await?;
            println!("Deleted row {}", row);
        }

        Commands::SetCell {
            table,
            row,
            column,
            value,
        } => {
            let service = TableService::new(store);
            let updated = service
                .update_cell(&table, &row, &column, CellValue::Text(value))
                .await?;
            let stored = updated
                .row(&row)
                .and_then(|r| r.value(&column))
                .unwrap_or_default();
            println!("{} = {}", column, stored);
        }

        Commands::Delete { table } => {
            let service = TableService::new(store);
            if service.delete_table(&table).await? {
                println!("Deleted table {}", table);
            } else {
                println!("Table {} did not exist", table);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
