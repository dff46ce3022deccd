use crate::cli::args::{Cli, Commands, OutputFormat};
use crate::settings::{delimiter_byte, Settings};
use crate::error::{ProcessingError, Result};
use crate::models::JoinedTable;
use crate::processors::DataMerger;
use crate::utils::coordinates::dms_to_decimal;
use crate::utils::filename::generate_default_output_filename;
use crate::utils::progress::ProgressReporter;
use crate::writers::{CsvWriter, ParquetWriter};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the fmt subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when embedded
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    match cli.command {
        Commands::Merge {
            data_dir,
            records,
            coordinates,
            delimiter,
            encoding,
            export,
            output_file,
            format,
            compression,
            sample,
        } => {
            let mut settings = Settings::load(cli.config.as_deref())?;

            if let Some(dir) = data_dir {
                settings.data_dir = dir;
            }
            if records.is_some() {
                settings.records_file = records;
            }
            if coordinates.is_some() {
                settings.coordinates_file = coordinates;
            }
            if let Some(delimiter) = delimiter {
                settings.delimiter = delimiter;
            }
            if let Some(encoding) = encoding {
                settings.encoding = encoding;
            }

            let paths = settings.data_paths();
            let options = settings.reader_options()?;

            println!("Records file: {}", paths.records.display());
            println!("Coordinates file: {}", paths.coordinates.display());
            info!(encoding = options.encoding_name(), delimiter = %settings.delimiter, "reader options");

            let progress = ProgressReporter::new_spinner("Loading and joining data...", false);
            let table = DataMerger::with_options(options).merge_files(&paths)?;
            progress.finish_with_message(&format!("Joined {} records", table.len()));

            println!("\n{}", summary(&table));

            if sample > 0 {
                println!("\nSample Records (showing {} records):", sample.min(table.len()));
                for record in table.iter().take(sample) {
                    let line = serde_json::to_string(record)
                        .map_err(|e| ProcessingError::Config(format!("JSON encoding failed: {}", e)))?;
                    println!("{}", line);
                }
            }

            if export || output_file.is_some() {
                let output_file =
                    output_file.unwrap_or_else(|| generate_default_output_filename(format.extension()));

                // Create output directory if it doesn't exist
                if let Some(parent) = output_file.parent() {
                    std::fs::create_dir_all(parent)?;
                }

                write_output(&table, &output_file, format, &compression, settings.delimiter)?;
                println!("\nWrote {} records to {}", table.len(), output_file.display());
            }
        }

        Commands::Convert { values } => {
            for value in values {
                let decimal = dms_to_decimal(&value)?;
                println!("{}\t{:.6}", value, decimal);
            }
        }
    }

    Ok(())
}

fn write_output(
    table: &JoinedTable,
    path: &Path,
    format: OutputFormat,
    compression: &str,
    delimiter: char,
) -> Result<()> {
    match format {
        OutputFormat::Parquet => {
            let writer = ParquetWriter::new().with_compression(compression)?;
            writer.write_table(table, path)?;
            let file_info = writer.get_file_info(path)?;
            println!("\n{}", file_info.summary());
        }
        OutputFormat::Csv => {
            CsvWriter::new()
                .with_delimiter(delimiter_byte(delimiter)?)
                .write_table(table, path)?;
        }
    }

    Ok(())
}

fn summary(table: &JoinedTable) -> String {
    format!(
        "Join Summary:\n\
        - Total rows: {}\n\
        - With coordinates: {}\n\
        - Without coordinates: {}",
        table.len(),
        table.matched_count(),
        table.unmatched_count()
    )
}
