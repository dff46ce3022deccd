use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "babynames")]
#[command(about = "Join INSEE first-name records with department coordinates")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Settings file (TOML, YAML or JSON)")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Parquet,
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Parquet => "parquet",
            OutputFormat::Csv => "csv",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load both datasets and join them on the department code
    Merge {
        #[arg(short, long, help = "Directory holding dpt2020.csv and dpt.csv")]
        data_dir: Option<PathBuf>,

        #[arg(short, long, help = "Name records file [default: <data-dir>/dpt2020.csv]")]
        records: Option<PathBuf>,

        #[arg(short = 'g', long, help = "Department coordinates file [default: <data-dir>/dpt.csv]")]
        coordinates: Option<PathBuf>,

        #[arg(long, help = "Field delimiter of both input files")]
        delimiter: Option<char>,

        #[arg(long, help = "Encoding label of both input files (e.g. utf-8, latin1)")]
        encoding: Option<String>,

        #[arg(long, default_value = "false", help = "Write the joined table to disk")]
        export: bool,

        #[arg(
            short,
            long,
            help = "Export path [default: output/babynames-joined-{YYMMDD}.{format}]"
        )]
        output_file: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value = "parquet")]
        format: OutputFormat,

        #[arg(short, long, default_value = "snappy")]
        compression: String,

        #[arg(short, long, default_value = "0", help = "Print the first N joined rows as JSON")]
        sample: usize,
    },

    /// Convert DMS coordinates such as 48°3'34" N to decimal degrees
    Convert {
        #[arg(required = true)]
        values: Vec<String>,
    },
}
