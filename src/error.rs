use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("Failed to load {}: {reason}", .path.display())]
    DataLoad { path: PathBuf, reason: String },

    #[error("Malformed coordinate '{value}': {reason}")]
    MalformedCoordinate { value: String, reason: String },

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parquet write error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),
}

impl ProcessingError {
    pub(crate) fn data_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DataLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(value: &str, reason: impl Into<String>) -> Self {
        Self::MalformedCoordinate {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
