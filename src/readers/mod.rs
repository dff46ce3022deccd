pub mod coordinate_reader;
pub mod name_reader;

pub use coordinate_reader::CoordinateReader;
pub use name_reader::NameReader;

use crate::error::{ProcessingError, Result};
use crate::utils::constants::DEFAULT_DELIMITER;
use encoding_rs::{Encoding, UTF_8};
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// How the delimited source files are decoded and split.
#[derive(Debug, Clone, Copy)]
pub struct ReaderOptions {
    pub delimiter: u8,
    pub encoding: &'static Encoding,
}

impl ReaderOptions {
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            encoding: UTF_8,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Resolve a WHATWG encoding label such as `utf-8`, `latin1` or `windows-1252`.
    pub fn with_encoding_label(self, label: &str) -> Result<Self> {
        let encoding = Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
            ProcessingError::Config(format!("Unsupported encoding: {}", label))
        })?;
        Ok(self.with_encoding(encoding))
    }

    pub fn encoding_name(&self) -> &'static str {
        self.encoding.name()
    }
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Read and decode a whole file, then hand it to a CSV reader with headers.
///
/// The file handle is closed before parsing starts.
pub(crate) fn open_csv(path: &Path, options: &ReaderOptions) -> Result<csv::Reader<Cursor<Vec<u8>>>> {
    let bytes = fs::read(path).map_err(|e| ProcessingError::data_load(path, e.to_string()))?;

    // A BOM overrides the configured encoding and is stripped
    let (text, used, had_errors) = options.encoding.decode(&bytes);
    if had_errors {
        return Err(ProcessingError::data_load(
            path,
            format!("content is not valid {}", used.name()),
        ));
    }

    Ok(csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .from_reader(Cursor::new(text.into_owned().into_bytes())))
}

/// Positions of the required columns in the header row, in the requested order.
pub(crate) fn require_columns(
    path: &Path,
    headers: &csv::StringRecord,
    required: &[&str],
) -> Result<Vec<usize>> {
    let mut positions = Vec::with_capacity(required.len());
    let mut missing = Vec::new();

    for column in required {
        match headers.iter().position(|h| h == *column) {
            Some(idx) => positions.push(idx),
            None => missing.push(*column),
        }
    }

    if !missing.is_empty() {
        return Err(ProcessingError::data_load(
            path,
            format!("missing required column(s): {}", missing.join(", ")),
        ));
    }

    Ok(positions)
}
