use crate::error::{ProcessingError, Result};
use crate::readers::ReaderOptions;
use crate::utils::constants::{
    COORDINATES_FILE, DEFAULT_DATA_DIR, DEFAULT_DELIMITER, DEFAULT_ENCODING, RECORDS_FILE,
    SETTINGS_FILE,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Locations of the two input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub records: PathBuf,
    pub coordinates: PathBuf,
}

impl DataPaths {
    /// `<data_dir>/dpt2020.csv` and `<data_dir>/dpt.csv`
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            records: data_dir.join(RECORDS_FILE),
            coordinates: data_dir.join(COORDINATES_FILE),
        }
    }

    /// Defaults with either path overridden
    pub fn resolve(records: Option<&Path>, coordinates: Option<&Path>) -> Self {
        let defaults = Self::default();
        Self {
            records: records.map(Path::to_path_buf).unwrap_or(defaults.records),
            coordinates: coordinates
                .map(Path::to_path_buf)
                .unwrap_or(defaults.coordinates),
        }
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::in_dir(Path::new(DEFAULT_DATA_DIR))
    }
}

/// CLI settings: built-in defaults, then a settings file, then
/// `BABYNAMES_*` environment variables.
///
/// The settings file is the explicit path when given, otherwise
/// `babynames.toml` if present.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub records_file: Option<PathBuf>,
    pub coordinates_file: Option<PathBuf>,
    pub delimiter: char,
    pub encoding: String,
}

impl Settings {
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::load_in(Path::new("."), file)
    }

    /// Like [`Settings::load`], looking for `babynames.toml` in `base_dir`.
    pub fn load_in(base_dir: &Path, file: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("data_dir", DEFAULT_DATA_DIR)?
            .set_default("delimiter", (DEFAULT_DELIMITER as char).to_string())?
            .set_default("encoding", DEFAULT_ENCODING)?;

        builder = match file {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => {
                let default_file = base_dir.join(SETTINGS_FILE);
                builder.add_source(config::File::from(default_file.as_path()).required(false))
            }
        };

        let settings = builder
            .add_source(config::Environment::with_prefix("BABYNAMES"))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }

    pub fn data_paths(&self) -> DataPaths {
        let defaults = DataPaths::in_dir(&self.data_dir);
        DataPaths {
            records: self.records_file.clone().unwrap_or(defaults.records),
            coordinates: self.coordinates_file.clone().unwrap_or(defaults.coordinates),
        }
    }

    pub fn reader_options(&self) -> Result<ReaderOptions> {
        ReaderOptions::new()
            .with_delimiter(delimiter_byte(self.delimiter)?)
            .with_encoding_label(&self.encoding)
    }
}

/// CSV delimiters must be a single ASCII character.
pub fn delimiter_byte(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(ProcessingError::Config(format!(
            "Delimiter must be an ASCII character, got '{}'",
            delimiter
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, TempDir};

    #[test]
    fn test_default_paths() {
        let paths = DataPaths::default();
        assert_eq!(paths.records, Path::new("data").join("dpt2020.csv"));
        assert_eq!(paths.coordinates, Path::new("data").join("dpt.csv"));
    }

    #[test]
    fn test_resolve_overrides_one_path() {
        let paths = DataPaths::resolve(Some(Path::new("/tmp/names.csv")), None);
        assert_eq!(paths.records, PathBuf::from("/tmp/names.csv"));
        assert_eq!(paths.coordinates, DataPaths::default().coordinates);
    }

    #[test]
    fn test_default_settings_file_is_picked_up() -> Result<()> {
        let dir = TempDir::new()?;
        std::fs::write(
            dir.path().join("babynames.toml"),
            "data_dir = \"/srv/insee\"\ndelimiter = \";\"\n",
        )?;

        let settings = Settings::load_in(dir.path(), None)?;

        assert_eq!(settings.data_dir, PathBuf::from("/srv/insee"));
        assert_eq!(settings.delimiter, ';');
        assert_eq!(settings.encoding, "utf-8");

        Ok(())
    }

    #[test]
    fn test_missing_default_settings_file_uses_defaults() -> Result<()> {
        let dir = TempDir::new()?;

        let settings = Settings::load_in(dir.path(), None)?;

        assert_eq!(settings.data_dir, PathBuf::from("data"));
        assert_eq!(settings.delimiter, ',');
        assert!(settings.records_file.is_none());

        Ok(())
    }

    #[test]
    fn test_settings_from_file() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "data_dir = \"/srv/insee\"")?;
        writeln!(file, "coordinates_file = \"/srv/geo/departements.csv\"")?;
        writeln!(file, "delimiter = \";\"")?;
        writeln!(file, "encoding = \"latin1\"")?;

        let settings = Settings::load(Some(file.path()))?;
        let paths = settings.data_paths();

        assert_eq!(paths.records, Path::new("/srv/insee").join("dpt2020.csv"));
        assert_eq!(paths.coordinates, PathBuf::from("/srv/geo/departements.csv"));

        let options = settings.reader_options()?;
        assert_eq!(options.delimiter, b';');
        assert_eq!(options.encoding_name(), "windows-1252");

        Ok(())
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let settings = Settings {
            data_dir: PathBuf::from("data"),
            records_file: None,
            coordinates_file: None,
            delimiter: '°',
            encoding: "utf-8".to_string(),
        };

        assert!(matches!(
            settings.reader_options(),
            Err(ProcessingError::Config(_))
        ));
        assert_eq!(delimiter_byte('\t').unwrap(), b'\t');
    }
}
