use crate::error::{ProcessingError, Result};
use crate::models::NameRecord;
use crate::readers::{open_csv, require_columns, ReaderOptions};
use crate::utils::constants::{COL_BIRTH_YEAR, COL_COUNT, COL_DEPT, COL_FIRST_NAME, COL_SEX};
use std::path::Path;
use tracing::debug;

pub struct NameReader {
    options: ReaderOptions,
}

impl NameReader {
    pub fn new() -> Self {
        Self {
            options: ReaderOptions::default(),
        }
    }

    pub fn with_options(options: ReaderOptions) -> Self {
        Self { options }
    }

    /// Read the first-names file.
    ///
    /// `sexe` and `nombre` must be integers; `preusuel`, `annais` and `dpt`
    /// are kept as text. Only these five columns are loaded; any other
    /// column in the file is dropped.
    pub fn read_names(&self, path: &Path) -> Result<Vec<NameRecord>> {
        let mut reader = open_csv(path, &self.options)?;

        let headers = reader
            .headers()
            .map_err(|e| ProcessingError::data_load(path, e.to_string()))?
            .clone();
        require_columns(
            path,
            &headers,
            &[COL_SEX, COL_FIRST_NAME, COL_BIRTH_YEAR, COL_DEPT, COL_COUNT],
        )?;

        let mut records = Vec::new();
        for result in reader.deserialize::<NameRecord>() {
            let record = result.map_err(|e| ProcessingError::data_load(path, e.to_string()))?;
            records.push(record);
        }

        debug!(path = %path.display(), rows = records.len(), "loaded name records");

        Ok(records)
    }
}

impl Default for NameReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_read_names_file() -> Result<()> {
        let temp_file = write_file(
            "sexe,preusuel,annais,dpt,nombre\n\
             1,JEAN,1920,75,10\n\
             2,MARIE,XXXX,01,7\n\
             1,_PRENOMS_RARES,1921,XX,1503\n",
        );

        let records = NameReader::new().read_names(temp_file.path())?;

        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0],
            NameRecord::new(1, "JEAN".to_string(), "1920".to_string(), "75".to_string(), 10)
        );
        assert_eq!(records[1].birth_year, "XXXX");
        assert_eq!(records[1].dept_code, "01");
        assert_eq!(records[2].count, 1503);

        Ok(())
    }

    #[test]
    fn test_columns_matched_by_name() -> Result<()> {
        let temp_file = write_file(
            "nombre,dpt,extra,annais,preusuel,sexe\n\
             4,2A,ignored,2001,LUCA,1\n",
        );

        let records = NameReader::new().read_names(temp_file.path())?;

        assert_eq!(
            records,
            vec![NameRecord::new(1, "LUCA".to_string(), "2001".to_string(), "2A".to_string(), 4)]
        );

        Ok(())
    }

    #[test]
    fn test_semicolon_delimited_file() -> Result<()> {
        let temp_file = write_file("sexe;preusuel;annais;dpt;nombre\n2;ZOÉ;2019;971;12\n");

        let reader = NameReader::with_options(ReaderOptions::new().with_delimiter(b';'));
        let records = reader.read_names(temp_file.path())?;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].first_name, "ZOÉ");
        assert_eq!(records[0].dept_code, "971");

        Ok(())
    }

    #[test]
    fn test_header_only_file_is_empty() -> Result<()> {
        let temp_file = write_file("sexe,preusuel,annais,dpt,nombre\n");
        assert!(NameReader::new().read_names(temp_file.path())?.is_empty());
        Ok(())
    }

    #[test]
    fn test_non_numeric_count_fails() {
        let temp_file = write_file("sexe,preusuel,annais,dpt,nombre\n1,JEAN,1920,75,dix\n");

        let err = NameReader::new().read_names(temp_file.path()).unwrap_err();
        assert!(matches!(err, ProcessingError::DataLoad { .. }));
    }

    #[test]
    fn test_missing_column_fails() {
        let temp_file = write_file("sexe,preusuel,annais,nombre\n1,JEAN,1920,10\n");

        let err = NameReader::new().read_names(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("dpt"));
    }

    #[test]
    fn test_missing_file_fails() {
        let err = NameReader::new()
            .read_names(Path::new("does/not/exist/dpt2020.csv"))
            .unwrap_err();

        match err {
            ProcessingError::DataLoad { path, .. } => {
                assert!(path.ends_with("dpt2020.csv"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
