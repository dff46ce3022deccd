use crate::error::{ProcessingError, Result};
use crate::models::{CoordinateTable, DeptCoordinate};
use crate::readers::{open_csv, require_columns, ReaderOptions};
use crate::utils::constants::{COL_DEPT, COL_LATITUDE, COL_LONGITUDE};
use crate::utils::coordinates::dms_to_decimal;
use std::path::Path;
use tracing::debug;

struct RawRow {
    dept_code: String,
    longitude: String,
    latitude: String,
    extra: Vec<String>,
}

pub struct CoordinateReader {
    options: ReaderOptions,
}

impl CoordinateReader {
    pub fn new() -> Self {
        Self {
            options: ReaderOptions::default(),
        }
    }

    pub fn with_options(options: ReaderOptions) -> Self {
        Self { options }
    }

    /// Read the department coordinates file and convert its DMS columns.
    ///
    /// The first malformed longitude, then the first malformed latitude,
    /// aborts the whole load with `MalformedCoordinate`.
    pub fn read_coordinates(&self, path: &Path) -> Result<CoordinateTable> {
        let mut reader = open_csv(path, &self.options)?;

        let headers = reader
            .headers()
            .map_err(|e| ProcessingError::data_load(path, e.to_string()))?
            .clone();
        let positions = require_columns(path, &headers, &[COL_DEPT, COL_LONGITUDE, COL_LATITUDE])?;
        let (dept_idx, lon_idx, lat_idx) = (positions[0], positions[1], positions[2]);

        let is_extra = |idx: usize| idx != dept_idx && idx != lon_idx && idx != lat_idx;
        let extra_headers: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(idx, _)| is_extra(*idx))
            .map(|(_, h)| h.to_string())
            .collect();

        let mut raw_rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| ProcessingError::data_load(path, e.to_string()))?;
            raw_rows.push(RawRow {
                dept_code: record[dept_idx].to_string(),
                longitude: record[lon_idx].to_string(),
                latitude: record[lat_idx].to_string(),
                extra: record
                    .iter()
                    .enumerate()
                    .filter(|(idx, _)| is_extra(*idx))
                    .map(|(_, v)| v.to_string())
                    .collect(),
            });
        }

        // Longitude column first, then latitude
        let longitudes = convert_column(path, &raw_rows, |row| &row.longitude)?;
        let latitudes = convert_column(path, &raw_rows, |row| &row.latitude)?;

        let rows: Vec<DeptCoordinate> = raw_rows
            .into_iter()
            .zip(longitudes.into_iter().zip(latitudes))
            .map(|(row, (longitude, latitude))| {
                DeptCoordinate::new(row.dept_code, longitude, latitude).with_extra(row.extra)
            })
            .collect();

        debug!(path = %path.display(), rows = rows.len(), "loaded department coordinates");

        Ok(CoordinateTable::new(extra_headers, rows))
    }
}

fn convert_column<F>(path: &Path, rows: &[RawRow], column: F) -> Result<Vec<f64>>
where
    F: Fn(&RawRow) -> &String,
{
    rows.iter()
        .map(|row| {
            dms_to_decimal(column(row)).map_err(|e| {
                debug!(path = %path.display(), dept = %row.dept_code, error = %e, "coordinate conversion failed");
                e
            })
        })
        .collect()
}

impl Default for CoordinateReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_read_coordinates_file() -> Result<()> {
        let temp_file = write_file(
            "dpt,nom,longitude,latitude\n\
             75,Paris,\"2°6'5\"\" O\",\"48°3'34\"\" N\"\n\
             13,Bouches-du-Rhône,\"5°5'10\"\" E\",\"43°32'35\"\" N\"\n",
        );

        let table = CoordinateReader::new().read_coordinates(temp_file.path())?;

        assert_eq!(table.len(), 2);
        assert_eq!(table.extra_headers, vec!["nom".to_string()]);

        let paris = &table.rows[0];
        assert_eq!(paris.dept_code, "75");
        assert!((paris.longitude - -2.101389).abs() < 0.00001);
        assert!((paris.latitude - 48.059444).abs() < 0.00001);
        assert_eq!(table.extra_value(paris, "nom"), Some("Paris"));

        let marseille = &table.rows[1];
        assert!(marseille.longitude > 0.0);
        assert_eq!(table.extra_value(marseille, "nom"), Some("Bouches-du-Rhône"));

        Ok(())
    }

    #[test]
    fn test_malformed_coordinate_aborts_load() {
        let temp_file = write_file(
            "dpt,longitude,latitude\n\
             75,\"2°6'5\"\" O\",\"48°3'34\"\" N\"\n\
             13,\"5°5\"\"\",\"43°32'35\"\" N\"\n",
        );

        let err = CoordinateReader::new()
            .read_coordinates(temp_file.path())
            .unwrap_err();

        match err {
            ProcessingError::MalformedCoordinate { value, .. } => assert_eq!(value, "5°5\""),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_longitude_column_converted_before_latitude() {
        let temp_file = write_file(
            "dpt,longitude,latitude\n\
             75,\"2°6'5\"\" O\",bad-latitude\n\
             13,bad-longitude,\"43°32'35\"\" N\"\n",
        );

        let err = CoordinateReader::new()
            .read_coordinates(temp_file.path())
            .unwrap_err();

        match err {
            ProcessingError::MalformedCoordinate { value, .. } => assert_eq!(value, "bad-longitude"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_coordinate_column_fails() {
        let temp_file = write_file("dpt,longitude\n75,\"2°6'5\"\" O\"\n");

        let err = CoordinateReader::new()
            .read_coordinates(temp_file.path())
            .unwrap_err();
        assert!(matches!(err, ProcessingError::DataLoad { .. }));
        assert!(err.to_string().contains("latitude"));
    }

    #[test]
    fn test_ragged_row_fails() {
        let temp_file = write_file("dpt,longitude,latitude\n75,\"2°6'5\"\" O\"\n");

        let err = CoordinateReader::new()
            .read_coordinates(temp_file.path())
            .unwrap_err();
        assert!(matches!(err, ProcessingError::DataLoad { .. }));
    }
}
