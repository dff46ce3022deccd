use crate::settings::DataPaths;
use crate::error::Result;
use crate::models::{CoordinateTable, JoinedRecord, JoinedTable, NameRecord};
use crate::readers::{CoordinateReader, NameReader, ReaderOptions};
use std::path::Path;
use tracing::debug;

pub struct DataMerger {
    options: ReaderOptions,
}

impl DataMerger {
    pub fn new() -> Self {
        Self {
            options: ReaderOptions::default(),
        }
    }

    pub fn with_options(options: ReaderOptions) -> Self {
        Self { options }
    }

    /// Load both files and left-join the names onto the coordinates.
    ///
    /// Both files are read even when one of them fails; a records error
    /// is reported before a coordinates error.
    pub fn merge_files(&self, paths: &DataPaths) -> Result<JoinedTable> {
        let names_reader = NameReader::with_options(self.options);
        let coordinate_reader = CoordinateReader::with_options(self.options);

        let (names, coordinates) = rayon::join(
            || names_reader.read_names(&paths.records),
            || coordinate_reader.read_coordinates(&paths.coordinates),
        );

        Ok(self.merge(names?, &coordinates?))
    }

    /// Left outer join on the department code.
    ///
    /// Every name record is kept in order. A code missing from the
    /// coordinates yields `None` coordinates; a code present several times
    /// yields one row per coordinate row. An empty code is a missing value
    /// and never matches, not even an empty code in the coordinates.
    pub fn merge(&self, names: Vec<NameRecord>, coordinates: &CoordinateTable) -> JoinedTable {
        let index = coordinates.index_by_code();

        let duplicated = index.values().filter(|rows| rows.len() > 1).count();
        if duplicated > 0 {
            debug!(duplicated, "department codes repeated in coordinates, rows will fan out");
        }

        let mut records = Vec::with_capacity(names.len());
        let mut unmatched = 0usize;

        for name in names {
            let matches = if name.dept_code.is_empty() {
                None
            } else {
                index.get(name.dept_code.as_str())
            };

            match matches {
                Some(matches) => {
                    for coordinate in matches {
                        records.push(JoinedRecord::from_parts(
                            name.clone(),
                            Some((coordinate.longitude, coordinate.latitude)),
                        ));
                    }
                }
                None => {
                    unmatched += 1;
                    records.push(JoinedRecord::from_parts(name, None));
                }
            }
        }

        debug!(rows = records.len(), unmatched, "joined names with coordinates");

        JoinedTable::new(records)
    }
}

impl Default for DataMerger {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and join the two datasets, falling back to `data/dpt2020.csv` and
/// `data/dpt.csv` for missing paths.
pub fn merge_data(records: Option<&Path>, coordinates: Option<&Path>) -> Result<JoinedTable> {
    DataMerger::new().merge_files(&DataPaths::resolve(records, coordinates))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeptCoordinate;
    use pretty_assertions::assert_eq;

    fn name(first_name: &str, dept_code: &str) -> NameRecord {
        NameRecord::new(
            1,
            first_name.to_string(),
            "1920".to_string(),
            dept_code.to_string(),
            10,
        )
    }

    fn coordinates(rows: &[(&str, f64, f64)]) -> CoordinateTable {
        CoordinateTable::new(
            vec![],
            rows.iter()
                .map(|(code, lon, lat)| DeptCoordinate::new(code.to_string(), *lon, *lat))
                .collect(),
        )
    }

    #[test]
    fn test_left_join_keeps_every_record() {
        let names = vec![name("JEAN", "75"), name("MARIE", "XX"), name("PAUL", "13")];
        let coords = coordinates(&[("75", 2.35, 48.85), ("13", 5.37, 43.30), ("69", 4.83, 45.76)]);

        let table = DataMerger::new().merge(names, &coords);

        assert_eq!(table.len(), 3);
        assert_eq!(table.matched_count(), 2);

        let records = table.records();
        assert_eq!(records[0].first_name, "JEAN");
        assert_eq!(records[0].longitude, Some(2.35));
        assert_eq!(records[0].latitude, Some(48.85));
        assert_eq!(records[1].first_name, "MARIE");
        assert_eq!(records[1].longitude, None);
        assert_eq!(records[1].latitude, None);
        assert_eq!(records[2].longitude, Some(5.37));
    }

    #[test]
    fn test_join_key_is_exact_text() {
        // "1" and "01" are different departments
        let table = DataMerger::new().merge(vec![name("JEAN", "1")], &coordinates(&[("01", 5.3, 46.2)]));

        assert_eq!(table.unmatched_count(), 1);
    }

    #[test]
    fn test_empty_code_never_matches() {
        let coords = coordinates(&[("", 0.0, 0.0), ("75", 2.35, 48.85)]);

        let table = DataMerger::new().merge(vec![name("JEAN", ""), name("PAUL", "75")], &coords);

        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].longitude, None);
        assert_eq!(table.records()[0].latitude, None);
        assert_eq!(table.records()[1].longitude, Some(2.35));
    }

    #[test]
    fn test_duplicate_codes_fan_out() {
        let coords = coordinates(&[("75", 2.35, 48.85), ("75", 2.30, 48.80)]);

        let table = DataMerger::new().merge(vec![name("JEAN", "75"), name("PAUL", "01")], &coords);

        assert_eq!(table.len(), 3);
        let longitudes: Vec<Option<f64>> = table.iter().map(|r| r.longitude).collect();
        assert_eq!(longitudes, vec![Some(2.35), Some(2.30), None]);
        assert!(table.records()[..2].iter().all(|r| r.first_name == "JEAN"));
    }

    #[test]
    fn test_empty_inputs() {
        let merger = DataMerger::new();

        assert!(merger.merge(vec![], &coordinates(&[("75", 2.35, 48.85)])).is_empty());

        let table = merger.merge(vec![name("JEAN", "75")], &CoordinateTable::default());
        assert_eq!(table.len(), 1);
        assert_eq!(table.unmatched_count(), 1);
    }
}
