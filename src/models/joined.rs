use serde::{Deserialize, Serialize};

use super::NameRecord;

/// A name record with the coordinates of its department, `None` when the
/// department code has no match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedRecord {
    #[serde(rename = "sexe")]
    pub sex: i64,

    #[serde(rename = "preusuel")]
    pub first_name: String,

    #[serde(rename = "annais")]
    pub birth_year: String,

    #[serde(rename = "dpt")]
    pub dept_code: String,

    #[serde(rename = "nombre")]
    pub count: i64,

    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
}

impl JoinedRecord {
    pub fn from_parts(record: NameRecord, coordinates: Option<(f64, f64)>) -> Self {
        let (longitude, latitude) = match coordinates {
            Some((longitude, latitude)) => (Some(longitude), Some(latitude)),
            None => (None, None),
        };

        Self {
            sex: record.sex,
            first_name: record.first_name,
            birth_year: record.birth_year,
            dept_code: record.dept_code,
            count: record.count,
            longitude,
            latitude,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.longitude.is_some() && self.latitude.is_some()
    }
}

/// The joined table. Built once by the merger and not mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinedTable {
    records: Vec<JoinedRecord>,
}

impl JoinedTable {
    pub fn new(records: Vec<JoinedRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[JoinedRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JoinedRecord> {
        self.records.iter()
    }

    pub fn matched_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_matched()).count()
    }

    pub fn unmatched_count(&self) -> usize {
        self.len() - self.matched_count()
    }

    pub fn into_records(self) -> Vec<JoinedRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a JoinedTable {
    type Item = &'a JoinedRecord;
    type IntoIter = std::slice::Iter<'a, JoinedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
