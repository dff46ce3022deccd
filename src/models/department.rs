use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Department coordinates after DMS conversion.
///
/// `extra` holds the passthrough columns in the order of
/// [`CoordinateTable::extra_headers`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeptCoordinate {
    pub dept_code: String,
    pub longitude: f64,
    pub latitude: f64,
    pub extra: Vec<String>,
}

impl DeptCoordinate {
    pub fn new(dept_code: String, longitude: f64, latitude: f64) -> Self {
        Self {
            dept_code,
            longitude,
            latitude,
            extra: Vec::new(),
        }
    }

    pub fn with_extra(mut self, extra: Vec<String>) -> Self {
        self.extra = extra;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinateTable {
    pub extra_headers: Vec<String>,
    pub rows: Vec<DeptCoordinate>,
}

impl CoordinateTable {
    pub fn new(extra_headers: Vec<String>, rows: Vec<DeptCoordinate>) -> Self {
        Self {
            extra_headers,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of a passthrough column for a row
    pub fn extra_value<'a>(&self, row: &'a DeptCoordinate, header: &str) -> Option<&'a str> {
        self.extra_headers
            .iter()
            .position(|h| h == header)
            .and_then(|idx| row.extra.get(idx))
            .map(String::as_str)
    }

    /// Index rows by department code. Duplicated codes keep every row, in file order.
    pub fn index_by_code(&self) -> HashMap<&str, Vec<&DeptCoordinate>> {
        let mut index: HashMap<&str, Vec<&DeptCoordinate>> = HashMap::with_capacity(self.rows.len());

        for row in &self.rows {
            index.entry(row.dept_code.as_str()).or_default().push(row);
        }

        index
    }
}
