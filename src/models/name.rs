use serde::{Deserialize, Serialize};

use crate::utils::constants::{RARE_NAMES, UNKNOWN_DEPT, UNKNOWN_YEAR};

/// One row of the INSEE first-names file.
///
/// Birth year and department stay textual: the source uses `XXXX` and `XX`
/// for unknown values and department codes carry leading zeros or letters
/// (`01`, `2A`, `971`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRecord {
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
}

impl NameRecord {
    pub fn new(
        sex: i64,
        first_name: String,
        birth_year: String,
        dept_code: String,
        count: i64,
    ) -> Self {
        Self {
            sex,
            first_name,
            birth_year,
            dept_code,
            count,
        }
    }

    /// Numeric birth year, `None` for the unknown-year sentinel or any other non-number.
    pub fn birth_year_value(&self) -> Option<i32> {
        let year = self.birth_year.trim();
        if year == UNKNOWN_YEAR {
            return None;
        }
        year.parse().ok()
    }

    pub fn has_known_department(&self) -> bool {
        !self.dept_code.is_empty() && self.dept_code != UNKNOWN_DEPT
    }

    /// INSEE groups names given fewer than a threshold of times under one label.
    pub fn is_rare_name(&self) -> bool {
        self.first_name == RARE_NAMES
    }
}
