use crate::error::{ProcessingError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Any run of degree, minute or second marks separates two fields.
static DMS_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[°'"]+"#).unwrap());

/// Hemisphere letters that flip the sign: `S`outh and `O`uest (west).
pub const NEGATIVE_DIRECTIONS: [&str; 2] = ["S", "O"];

/// A coordinate split into its degree, minute, second and direction fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DmsCoordinate {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
    pub direction: String,
}

impl DmsCoordinate {
    /// Parse strings such as `48°3'34" N` or `2°6'5" O`.
    ///
    /// The direction field is not checked against the expected hemisphere
    /// letters; anything other than a negative direction keeps the value
    /// positive.
    pub fn parse(dms: &str) -> Result<Self> {
        let parts: Vec<&str> = DMS_SEPARATOR.split(dms).collect();

        if parts.len() != 4 {
            return Err(ProcessingError::malformed(
                dms,
                format!(
                    "expected degrees, minutes, seconds and direction, found {} field(s)",
                    parts.len()
                ),
            ));
        }

        let degrees = parse_field(dms, "degrees", parts[0])?;
        let minutes = parse_field(dms, "minutes", parts[1])?;
        let seconds = parse_field(dms, "seconds", parts[2])?;

        Ok(Self {
            degrees,
            minutes,
            seconds,
            direction: parts[3].trim().to_string(),
        })
    }

    pub fn is_negative(&self) -> bool {
        NEGATIVE_DIRECTIONS.contains(&self.direction.as_str())
    }

    /// Signed decimal degrees.
    pub fn to_decimal(&self) -> f64 {
        let magnitude = self.degrees + self.minutes / 60.0 + self.seconds / 3600.0;

        if self.is_negative() {
            -magnitude
        } else {
            magnitude
        }
    }
}

fn parse_field(dms: &str, name: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ProcessingError::malformed(dms, format!("invalid {} value '{}'", name, raw)))
}

/// Convert a DMS (degrees, minutes, seconds, direction) string to decimal degrees
///
/// # Examples
/// ```
/// use babynames::utils::dms_to_decimal;
///
/// let latitude = dms_to_decimal("48°3'34\" N").unwrap();
/// assert!((latitude - 48.059444).abs() < 0.000001);
///
/// let longitude = dms_to_decimal("2°6'5\" O").unwrap();
/// assert!((longitude + 2.101389).abs() < 0.000001);
/// ```
pub fn dms_to_decimal(dms: &str) -> Result<f64> {
    DmsCoordinate::parse(dms).map(|coordinate| coordinate.to_decimal())
}
