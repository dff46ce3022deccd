/// Default data directory
pub const DEFAULT_DATA_DIR: &str = "data";

/// File names
pub const RECORDS_FILE: &str = "dpt2020.csv";
pub const COORDINATES_FILE: &str = "dpt.csv";
pub const SETTINGS_FILE: &str = "babynames.toml";

/// Source column names
pub const COL_SEX: &str = "sexe";
pub const COL_FIRST_NAME: &str = "preusuel";
pub const COL_BIRTH_YEAR: &str = "annais";
pub const COL_DEPT: &str = "dpt";
pub const COL_COUNT: &str = "nombre";
pub const COL_LONGITUDE: &str = "longitude";
pub const COL_LATITUDE: &str = "latitude";

/// INSEE sentinels
pub const UNKNOWN_YEAR: &str = "XXXX";
pub const UNKNOWN_DEPT: &str = "XX";
pub const RARE_NAMES: &str = "_PRENOMS_RARES";

/// Reader defaults
pub const DEFAULT_DELIMITER: u8 = b',';
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Writer defaults
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;

/// Parquet compression options
pub const COMPRESSION_SNAPPY: &str = "snappy";
pub const COMPRESSION_GZIP: &str = "gzip";
pub const COMPRESSION_LZ4: &str = "lz4";
pub const COMPRESSION_ZSTD: &str = "zstd";
pub const COMPRESSION_NONE: &str = "none";
