use crate::error::{ProcessingError, Result};
use crate::models::{JoinedRecord, JoinedTable};
use crate::utils::constants::{
    COL_BIRTH_YEAR, COL_COUNT, COL_DEPT, COL_FIRST_NAME, COL_LATITUDE, COL_LONGITUDE, COL_SEX,
    COMPRESSION_GZIP, COMPRESSION_LZ4, COMPRESSION_NONE, COMPRESSION_SNAPPY, COMPRESSION_ZSTD,
    DEFAULT_ROW_GROUP_SIZE,
};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel, ZstdLevel};
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

/// Arrow schema of the joined table; coordinates are nullable.
pub fn joined_schema() -> Arc<Schema> {
    let fields = vec![
        Field::new(COL_SEX, DataType::Int64, false),
        Field::new(COL_FIRST_NAME, DataType::Utf8, false),
        Field::new(COL_BIRTH_YEAR, DataType::Utf8, false),
        Field::new(COL_DEPT, DataType::Utf8, false),
        Field::new(COL_COUNT, DataType::Int64, false),
        Field::new(COL_LONGITUDE, DataType::Float64, true),
        Field::new(COL_LATITUDE, DataType::Float64, true),
    ];

    Arc::new(Schema::new(fields))
}

/// Convert joined records to an Arrow RecordBatch
pub fn records_to_batch(records: &[JoinedRecord]) -> Result<RecordBatch> {
    let sexes: Vec<i64> = records.iter().map(|r| r.sex).collect();
    let first_names: Vec<&str> = records.iter().map(|r| r.first_name.as_str()).collect();
    let birth_years: Vec<&str> = records.iter().map(|r| r.birth_year.as_str()).collect();
    let dept_codes: Vec<&str> = records.iter().map(|r| r.dept_code.as_str()).collect();
    let counts: Vec<i64> = records.iter().map(|r| r.count).collect();
    let longitudes: Vec<Option<f64>> = records.iter().map(|r| r.longitude).collect();
    let latitudes: Vec<Option<f64>> = records.iter().map(|r| r.latitude).collect();

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(sexes)),
        Arc::new(StringArray::from(first_names)),
        Arc::new(StringArray::from(birth_years)),
        Arc::new(StringArray::from(dept_codes)),
        Arc::new(Int64Array::from(counts)),
        Arc::new(Float64Array::from(longitudes)),
        Arc::new(Float64Array::from(latitudes)),
    ];

    Ok(RecordBatch::try_new(joined_schema(), columns)?)
}

pub struct ParquetWriter {
    compression: Compression,
    row_group_size: usize,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = match compression.to_lowercase().as_str() {
            COMPRESSION_SNAPPY => Compression::SNAPPY,
            COMPRESSION_GZIP => Compression::GZIP(GzipLevel::default()),
            COMPRESSION_LZ4 => Compression::LZ4,
            COMPRESSION_ZSTD => Compression::ZSTD(ZstdLevel::default()),
            COMPRESSION_NONE => Compression::UNCOMPRESSED,
            _ => {
                return Err(ProcessingError::Config(format!(
                    "Unsupported compression: {}",
                    compression
                )))
            }
        };
        Ok(self)
    }

    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Write the joined table, one batch per row group
    pub fn write_table(&self, table: &JoinedTable, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut writer = ArrowWriter::try_new(file, joined_schema(), Some(props))?;

        for chunk in table.records().chunks(self.row_group_size.max(1)) {
            writer.write(&records_to_batch(chunk)?)?;
        }

        writer.close()?;
        Ok(())
    }

    /// Get file statistics
    pub fn get_file_info(&self, path: &Path) -> Result<ParquetFileInfo> {
        use parquet::file::reader::{FileReader, SerializedFileReader};

        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let metadata = reader.metadata();

        Ok(ParquetFileInfo {
            total_rows: metadata.file_metadata().num_rows(),
            row_groups: metadata.num_row_groups(),
            file_size: std::fs::metadata(path)?.len(),
            compression: self.compression,
        })
    }
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct ParquetFileInfo {
    pub total_rows: i64,
    pub row_groups: usize,
    pub file_size: u64,
    pub compression: Compression,
}

impl ParquetFileInfo {
    pub fn summary(&self) -> String {
        format!(
            "Parquet File Summary:\n\
            - Total rows: {}\n\
            - Row groups: {}\n\
            - File size: {:.2} MB\n\
            - Compression: {:?}",
            self.total_rows,
            self.row_groups,
            self.file_size as f64 / 1_048_576.0, // Convert to MB
            self.compression,
        )
    }
}
