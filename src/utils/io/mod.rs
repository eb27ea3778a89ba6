//! IO utilities for tabular files
//!
//! Tabular inputs and outputs are CSV or Parquet, chosen by file extension.

pub mod csv;
pub mod parquet;
pub mod paths;

use std::path::Path;

use arrow::record_batch::RecordBatch;

use crate::error::{Error, Result};

pub use paths::find_files_with_extension;

/// On-disk layout of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Parquet,
}

impl TableFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("parquet" | "pq") => Ok(Self::Parquet),
            _ => Err(Error::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Read every batch of a CSV or Parquet table
pub fn read_table(path: &Path, purpose: &str) -> Result<Vec<RecordBatch>> {
    read_table_with_text_columns(path, purpose, &[])
}

/// Read a table, keeping the named CSV columns as raw text
///
/// Parquet columns already carry their stored type, so `text_columns` only affects CSV.
pub fn read_table_with_text_columns(
    path: &Path,
    purpose: &str,
    text_columns: &[&str],
) -> Result<Vec<RecordBatch>> {
    match TableFormat::from_path(path)? {
        TableFormat::Csv => csv::read_csv(path, purpose, text_columns),
        TableFormat::Parquet => parquet::read_parquet(path, purpose),
    }
}

/// Write one batch as a CSV or Parquet table
pub fn write_table(path: &Path, batch: &RecordBatch) -> Result<()> {
    match TableFormat::from_path(path)? {
        TableFormat::Csv => csv::write_csv(path, batch),
        TableFormat::Parquet => parquet::write_parquet(path, batch),
    }
}
