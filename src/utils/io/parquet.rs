//! Parquet file operations

use std::fs::File;
use std::path::Path;

use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::util::safe_open_file;
use crate::error::{Error, Result};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Default batch size for Parquet reading
pub const DEFAULT_BATCH_SIZE: usize = 16384;

/// Read a parquet file into Arrow record batches
pub fn read_parquet(path: &Path, purpose: &str) -> Result<Vec<RecordBatch>> {
    let start = std::time::Instant::now();
    log_operation_start("Reading parquet file", path);

    let file = safe_open_file(path, purpose)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?
        .with_batch_size(DEFAULT_BATCH_SIZE)
        .build()?;

    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;

    log_operation_complete("read", path, batches.len(), Some(start.elapsed()));
    Ok(batches)
}

/// Write a single record batch to a parquet file, replacing any existing file
pub fn write_parquet(path: &Path, batch: &RecordBatch) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io_at(path, "Failed to create parquet file", e))?;

    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(batch)?;
    writer.close()?;

    log_operation_complete("wrote", path, batch.num_rows(), None);
    Ok(())
}
