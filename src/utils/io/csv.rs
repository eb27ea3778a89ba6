//! CSV file operations backed by `arrow::csv`

use std::fs::File;
use std::io::Seek;
use std::path::Path;
use std::sync::Arc;

use arrow::csv::reader::Format;
use arrow::csv::{ReaderBuilder, WriterBuilder};
use arrow::datatypes::{DataType, FieldRef, Schema};
use arrow::record_batch::RecordBatch;

use crate::error::util::safe_open_file;
use crate::error::{Error, Result};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Rows sampled for schema inference
const INFERENCE_SAMPLE_ROWS: usize = 1000;

/// Read a CSV file with a header row, inferring column types
///
/// Columns named in `text_columns` are always read as `Utf8`, whatever inference
/// would have chosen.
pub fn read_csv(path: &Path, purpose: &str, text_columns: &[&str]) -> Result<Vec<RecordBatch>> {
    let start = std::time::Instant::now();
    log_operation_start("Reading csv file", path);

    let mut file = safe_open_file(path, purpose)?;
    let (inferred, _) = Format::default()
        .with_header(true)
        .infer_schema(&mut file, Some(INFERENCE_SAMPLE_ROWS))?;
    let schema = force_text_columns(&inferred, text_columns);
    file.rewind()
        .map_err(|e| Error::io_at(path, format!("Failed to rewind file for {purpose}"), e))?;

    let reader = ReaderBuilder::new(Arc::new(schema))
        .with_header(true)
        .build(file)?;
    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;

    log_operation_complete("read", path, batches.len(), Some(start.elapsed()));
    Ok(batches)
}

/// Replace the inferred type of each listed column with `Utf8`
///
/// Inference reads ISO timestamps as Arrow timestamps and shifts offset values to UTC,
/// which loses the written wall-clock time.
fn force_text_columns(schema: &Schema, text_columns: &[&str]) -> Schema {
    let fields: Vec<FieldRef> = schema
        .fields()
        .iter()
        .map(|field| {
            if text_columns.contains(&field.name().as_str()) {
                Arc::new(field.as_ref().clone().with_data_type(DataType::Utf8))
            } else {
                Arc::clone(field)
            }
        })
        .collect();
    Schema::new_with_metadata(fields, schema.metadata().clone())
}

/// Write a single record batch to a CSV file with a header row
pub fn write_csv(path: &Path, batch: &RecordBatch) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io_at(path, "Failed to create csv file", e))?;

    let mut writer = WriterBuilder::new().with_header(true).build(file);
    writer.write(batch)?;

    log_operation_complete("wrote", path, batch.num_rows(), None);
    Ok(())
}
