//! Current wait-time snapshot rows
//!
//! A snapshot table has one row per reading with at least the columns
//! `Timestamp`, `Hospital Name` and `Wait Time`.

use std::path::Path;

use arrow::record_batch::RecordBatch;

use crate::error::{Error, Result};
use crate::models::{DataSource, Observation};
use crate::parse::parse_timestamp;
use crate::utils::arrow::extract_strings;
use crate::utils::io::read_table_with_text_columns;
use crate::utils::logging::{log_operation_complete, log_skipped};

pub const TIMESTAMP_COLUMN: &str = "Timestamp";
pub const HOSPITAL_COLUMN: &str = "Hospital Name";
pub const WAIT_TIME_COLUMN: &str = "Wait Time";

const SNAPSHOT_TABLE: &str = "wait-time snapshot table";

/// Observations read from a snapshot table
#[derive(Debug, Clone, Default)]
pub struct SnapshotRows {
    pub observations: Vec<Observation>,
    pub rows_read: usize,
    /// Rows dropped because they named no hospital
    pub rows_missing_name: usize,
}

/// Read a CSV or Parquet snapshot table, tagging every row with `source`
///
/// The three snapshot columns are read as text so timestamps reach
/// [`parse_timestamp`] exactly as written.
pub fn load_snapshot_table(path: &Path, source: DataSource) -> Result<SnapshotRows> {
    let batches = read_table_with_text_columns(
        path,
        "wait-time snapshot",
        &[TIMESTAMP_COLUMN, HOSPITAL_COLUMN, WAIT_TIME_COLUMN],
    )?;
    let rows = observations_from_batches(&batches, source)?;

    log_skipped("snapshot rows without a hospital name", rows.rows_missing_name, Some(path));
    log_operation_complete("loaded", path, rows.observations.len(), None);
    Ok(rows)
}

/// Convert snapshot batches into observations
///
/// A missing required column or an unreadable timestamp fails the whole table.
pub fn observations_from_batches(batches: &[RecordBatch], source: DataSource) -> Result<SnapshotRows> {
    let mut rows = SnapshotRows::default();

    for batch in batches {
        let timestamps = required_strings(batch, TIMESTAMP_COLUMN)?;
        let hospitals = required_strings(batch, HOSPITAL_COLUMN)?;
        let wait_times = required_strings(batch, WAIT_TIME_COLUMN)?;

        rows.rows_read += batch.num_rows();
        for ((timestamp, hospital), wait_time) in
            timestamps.into_iter().zip(hospitals).zip(wait_times)
        {
            let Some(hospital) = hospital else {
                rows.rows_missing_name += 1;
                continue;
            };
            let timestamp = parse_timestamp(timestamp.as_deref().unwrap_or_default())?;
            rows.observations
                .push(Observation::new(timestamp, hospital, source, wait_time));
        }
    }

    Ok(rows)
}

fn required_strings(batch: &RecordBatch, column: &str) -> Result<Vec<Option<String>>> {
    extract_strings(batch, column, SNAPSHOT_TABLE, true)?
        .ok_or_else(|| Error::column_not_found(column, SNAPSHOT_TABLE))
}
