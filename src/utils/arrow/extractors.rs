//! Column extraction utilities for Arrow record batches
//!
//! Each extractor returns one `Option` per row, or `Ok(None)` when an optional
//! column is absent from the batch.

use arrow::array::{Array, BooleanArray, Int64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::utils::arrow::array_utils::{downcast_array, get_column};

/// Extract a column as text; empty or whitespace-only cells count as null
pub fn extract_strings(
    batch: &RecordBatch,
    column_name: &str,
    table: &str,
    required: bool,
) -> Result<Option<Vec<Option<String>>>> {
    let Some(array) = get_column(batch, column_name, &DataType::Utf8, table, required)? else {
        return Ok(None);
    };
    let strings = downcast_array::<StringArray>(&array, column_name)?;

    let values = (0..strings.len())
        .map(|row| {
            if strings.is_null(row) {
                return None;
            }
            let value = strings.value(row).trim();
            (!value.is_empty()).then(|| value.to_string())
        })
        .collect();
    Ok(Some(values))
}

/// Extract a column as booleans
///
/// Text columns such as `TRUE`/`FALSE`, `yes`/`no` or `1`/`0` are accepted.
pub fn extract_booleans(
    batch: &RecordBatch,
    column_name: &str,
    table: &str,
    required: bool,
) -> Result<Option<Vec<Option<bool>>>> {
    let Some(array) = get_column(batch, column_name, &DataType::Boolean, table, required)? else {
        return Ok(None);
    };
    let booleans = downcast_array::<BooleanArray>(&array, column_name)?;

    Ok(Some(
        (0..booleans.len())
            .map(|row| (!booleans.is_null(row)).then(|| booleans.value(row)))
            .collect(),
    ))
}

/// Extract a column as 64-bit integers
///
/// Float columns (CSV inference turns integer columns with gaps into floats) are
/// truncated by the cast.
pub fn extract_int64s(
    batch: &RecordBatch,
    column_name: &str,
    table: &str,
    required: bool,
) -> Result<Option<Vec<Option<i64>>>> {
    let Some(array) = get_column(batch, column_name, &DataType::Int64, table, required)? else {
        return Ok(None);
    };
    let ints = downcast_array::<Int64Array>(&array, column_name)?;

    Ok(Some(
        (0..ints.len())
            .map(|row| (!ints.is_null(row)).then(|| ints.value(row)))
            .collect(),
    ))
}
