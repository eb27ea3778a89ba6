//! Utilities for working with Arrow arrays.
//!
//! Tabular inputs arrive with whatever types CSV inference or the Parquet writer
//! chose, so columns are looked up by name and cast to the type the caller wants.

use arrow::array::{Array, ArrayRef};
use arrow::compute::kernels::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use log::debug;

use crate::error::{Error, Result};

/// Get a column from a record batch, cast to `expected_type`
///
/// # Arguments
///
/// * `batch` - The record batch containing the column
/// * `column_name` - The name of the column to extract
/// * `expected_type` - The data type the caller will downcast to
/// * `table` - Name of the input, for error messages
/// * `required` - Whether a missing column is an error or `Ok(None)`
///
/// Values that cannot be cast become null rather than failing the whole column.
pub fn get_column(
    batch: &RecordBatch,
    column_name: &str,
    expected_type: &DataType,
    table: &str,
    required: bool,
) -> Result<Option<ArrayRef>> {
    let Ok(idx) = batch.schema().index_of(column_name) else {
        if required {
            return Err(Error::column_not_found(column_name, table));
        }
        return Ok(None);
    };

    let column = batch.column(idx);
    let actual_type = column.data_type();
    if actual_type == expected_type {
        return Ok(Some(column.clone()));
    }

    debug!("Converting column '{column_name}' from {actual_type:?} to {expected_type:?}");
    let converted = cast::cast(column, expected_type)?;
    Ok(Some(converted))
}

/// Downcast a column to a specific array type with clear error messages
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
) -> Result<&'a A> {
    array.as_any().downcast_ref::<A>().ok_or_else(|| {
        Error::Arrow(arrow::error::ArrowError::CastError(format!(
            "Column '{column_name}' has unexpected type {:?}",
            array.data_type()
        )))
    })
}
