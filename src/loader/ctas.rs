//! CTAS clinical reference table

use std::path::Path;

use arrow::datatypes::FieldRef;
use arrow::record_batch::RecordBatch;
use serde_arrow::schema::{SchemaLike, TracingOptions};

use crate::error::{Error, Result};
use crate::models::CtasCondition;
use crate::utils::arrow::{extract_booleans, extract_int64s, extract_strings};
use crate::utils::io::{read_table, write_table};
use crate::utils::logging::{log_operation_complete, log_skipped};

const CTAS_TABLE: &str = "CTAS reference table";

/// Load CTAS conditions and score them
///
/// Rows without a `system` are skipped. The two flag columns are required; a null
/// flag adds nothing to the severity score.
pub fn load_ctas_conditions(path: &Path) -> Result<Vec<CtasCondition>> {
    let batches = read_table(path, "CTAS reference")?;

    let mut conditions = Vec::new();
    let mut skipped = 0;
    for batch in &batches {
        let systems = extract_strings(batch, "system", CTAS_TABLE, true)?
            .ok_or_else(|| Error::column_not_found("system", CTAS_TABLE))?;
        let levels = extract_int64s(batch, "ctas_level", CTAS_TABLE, false)?;
        let specialist = extract_booleans(batch, "needs_pediatric_specialist", CTAS_TABLE, true)?
            .ok_or_else(|| Error::column_not_found("needs_pediatric_specialist", CTAS_TABLE))?;
        let general_safe = extract_booleans(batch, "pediatric_safe_to_general_er", CTAS_TABLE, true)?
            .ok_or_else(|| Error::column_not_found("pediatric_safe_to_general_er", CTAS_TABLE))?;

        for (row, system) in systems.into_iter().enumerate() {
            let Some(system) = system else {
                skipped += 1;
                continue;
            };
            let level = levels.as_ref().and_then(|values| values[row]);
            conditions.push(CtasCondition::new(system, level, specialist[row], general_safe[row]));
        }
    }

    log_skipped("CTAS rows without a system", skipped, Some(path));
    log_operation_complete("loaded", path, conditions.len(), None);
    Ok(conditions)
}

/// Convert scored conditions into a record batch
pub fn ctas_to_record_batch(conditions: &[CtasCondition]) -> Result<RecordBatch> {
    let fields = Vec::<FieldRef>::from_type::<CtasCondition>(TracingOptions::default())?;
    Ok(serde_arrow::to_record_batch(&fields, &conditions)?)
}

/// Write scored conditions as a CSV or Parquet table
pub fn write_ctas_conditions(path: &Path, conditions: &[CtasCondition]) -> Result<()> {
    let batch = ctas_to_record_batch(conditions)?;
    write_table(path, &batch)
}
