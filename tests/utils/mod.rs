use std::fs;
use std::path::{Path, PathBuf};

use arrow::array::{Array, BooleanArray, Float64Array, StringArray};
use arrow::record_batch::RecordBatch;
use chrono::{NaiveDate, NaiveDateTime};
use triage_link::PipelineConfig;

/// Mapping table with two hospitals and every optional attribute column
pub const MAPPING_CSV: &str = "\
hospital_id,standard_name,er_watch_name,hlwiw_name,pediatric_dataset_name,region,tier,has_pediatric_er,is_trauma_centre
1,Saint X Hospital,Saint X,St. X,,Calgary,2,true,false
2,Y General Hospital,Y General,Y Gen,Y Peds,Edmonton,,false,true
";

/// Mapping table with only the required columns
pub const MINIMAL_MAPPING_CSV: &str = "\
hospital_id,standard_name,er_watch_name,hlwiw_name,pediatric_dataset_name
1,Saint X Hospital,Saint X,St. X,St X Kids
";

/// Write `content` to `dir/name` and return the path
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("failed to write fixture");
    path
}

/// Write a snapshot table from `(timestamp, hospital, wait time)` rows
pub fn write_snapshot_csv(dir: &Path, name: &str, rows: &[(&str, &str, &str)]) -> PathBuf {
    let mut content = String::from("Timestamp,Hospital Name,Wait Time\n");
    for (timestamp, hospital, wait_time) in rows {
        content.push_str(&format!("{timestamp},{hospital},{wait_time}\n"));
    }
    write_file(dir, name, &content)
}

/// Render one snapshot object
pub fn snapshot_object(timestamp: &str, hospitals: &[(&str, &str)]) -> String {
    let data = hospitals
        .iter()
        .map(|(name, wait)| format!("\"{name}\": \"{wait}\""))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{\"timestamp\": \"{timestamp}\", \"data\": {{{data}}}}}")
}

/// Configuration without progress bars and with a small pool
#[must_use]
pub fn quiet_config() -> PipelineConfig {
    PipelineConfig::new().without_progress().with_threads(2)
}

/// 2024-01-01 at `hour`:`minute`
#[must_use]
pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

pub fn float_column(batch: &RecordBatch, name: &str) -> Vec<Option<f64>> {
    let column = batch.column_by_name(name).expect("missing column");
    let values = column.as_any().downcast_ref::<Float64Array>().unwrap();
    (0..values.len())
        .map(|i| (!values.is_null(i)).then(|| values.value(i)))
        .collect()
}

pub fn string_column(batch: &RecordBatch, name: &str) -> Vec<Option<String>> {
    let column = batch.column_by_name(name).expect("missing column");
    let values = column.as_any().downcast_ref::<StringArray>().unwrap();
    (0..values.len())
        .map(|i| (!values.is_null(i)).then(|| values.value(i).to_string()))
        .collect()
}

pub fn bool_column(batch: &RecordBatch, name: &str) -> Vec<Option<bool>> {
    let column = batch.column_by_name(name).expect("missing column");
    let values = column.as_any().downcast_ref::<BooleanArray>().unwrap();
    (0..values.len())
        .map(|i| (!values.is_null(i)).then(|| values.value(i)))
        .collect()
}

pub fn column_names(batch: &RecordBatch) -> Vec<String> {
    batch
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect()
}
