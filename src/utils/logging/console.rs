//! Console output utilities
//!
//! Formatted summaries printed by the command line tool.

use arrow::record_batch::RecordBatch;

/// Print summary information about the assembled dataset
pub fn print_batch_summary(batch: &RecordBatch, elapsed: std::time::Duration) {
    println!(
        "Assembled {} rows x {} columns in {:?}",
        batch.num_rows(),
        batch.num_columns(),
        elapsed
    );
}

/// Print detailed schema information from a batch
pub fn print_schema_info(batch: &RecordBatch) {
    println!("Schema:");
    for field in batch.schema().fields() {
        println!(
            "  - {} ({}{})",
            field.name(),
            field.data_type(),
            if field.is_nullable() { ", nullable" } else { "" }
        );
    }
}
