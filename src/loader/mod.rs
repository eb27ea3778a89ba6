//! Input loaders
//!
//! Every loader produces plain domain values; parse-level defects are skipped and
//! counted, while missing inputs and load-bearing defects are returned as errors.

pub mod ctas;
pub mod snapshot_table;
pub mod snapshots;

pub use ctas::{ctas_to_record_batch, load_ctas_conditions, write_ctas_conditions};
pub use snapshot_table::{SnapshotRows, load_snapshot_table, observations_from_batches};
pub use snapshots::{HistoricalSeriesLoader, SnapshotLoad, split_concatenated_objects};
