//! Feature derivation stages
//!
//! Each stage takes the previous stage's records by value and returns them with
//! one more feature group filled in.

pub mod assembly;
pub mod rolling;
pub mod statistics;
pub mod temporal;

pub use assembly::{AssembledDataset, MasterDatasetAssembler, OutputColumn};
pub use rolling::{HospitalTimeSeries, RollingAndTrendEngine};
pub use temporal::TemporalFeatureDeriver;
