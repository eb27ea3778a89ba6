//! Emergency-room wait-time feature pipeline.
//!
//! Loads wait-time snapshots, resolves hospital names to canonical identities,
//! parses free-text wait times and derives per-hospital rolling, trend, benchmark
//! and calendar features into one flat table.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod parse;
pub mod pipeline;
pub mod registry;
pub mod utils;

// Core types
pub use config::{MissingValueStrategy, PipelineConfig};
pub use error::{Error, Result};
pub use models::{
    CtasCondition, DataSource, EnrichedRecord, HospitalId, HospitalIdentity, Observation,
    ParsedWaitTime, Resolution, SeriesKey,
};
pub use registry::HospitalRegistry;

// Stages
pub use algorithm::{
    AssembledDataset, HospitalTimeSeries, MasterDatasetAssembler, OutputColumn,
    RollingAndTrendEngine, TemporalFeatureDeriver,
};
pub use loader::{HistoricalSeriesLoader, SnapshotLoad};
pub use parse::{parse_timestamp, parse_wait_time};
pub use pipeline::{FeaturePipeline, PipelineInputs, PipelineOutput, PipelineStats};

// Arrow types
pub use arrow::record_batch::RecordBatch;
