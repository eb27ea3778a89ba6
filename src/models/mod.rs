//! Domain model for the wait-time pipeline
//!
//! Plain data types shared by the loaders, the feature stages and the assembler.

pub mod ctas;
pub mod hospital;
pub mod observation;
pub mod record;
pub mod types;

pub use ctas::CtasCondition;
pub use hospital::{AttributeColumns, HospitalIdentity};
pub use observation::{Observation, ParsedWaitTime};
pub use record::{
    BenchmarkFeatures, EnrichedRecord, HospitalBenchmark, Resolution, RollingFeatures,
    TemporalFeatures, TrendFeatures,
};
pub use types::{DataSource, HospitalId, SeriesKey, TimeOfDay};
