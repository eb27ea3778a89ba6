//! The enriched record flowing through the pipeline stages
//!
//! Each stage takes the previous stage's records by value and returns new ones with
//! its own feature group filled in. Groups not yet computed hold their `Default`.

use chrono::NaiveDateTime;

use crate::models::observation::{Observation, ParsedWaitTime};
use crate::models::types::{HospitalId, SeriesKey, TimeOfDay};

/// Result of resolving a raw hospital name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    /// Canonical id, `None` when the name was not in the mapping table
    pub hospital_id: Option<HospitalId>,
    /// Canonical name when resolved, otherwise the raw name passed through
    pub canonical_name: Option<String>,
}

impl Resolution {
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.hospital_id.is_some()
    }
}

/// Calendar and time-of-day fields of a timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalFeatures {
    pub hour_of_day: u32,
    /// 0 = Monday .. 6 = Sunday
    pub day_of_week: u32,
    pub day_name: &'static str,
    pub day_of_month: u32,
    /// ISO week number
    pub week_of_year: u32,
    pub month: u32,
    pub year: i32,
    pub is_weekend: bool,
    pub is_weekday: bool,
    pub time_of_day: TimeOfDay,
    pub is_peak_hour: bool,
    pub is_off_peak: bool,
    pub is_business_hours: bool,
    pub is_night_shift: bool,
}

/// Time-windowed rolling means, aligned with the configured window list
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RollingFeatures {
    pub averages: Vec<Option<f64>>,
}

/// Position-lag deltas and short-horizon volatility
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrendFeatures {
    /// Change against the previous record of the series
    pub trend_1h: Option<f64>,
    /// Change against the record three positions earlier
    pub trend_3h: Option<f64>,
    /// Sign of `trend_1h`
    pub trend_direction: Option<i8>,
    /// Sample standard deviation over the trailing records
    pub volatility: Option<f64>,
}

/// Whole-history statistics of one hospital's wait times
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HospitalBenchmark {
    pub mean: f64,
    pub median: f64,
    /// `None` for a single observation
    pub std: Option<f64>,
    pub min: f64,
    pub max: f64,
    pub p25: f64,
    pub p75: f64,
}

/// Benchmark statistics plus the record's position relative to them
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BenchmarkFeatures {
    pub benchmark: Option<HospitalBenchmark>,
    pub wait_time_vs_avg: Option<f64>,
    pub wait_time_pct_of_max: Option<f64>,
    pub is_above_75th_percentile: Option<bool>,
    pub is_below_25th_percentile: Option<bool>,
}

/// One observation with everything derived from it
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub observation: Observation,
    pub resolution: Resolution,
    pub wait_time: ParsedWaitTime,
    /// `false` when the raw value was unavailable; imputation does not change it
    pub data_available: bool,
    pub temporal: Option<TemporalFeatures>,
    pub rolling: RollingFeatures,
    pub trend: TrendFeatures,
    pub benchmark: BenchmarkFeatures,
}

impl EnrichedRecord {
    /// Start a record from a resolved and parsed observation
    #[must_use]
    pub fn new(observation: Observation, resolution: Resolution, wait_time: ParsedWaitTime) -> Self {
        Self {
            observation,
            resolution,
            data_available: wait_time.is_available(),
            wait_time,
            temporal: None,
            rolling: RollingFeatures::default(),
            trend: TrendFeatures::default(),
            benchmark: BenchmarkFeatures::default(),
        }
    }

    #[must_use]
    pub const fn timestamp(&self) -> NaiveDateTime {
        self.observation.timestamp
    }

    #[must_use]
    pub const fn minutes(&self) -> Option<f64> {
        self.wait_time.minutes
    }

    #[must_use]
    pub const fn hospital_id(&self) -> Option<&HospitalId> {
        self.resolution.hospital_id.as_ref()
    }

    /// Canonical name if resolved, otherwise the raw name
    #[must_use]
    pub fn hospital_name(&self) -> &str {
        self.resolution
            .canonical_name
            .as_deref()
            .unwrap_or(&self.observation.hospital_raw_name)
    }

    /// Key of the series this record belongs to
    #[must_use]
    pub fn series_key(&self) -> SeriesKey {
        match &self.resolution.hospital_id {
            Some(id) => SeriesKey::Resolved(id.clone()),
            None => SeriesKey::Unresolved(self.observation.hospital_raw_name.clone()),
        }
    }
}
