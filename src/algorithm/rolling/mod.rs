//! Per-hospital rolling, trend and benchmark features
//!
//! Records are grouped into [`HospitalTimeSeries`], each series is sorted by time and
//! processed on its own. Series carry no cross-hospital dependency, so they are
//! processed in parallel and reassembled in series-key order.

pub mod benchmark;
pub mod series;
pub mod window;

use chrono::Duration;
use rayon::prelude::*;

use crate::config::PipelineConfig;
use crate::models::{EnrichedRecord, RollingFeatures, TrendFeatures};
use crate::utils::logging::{create_main_progress_bar, finish_progress_bar};

pub use benchmark::{compare_to_benchmark, compute_benchmark};
pub use series::{HospitalTimeSeries, flatten, group_by_hospital};

/// Computes the rolling, trend and benchmark groups of every record
#[derive(Debug, Clone)]
pub struct RollingAndTrendEngine {
    windows_hours: Vec<u32>,
    volatility_window: usize,
    show_progress: bool,
}

impl RollingAndTrendEngine {
    #[must_use]
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            windows_hours: config.rolling_windows_hours.clone(),
            volatility_window: config.volatility_window,
            show_progress: config.show_progress,
        }
    }

    /// Window lengths in hours, in output order
    #[must_use]
    pub fn windows_hours(&self) -> &[u32] {
        &self.windows_hours
    }

    /// Group, sort and enrich all records
    ///
    /// The result is ordered by series key, then by timestamp within each series.
    #[must_use]
    pub fn apply(&self, records: Vec<EnrichedRecord>) -> Vec<EnrichedRecord> {
        let series = group_by_hospital(records);
        log::info!(
            "Computing rolling features for {} hospital series",
            series.len()
        );

        let pb = create_main_progress_bar(
            series.len() as u64,
            Some("Rolling features"),
            self.show_progress,
        );
        let processed: Vec<HospitalTimeSeries> = series
            .into_par_iter()
            .map(|mut s| {
                self.process_series(&mut s);
                pb.inc(1);
                s
            })
            .collect();
        finish_progress_bar(&pb, Some("Rolling features done"));

        flatten(processed)
    }

    /// Fill the rolling, trend and benchmark groups of one sorted series
    pub fn process_series(&self, series: &mut HospitalTimeSeries) {
        let timestamps = series.timestamps();
        let minutes = series.minutes();

        let averages: Vec<Vec<Option<f64>>> = self
            .windows_hours
            .iter()
            .map(|&hours| {
                window::rolling_time_mean(&timestamps, &minutes, Duration::hours(i64::from(hours)))
            })
            .collect();
        let trend_1h = window::lag_difference(&minutes, 1);
        let trend_3h = window::lag_difference(&minutes, 3);
        let volatility = window::rolling_count_std(&minutes, self.volatility_window);
        let stats = compute_benchmark(&series.present_minutes());

        for (idx, record) in series.records.iter_mut().enumerate() {
            record.rolling = RollingFeatures {
                averages: averages.iter().map(|values| values[idx]).collect(),
            };
            record.trend = TrendFeatures {
                trend_1h: trend_1h[idx],
                trend_3h: trend_3h[idx],
                trend_direction: window::direction(trend_1h[idx]),
                volatility: volatility[idx],
            };
            record.benchmark = compare_to_benchmark(minutes[idx], stats);
        }
    }
}
