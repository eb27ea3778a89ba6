//! Whole-history benchmarks of one hospital
//!
//! Benchmarks look at the full series, future records included, so they describe
//! the hospital rather than the information available at the record's time.

use crate::algorithm::statistics;
use crate::models::{BenchmarkFeatures, HospitalBenchmark};

/// Summary statistics of every present value; `None` when there are none
#[must_use]
pub fn compute_benchmark(values: &[f64]) -> Option<HospitalBenchmark> {
    let sorted = statistics::sorted(values);
    Some(HospitalBenchmark {
        mean: statistics::mean(&sorted)?,
        median: statistics::median_sorted(&sorted)?,
        std: statistics::sample_std(&sorted),
        min: *sorted.first()?,
        max: *sorted.last()?,
        p25: statistics::quantile_sorted(&sorted, 0.25)?,
        p75: statistics::quantile_sorted(&sorted, 0.75)?,
    })
}

/// Position of one reading relative to its hospital's benchmark
///
/// Comparisons are `None` when the reading is missing.
#[must_use]
pub fn compare_to_benchmark(
    minutes: Option<f64>,
    benchmark: Option<HospitalBenchmark>,
) -> BenchmarkFeatures {
    let Some(stats) = benchmark else {
        return BenchmarkFeatures::default();
    };

    BenchmarkFeatures {
        benchmark: Some(stats),
        wait_time_vs_avg: minutes.map(|m| m - stats.mean),
        wait_time_pct_of_max: minutes
            .filter(|_| stats.max != 0.0)
            .map(|m| m / stats.max * 100.0),
        is_above_75th_percentile: minutes.map(|m| m > stats.p75),
        is_below_25th_percentile: minutes.map(|m| m < stats.p25),
    }
}
