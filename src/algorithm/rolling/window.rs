//! Window functions over a single time series
//!
//! Time-based windows look at timestamps; count-based windows and lags look at
//! record positions. Missing values occupy positions but never enter a statistic.

use chrono::{Duration, NaiveDateTime};
use smallvec::SmallVec;

use crate::algorithm::statistics;

/// Mean of present values with timestamp in `[t - window, t]`, for each record
///
/// `timestamps` must be sorted ascending. Records sharing the current timestamp are
/// inside the window even when they come later in the series. A window holding
/// no present value yields `None`.
#[must_use]
pub fn rolling_time_mean(
    timestamps: &[NaiveDateTime],
    values: &[Option<f64>],
    window: Duration,
) -> Vec<Option<f64>> {
    debug_assert_eq!(timestamps.len(), values.len());

    let mut result = Vec::with_capacity(values.len());
    let mut lower = 0;
    let mut upper = 0;
    let mut sum = 0.0;
    let mut count = 0usize;

    for &current in timestamps {
        while upper < timestamps.len() && timestamps[upper] <= current {
            if let Some(v) = values[upper] {
                sum += v;
                count += 1;
            }
            upper += 1;
        }
        let start = current - window;
        while timestamps[lower] < start {
            if let Some(v) = values[lower] {
                sum -= v;
                count -= 1;
            }
            lower += 1;
        }

        result.push((count > 0).then(|| sum / count as f64));
    }

    result
}

/// `values[i] - values[i - lag]`, `None` when either side is missing
#[must_use]
pub fn lag_difference(values: &[Option<f64>], lag: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|idx| {
            let previous = values.get(idx.checked_sub(lag)?).copied().flatten()?;
            Some(values[idx]? - previous)
        })
        .collect()
}

/// Sign of a delta: 1, 0 or -1
#[must_use]
pub fn direction(delta: Option<f64>) -> Option<i8> {
    delta.map(|d| {
        if d > 0.0 {
            1
        } else if d < 0.0 {
            -1
        } else {
            0
        }
    })
}

/// Sample standard deviation over the trailing `window` positions, for each record
///
/// Fewer than two present values in the window yields `None`.
#[must_use]
pub fn rolling_count_std(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let window = window.max(1);
    (0..values.len())
        .map(|idx| {
            let start = (idx + 1).saturating_sub(window);
            let present: SmallVec<[f64; 8]> = values[start..=idx].iter().flatten().copied().collect();
            statistics::sample_std(&present)
        })
        .collect()
}
