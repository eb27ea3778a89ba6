//! Descriptive statistics over wait-time values
//!
//! All functions take only present values; callers filter out missing minutes first.
//! Empty input yields `None` rather than `NaN`.

/// Arithmetic mean
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator), `None` below two values
#[must_use]
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Copy of `values` in ascending order
#[must_use]
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Quantile of already sorted values, interpolating linearly between ranks
///
/// `q` is clamped to `[0, 1]`. Position `q * (n - 1)` is used, so the median of an
/// even-length series is the mean of the two middle values.
#[must_use]
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let position = q.clamp(0.0, 1.0) * last as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Median of already sorted values
#[must_use]
pub fn median_sorted(sorted: &[f64]) -> Option<f64> {
    quantile_sorted(sorted, 0.5)
}
