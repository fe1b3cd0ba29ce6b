/// Small statistics helpers shared by the analyzers
///
/// Every helper is total: empty input yields 0.0 instead of NaN, so callers
/// only need to handle the "not enough history" thresholds themselves.

use crate::domain::ScoreSample;

/// Arithmetic mean, summed front to back; 0.0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation; 0.0 for an empty slice
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let squared: Vec<f64> = values.iter().map(|v| (v - avg).powi(2)).collect();
    mean(&squared).sqrt()
}

/// Map spread onto a 0-100 steadiness scale: 100 - 2 * stddev, clamped
///
/// A flat series scores 100, a stddev of 50 or more scores 0.
pub fn steadiness(values: &[f64]) -> f64 {
    (100.0 - std_dev(values) * 2.0).clamp(0.0, 100.0)
}

/// The last `n` values, or all of them when there are fewer
pub fn last_n(values: &[f64], n: usize) -> &[f64] {
    &values[values.len().saturating_sub(n)..]
}

/// The `n` values immediately before the last `skip` values
pub fn before_last(values: &[f64], skip: usize, n: usize) -> &[f64] {
    let end = values.len().saturating_sub(skip);
    &values[end.saturating_sub(n)..end]
}

/// Scores rescaled to 0-100, order preserved
pub fn percents(samples: &[ScoreSample]) -> Vec<f64> {
    samples.iter().map(|s| s.percent()).collect()
}
