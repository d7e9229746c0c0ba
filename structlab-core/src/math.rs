//! Small numeric helpers shared across analysis modules.

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Least-squares slope of `values` against their sequence index `0..n`.
///
/// Returns 0.0 for fewer than two values. The numerator is summed over
/// mirrored index pairs, so a flat series yields exactly 0.0 rather than
/// rounding noise.
pub fn linear_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let x_mean = (n - 1) as f64 / 2.0;

    let mut numerator = 0.0;
    for k in 0..n / 2 {
        let dx = k as f64 - x_mean;
        numerator += dx * (values[k] - values[n - 1 - k]);
    }

    let denominator: f64 = (0..n).map(|i| (i as f64 - x_mean).powi(2)).sum();
    numerator / denominator
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
