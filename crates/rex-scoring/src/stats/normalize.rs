//! Normalization helpers.

/// Standard deviations below this are treated as zero.
const MIN_STD_DEV: f64 = 1e-12;

/// Population mean and standard deviation. `(0, 0)` for empty input.
pub fn mean_and_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.max(0.0).sqrt())
}

/// `(v − mean) / stddev`; 0 when `std` is effectively zero.
pub fn z_score(value: f64, mean: f64, std: f64) -> f64 {
    if std < MIN_STD_DEV {
        0.0
    } else {
        (value - mean) / std
    }
}

/// `(v − mean) / stddev` for each value; all zeros when the values do not vary.
pub fn z_score_normalize(values: &[f64]) -> Vec<f64> {
    let (mean, std) = mean_and_std(values);
    values.iter().map(|v| z_score(*v, mean, std)).collect()
}

/// Logistic function `1 / (1 + e^(−x))`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Clamp into `[0, 1]`, mapping NaN to 0.
pub fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}
