//! Geometric and generalized power means, plus mergeable weighted moments.

/// Weighted geometric mean of two values: `(a^α · b^β)^(1/(α+β))`.
///
/// Either input at or below zero yields 0.
pub fn geometric_mean(a: f64, b: f64, alpha: f64, beta: f64) -> f64 {
    if a <= 0.0 || b <= 0.0 {
        return 0.0;
    }
    let exponent_sum = alpha + beta;
    if exponent_sum <= 0.0 {
        return 0.0;
    }
    if alpha == beta {
        return (a * b).sqrt();
    }
    ((alpha * a.ln() + beta * b.ln()) / exponent_sum).exp()
}

/// Generalized power mean `(Σ wᵢ·vᵢ^p / Σ wᵢ)^(1/p)`.
///
/// Weights are normalized, so callers may pass unnormalized weights.
/// `p = 1` is the arithmetic mean; larger `p` leans toward the maximum.
/// `p = 0` is the weighted geometric mean. Returns `None` when there is no
/// positive weight.
pub fn generalized_power_mean(values: &[f64], weights: &[f64], exponent: f64) -> Option<f64> {
    let total_weight: f64 = weights.iter().take(values.len()).sum();
    if values.is_empty() || total_weight <= 0.0 || !total_weight.is_finite() {
        return None;
    }

    let pairs = values.iter().zip(weights.iter());
    if exponent == 0.0 {
        if values.iter().any(|v| *v <= 0.0) {
            return Some(0.0);
        }
        let log_mean: f64 = pairs.map(|(v, w)| w * v.ln()).sum::<f64>() / total_weight;
        return Some(log_mean.exp());
    }

    let power_sum: f64 = pairs
        .map(|(v, w)| w * v.max(0.0).powf(exponent))
        .sum::<f64>()
        / total_weight;
    let mean = power_sum.powf(1.0 / exponent);
    mean.is_finite().then_some(mean)
}

/// Running weighted mean and variance (West's algorithm).
///
/// `merge` combines two partial accumulations (Chan's parallel update), so
/// accumulation order does not affect the result beyond rounding. Identical
/// samples give exactly zero variance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedMoments {
    total_weight: f64,
    mean: f64,
    m2: f64,
}

impl WeightedMoments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one sample. Non-positive weights are ignored.
    pub fn push(&mut self, value: f64, weight: f64) {
        if weight <= 0.0 {
            return;
        }
        let total = self.total_weight + weight;
        let delta = value - self.mean;
        let mean = self.mean + delta * (weight / total);
        self.m2 += weight * delta * (value - mean);
        self.mean = mean;
        self.total_weight = total;
    }

    pub fn merge(&mut self, other: &WeightedMoments) {
        if other.total_weight <= 0.0 {
            return;
        }
        if self.total_weight <= 0.0 {
            *self = *other;
            return;
        }
        let total = self.total_weight + other.total_weight;
        let delta = other.mean - self.mean;
        self.m2 += other.m2 + delta * delta * self.total_weight * other.total_weight / total;
        self.mean += delta * (other.total_weight / total);
        self.total_weight = total;
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Weighted mean, `None` with no weight.
    pub fn mean(&self) -> Option<f64> {
        (self.total_weight > 0.0).then_some(self.mean)
    }

    /// Population variance with normalized weights `wᵢ / Σw`; 0 with no weight.
    pub fn variance(&self) -> f64 {
        if self.total_weight <= 0.0 {
            return 0.0;
        }
        (self.m2 / self.total_weight).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometric_mean_zero_input_is_zero() {
        assert_eq!(geometric_mean(0.0, 0.7, 1.0, 1.0), 0.0);
        assert_eq!(geometric_mean(0.7, 0.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn geometric_mean_of_equal_values_is_value() {
        for a in [0.1, 0.25, 0.5, 0.9, 1.0] {
            assert_eq!(geometric_mean(a, a, 1.0, 1.0), a);
        }
    }

    #[test]
    fn geometric_mean_respects_exponents() {
        // (0.25^2 · 1^1)^(1/3) = 0.25^(2/3)
        let v = geometric_mean(0.25, 1.0, 2.0, 1.0);
        assert!((v - 0.25_f64.powf(2.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn power_mean_exponent_one_is_arithmetic() {
        let v = generalized_power_mean(&[0.2, 0.8], &[0.5, 0.5], 1.0).unwrap();
        assert!((v - 0.5).abs() < 1e-12);
    }

    #[test]
    fn power_mean_grows_with_exponent() {
        let values = [0.2, 0.5, 0.9];
        let weights = [1.0 / 3.0; 3];
        let low = generalized_power_mean(&values, &weights, 0.6).unwrap();
        let high = generalized_power_mean(&values, &weights, 1.8).unwrap();
        assert!(high > low);
        assert!(high <= 0.9);
    }

    #[test]
    fn power_mean_empty_is_none() {
        assert_eq!(generalized_power_mean(&[], &[], 1.0), None);
        assert_eq!(generalized_power_mean(&[0.5], &[0.0], 1.0), None);
    }

    #[test]
    fn moments_identical_values_have_zero_variance() {
        let mut m = WeightedMoments::new();
        for w in [1.0, 0.4, 1.7] {
            m.push(0.7, w);
        }
        assert_eq!(m.variance(), 0.0);
        assert_eq!(m.mean(), Some(0.7));
    }

    #[test]
    fn moments_merge_matches_sequential() {
        let samples = [(0.2, 1.0), (0.9, 0.5), (0.4, 1.5), (0.6, 0.8)];
        let mut all = WeightedMoments::new();
        for (v, w) in samples {
            all.push(v, w);
        }
        let mut left = WeightedMoments::new();
        let mut right = WeightedMoments::new();
        for (v, w) in &samples[..2] {
            left.push(*v, *w);
        }
        for (v, w) in &samples[2..] {
            right.push(*v, *w);
        }
        left.merge(&right);
        assert!((left.variance() - all.variance()).abs() < 1e-12);
        assert!((left.mean().unwrap() - all.mean().unwrap()).abs() < 1e-12);
    }

    #[test]
    fn moments_variance_matches_definition() {
        let mut m = WeightedMoments::new();
        m.push(0.0, 1.0);
        m.push(1.0, 1.0);
        assert!((m.variance() - 0.25).abs() < 1e-12);
    }
}
