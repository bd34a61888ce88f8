//! Bayesian shrinkage toward a prior.
//!
//! `(prior·priorWeight + Σsamples) / (priorWeight + n)`: with few samples the
//! estimate stays near the prior, with many it approaches the sample mean.

/// Shrink the mean of `samples` toward `prior`.
///
/// No samples yields `prior`; a zero `prior_weight` yields the plain mean.
pub fn bayesian_shrinkage(samples: &[f64], prior: f64, prior_weight: f64) -> f64 {
    if samples.is_empty() {
        return prior;
    }
    weighted_shrinkage(samples.iter().sum(), samples.len() as f64, prior, prior_weight)
}

/// Shrink a weighted sum toward `prior`: `(prior·pw + Σw·x) / (pw + Σw)`.
///
/// Returns `prior` when the denominator vanishes.
pub fn weighted_shrinkage(
    weighted_sum: f64,
    total_weight: f64,
    prior: f64,
    prior_weight: f64,
) -> f64 {
    let denom = prior_weight + total_weight;
    if denom <= 0.0 || !denom.is_finite() {
        return prior;
    }
    let value = (prior * prior_weight + weighted_sum) / denom;
    if value.is_finite() {
        value
    } else {
        prior
    }
}
