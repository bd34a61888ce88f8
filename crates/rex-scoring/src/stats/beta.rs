//! Beta distribution helpers.
//!
//! Classification uses a normal approximation of the Beta CDF with a
//! continuity correction. Reported credible intervals use the exact
//! inverse CDF from `statrs`.

use statrs::distribution::{Beta, ContinuousCDF};

/// Below this standard deviation the CDF is a step at the mean.
const STEP_STD_DEV: f64 = 0.01;

/// Abramowitz & Stegun 7.1.26 coefficients.
const ERF_A1: f64 = 0.254829592;
const ERF_A2: f64 = -0.284496736;
const ERF_A3: f64 = 1.421413741;
const ERF_A4: f64 = -1.453152027;
const ERF_A5: f64 = 1.061405429;
const ERF_P: f64 = 0.3275911;

/// Error function, 5-term rational approximation (max error ~1.5e-7).
pub fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + ERF_P * x);
    let poly = ((((ERF_A5 * t + ERF_A4) * t + ERF_A3) * t + ERF_A2) * t + ERF_A1) * t;
    sign * (1.0 - poly * (-x * x).exp())
}

/// Standard normal CDF.
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

/// `P(X ≤ x)` for `X ~ Beta(α, β)`, normal approximation.
///
/// `x ≤ 0` gives 0 and `x ≥ 1` gives 1 exactly. A near-degenerate
/// distribution (std < 0.01) is treated as a step at its mean.
pub fn beta_cdf(x: f64, alpha: f64, beta: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let sum = alpha + beta;
    if sum <= 0.0 || !sum.is_finite() {
        return x;
    }

    let mean = alpha / sum;
    let variance = alpha * beta / (sum * sum * (sum + 1.0));
    let std = variance.max(0.0).sqrt();
    if std < STEP_STD_DEV {
        return if x >= mean { 1.0 } else { 0.0 };
    }

    let z = (x - mean + 0.5 / sum) / std;
    normal_cdf(z).clamp(0.0, 1.0)
}

/// Summaries of a `Beta(α, β)` posterior.
pub struct BetaPosterior;

impl BetaPosterior {
    fn is_proper(alpha: f64, beta: f64) -> bool {
        alpha > 0.0 && beta > 0.0 && alpha.is_finite() && beta.is_finite()
    }

    /// Posterior mean `α / (α + β)`, 0.5 unless both parameters are
    /// positive and finite.
    pub fn mean(alpha: f64, beta: f64) -> f64 {
        if !Self::is_proper(alpha, beta) {
            return 0.5;
        }
        (alpha / (alpha + beta)).clamp(0.0, 1.0)
    }

    /// Equal-tailed interval holding `level` of the mass, from the exact
    /// inverse CDF.
    ///
    /// `(0, 1)` for improper parameters. A posterior narrow enough that
    /// [`beta_cdf`] treats it as a step collapses to its mean.
    pub fn credible_interval(alpha: f64, beta: f64, level: f64) -> (f64, f64) {
        if !Self::is_proper(alpha, beta) {
            return (0.0, 1.0);
        }
        let sum = alpha + beta;
        let std = (alpha * beta / (sum * sum * (sum + 1.0))).sqrt();
        if std < STEP_STD_DEV {
            let mean = Self::mean(alpha, beta);
            return (mean, mean);
        }

        let Ok(dist) = Beta::new(alpha, beta) else {
            return (0.0, 1.0);
        };
        let tail = ((1.0 - level) / 2.0).clamp(0.0, 0.5);
        let quantile = |p: f64, fallback: f64| {
            let q = dist.inverse_cdf(p);
            if q.is_finite() {
                q.clamp(0.0, 1.0)
            } else {
                fallback
            }
        };
        (quantile(tail, 0.0), quantile(1.0 - tail, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cdf_bounds_are_exact() {
        for (a, b) in [(0.1, 0.1), (1.0, 1.0), (3.1, 0.1), (50.0, 2.0)] {
            assert_eq!(beta_cdf(0.0, a, b), 0.0);
            assert_eq!(beta_cdf(1.0, a, b), 1.0);
        }
    }

    #[test]
    fn cdf_is_monotone_in_x() {
        let mut prev = 0.0;
        for i in 1..100 {
            let x = i as f64 / 100.0;
            let c = beta_cdf(x, 2.0, 3.0);
            assert!(c >= prev - 1e-12);
            prev = c;
        }
    }

    #[test]
    fn narrow_distribution_is_a_step() {
        // std of Beta(5000, 5000) is ~0.005
        assert_eq!(beta_cdf(0.49, 5000.0, 5000.0), 0.0);
        assert_eq!(beta_cdf(0.51, 5000.0, 5000.0), 1.0);
    }

    #[test]
    fn strong_positive_posterior_clears_tau() {
        // Three perfect reviews on the 0.1/0.1 prior.
        let p_high = 1.0 - beta_cdf(0.65, 3.1, 0.1);
        assert!(p_high > 0.9, "p_high = {p_high}");
    }

    #[test]
    fn erf_matches_known_values() {
        assert!(erf(0.0).abs() < 1e-9);
        assert!((erf(1.0) - 0.842_700_79).abs() < 1e-6);
        assert!((erf(-1.0) + 0.842_700_79).abs() < 1e-6);
    }

    #[test]
    fn posterior_mean_guards_degenerate() {
        assert_eq!(BetaPosterior::mean(0.0, 0.0), 0.5);
        assert_eq!(BetaPosterior::mean(f64::INFINITY, 1.0), 0.5);
        assert!((BetaPosterior::mean(3.0, 1.0) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn credible_interval_narrows_with_evidence() {
        let (l1, h1) = BetaPosterior::credible_interval(2.0, 2.0, 0.95);
        let (l2, h2) = BetaPosterior::credible_interval(20.0, 20.0, 0.95);
        assert!(h2 - l2 < h1 - l1);
        assert!(l1 < 0.5 && h1 > 0.5);
    }

    #[test]
    fn credible_interval_invalid_params() {
        assert_eq!(BetaPosterior::credible_interval(0.0, 1.0, 0.95), (0.0, 1.0));
        assert_eq!(BetaPosterior::credible_interval(1.0, f64::NAN, 0.95), (0.0, 1.0));
    }

    #[test]
    fn credible_interval_of_step_posterior_is_its_mean() {
        let (low, high) = BetaPosterior::credible_interval(6000.0, 2000.0, 0.95);
        assert_eq!(low, high);
        assert!((low - 0.75).abs() < 1e-12);
    }
}
