//! Proposal aggregation configuration.

use serde::{Deserialize, Serialize};

/// Priors, thresholds and quorum rules for proposal aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Quality prior α once enough quality-bearing reviews exist. Default: 0.1.
    pub quality_prior_alpha: f64,
    /// Quality prior β once enough quality-bearing reviews exist. Default: 0.1.
    pub quality_prior_beta: f64,
    /// Quality prior α for sparse proposals. Default: 0.5.
    pub sparse_prior_alpha: f64,
    /// Quality prior β for sparse proposals. Default: 0.5.
    pub sparse_prior_beta: f64,
    /// Below this many quality-bearing reviews the sparse prior applies. Default: 3.
    pub sparse_review_threshold: usize,
    /// Risk prior a (expected flag mass). Default: 1.0.
    pub risk_prior_a: f64,
    /// Risk prior b (expected counter mass). Default: 4.0.
    pub risk_prior_b: f64,
    /// Quality bar τ used for `pHigh = P(quality > τ)`. Default: 0.65.
    pub tau: f64,
    /// `pHigh` needed for HIGH. Default: 0.60.
    pub high_threshold: f64,
    /// `pHigh` below which a proposal is LOW. Default: 0.40.
    pub low_threshold: f64,
    /// `pLow` at or above which a proposal is LOW. Default: 0.50.
    pub risk_high_threshold: f64,
    /// `pLow` must stay below this for HIGH. Default: 0.25.
    pub risk_low_threshold: f64,
    /// Review count that satisfies quorum. Default: 3.
    pub quorum_min_reviews: usize,
    /// Quality-channel weight that satisfies quorum. Default: 2.0.
    pub quorum_min_weight: f64,
    /// Risk aversion λ in the ranking score. Default: 1.0.
    pub lambda: f64,
    /// Ranking score scale. Default: 10.0.
    pub ranking_scale: f64,
    /// Mass of the reported credible intervals. Default: 0.95.
    pub credible_level: f64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            quality_prior_alpha: 0.1,
            quality_prior_beta: 0.1,
            sparse_prior_alpha: 0.5,
            sparse_prior_beta: 0.5,
            sparse_review_threshold: 3,
            risk_prior_a: 1.0,
            risk_prior_b: 4.0,
            tau: 0.65,
            high_threshold: 0.60,
            low_threshold: 0.40,
            risk_high_threshold: 0.50,
            risk_low_threshold: 0.25,
            quorum_min_reviews: 3,
            quorum_min_weight: 2.0,
            lambda: 1.0,
            ranking_scale: 10.0,
            credible_level: 0.95,
        }
    }
}
