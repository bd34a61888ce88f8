//! Reputation estimation configuration.

use serde::{Deserialize, Serialize};

/// Configuration for peer-based and flag-based reputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReputationConfig {
    pub peer: PeerRatingConfig,
    pub flag: FlagReputationConfig,
    pub combine: FinalReputationConfig,
}

/// Peer-rating reputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeerRatingConfig {
    /// Neutral prior both shrinkage steps pull toward. Default: 0.5.
    pub prior: f64,
    /// Prior weight when shrinking one review's weighted peer score. Default: 1.0.
    pub review_prior_weight: f64,
    /// Prior weight when shrinking across a reviewer's reviews. Default: 2.0.
    pub reviewer_prior_weight: f64,
    /// Weight of the specificity criterion. Default: 1/3.
    pub specificity_weight: f64,
    /// Weight of the clarity criterion. Default: 1/3.
    pub clarity_weight: f64,
    /// Weight of the insightfulness criterion. Default: 1/3.
    pub insight_weight: f64,
    /// Ratings a rater must have given before their scores are z-debiased.
    /// Default: 3.
    pub min_ratings_for_debias: usize,
    /// Rater weight: `clamp(base + multiplier × raterExpertise, min, max)`.
    pub rater_weight: RaterWeightConfig,
}

impl Default for PeerRatingConfig {
    fn default() -> Self {
        Self {
            prior: 0.5,
            review_prior_weight: 1.0,
            reviewer_prior_weight: 2.0,
            specificity_weight: 1.0 / 3.0,
            clarity_weight: 1.0 / 3.0,
            insight_weight: 1.0 / 3.0,
            min_ratings_for_debias: 3,
            rater_weight: RaterWeightConfig::default(),
        }
    }
}

/// Clamp bounds for peer rater weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaterWeightConfig {
    /// Default: 0.5.
    pub base: f64,
    /// Default: 1.0.
    pub expertise_multiplier: f64,
    /// Default: 0.5.
    pub min: f64,
    /// Default: 1.5.
    pub max: f64,
}

impl Default for RaterWeightConfig {
    fn default() -> Self {
        Self {
            base: 0.5,
            expertise_multiplier: 1.0,
            min: 0.5,
            max: 1.5,
        }
    }
}

/// Flag-behaviour reputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagReputationConfig {
    /// Beta prior α for flag precision. Default: 1.0.
    pub precision_alpha: f64,
    /// Beta prior β for flag precision. Default: 1.0.
    pub precision_beta: f64,
    /// Cap on a single flag's weight. Default: 1.0.
    pub weight_cap: f64,
    /// Flag weight at which ramp-up reaches `1 − 1/e`. Default: 3.0.
    pub ramp_up_threshold: f64,
    /// Beta prior α for the miss rate. Default: 0.5.
    pub miss_alpha: f64,
    /// Beta prior β for the miss rate. Default: 4.5.
    pub miss_beta: f64,
    /// Miss penalty exponent γ in `(1 − missRate)^γ`. Default: 2.0.
    pub miss_gamma: f64,
    /// Reviews a proposal needs before its flags can form a consensus. Default: 3.
    pub consensus_min_reviews: usize,
    /// Share of flagged reviews that marks a consensus low-quality proposal.
    /// Default: 0.60.
    pub consensus_flag_rate: f64,
}

impl Default for FlagReputationConfig {
    fn default() -> Self {
        Self {
            precision_alpha: 1.0,
            precision_beta: 1.0,
            weight_cap: 1.0,
            ramp_up_threshold: 3.0,
            miss_alpha: 0.5,
            miss_beta: 4.5,
            miss_gamma: 2.0,
            consensus_min_reviews: 3,
            consensus_flag_rate: 0.60,
        }
    }
}

/// Combination of the peer and flag components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinalReputationConfig {
    /// Weight of peer reputation. Default: 0.7.
    pub peer_weight: f64,
    /// Weight of flag reputation. Default: 0.3.
    pub flag_weight: f64,
    /// Baseline for reviewers whose only signal is missed flags, scaled by
    /// the miss penalty. Default: 0.25.
    pub miss_only_baseline: f64,
    /// Reputation of a reviewer with no signal at all. Default: 0.5.
    pub default_reputation: f64,
}

impl Default for FinalReputationConfig {
    fn default() -> Self {
        Self {
            peer_weight: 0.7,
            flag_weight: 0.3,
            miss_only_baseline: 0.25,
            default_reputation: 0.5,
        }
    }
}
