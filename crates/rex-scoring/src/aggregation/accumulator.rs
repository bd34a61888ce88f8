//! Sufficient statistics of one proposal's reviews.
//!
//! The accumulator is the only place the two channels are summed. Batch
//! aggregation folds every review into one; incremental callers can keep
//! an accumulator per proposal and `merge` partial ones.

use rex_core::config::AggregationConfig;
use rex_core::types::{
    PosteriorSummary, ProposalAggregate, ProposalId, ProposalStatus, ReviewRexResult,
};

use crate::stats::{beta_cdf, clamp_unit, BetaPosterior, WeightedMoments};

/// What one review contributes to its proposal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewContribution {
    pub effective_weight: f64,
    pub expertise_total: f64,
    pub quality_score: Option<f64>,
    pub is_low_quality_flag: bool,
}

impl From<&ReviewRexResult> for ReviewContribution {
    fn from(result: &ReviewRexResult) -> Self {
        Self {
            effective_weight: result.effective_weight,
            expertise_total: result.expertise.total,
            quality_score: result.quality_score,
            is_low_quality_flag: result.is_low_quality_flag,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProposalAccumulator {
    review_count: usize,
    quality_review_count: usize,
    weighted_quality: f64,
    total_weight: f64,
    flag_mass: f64,
    counter_mass: f64,
    moments: WeightedMoments,
}

impl ProposalAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, review: &ReviewContribution) {
        self.review_count += 1;
        let weight = if review.effective_weight.is_finite() {
            review.effective_weight.max(0.0)
        } else {
            0.0
        };

        // Quality channel: only reviews that produced a quality score.
        if let Some(quality) = review.quality_score.filter(|q| q.is_finite()) {
            let quality = clamp_unit(quality);
            self.quality_review_count += 1;
            self.weighted_quality += weight * quality;
            self.total_weight += weight;
            self.moments.push(quality, weight);
        }

        // Risk channel: every review.
        if review.is_low_quality_flag {
            self.flag_mass += weight;
        }
        if review.expertise_total.is_finite() {
            self.counter_mass += review.expertise_total.max(0.0);
        }
    }

    pub fn merge(&mut self, other: &ProposalAccumulator) {
        self.review_count += other.review_count;
        self.quality_review_count += other.quality_review_count;
        self.weighted_quality += other.weighted_quality;
        self.total_weight += other.total_weight;
        self.flag_mass += other.flag_mass;
        self.counter_mass += other.counter_mass;
        self.moments.merge(&other.moments);
    }

    pub fn review_count(&self) -> usize {
        self.review_count
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Quality posterior parameters. The sparse prior applies while fewer
    /// than `sparse_review_threshold` reviews carry a quality score.
    pub fn quality_posterior(&self, config: &AggregationConfig) -> (f64, f64) {
        let (prior_alpha, prior_beta) = if self.quality_review_count < config.sparse_review_threshold
        {
            (config.sparse_prior_alpha, config.sparse_prior_beta)
        } else {
            (config.quality_prior_alpha, config.quality_prior_beta)
        };
        let failures = (self.total_weight - self.weighted_quality).max(0.0);
        (prior_alpha + self.weighted_quality, prior_beta + failures)
    }

    pub fn risk_posterior(&self, config: &AggregationConfig) -> (f64, f64) {
        (
            config.risk_prior_a + self.flag_mass,
            config.risk_prior_b + self.counter_mass,
        )
    }

    /// Classify and summarize.
    pub fn finish(&self, proposal_id: ProposalId, config: &AggregationConfig) -> ProposalAggregate {
        let (alpha, beta) = self.quality_posterior(config);
        let quality_mean = BetaPosterior::mean(alpha, beta);
        let quality_score = (self.total_weight > 0.0).then_some(quality_mean);
        let p_high = clamp_unit(1.0 - beta_cdf(config.tau, alpha, beta));

        let (risk_a, risk_b) = self.risk_posterior(config);
        let p_low = BetaPosterior::mean(risk_a, risk_b);

        let has_quorum = self.review_count >= config.quorum_min_reviews
            || self.total_weight >= config.quorum_min_weight;
        let status = classify(p_high, p_low, has_quorum, self.review_count, config);
        let ranking_score = ranking_score(quality_score, p_low, config);

        ProposalAggregate {
            proposal_id,
            review_count: self.review_count,
            quality_review_count: self.quality_review_count,
            total_weight: self.total_weight,
            quality_score,
            p_high,
            p_low,
            disagreement: self.moments.variance(),
            flag_mass: self.flag_mass,
            counter_mass: self.counter_mass,
            has_quorum,
            status,
            ranking_score,
            quality_posterior: summarize(alpha, beta, config.credible_level),
            risk_posterior: summarize(risk_a, risk_b, config.credible_level),
        }
    }
}

/// HIGH needs quorum; LOW never does, but a LOW driven by `p_high` needs at
/// least one review, since an empty proposal's `p_high` comes from the prior
/// alone.
pub fn classify(
    p_high: f64,
    p_low: f64,
    has_quorum: bool,
    review_count: usize,
    config: &AggregationConfig,
) -> ProposalStatus {
    if has_quorum && p_high >= config.high_threshold && p_low < config.risk_low_threshold {
        ProposalStatus::High
    } else if (review_count > 0 && p_high < config.low_threshold)
        || p_low >= config.risk_high_threshold
    {
        ProposalStatus::Low
    } else {
        ProposalStatus::Grey
    }
}

/// `scale · q · (1 − λ·pLow)`, floored at 0; 0 without a quality score.
pub fn ranking_score(quality_score: Option<f64>, p_low: f64, config: &AggregationConfig) -> f64 {
    match quality_score {
        Some(q) => (config.ranking_scale * q * (1.0 - config.lambda * p_low)).max(0.0),
        None => 0.0,
    }
}

fn summarize(alpha: f64, beta: f64, level: f64) -> PosteriorSummary {
    let (low, high) = BetaPosterior::credible_interval(alpha, beta, level);
    PosteriorSummary {
        alpha,
        beta,
        mean: BetaPosterior::mean(alpha, beta),
        credible_interval: [low, high],
    }
}
