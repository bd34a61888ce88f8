//! Flag-behaviour reputation.
//!
//! `flagReputation = precision × rampUp × missPenalty`. Each factor is in
//! `[0, 1]`, so a weak factor suppresses the whole.

use rex_core::config::FlagReputationConfig;
use rex_core::types::FlagStats;

use crate::history::{FlagOutcome, ReviewerHistory};
use crate::stats::clamp_unit;

pub struct FlagReputationEstimator<'a> {
    config: &'a FlagReputationConfig,
}

impl<'a> FlagReputationEstimator<'a> {
    pub fn new(config: &'a FlagReputationConfig) -> Self {
        Self { config }
    }

    /// `min(cap, expertise × confidence)`.
    pub fn flag_weight(&self, expertise: f64, confidence: f64) -> f64 {
        (expertise * confidence).min(self.config.weight_cap).max(0.0)
    }

    /// Beta posterior mean of flag precision.
    pub fn precision(&self, confirmed_weight: f64, total_weight: f64) -> f64 {
        let c = self.config;
        clamp_unit(
            (c.precision_alpha + confirmed_weight)
                / (c.precision_alpha + c.precision_beta + total_weight),
        )
    }

    /// `1 − exp(−totalWeight / threshold)`.
    pub fn ramp_up(&self, total_weight: f64) -> f64 {
        clamp_unit(1.0 - (-total_weight / self.config.ramp_up_threshold).exp())
    }

    /// Beta posterior mean of the weighted miss rate.
    pub fn miss_rate(&self, missed_weight: f64, total_weight: f64) -> f64 {
        let c = self.config;
        clamp_unit((c.miss_alpha + missed_weight) / (c.miss_alpha + c.miss_beta + total_weight))
    }

    /// `(1 − missRate)^γ`.
    pub fn miss_penalty(&self, miss_rate: f64) -> f64 {
        clamp_unit((1.0 - miss_rate).powf(self.config.miss_gamma))
    }

    /// Flag statistics and, when any flag was resolved by peer votes, the
    /// flag reputation.
    pub fn estimate(&self, history: &ReviewerHistory<'_>) -> (FlagStats, Option<f64>) {
        let mut stats = FlagStats {
            flags_raised: history.flags.len(),
            ..Default::default()
        };

        for flag in &history.flags {
            let weight = self.flag_weight(flag.expertise, flag.confidence);
            match flag.outcome {
                FlagOutcome::Confirmed { strength } => {
                    stats.confirmed += 1;
                    stats.weighted_confirmed += weight * strength;
                    stats.weighted_total += weight;
                }
                FlagOutcome::Disputed => {
                    stats.disputed += 1;
                    stats.weighted_total += weight;
                }
                FlagOutcome::Unresolved => stats.unresolved += 1,
            }
        }

        let (mut missed_weight, mut opportunity_weight) = (0.0, 0.0);
        for opportunity in &history.opportunities {
            let weight = opportunity.expertise * opportunity.confidence;
            opportunity_weight += weight;
            if opportunity.missed {
                stats.missed += 1;
                missed_weight += weight;
            }
        }
        stats.opportunities = history.opportunities.len();

        stats.precision = self.precision(stats.weighted_confirmed, stats.weighted_total);
        stats.ramp_up = self.ramp_up(stats.weighted_total);
        stats.miss_rate = self.miss_rate(missed_weight, opportunity_weight);
        stats.miss_penalty = self.miss_penalty(stats.miss_rate);

        let resolved = stats.confirmed + stats.disputed;
        let reputation =
            (resolved > 0).then(|| clamp_unit(stats.precision * stats.ramp_up * stats.miss_penalty));
        (stats, reputation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{MissOpportunity, RaisedFlag};

    fn flag(outcome: FlagOutcome) -> RaisedFlag<'static> {
        RaisedFlag {
            review_id: "r",
            expertise: 1.0,
            confidence: 1.0,
            outcome,
        }
    }

    fn opportunity(missed: bool) -> MissOpportunity<'static> {
        MissOpportunity {
            review_id: "r",
            expertise: 1.0,
            confidence: 1.0,
            missed,
        }
    }

    #[test]
    fn unresolved_flags_carry_no_reputation() {
        let config = FlagReputationConfig::default();
        let est = FlagReputationEstimator::new(&config);
        let history = ReviewerHistory {
            flags: vec![flag(FlagOutcome::Unresolved)],
            ..Default::default()
        };
        let (stats, rep) = est.estimate(&history);
        assert_eq!(rep, None);
        assert_eq!(stats.unresolved, 1);
        assert_eq!(stats.flags_raised, 1);
    }

    #[test]
    fn confirmed_flags_build_reputation() {
        let config = FlagReputationConfig::default();
        let est = FlagReputationEstimator::new(&config);
        let history = ReviewerHistory {
            flags: vec![flag(FlagOutcome::Confirmed { strength: 1.0 }); 3],
            ..Default::default()
        };
        let (stats, rep) = est.estimate(&history);
        // precision (1 + 3) / (2 + 3), ramp-up 1 − e^(−1), penalty 0.9²
        let expected = 0.8 * (1.0 - (-1.0_f64).exp()) * 0.81;
        assert!((rep.unwrap() - expected).abs() < 1e-12);
        assert!((stats.precision - 0.8).abs() < 1e-12);
    }

    #[test]
    fn disputed_flags_lower_precision() {
        let config = FlagReputationConfig::default();
        let est = FlagReputationEstimator::new(&config);
        let good = ReviewerHistory {
            flags: vec![flag(FlagOutcome::Confirmed { strength: 1.0 }); 2],
            ..Default::default()
        };
        let bad = ReviewerHistory {
            flags: vec![flag(FlagOutcome::Disputed); 2],
            ..Default::default()
        };
        let (_, good_rep) = est.estimate(&good);
        let (_, bad_rep) = est.estimate(&bad);
        assert!(good_rep.unwrap() > bad_rep.unwrap());
    }

    #[test]
    fn misses_raise_penalty() {
        let config = FlagReputationConfig::default();
        let est = FlagReputationEstimator::new(&config);
        let passive = ReviewerHistory {
            opportunities: vec![opportunity(true); 4],
            ..Default::default()
        };
        let (stats, rep) = est.estimate(&passive);
        assert_eq!(rep, None);
        assert_eq!(stats.missed, 4);
        // (0.5 + 4) / (5 + 4)
        assert!((stats.miss_rate - 0.5).abs() < 1e-12);
        assert!((stats.miss_penalty - 0.25).abs() < 1e-12);
    }

    #[test]
    fn flag_weight_is_capped() {
        let mut config = FlagReputationConfig::default();
        config.weight_cap = 0.4;
        let est = FlagReputationEstimator::new(&config);
        assert_eq!(est.flag_weight(0.9, 0.9), 0.4);
        assert!((est.flag_weight(0.5, 0.5) - 0.25).abs() < 1e-12);
    }
}
