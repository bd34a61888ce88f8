//! Reputation estimation.
//!
//! Reputation is recomputed wholesale from reviewer histories on every run.
//! Peer and flag components are estimated independently, then combined.

pub mod combine;
pub mod flag;
pub mod peer;

use std::collections::BTreeMap;

use rayon::prelude::*;

use rex_core::config::ReputationConfig;
use rex_core::types::{FlagStats, ReputationComponent};

use crate::history::ReviewerHistory;

pub use combine::final_reputation;
pub use flag::FlagReputationEstimator;
pub use peer::{PeerReputationEstimator, RaterCalibration};

/// Reputation of one reviewer, before profile expertise is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ReputationEstimate {
    pub peer: Option<f64>,
    pub flag: Option<f64>,
    pub final_reputation: f64,
    pub components_used: Vec<ReputationComponent>,
    pub reviews_assessed: usize,
    pub flag_stats: FlagStats,
}

/// Batch reputation estimator over a set of reviewer histories.
pub struct ReputationEstimator<'a> {
    config: &'a ReputationConfig,
    calibration: RaterCalibration,
}

impl<'a> ReputationEstimator<'a> {
    /// Build the estimator, calibrating raters over every rating in
    /// `histories`.
    pub fn new(config: &'a ReputationConfig, histories: &BTreeMap<&str, ReviewerHistory<'_>>) -> Self {
        let calibration =
            RaterCalibration::from_histories(histories.values(), config.peer.min_ratings_for_debias);
        tracing::debug!(
            calibrated_raters = calibration.calibrated_raters(),
            "rater calibration built"
        );
        Self {
            config,
            calibration,
        }
    }

    /// Reputation of one reviewer.
    pub fn estimate(&self, history: &ReviewerHistory<'_>) -> ReputationEstimate {
        let peer = PeerReputationEstimator::new(&self.config.peer, &self.calibration)
            .estimate(history);
        let (flag_stats, flag) = FlagReputationEstimator::new(&self.config.flag).estimate(history);
        let (final_reputation, components_used) =
            final_reputation(peer, flag, &flag_stats, &self.config.combine);

        tracing::debug!(
            reviewer = history.reviewer_id,
            peer = ?peer,
            flag = ?flag,
            final_reputation,
            "reputation estimated"
        );

        ReputationEstimate {
            peer,
            flag,
            final_reputation,
            components_used,
            reviews_assessed: history.assessed_reviews.len(),
            flag_stats,
        }
    }

    /// Reputation of every reviewer, computed in parallel.
    pub fn estimate_all<'s>(
        &self,
        histories: &BTreeMap<&'s str, ReviewerHistory<'s>>,
    ) -> BTreeMap<&'s str, ReputationEstimate> {
        histories
            .par_iter()
            .map(|(id, history)| (*id, self.estimate(history)))
            .collect()
    }
}
