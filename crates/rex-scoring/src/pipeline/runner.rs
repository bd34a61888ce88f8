//! ScoringPipeline: one snapshot in, one report out.
//!
//! Phases run in dependency order; each phase is parallel across its
//! entities and collects into id-ordered maps, so output never depends on
//! thread scheduling.

use std::collections::BTreeMap;
use std::time::Instant;

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::{info, info_span, instrument};

use rex_core::config::ScoringConfig;
use rex_core::errors::ScoringResult;
use rex_core::tracing::spans;
use rex_core::types::{
    ExpertiseBreakdown, ProposalAggregate, ProposalId, ReviewId, ReviewRexResult, ReviewerId,
    ReviewerReputation, ScoringSnapshot,
};

use crate::aggregation::ProposalAggregator;
use crate::expertise::{DomainExpertiseEstimator, ExpertiseEstimator};
use crate::history::{HistoryBuilder, SnapshotIndex};
use crate::quality::ReviewQualityScorer;
use crate::reputation::ReputationEstimator;
use crate::rex::RexCalculator;

use super::report::{rank, Diagnostics, ScoringReport};

/// Full recomputation over an immutable snapshot.
pub struct ScoringPipeline {
    config: ScoringConfig,
}

impl ScoringPipeline {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Validate the snapshot and score it.
    ///
    /// Only data-integrity faults fail the run; sparse or missing data
    /// degrades to priors and neutral values.
    #[instrument(
        name = "rex.pipeline",
        skip_all,
        fields(
            reviewers = snapshot.reviewers.len(),
            reviews = snapshot.reviews.len(),
            proposals = snapshot.proposals.len(),
            assessments = snapshot.peer_assessments.len(),
        )
    )]
    pub fn run(&self, snapshot: &ScoringSnapshot) -> ScoringResult<ScoringReport> {
        let start = Instant::now();

        snapshot.validate()?;
        let index = SnapshotIndex::build(snapshot);

        let expertise = self.expertise_phase(snapshot, &index);
        let reviewers = self.reputation_phase(&index, snapshot, &expertise);
        let reviews = self.review_phase(snapshot, &expertise, &reviewers);
        let proposals = self.aggregation_phase(snapshot, &reviews);

        let reviews: BTreeMap<ReviewId, ReviewRexResult> = reviews
            .into_iter()
            .map(|r| (r.review_id.clone(), r))
            .collect();
        let ranking = rank(&proposals);
        let diagnostics = Diagnostics::compute(&reviewers, &reviews, &proposals);

        info!(
            high = diagnostics.high_count,
            low = diagnostics.low_count,
            grey = diagnostics.grey_count,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "scoring run complete"
        );

        Ok(ScoringReport {
            reviewers,
            reviews,
            proposals,
            ranking,
            diagnostics,
        })
    }

    /// Expertise per review, in snapshot order.
    fn expertise_phase(
        &self,
        snapshot: &ScoringSnapshot,
        index: &SnapshotIndex<'_>,
    ) -> Vec<ExpertiseBreakdown> {
        let _span = info_span!(spans::EXPERTISE).entered();
        let estimator = ExpertiseEstimator::new(&self.config.expertise);
        snapshot
            .reviews
            .par_iter()
            .map(|review| {
                estimator.review_expertise(
                    review,
                    index.profile(review.reviewer_id.as_str()),
                    index.proposal_tags(review.proposal_id.as_str()),
                )
            })
            .collect()
    }

    fn reputation_phase(
        &self,
        index: &SnapshotIndex<'_>,
        snapshot: &ScoringSnapshot,
        expertise: &[ExpertiseBreakdown],
    ) -> BTreeMap<ReviewerId, ReviewerReputation> {
        let _span = info_span!(spans::REPUTATION).entered();
        let start = Instant::now();

        let by_review: FxHashMap<&str, ExpertiseBreakdown> = snapshot
            .reviews
            .iter()
            .zip(expertise)
            .map(|(review, breakdown)| (review.id.as_str(), *breakdown))
            .collect();
        let domain = DomainExpertiseEstimator::new(&self.config.expertise.domain);
        let histories =
            HistoryBuilder::new(index, &by_review, domain, &self.config.reputation.flag).build();

        let estimator = ReputationEstimator::new(&self.config.reputation, &histories);
        let estimates = estimator.estimate_all(&histories);

        let expertise_estimator = ExpertiseEstimator::new(&self.config.expertise);
        let rex = RexCalculator::new(&self.config.rex);
        let reviewers: BTreeMap<ReviewerId, ReviewerReputation> = histories
            .iter()
            .filter_map(|(id, history)| {
                let estimate = estimates.get(id)?;
                let profile_expertise =
                    expertise_estimator.profile_expertise(&history.expertise_totals);
                Some((
                    ReviewerId::from(*id),
                    ReviewerReputation {
                        reviewer_id: ReviewerId::from(*id),
                        peer_reputation: estimate.peer,
                        flag_reputation: estimate.flag,
                        final_reputation: estimate.final_reputation,
                        components_used: estimate.components_used.clone(),
                        reviews_assessed: estimate.reviews_assessed,
                        flag_stats: estimate.flag_stats,
                        profile_expertise,
                        profile_rex: rex.profile_rex(estimate.final_reputation, profile_expertise),
                    },
                ))
            })
            .collect();

        info!(
            reviewers = reviewers.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "reputations computed"
        );
        reviewers
    }

    /// REX and quality per review, in snapshot order.
    fn review_phase(
        &self,
        snapshot: &ScoringSnapshot,
        expertise: &[ExpertiseBreakdown],
        reviewers: &BTreeMap<ReviewerId, ReviewerReputation>,
    ) -> Vec<ReviewRexResult> {
        let _span = info_span!(spans::REVIEW_SCORING).entered();
        let rex = RexCalculator::new(&self.config.rex);
        let quality = ReviewQualityScorer::new();
        let default_reputation = self.config.reputation.combine.default_reputation;

        snapshot
            .reviews
            .par_iter()
            .zip(expertise.par_iter())
            .map(|(review, breakdown)| {
                let reputation = reviewers
                    .get(&review.reviewer_id)
                    .map_or(default_reputation, |r| r.final_reputation);
                let score = rex.score(reputation, breakdown.total);
                ReviewRexResult {
                    review_id: review.id.clone(),
                    reviewer_id: review.reviewer_id.clone(),
                    proposal_id: review.proposal_id.clone(),
                    expertise: *breakdown,
                    reputation,
                    rex: score.rex,
                    reliability: score.reliability,
                    effective_weight: score.effective_weight,
                    gm_exponent: score.gm_exponent,
                    quality_score: quality.score(&review.criteria_scores, score.gm_exponent),
                    is_low_quality_flag: review.is_low_quality_flag,
                }
            })
            .collect()
    }

    fn aggregation_phase(
        &self,
        snapshot: &ScoringSnapshot,
        reviews: &[ReviewRexResult],
    ) -> BTreeMap<ProposalId, ProposalAggregate> {
        let _span = info_span!(spans::AGGREGATION).entered();
        let start = Instant::now();
        let proposals = ProposalAggregator::new(&self.config.aggregation)
            .aggregate_all(snapshot.proposals.iter().map(|p| &p.id), reviews);
        info!(
            proposals = proposals.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "proposals aggregated"
        );
        proposals
    }
}
