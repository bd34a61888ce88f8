//! Derive per-reviewer histories from a snapshot.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::{FxHashMap, FxHashSet};

use rex_core::config::FlagReputationConfig;
use rex_core::constants::normalize_criterion;
use rex_core::types::{AssessmentMode, ExpertiseBreakdown, Review};

use super::index::SnapshotIndex;
use crate::expertise::DomainExpertiseEstimator;

/// One normal-mode peer rating, normalized to `[0, 1]` per criterion.
#[derive(Debug, Clone, PartialEq)]
pub struct PeerRating<'s> {
    pub rater_id: &'s str,
    pub specificity: f64,
    pub clarity: f64,
    pub insightful: f64,
    /// Rater's domain expertise for the rated review's proposal.
    pub rater_expertise: f64,
}

/// A reviewer's review together with the peer ratings it received.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessedReview<'s> {
    pub review_id: &'s str,
    pub ratings: Vec<PeerRating<'s>>,
}

/// How peers voted on a low-quality flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlagOutcome {
    /// More agree than disagree votes; strength is the agree share.
    Confirmed { strength: f64 },
    Disputed,
    /// Tied or no votes.
    Unresolved,
}

impl FlagOutcome {
    pub fn from_votes(agree: usize, disagree: usize) -> Self {
        if agree > disagree {
            Self::Confirmed {
                strength: agree as f64 / (agree + disagree) as f64,
            }
        } else if disagree > agree {
            Self::Disputed
        } else {
            Self::Unresolved
        }
    }
}

/// A low-quality flag the reviewer raised.
#[derive(Debug, Clone, PartialEq)]
pub struct RaisedFlag<'s> {
    pub review_id: &'s str,
    /// Flagging review's expertise total.
    pub expertise: f64,
    /// Flagging review's confidence.
    pub confidence: f64,
    pub outcome: FlagOutcome,
}

/// A review on a consensus low-quality proposal: a chance to flag.
#[derive(Debug, Clone, PartialEq)]
pub struct MissOpportunity<'s> {
    pub review_id: &'s str,
    pub expertise: f64,
    pub confidence: f64,
    pub missed: bool,
}

/// Everything the reputation estimator reads about one reviewer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReviewerHistory<'s> {
    pub reviewer_id: &'s str,
    pub assessed_reviews: Vec<AssessedReview<'s>>,
    pub flags: Vec<RaisedFlag<'s>>,
    pub opportunities: Vec<MissOpportunity<'s>>,
    /// Per-review expertise totals, for profile expertise.
    pub expertise_totals: Vec<f64>,
}

/// Builds reviewer histories from an indexed snapshot.
pub struct HistoryBuilder<'a, 's> {
    index: &'a SnapshotIndex<'s>,
    expertise: &'a FxHashMap<&'s str, ExpertiseBreakdown>,
    domain: DomainExpertiseEstimator<'a>,
    flag_config: &'a FlagReputationConfig,
}

impl<'a, 's> HistoryBuilder<'a, 's> {
    pub fn new(
        index: &'a SnapshotIndex<'s>,
        expertise: &'a FxHashMap<&'s str, ExpertiseBreakdown>,
        domain: DomainExpertiseEstimator<'a>,
        flag_config: &'a FlagReputationConfig,
    ) -> Self {
        Self {
            index,
            expertise,
            domain,
            flag_config,
        }
    }

    /// Proposals where enough reviewers flagged to call it low quality.
    pub fn consensus_low_quality(&self) -> FxHashSet<&'s str> {
        let min_reviews = self.flag_config.consensus_min_reviews.max(1);
        self.index
            .reviews_by_proposal
            .iter()
            .filter(|(_, reviews)| {
                let flagged = reviews.iter().filter(|r| r.is_low_quality_flag).count();
                let rate = flagged as f64 / reviews.len() as f64;
                reviews.len() >= min_reviews && rate >= self.flag_config.consensus_flag_rate
            })
            .map(|(proposal_id, _)| *proposal_id)
            .collect()
    }

    /// Histories for every reviewer with a profile or at least one review,
    /// ordered by reviewer id.
    pub fn build(&self) -> BTreeMap<&'s str, ReviewerHistory<'s>> {
        let consensus = self.consensus_low_quality();
        tracing::debug!(
            consensus_proposals = consensus.len(),
            "consensus low-quality proposals found"
        );

        let reviewer_ids: BTreeSet<&'s str> = self
            .index
            .profiles
            .keys()
            .chain(self.index.reviews_by_reviewer.keys())
            .copied()
            .collect();

        reviewer_ids
            .into_iter()
            .map(|id| (id, self.history_for(id, &consensus)))
            .collect()
    }

    fn history_for(
        &self,
        reviewer_id: &'s str,
        consensus: &FxHashSet<&'s str>,
    ) -> ReviewerHistory<'s> {
        let mut history = ReviewerHistory {
            reviewer_id,
            ..Default::default()
        };
        let reviews = self
            .index
            .reviews_by_reviewer
            .get(reviewer_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        for &review in reviews {
            let Some(expertise) = self.expertise.get(review.id.as_str()).copied() else {
                tracing::warn!(review = %review.id, "review has no expertise estimate, skipped");
                continue;
            };
            history.expertise_totals.push(expertise.total);

            let ratings = self.peer_ratings(review);
            if !ratings.is_empty() {
                history.assessed_reviews.push(AssessedReview {
                    review_id: review.id.as_str(),
                    ratings,
                });
            }

            if review.is_low_quality_flag {
                history.flags.push(RaisedFlag {
                    review_id: review.id.as_str(),
                    expertise: expertise.total,
                    confidence: expertise.confidence,
                    outcome: self.flag_outcome(review),
                });
            }

            if consensus.contains(review.proposal_id.as_str()) {
                history.opportunities.push(MissOpportunity {
                    review_id: review.id.as_str(),
                    expertise: expertise.total,
                    confidence: expertise.confidence,
                    missed: !review.is_low_quality_flag,
                });
            }
        }
        history
    }

    fn peer_ratings(&self, review: &'s Review) -> Vec<PeerRating<'s>> {
        let tags = self.index.proposal_tags(review.proposal_id.as_str());
        self.index
            .assessments_of(review.id.as_str())
            .iter()
            .filter_map(|&assessment| match &assessment.mode {
                AssessmentMode::Normal { criteria_scores } => {
                    let Some([specificity, clarity, insightful]) = criteria_scores.complete()
                    else {
                        tracing::debug!(
                            assessment = assessment.id.as_str(),
                            "incomplete peer rating skipped"
                        );
                        return None;
                    };
                    let rater = self.index.profile(assessment.rater_id.as_str());
                    Some(PeerRating {
                        rater_id: assessment.rater_id.as_str(),
                        specificity: normalize_criterion(specificity),
                        clarity: normalize_criterion(clarity),
                        insightful: normalize_criterion(insightful),
                        rater_expertise: self.domain.rater_expertise(rater, tags),
                    })
                }
                AssessmentMode::LowQualityAgreement { .. } => None,
            })
            .collect()
    }

    fn flag_outcome(&self, review: &Review) -> FlagOutcome {
        let (agree, disagree) = self.index.assessments_of(review.id.as_str()).iter().fold(
            (0usize, 0usize),
            |(agree, disagree), assessment| match assessment.mode {
                AssessmentMode::LowQualityAgreement { agree: true } => (agree + 1, disagree),
                AssessmentMode::LowQualityAgreement { agree: false } => (agree, disagree + 1),
                AssessmentMode::Normal { .. } => (agree, disagree),
            },
        );
        FlagOutcome::from_votes(agree, disagree)
    }
}
