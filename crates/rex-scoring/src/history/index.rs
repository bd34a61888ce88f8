//! Lookup tables over one snapshot.

use rustc_hash::FxHashMap;

use rex_core::types::{PeerAssessment, Proposal, Review, ReviewerProfile, ScoringSnapshot};

/// Borrowed indexes into a `ScoringSnapshot`, keyed by raw id.
///
/// Grouped vectors keep snapshot order, so everything derived from them is
/// deterministic.
pub struct SnapshotIndex<'s> {
    pub profiles: FxHashMap<&'s str, &'s ReviewerProfile>,
    pub proposals: FxHashMap<&'s str, &'s Proposal>,
    pub reviews: FxHashMap<&'s str, &'s Review>,
    pub reviews_by_reviewer: FxHashMap<&'s str, Vec<&'s Review>>,
    pub reviews_by_proposal: FxHashMap<&'s str, Vec<&'s Review>>,
    pub assessments_by_review: FxHashMap<&'s str, Vec<&'s PeerAssessment>>,
}

impl<'s> SnapshotIndex<'s> {
    pub fn build(snapshot: &'s ScoringSnapshot) -> Self {
        let profiles = snapshot
            .reviewers
            .iter()
            .map(|p| (p.id.as_str(), p))
            .collect();
        let proposals = snapshot
            .proposals
            .iter()
            .map(|p| (p.id.as_str(), p))
            .collect();

        let mut reviews = FxHashMap::default();
        let mut reviews_by_reviewer: FxHashMap<&str, Vec<&Review>> = FxHashMap::default();
        let mut reviews_by_proposal: FxHashMap<&str, Vec<&Review>> = FxHashMap::default();
        for review in &snapshot.reviews {
            reviews.insert(review.id.as_str(), review);
            reviews_by_reviewer
                .entry(review.reviewer_id.as_str())
                .or_default()
                .push(review);
            reviews_by_proposal
                .entry(review.proposal_id.as_str())
                .or_default()
                .push(review);
        }

        let mut assessments_by_review: FxHashMap<&str, Vec<&PeerAssessment>> =
            FxHashMap::default();
        for assessment in &snapshot.peer_assessments {
            if !reviews.contains_key(assessment.review_id.as_str()) {
                tracing::debug!(
                    assessment = %assessment.id,
                    review = %assessment.review_id,
                    "assessment of unknown review ignored"
                );
                continue;
            }
            assessments_by_review
                .entry(assessment.review_id.as_str())
                .or_default()
                .push(assessment);
        }

        Self {
            profiles,
            proposals,
            reviews,
            reviews_by_reviewer,
            reviews_by_proposal,
            assessments_by_review,
        }
    }

    pub fn profile(&self, reviewer_id: &str) -> Option<&'s ReviewerProfile> {
        self.profiles.get(reviewer_id).copied()
    }

    /// Tags of a proposal; empty for unknown proposals.
    pub fn proposal_tags(&self, proposal_id: &str) -> &'s [String] {
        self.proposals
            .get(proposal_id)
            .map(|p| p.tags.as_slice())
            .unwrap_or(&[])
    }

    pub fn assessments_of(&self, review_id: &str) -> &[&'s PeerAssessment] {
        self.assessments_by_review
            .get(review_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
