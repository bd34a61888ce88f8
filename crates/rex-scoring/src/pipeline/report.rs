//! Output of one pipeline run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use rex_core::types::{
    ProposalAggregate, ProposalId, ProposalStatus, ReviewId, ReviewRexResult, ReviewerId,
    ReviewerReputation,
};

/// Everything one run produces, keyed by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringReport {
    pub reviewers: BTreeMap<ReviewerId, ReviewerReputation>,
    pub reviews: BTreeMap<ReviewId, ReviewRexResult>,
    pub proposals: BTreeMap<ProposalId, ProposalAggregate>,
    /// Ranking score descending, proposal id ascending on ties.
    pub ranking: Vec<RankedProposal>,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedProposal {
    pub proposal_id: ProposalId,
    pub ranking_score: f64,
    pub status: ProposalStatus,
}

/// Run-level summary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub reviewer_count: usize,
    pub review_count: usize,
    pub proposal_count: usize,
    pub high_count: usize,
    pub low_count: usize,
    pub grey_count: usize,
    pub mean_rex: Option<f64>,
    pub mean_quality: Option<f64>,
}

impl Diagnostics {
    pub fn compute(
        reviewers: &BTreeMap<ReviewerId, ReviewerReputation>,
        reviews: &BTreeMap<ReviewId, ReviewRexResult>,
        proposals: &BTreeMap<ProposalId, ProposalAggregate>,
    ) -> Self {
        let mut diagnostics = Self {
            reviewer_count: reviewers.len(),
            review_count: reviews.len(),
            proposal_count: proposals.len(),
            mean_rex: mean(reviews.values().map(|r| r.rex)),
            mean_quality: mean(reviews.values().filter_map(|r| r.quality_score)),
            ..Default::default()
        };
        for aggregate in proposals.values() {
            match aggregate.status {
                ProposalStatus::High => diagnostics.high_count += 1,
                ProposalStatus::Low => diagnostics.low_count += 1,
                ProposalStatus::Grey => diagnostics.grey_count += 1,
            }
        }
        diagnostics
    }
}

/// Proposals ordered for display.
pub fn rank(proposals: &BTreeMap<ProposalId, ProposalAggregate>) -> Vec<RankedProposal> {
    let mut ranking: Vec<RankedProposal> = proposals
        .values()
        .map(|a| RankedProposal {
            proposal_id: a.proposal_id.clone(),
            ranking_score: a.ranking_score,
            status: a.status,
        })
        .collect();
    ranking.sort_by(|a, b| {
        b.ranking_score
            .total_cmp(&a.ranking_score)
            .then_with(|| a.proposal_id.cmp(&b.proposal_id))
    });
    ranking
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}
