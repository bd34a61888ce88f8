//! Scoring outputs: per-review REX results, per-reviewer reputation,
//! per-proposal aggregates.

use serde::{Deserialize, Serialize};

use super::identifiers::{ProposalId, ReviewId, ReviewerId};

/// Per-review expertise components and their weighted total, all in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertiseBreakdown {
    #[serde(rename = "self")]
    pub self_assessment: f64,
    pub admin_validation: f64,
    pub confidence: f64,
    pub thematic_match: f64,
    pub total: f64,
}

/// Which signals fed a reviewer's final reputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReputationComponent {
    Peer,
    Flag,
    /// Only missed-flag opportunities were observed.
    MissPenalty,
}

/// Flag-behaviour statistics behind a reviewer's flag reputation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagStats {
    pub flags_raised: usize,
    pub confirmed: usize,
    pub disputed: usize,
    /// Flags with no votes or tied votes; excluded from precision.
    pub unresolved: usize,
    pub weighted_confirmed: f64,
    pub weighted_total: f64,
    pub precision: f64,
    pub ramp_up: f64,
    pub opportunities: usize,
    pub missed: usize,
    pub miss_rate: f64,
    pub miss_penalty: f64,
}

/// A reviewer's reputation and profile-level REX.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewerReputation {
    pub reviewer_id: ReviewerId,
    /// Absent when none of the reviewer's reviews were peer-rated.
    pub peer_reputation: Option<f64>,
    /// Absent when the reviewer has no resolved flags.
    pub flag_reputation: Option<f64>,
    pub final_reputation: f64,
    /// Empty when the neutral default was used.
    pub components_used: Vec<ReputationComponent>,
    pub reviews_assessed: usize,
    pub flag_stats: FlagStats,
    /// Shrinkage of the reviewer's per-review expertise totals.
    pub profile_expertise: f64,
    /// REX of `final_reputation` and `profile_expertise`.
    pub profile_rex: f64,
}

/// REX, calibration and quality for one review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRexResult {
    pub review_id: ReviewId,
    pub reviewer_id: ReviewerId,
    pub proposal_id: ProposalId,
    pub expertise: ExpertiseBreakdown,
    pub reputation: f64,
    pub rex: f64,
    pub reliability: f64,
    pub effective_weight: f64,
    pub gm_exponent: f64,
    /// Absent when the review carries no criterion scores.
    pub quality_score: Option<f64>,
    pub is_low_quality_flag: bool,
}

/// Triage outcome for a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProposalStatus {
    High,
    Low,
    Grey,
}

impl ProposalStatus {
    pub fn name(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Low => "LOW",
            Self::Grey => "GREY",
        }
    }
}

/// Summary of a Beta posterior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosteriorSummary {
    pub alpha: f64,
    pub beta: f64,
    pub mean: f64,
    /// Equal-tailed credible interval `[lower, upper]`.
    pub credible_interval: [f64; 2],
}

/// Aggregated assessment of one proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalAggregate {
    pub proposal_id: ProposalId,
    pub review_count: usize,
    /// Reviews that contributed to the quality channel.
    pub quality_review_count: usize,
    pub total_weight: f64,
    /// Quality posterior mean; absent when no weight reached the quality
    /// channel.
    pub quality_score: Option<f64>,
    pub p_high: f64,
    pub p_low: f64,
    /// Weighted variance of review quality scores around the weighted mean.
    pub disagreement: f64,
    pub flag_mass: f64,
    pub counter_mass: f64,
    pub has_quorum: bool,
    pub status: ProposalStatus,
    pub ranking_score: f64,
    pub quality_posterior: PosteriorSummary,
    pub risk_posterior: PosteriorSummary,
}
