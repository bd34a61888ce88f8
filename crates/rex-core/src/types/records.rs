//! Input records: reviewer profiles, reviews, peer assessments, proposals.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::identifiers::{AssessmentId, ProposalId, ReviewId, ReviewerId};

/// Proposal evaluation criterion a review scores on `[-3, 3]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Relevance,
    Innovation,
    Impact,
    Feasibility,
    Team,
    Budget,
}

impl Criterion {
    pub const ALL: [Criterion; 6] = [
        Criterion::Relevance,
        Criterion::Innovation,
        Criterion::Impact,
        Criterion::Feasibility,
        Criterion::Team,
        Criterion::Budget,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::Innovation => "innovation",
            Self::Impact => "impact",
            Self::Feasibility => "feasibility",
            Self::Team => "team",
            Self::Budget => "budget",
        }
    }
}

/// A declared expertise area with a level in `[1, 5]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclaredExpertise {
    pub area: String,
    pub level: u8,
}

/// Reviewer profile as captured at onboarding and by administrators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewerProfile {
    pub id: ReviewerId,
    #[serde(default)]
    pub declared_expertise: Vec<DeclaredExpertise>,
    #[serde(default)]
    pub declared_interests: Vec<String>,
    /// Admin validation in `[0, 1]`; absent means not yet validated.
    #[serde(default)]
    pub admin_validation_score: Option<f64>,
    #[serde(default)]
    pub rep_points: Option<u32>,
    #[serde(default)]
    pub previous_funds: u32,
    #[serde(default)]
    pub account_age_months: Option<f64>,
}

impl ReviewerProfile {
    /// A profile with nothing declared.
    pub fn new(id: impl Into<ReviewerId>) -> Self {
        Self {
            id: id.into(),
            declared_expertise: Vec::new(),
            declared_interests: Vec::new(),
            admin_validation_score: None,
            rep_points: None,
            previous_funds: 0,
            account_age_months: None,
        }
    }

    /// Declared level for `area`, if any.
    pub fn declared_level(&self, area: &str) -> Option<u8> {
        self.declared_expertise
            .iter()
            .find(|e| e.area == area)
            .map(|e| e.level)
    }
}

/// A review of a proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub reviewer_id: ReviewerId,
    pub proposal_id: ProposalId,
    /// Scores in `[-3, 3]`. A review may omit criteria; null scores are
    /// dropped on input.
    #[serde(default, deserialize_with = "present_scores")]
    pub criteria_scores: BTreeMap<Criterion, i32>,
    /// Pre-review confidence level in `[1, 5]`.
    #[serde(default)]
    pub self_expertise_level: Option<u8>,
    #[serde(default)]
    pub is_low_quality_flag: bool,
    #[serde(default)]
    pub flag_reasons: Vec<String>,
    pub submitted_at: DateTime<Utc>,
}

fn present_scores<'de, D>(deserializer: D) -> Result<BTreeMap<Criterion, i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<Criterion, Option<i32>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(criterion, score)| score.map(|s| (criterion, s)))
        .collect())
}

/// Peer ratings of a review's quality, each in `[-3, 3]` when present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerCriteriaScores {
    #[serde(default)]
    pub specificity: Option<i32>,
    #[serde(default)]
    pub clarity: Option<i32>,
    #[serde(default)]
    pub insightful: Option<i32>,
}

impl PeerCriteriaScores {
    /// A rating with all three scores.
    pub fn new(specificity: i32, clarity: i32, insightful: i32) -> Self {
        Self {
            specificity: Some(specificity),
            clarity: Some(clarity),
            insightful: Some(insightful),
        }
    }

    /// `[specificity, clarity, insightful]`, or `None` unless all three are set.
    pub fn complete(&self) -> Option<[i32; 3]> {
        Some([self.specificity?, self.clarity?, self.insightful?])
    }
}

/// What a peer assessment carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AssessmentMode {
    /// Quality ratings of an unflagged review.
    Normal {
        #[serde(rename = "criteriaScores")]
        criteria_scores: PeerCriteriaScores,
    },
    /// A vote on whether a flagged review's low-quality flag is right.
    LowQualityAgreement { agree: bool },
}

/// A peer's assessment of another reviewer's review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerAssessment {
    pub id: AssessmentId,
    pub review_id: ReviewId,
    pub rater_id: ReviewerId,
    #[serde(flatten)]
    pub mode: AssessmentMode,
}

/// A proposal; only its thematic tags matter to scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: ProposalId,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub title: Option<String>,
}
