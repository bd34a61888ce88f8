//! The input snapshot one scoring run operates on.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::records::{AssessmentMode, PeerAssessment, Proposal, Review, ReviewerProfile};
use crate::constants::{
    MAX_CRITERION_SCORE, MAX_EXPERTISE_LEVEL, MIN_CRITERION_SCORE, MIN_EXPERTISE_LEVEL,
};
use crate::errors::{ScoringError, ScoringResult};

/// Everything one scoring run reads. Scoring never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringSnapshot {
    #[serde(default)]
    pub reviewers: Vec<ReviewerProfile>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub peer_assessments: Vec<PeerAssessment>,
    #[serde(default)]
    pub proposals: Vec<Proposal>,
}

impl ScoringSnapshot {
    /// Reject malformed input: duplicate ids, scores or levels out of range,
    /// non-finite numbers.
    ///
    /// Dangling references (a review by an unknown reviewer, an assessment of
    /// an unknown review) are not errors; scoring falls back to defaults.
    pub fn validate(&self) -> ScoringResult<()> {
        unique("reviewer", self.reviewers.iter().map(|r| r.id.as_str()))?;
        unique("review", self.reviews.iter().map(|r| r.id.as_str()))?;
        unique(
            "assessment",
            self.peer_assessments.iter().map(|a| a.id.as_str()),
        )?;
        unique("proposal", self.proposals.iter().map(|p| p.id.as_str()))?;

        for profile in &self.reviewers {
            for declared in &profile.declared_expertise {
                check_level(
                    &format!("reviewer.{}.declared_expertise.{}", profile.id, declared.area),
                    declared.level,
                )?;
            }
            if let Some(score) = profile.admin_validation_score {
                ScoringError::check_range(
                    &format!("reviewer.{}.admin_validation_score", profile.id),
                    score,
                    0.0,
                    1.0,
                )?;
            }
            if let Some(months) = profile.account_age_months {
                ScoringError::check_range(
                    &format!("reviewer.{}.account_age_months", profile.id),
                    months,
                    0.0,
                    f64::MAX,
                )?;
            }
        }

        for review in &self.reviews {
            for (criterion, score) in &review.criteria_scores {
                check_score(
                    &format!("review.{}.criteria.{}", review.id, criterion.name()),
                    *score,
                )?;
            }
            if let Some(level) = review.self_expertise_level {
                check_level(&format!("review.{}.self_expertise_level", review.id), level)?;
            }
        }

        for assessment in &self.peer_assessments {
            if let AssessmentMode::Normal { criteria_scores } = &assessment.mode {
                let prefix = format!("assessment.{}", assessment.id);
                for (name, score) in [
                    ("specificity", criteria_scores.specificity),
                    ("clarity", criteria_scores.clarity),
                    ("insightful", criteria_scores.insightful),
                ] {
                    if let Some(score) = score {
                        check_score(&format!("{prefix}.{name}"), score)?;
                    }
                }
            }
        }

        Ok(())
    }
}

fn unique<'a>(kind: &'static str, ids: impl Iterator<Item = &'a str>) -> ScoringResult<()> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ScoringError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn check_score(field: &str, score: i32) -> ScoringResult<()> {
    ScoringError::check_range(
        field,
        f64::from(score),
        f64::from(MIN_CRITERION_SCORE),
        f64::from(MAX_CRITERION_SCORE),
    )
}

fn check_level(field: &str, level: u8) -> ScoringResult<()> {
    ScoringError::check_range(
        field,
        f64::from(level),
        f64::from(MIN_EXPERTISE_LEVEL),
        f64::from(MAX_EXPERTISE_LEVEL),
    )
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Utc;

    use super::*;
    use crate::errors::RexErrorCode;
    use crate::types::{Criterion, PeerCriteriaScores};

    fn review(id: &str, team: i32) -> Review {
        Review {
            id: id.into(),
            reviewer_id: "u1".into(),
            proposal_id: "p1".into(),
            criteria_scores: BTreeMap::from([(Criterion::Team, team)]),
            self_expertise_level: Some(3),
            is_low_quality_flag: false,
            flag_reasons: Vec::new(),
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn empty_snapshot_is_valid() {
        assert!(ScoringSnapshot::default().validate().is_ok());
    }

    #[test]
    fn out_of_range_criterion_is_rejected() {
        let snapshot = ScoringSnapshot {
            reviews: vec![review("r1", 4)],
            ..Default::default()
        };
        let err = snapshot.validate().unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE");
    }

    #[test]
    fn incomplete_peer_rating_is_valid_but_present_scores_are_checked() {
        let rating = |id: &str, specificity: Option<i32>| PeerAssessment {
            id: id.into(),
            review_id: "r1".into(),
            rater_id: "u2".into(),
            mode: AssessmentMode::Normal {
                criteria_scores: PeerCriteriaScores {
                    specificity,
                    clarity: None,
                    insightful: Some(1),
                },
            },
        };
        let ok = ScoringSnapshot {
            peer_assessments: vec![rating("a1", Some(2))],
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        let bad = ScoringSnapshot {
            peer_assessments: vec![rating("a1", Some(-5))],
            ..Default::default()
        };
        assert_eq!(bad.validate().unwrap_err().error_code(), "OUT_OF_RANGE");
    }

    #[test]
    fn duplicate_review_id_is_rejected() {
        let snapshot = ScoringSnapshot {
            reviews: vec![review("r1", 1), review("r1", 2)],
            ..Default::default()
        };
        assert!(matches!(
            snapshot.validate(),
            Err(ScoringError::DuplicateId { kind: "review", .. })
        ));
    }

    #[test]
    fn nan_admin_validation_is_rejected() {
        let mut profile = ReviewerProfile::new("u1");
        profile.admin_validation_score = Some(f64::NAN);
        let snapshot = ScoringSnapshot {
            reviewers: vec![profile],
            ..Default::default()
        };
        assert!(matches!(
            snapshot.validate(),
            Err(ScoringError::NonFinite { .. })
        ));
    }
}
