//! Per-review and profile-level expertise.

use rex_core::config::ExpertiseConfig;
use rex_core::constants::normalize_level;
use rex_core::types::{ExpertiseBreakdown, Review, ReviewerProfile};

use super::tag_key;
use crate::stats::{bayesian_shrinkage, clamp_unit};

/// Estimates how much a reviewer knows about the proposal behind one review.
pub struct ExpertiseEstimator<'a> {
    config: &'a ExpertiseConfig,
}

impl<'a> ExpertiseEstimator<'a> {
    pub fn new(config: &'a ExpertiseConfig) -> Self {
        Self { config }
    }

    /// Mean normalized onboarding level over the self-assessment areas.
    /// Undeclared areas count at the default level.
    pub fn self_assessment(&self, profile: Option<&ReviewerProfile>) -> f64 {
        let areas = &self.config.self_assessment_areas;
        if areas.is_empty() {
            return normalize_level(f64::from(self.config.default_level));
        }
        let total: f64 = areas
            .iter()
            .map(|area| {
                profile
                    .and_then(|p| p.declared_level(area))
                    .unwrap_or(self.config.default_level)
            })
            .map(f64::from)
            .sum();
        normalize_level(total / areas.len() as f64)
    }

    pub fn admin_validation(&self, profile: Option<&ReviewerProfile>) -> f64 {
        profile
            .and_then(|p| p.admin_validation_score)
            .map(clamp_unit)
            .unwrap_or(self.config.default_admin_validation)
    }

    /// Normalized pre-review confidence.
    pub fn confidence(&self, review: &Review) -> f64 {
        let level = review
            .self_expertise_level
            .unwrap_or(self.config.default_level);
        normalize_level(f64::from(level))
    }

    /// Expertise breakdown for one review.
    pub fn review_expertise(
        &self,
        review: &Review,
        profile: Option<&ReviewerProfile>,
        proposal_tags: &[String],
    ) -> ExpertiseBreakdown {
        let self_assessment = self.self_assessment(profile);
        let admin_validation = self.admin_validation(profile);
        let confidence = self.confidence(review);
        let interests = profile.map(|p| p.declared_interests.as_slice()).unwrap_or(&[]);
        let thematic_match = thematic_match(interests, proposal_tags);

        let total = clamp_unit(
            self.config.self_weight * self_assessment
                + self.config.admin_validation_weight * admin_validation
                + self.config.confidence_weight * confidence
                + self.config.thematic_match_weight * thematic_match,
        );

        ExpertiseBreakdown {
            self_assessment,
            admin_validation,
            confidence,
            thematic_match,
            total,
        }
    }

    /// Profile expertise: the reviewer's per-review totals shrunk toward the
    /// profile prior.
    pub fn profile_expertise(&self, review_totals: &[f64]) -> f64 {
        clamp_unit(bayesian_shrinkage(
            review_totals,
            self.config.profile_prior,
            self.config.profile_prior_weight,
        ))
    }
}

/// 1 when any declared interest appears among the proposal tags, else 0.
/// Comparison ignores ASCII case and surrounding whitespace.
pub fn thematic_match(interests: &[String], tags: &[String]) -> f64 {
    let tag_keys: Vec<String> = tags.iter().map(|t| tag_key(t)).collect();
    let hit = interests
        .iter()
        .any(|interest| tag_keys.contains(&tag_key(interest)));
    if hit {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Utc;
    use rex_core::types::DeclaredExpertise;

    use super::*;

    fn review(level: Option<u8>) -> Review {
        Review {
            id: "r1".into(),
            reviewer_id: "u1".into(),
            proposal_id: "p1".into(),
            criteria_scores: BTreeMap::new(),
            self_expertise_level: level,
            is_low_quality_flag: false,
            flag_reasons: Vec::new(),
            submitted_at: Utc::now(),
        }
    }

    fn profile() -> ReviewerProfile {
        let mut p = ReviewerProfile::new("u1");
        p.declared_expertise = vec![
            DeclaredExpertise {
                area: "technical".to_string(),
                level: 5,
            },
            DeclaredExpertise {
                area: "product".to_string(),
                level: 3,
            },
        ];
        p.declared_interests = vec!["DeFi".to_string()];
        p.admin_validation_score = Some(0.8);
        p
    }

    #[test]
    fn full_profile_breakdown() {
        let config = ExpertiseConfig::default();
        let estimator = ExpertiseEstimator::new(&config);
        let tags = vec!["defi".to_string(), "nft".to_string()];
        let b = estimator.review_expertise(&review(Some(4)), Some(&profile()), &tags);

        assert_eq!(b.self_assessment, 0.75); // avg(5, 3) = 4
        assert_eq!(b.admin_validation, 0.8);
        assert_eq!(b.confidence, 0.75);
        assert_eq!(b.thematic_match, 1.0);
        let expected = 0.2 * 0.75 + 0.5 * 0.8 + 0.2 * 0.75 + 0.1 * 1.0;
        assert!((b.total - expected).abs() < 1e-12);
    }

    #[test]
    fn missing_profile_uses_documented_defaults() {
        let config = ExpertiseConfig::default();
        let estimator = ExpertiseEstimator::new(&config);
        let b = estimator.review_expertise(&review(None), None, &[]);

        assert_eq!(b.self_assessment, 0.5);
        assert_eq!(b.admin_validation, 0.5);
        assert_eq!(b.confidence, 0.5);
        assert_eq!(b.thematic_match, 0.0);
        assert!((b.total - 0.45).abs() < 1e-12);
    }

    #[test]
    fn thematic_match_is_binary() {
        let interests = vec!["governance".to_string(), "education".to_string()];
        assert_eq!(thematic_match(&interests, &["education".to_string()]), 1.0);
        assert_eq!(thematic_match(&interests, &["defi".to_string()]), 0.0);
        assert_eq!(thematic_match(&[], &["defi".to_string()]), 0.0);
    }

    #[test]
    fn profile_expertise_shrinks_toward_prior() {
        let config = ExpertiseConfig::default();
        let estimator = ExpertiseEstimator::new(&config);
        assert_eq!(estimator.profile_expertise(&[]), 0.5);
        // (0.5·2 + 0.9 + 0.9) / 4
        assert!((estimator.profile_expertise(&[0.9, 0.9]) - 0.7).abs() < 1e-12);
    }
}
