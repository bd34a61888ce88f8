//! Rater domain expertise.
//!
//! Used only to weight peer ratings. Unlike the binary thematic match of
//! per-review expertise, interest overlap here is a weighted-Jaccard score,
//! combined with declared domain levels and general experience.

use rex_core::config::DomainExpertiseConfig;
use rex_core::constants::normalize_level;
use rex_core::types::ReviewerProfile;

use super::tag_key;
use crate::stats::clamp_unit;

pub struct DomainExpertiseEstimator<'a> {
    config: &'a DomainExpertiseConfig,
}

impl<'a> DomainExpertiseEstimator<'a> {
    pub fn new(config: &'a DomainExpertiseConfig) -> Self {
        Self { config }
    }

    /// Domain whose tags carry the most weight. Ties go to the earlier entry
    /// of `domain_priority`; untagged proposals get the fallback domain.
    pub fn infer_primary_domain(&self, tags: &[String]) -> &'a str {
        let config = self.config;
        let mut best: Option<(&'a str, f64)> = None;
        for domain in &config.domain_priority {
            let score: f64 = tags
                .iter()
                .map(|tag| tag_key(tag))
                .filter(|tag| {
                    config
                        .tag_domains
                        .get(tag.as_str())
                        .is_some_and(|domains| domains.iter().any(|d| d == domain))
                })
                .map(|tag| config.tag_weight(&tag))
                .sum();
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((domain.as_str(), score));
            }
        }
        match best {
            Some((domain, score)) if score > 0.0 => domain,
            _ => config.fallback_domain(),
        }
    }

    /// Declared level in `domain`; else a discounted mean over related
    /// declared domains; else the default.
    pub fn declared_score(&self, profile: &ReviewerProfile, domain: &str) -> f64 {
        if profile.declared_expertise.is_empty() {
            return self.config.default_expertise;
        }
        if let Some(level) = profile.declared_level(domain) {
            return normalize_level(f64::from(level));
        }

        let related: Vec<f64> = profile
            .declared_expertise
            .iter()
            .filter(|e| self.config.is_related(&e.area, domain))
            .map(|e| f64::from(e.level))
            .collect();
        if related.is_empty() {
            return self.config.default_expertise;
        }
        let mean_level = related.iter().sum::<f64>() / related.len() as f64;
        normalize_level(mean_level) * self.config.related_domain_discount
    }

    /// Weighted overlap between declared interests and proposal tags,
    /// matched the same way as the thematic match.
    pub fn interest_score(&self, interests: &[String], tags: &[String]) -> f64 {
        if interests.is_empty() || tags.is_empty() {
            return self.config.default_expertise;
        }
        let tag_keys: Vec<String> = tags.iter().map(|t| tag_key(t)).collect();
        let weighted_matches: f64 = interests
            .iter()
            .map(|interest| tag_key(interest))
            .filter(|interest| tag_keys.contains(interest))
            .map(|interest| self.config.tag_weight(&interest))
            .sum();
        if weighted_matches <= 0.0 {
            return self.config.no_overlap_interest_score;
        }
        let max_possible = interests.len().max(tags.len()) as f64;
        (weighted_matches / max_possible).min(1.0)
    }

    /// General experience: reputation points, previous funds, account age.
    pub fn experience_score(&self, profile: &ReviewerProfile) -> f64 {
        let c = self.config;
        let mut score = c.default_expertise;
        if let Some(points) = profile.rep_points.filter(|p| *p > 0) {
            score += (f64::from(points) / c.rep_points_scale).min(c.rep_points_cap);
        }
        if profile.previous_funds > 0 {
            score += (f64::from(profile.previous_funds) * c.per_fund_bonus).min(c.fund_bonus_cap);
        }
        if let Some(months) = profile.account_age_months {
            score += (months.max(0.0) * c.per_month_bonus).min(c.account_age_cap);
        }
        score.min(1.0)
    }

    /// Expertise of a peer rater for a review of a proposal tagged `tags`.
    pub fn rater_expertise(&self, profile: Option<&ReviewerProfile>, tags: &[String]) -> f64 {
        let Some(profile) = profile else {
            return self.config.default_expertise;
        };
        let domain = self.infer_primary_domain(tags);
        let c = self.config;
        clamp_unit(
            c.declared_weight * self.declared_score(profile, domain)
                + c.interest_weight * self.interest_score(&profile.declared_interests, tags)
                + c.experience_weight * self.experience_score(profile),
        )
    }
}

#[cfg(test)]
mod tests {
    use rex_core::types::DeclaredExpertise;

    use super::*;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    fn declared(area: &str, level: u8) -> DeclaredExpertise {
        DeclaredExpertise {
            area: area.to_string(),
            level,
        }
    }

    #[test]
    fn primary_domain_follows_tag_weights() {
        let config = DomainExpertiseConfig::default();
        let est = DomainExpertiseEstimator::new(&config);
        assert_eq!(est.infer_primary_domain(&tags(&["governance", "education"])), "community");
        assert_eq!(est.infer_primary_domain(&tags(&["smart_contracts"])), "technical");
        assert_eq!(est.infer_primary_domain(&tags(&["sustainability"])), "product");
    }

    #[test]
    fn primary_domain_falls_back_to_technical() {
        let config = DomainExpertiseConfig::default();
        let est = DomainExpertiseEstimator::new(&config);
        assert_eq!(est.infer_primary_domain(&[]), "technical");
        assert_eq!(est.infer_primary_domain(&tags(&["unknown_tag"])), "technical");
    }

    #[test]
    fn primary_domain_tie_prefers_priority_order() {
        let config = DomainExpertiseConfig::default();
        let est = DomainExpertiseEstimator::new(&config);
        // defi feeds technical and product equally
        assert_eq!(est.infer_primary_domain(&tags(&["defi"])), "technical");
    }

    #[test]
    fn related_domain_is_discounted() {
        let config = DomainExpertiseConfig::default();
        let est = DomainExpertiseEstimator::new(&config);
        let mut profile = ReviewerProfile::new("u1");
        profile.declared_expertise = vec![declared("product", 5)];

        assert_eq!(est.declared_score(&profile, "product"), 1.0);
        assert!((est.declared_score(&profile, "technical") - 0.7).abs() < 1e-12);

        profile.declared_expertise = vec![declared("community", 5)];
        assert_eq!(est.declared_score(&profile, "technical"), 0.5);
    }

    #[test]
    fn interest_score_weights_overlap() {
        let config = DomainExpertiseConfig::default();
        let est = DomainExpertiseEstimator::new(&config);
        assert_eq!(est.interest_score(&[], &tags(&["defi"])), 0.5);
        assert_eq!(est.interest_score(&tags(&["nft"]), &tags(&["defi"])), 0.3);
        // defi (1.0) over max(2, 1)
        assert_eq!(est.interest_score(&tags(&["defi", "nft"]), &tags(&["defi"])), 0.5);
    }

    #[test]
    fn tags_match_ignoring_case_and_whitespace() {
        let config = DomainExpertiseConfig::default();
        let est = DomainExpertiseEstimator::new(&config);
        assert_eq!(est.interest_score(&tags(&[" DeFi", "nft"]), &tags(&["defi "])), 0.5);
        assert_eq!(est.infer_primary_domain(&tags(&["Governance"])), "community");

        let interests = tags(&[" DeFi"]);
        let proposal = tags(&["defi "]);
        assert_eq!(crate::expertise::thematic_match(&interests, &proposal), 1.0);
    }

    #[test]
    fn experience_bonuses_are_capped() {
        let config = DomainExpertiseConfig::default();
        let est = DomainExpertiseEstimator::new(&config);
        let mut profile = ReviewerProfile::new("u1");
        assert_eq!(est.experience_score(&profile), 0.5);

        profile.rep_points = Some(5000);
        profile.previous_funds = 10;
        profile.account_age_months = Some(48.0);
        assert_eq!(est.experience_score(&profile), 1.0);

        profile.rep_points = Some(100);
        profile.previous_funds = 1;
        profile.account_age_months = None;
        assert!((est.experience_score(&profile) - 0.65).abs() < 1e-12);
    }

    #[test]
    fn unknown_rater_gets_default() {
        let config = DomainExpertiseConfig::default();
        let est = DomainExpertiseEstimator::new(&config);
        assert_eq!(est.rater_expertise(None, &tags(&["defi"])), 0.5);
    }
}
