//! Expertise estimation configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Configuration for per-review and profile-level expertise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpertiseConfig {
    /// Weight of the self-declared onboarding expertise. Default: 0.20.
    pub self_weight: f64,
    /// Weight of the admin validation score. Default: 0.50.
    pub admin_validation_weight: f64,
    /// Weight of the pre-review confidence (self expertise level). Default: 0.20.
    pub confidence_weight: f64,
    /// Weight of the binary thematic match. Default: 0.10.
    pub thematic_match_weight: f64,
    /// Admin validation used when a profile carries none. Default: 0.5.
    pub default_admin_validation: f64,
    /// Expertise level assumed for a missing declared area or a missing
    /// self expertise level on a review. Default: 3 (normalizes to 0.5).
    pub default_level: u8,
    /// Declared areas averaged into the self component.
    /// Default: `["technical", "product"]`.
    pub self_assessment_areas: Vec<String>,
    /// Prior for profile expertise shrinkage. Default: 0.5.
    pub profile_prior: f64,
    /// Prior weight for profile expertise shrinkage. Default: 2.0.
    pub profile_prior_weight: f64,
    /// Rater domain expertise (weighted-Jaccard variant).
    pub domain: DomainExpertiseConfig,
}

impl Default for ExpertiseConfig {
    fn default() -> Self {
        Self {
            self_weight: 0.20,
            admin_validation_weight: 0.50,
            confidence_weight: 0.20,
            thematic_match_weight: 0.10,
            default_admin_validation: 0.5,
            default_level: 3,
            self_assessment_areas: vec!["technical".to_string(), "product".to_string()],
            profile_prior: 0.5,
            profile_prior_weight: 2.0,
            domain: DomainExpertiseConfig::default(),
        }
    }
}

/// Configuration for estimating a peer rater's expertise in the domain of
/// the proposal behind the review they rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainExpertiseConfig {
    /// Weight of declared expertise in the primary domain. Default: 0.5.
    pub declared_weight: f64,
    /// Weight of interest/tag overlap. Default: 0.3.
    pub interest_weight: f64,
    /// Weight of general experience indicators. Default: 0.2.
    pub experience_weight: f64,
    /// Neutral expertise when nothing is known. Default: 0.5.
    pub default_expertise: f64,
    /// Discount applied to expertise in a related domain. Default: 0.7.
    pub related_domain_discount: f64,
    /// Interest score when interests and tags do not overlap. Default: 0.3.
    pub no_overlap_interest_score: f64,
    /// Weight of a tag missing from `tag_weights`. Default: 0.5.
    pub default_tag_weight: f64,
    /// Domain priority, used as the tie-break when inferring the primary
    /// domain. The first entry is the fallback for untagged proposals.
    pub domain_priority: Vec<String>,
    /// Proposal tag → expertise domains it indicates.
    pub tag_domains: BTreeMap<String, Vec<String>>,
    /// Proposal tag → how strongly it indicates expertise.
    pub tag_weights: BTreeMap<String, f64>,
    /// Domain → domains whose expertise partially transfers to it.
    pub related_domains: BTreeMap<String, Vec<String>>,
    /// Reputation points yielding the full experience bonus. Default: 1000.
    pub rep_points_scale: f64,
    /// Cap on the reputation-points bonus. Default: 0.3.
    pub rep_points_cap: f64,
    /// Bonus per previous funding round. Default: 0.05.
    pub per_fund_bonus: f64,
    /// Cap on the previous-funds bonus. Default: 0.2.
    pub fund_bonus_cap: f64,
    /// Bonus per month of account age. Default: 0.02.
    pub per_month_bonus: f64,
    /// Cap on the account-age bonus. Default: 0.2.
    pub account_age_cap: f64,
}

impl Default for DomainExpertiseConfig {
    fn default() -> Self {
        let tag_domains = [
            ("development_tools", &["technical"][..]),
            ("smart_contracts", &["technical"]),
            ("defi", &["technical", "product"]),
            ("identity_security", &["technical"]),
            ("interoperability", &["technical"]),
            ("gamefi", &["technical", "product"]),
            ("nft", &["technical", "product"]),
            ("governance", &["community"]),
            ("education", &["community"]),
            ("community_outreach", &["community"]),
            ("events_marketing", &["community"]),
            ("real_world_applications", &["community", "product"]),
            ("sustainability", &["product"]),
        ]
        .into_iter()
        .map(|(tag, domains)| {
            (
                tag.to_string(),
                domains.iter().map(|d| d.to_string()).collect(),
            )
        })
        .collect();

        let tag_weights = [
            ("governance", 0.9),
            ("education", 0.8),
            ("community_outreach", 0.8),
            ("development_tools", 1.0),
            ("identity_security", 0.9),
            ("defi", 1.0),
            ("real_world_applications", 0.7),
            ("events_marketing", 0.6),
            ("interoperability", 0.9),
            ("sustainability", 0.7),
            ("smart_contracts", 1.0),
            ("gamefi", 0.8),
            ("nft", 0.8),
        ]
        .into_iter()
        .map(|(tag, w)| (tag.to_string(), w))
        .collect();

        let related_domains = [
            ("technical", &["product"][..]),
            ("product", &["technical", "community"]),
            ("community", &["product"]),
        ]
        .into_iter()
        .map(|(domain, related)| {
            (
                domain.to_string(),
                related.iter().map(|d| d.to_string()).collect(),
            )
        })
        .collect();

        Self {
            declared_weight: 0.5,
            interest_weight: 0.3,
            experience_weight: 0.2,
            default_expertise: 0.5,
            related_domain_discount: 0.7,
            no_overlap_interest_score: 0.3,
            default_tag_weight: 0.5,
            domain_priority: vec![
                "technical".to_string(),
                "community".to_string(),
                "product".to_string(),
            ],
            tag_domains,
            tag_weights,
            related_domains,
            rep_points_scale: 1000.0,
            rep_points_cap: 0.3,
            per_fund_bonus: 0.05,
            fund_bonus_cap: 0.2,
            per_month_bonus: 0.02,
            account_age_cap: 0.2,
        }
    }
}

impl DomainExpertiseConfig {
    /// Weight of a proposal tag, falling back to `default_tag_weight`.
    pub fn tag_weight(&self, tag: &str) -> f64 {
        self.tag_weights
            .get(tag)
            .copied()
            .unwrap_or(self.default_tag_weight)
    }

    /// Whether expertise in `area` partially transfers to `domain`.
    pub fn is_related(&self, area: &str, domain: &str) -> bool {
        self.related_domains
            .get(area)
            .is_some_and(|related| related.iter().any(|d| d == domain))
    }

    /// Fallback domain for proposals without recognised tags.
    pub fn fallback_domain(&self) -> &str {
        self.domain_priority
            .first()
            .map(String::as_str)
            .unwrap_or("technical")
    }
}
