//! Top-level REX configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AggregationConfig, ExpertiseConfig, ReputationConfig, RexConfig};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`REX_*`)
/// 3. Project config (`rex.toml` in the working root)
/// 4. User config (`~/.rex/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoringConfig {
    pub expertise: ExpertiseConfig,
    pub reputation: ReputationConfig,
    pub rex: RexConfig,
    pub aggregation: AggregationConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub tau: Option<f64>,
    pub high_threshold: Option<f64>,
    pub low_threshold: Option<f64>,
    pub lambda: Option<f64>,
}

impl ScoringConfig {
    /// Load configuration with layered resolution rooted at `root`.
    ///
    /// An explicit `config_path` replaces the project-level `rex.toml` and
    /// must exist.
    pub fn load(
        root: &Path,
        config_path: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut merged = toml::Table::new();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::read_table(&user_config_path) {
                    Ok(table) => merge_tables(&mut merged, table),
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(
                            path = %user_config_path.display(),
                            error = %e,
                            "ignoring unreadable user config"
                        );
                    }
                }
            }
        }

        // Layer 3: project config
        match config_path {
            Some(path) => merge_tables(&mut merged, Self::read_table(path)?),
            None => {
                let project_config_path = root.join(PROJECT_CONFIG_FILE);
                if project_config_path.exists() {
                    merge_tables(&mut merged, Self::read_table(&project_config_path)?);
                }
            }
        }

        let mut config: ScoringConfig =
            toml::Value::Table(merged)
                .try_into()
                .map_err(|e: toml::de::Error| ConfigError::ParseError {
                    path: "<merged>".to_string(),
                    message: e.to_string(),
                })?;

        // Layer 2: environment variables
        config.apply_env_overrides()?;

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            config.apply_cli_overrides(cli);
        }

        config.validate()?;
        tracing::debug!(tau = config.aggregation.tau, "scoring config loaded");
        Ok(config)
    }

    /// Load configuration from a TOML string. Missing keys take defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: ScoringConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
                path: "<string>".to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_expertise()?;
        self.validate_reputation()?;
        self.validate_rex()?;
        self.validate_aggregation()
    }

    fn validate_expertise(&self) -> Result<(), ConfigError> {
        let e = &self.expertise;
        for (field, w) in [
            ("expertise.self_weight", e.self_weight),
            ("expertise.admin_validation_weight", e.admin_validation_weight),
            ("expertise.confidence_weight", e.confidence_weight),
            ("expertise.thematic_match_weight", e.thematic_match_weight),
        ] {
            check_non_negative(field, w)?;
        }
        check_sums_to_one(
            "expertise.*_weight",
            e.self_weight + e.admin_validation_weight + e.confidence_weight + e.thematic_match_weight,
        )?;
        check_unit("expertise.default_admin_validation", e.default_admin_validation)?;
        if !(1..=5).contains(&e.default_level) {
            return Err(ConfigError::ValidationFailed {
                field: "expertise.default_level".to_string(),
                message: "must be between 1 and 5".to_string(),
            });
        }
        check_unit("expertise.profile_prior", e.profile_prior)?;
        check_positive("expertise.profile_prior_weight", e.profile_prior_weight)?;

        let d = &e.domain;
        for (field, w) in [
            ("expertise.domain.declared_weight", d.declared_weight),
            ("expertise.domain.interest_weight", d.interest_weight),
            ("expertise.domain.experience_weight", d.experience_weight),
        ] {
            check_non_negative(field, w)?;
        }
        check_sums_to_one(
            "expertise.domain.*_weight",
            d.declared_weight + d.interest_weight + d.experience_weight,
        )?;
        check_unit("expertise.domain.default_expertise", d.default_expertise)?;
        check_unit("expertise.domain.related_domain_discount", d.related_domain_discount)?;
        check_unit("expertise.domain.no_overlap_interest_score", d.no_overlap_interest_score)?;
        check_unit("expertise.domain.default_tag_weight", d.default_tag_weight)?;
        for (tag, w) in &d.tag_weights {
            check_unit(&format!("expertise.domain.tag_weights.{tag}"), *w)?;
        }
        check_positive("expertise.domain.rep_points_scale", d.rep_points_scale)?;
        Ok(())
    }

    fn validate_reputation(&self) -> Result<(), ConfigError> {
        let p = &self.reputation.peer;
        check_unit("reputation.peer.prior", p.prior)?;
        check_positive("reputation.peer.review_prior_weight", p.review_prior_weight)?;
        check_positive("reputation.peer.reviewer_prior_weight", p.reviewer_prior_weight)?;
        for (field, w) in [
            ("reputation.peer.specificity_weight", p.specificity_weight),
            ("reputation.peer.clarity_weight", p.clarity_weight),
            ("reputation.peer.insight_weight", p.insight_weight),
        ] {
            check_non_negative(field, w)?;
        }
        check_sums_to_one(
            "reputation.peer.*_weight",
            p.specificity_weight + p.clarity_weight + p.insight_weight,
        )?;
        let rw = &p.rater_weight;
        check_non_negative("reputation.peer.rater_weight.min", rw.min)?;
        if rw.min > rw.max {
            return Err(ConfigError::ValidationFailed {
                field: "reputation.peer.rater_weight".to_string(),
                message: "min must not exceed max".to_string(),
            });
        }

        let f = &self.reputation.flag;
        check_positive("reputation.flag.precision_alpha", f.precision_alpha)?;
        check_positive("reputation.flag.precision_beta", f.precision_beta)?;
        check_positive("reputation.flag.weight_cap", f.weight_cap)?;
        check_positive("reputation.flag.ramp_up_threshold", f.ramp_up_threshold)?;
        check_positive("reputation.flag.miss_alpha", f.miss_alpha)?;
        check_positive("reputation.flag.miss_beta", f.miss_beta)?;
        check_non_negative("reputation.flag.miss_gamma", f.miss_gamma)?;
        if !(f.consensus_flag_rate > 0.0 && f.consensus_flag_rate <= 1.0) {
            return Err(ConfigError::ValidationFailed {
                field: "reputation.flag.consensus_flag_rate".to_string(),
                message: "must be in (0.0, 1.0]".to_string(),
            });
        }

        let c = &self.reputation.combine;
        check_non_negative("reputation.combine.peer_weight", c.peer_weight)?;
        check_non_negative("reputation.combine.flag_weight", c.flag_weight)?;
        if c.peer_weight + c.flag_weight <= 0.0 {
            return Err(ConfigError::ValidationFailed {
                field: "reputation.combine".to_string(),
                message: "peer_weight and flag_weight must not both be zero".to_string(),
            });
        }
        check_unit("reputation.combine.miss_only_baseline", c.miss_only_baseline)?;
        check_unit("reputation.combine.default_reputation", c.default_reputation)
    }

    fn validate_rex(&self) -> Result<(), ConfigError> {
        let r = &self.rex;
        check_positive("rex.reputation_exponent", r.reputation_exponent)?;
        check_positive("rex.expertise_exponent", r.expertise_exponent)?;
        check_positive("rex.sigmoid_steepness", r.sigmoid_steepness)?;
        check_unit("rex.sigmoid_midpoint", r.sigmoid_midpoint)?;
        check_non_negative("rex.effective_weight_scale", r.effective_weight_scale)?;
        check_positive("rex.gm_exponent_base", r.gm_exponent_base)?;
        check_non_negative("rex.gm_exponent_slope", r.gm_exponent_slope)
    }

    fn validate_aggregation(&self) -> Result<(), ConfigError> {
        let a = &self.aggregation;
        check_positive("aggregation.quality_prior_alpha", a.quality_prior_alpha)?;
        check_positive("aggregation.quality_prior_beta", a.quality_prior_beta)?;
        check_positive("aggregation.sparse_prior_alpha", a.sparse_prior_alpha)?;
        check_positive("aggregation.sparse_prior_beta", a.sparse_prior_beta)?;
        check_positive("aggregation.risk_prior_a", a.risk_prior_a)?;
        check_positive("aggregation.risk_prior_b", a.risk_prior_b)?;
        check_open_unit("aggregation.tau", a.tau)?;
        check_unit("aggregation.high_threshold", a.high_threshold)?;
        check_unit("aggregation.low_threshold", a.low_threshold)?;
        if a.low_threshold > a.high_threshold {
            return Err(ConfigError::ValidationFailed {
                field: "aggregation.low_threshold".to_string(),
                message: "must not exceed high_threshold".to_string(),
            });
        }
        check_unit("aggregation.risk_high_threshold", a.risk_high_threshold)?;
        check_unit("aggregation.risk_low_threshold", a.risk_low_threshold)?;
        if a.risk_low_threshold > a.risk_high_threshold {
            return Err(ConfigError::ValidationFailed {
                field: "aggregation.risk_low_threshold".to_string(),
                message: "must not exceed risk_high_threshold".to_string(),
            });
        }
        check_non_negative("aggregation.quorum_min_weight", a.quorum_min_weight)?;
        check_non_negative("aggregation.lambda", a.lambda)?;
        check_positive("aggregation.ranking_scale", a.ranking_scale)?;
        check_open_unit("aggregation.credible_level", a.credible_level)
    }

    /// Returns the user config path: `~/.rex/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    fn read_table(path: &Path) -> Result<toml::Table, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        content
            .parse::<toml::Table>()
            .map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })
    }

    /// Apply environment variable overrides.
    /// Pattern: `REX_AGGREGATION_TAU`, `REX_REPUTATION_PEER_WEIGHT`, etc.
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        let overrides: [(&str, &mut f64); 8] = [
            ("REX_AGGREGATION_TAU", &mut self.aggregation.tau),
            ("REX_AGGREGATION_HIGH_THRESHOLD", &mut self.aggregation.high_threshold),
            ("REX_AGGREGATION_LOW_THRESHOLD", &mut self.aggregation.low_threshold),
            ("REX_AGGREGATION_LAMBDA", &mut self.aggregation.lambda),
            ("REX_REPUTATION_PEER_WEIGHT", &mut self.reputation.combine.peer_weight),
            ("REX_REPUTATION_FLAG_WEIGHT", &mut self.reputation.combine.flag_weight),
            ("REX_REPUTATION_MISS_GAMMA", &mut self.reputation.flag.miss_gamma),
            (
                "REX_EXPERTISE_DEFAULT_ADMIN_VALIDATION",
                &mut self.expertise.default_admin_validation,
            ),
        ];
        for (var, slot) in overrides {
            if let Ok(val) = std::env::var(var) {
                *slot = val.trim().parse::<f64>().map_err(|_| ConfigError::InvalidValue {
                    field: var.to_string(),
                    message: format!("expected a number, got {val:?}"),
                })?;
            }
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(v) = cli.tau {
            self.aggregation.tau = v;
        }
        if let Some(v) = cli.high_threshold {
            self.aggregation.high_threshold = v;
        }
        if let Some(v) = cli.low_threshold {
            self.aggregation.low_threshold = v;
        }
        if let Some(v) = cli.lambda {
            self.aggregation.lambda = v;
        }
    }
}

/// Deep-merge `overlay` into `base`. Nested tables merge key by key;
/// every other value in `overlay` replaces the one in `base`.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

fn check_unit(field: &str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: "must be between 0.0 and 1.0".to_string(),
        });
    }
    Ok(())
}

fn check_open_unit(field: &str, value: f64) -> Result<(), ConfigError> {
    if !(value > 0.0 && value < 1.0) {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: "must be strictly between 0.0 and 1.0".to_string(),
        });
    }
    Ok(())
}

fn check_positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: "must be greater than 0".to_string(),
        });
    }
    Ok(())
}

fn check_non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: "must be a non-negative number".to_string(),
        });
    }
    Ok(())
}

fn check_sums_to_one(field: &str, sum: f64) -> Result<(), ConfigError> {
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: format!("weights must sum to 1.0, got {sum}"),
        });
    }
    Ok(())
}

/// Returns the user-level REX config directory: `~/.rex/`.
fn dirs_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".rex"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
