/// REX engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lowest raw criterion score a reviewer or peer rater can give.
pub const MIN_CRITERION_SCORE: i32 = -3;

/// Highest raw criterion score a reviewer or peer rater can give.
pub const MAX_CRITERION_SCORE: i32 = 3;

/// Lowest declared or self-assessed expertise level.
pub const MIN_EXPERTISE_LEVEL: u8 = 1;

/// Highest declared or self-assessed expertise level.
pub const MAX_EXPERTISE_LEVEL: u8 = 5;

/// Maximum number of proposal criteria a review can carry.
pub const MAX_REVIEW_CRITERIA: usize = 6;

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = "rex.toml";

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "REX_LOG";

/// Map a raw criterion score in `[-3, 3]` onto `[0, 1]`.
pub fn normalize_criterion(score: i32) -> f64 {
    let span = (MAX_CRITERION_SCORE - MIN_CRITERION_SCORE) as f64;
    (score - MIN_CRITERION_SCORE) as f64 / span
}

/// Map an expertise level in `[1, 5]` onto `[0, 1]`.
pub fn normalize_level(level: f64) -> f64 {
    let span = (MAX_EXPERTISE_LEVEL - MIN_EXPERTISE_LEVEL) as f64;
    ((level - MIN_EXPERTISE_LEVEL as f64) / span).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criterion_normalization_covers_unit_interval() {
        assert_eq!(normalize_criterion(-3), 0.0);
        assert_eq!(normalize_criterion(0), 0.5);
        assert_eq!(normalize_criterion(3), 1.0);
    }

    #[test]
    fn level_normalization_covers_unit_interval() {
        assert_eq!(normalize_level(1.0), 0.0);
        assert_eq!(normalize_level(3.0), 0.5);
        assert_eq!(normalize_level(5.0), 1.0);
    }
}
