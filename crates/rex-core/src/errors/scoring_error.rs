//! Scoring errors.
//!
//! Missing data, thin quorum and degenerate distributions never surface
//! here: they resolve to priors or neutral values. These variants are
//! data-integrity faults that need operator attention.

use super::error_code::{self, RexErrorCode};
use super::ConfigError;

/// Errors raised by the scoring engine.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("{field} out of range: {value} not in [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} is not a finite number")]
    NonFinite { field: String },

    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl RexErrorCode for ScoringError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => error_code::OUT_OF_RANGE,
            Self::NonFinite { .. } => error_code::NON_FINITE,
            Self::DuplicateId { .. } => error_code::DUPLICATE_ID,
            Self::Config(e) => e.error_code(),
        }
    }
}

/// Convenience alias for scoring results.
pub type ScoringResult<T> = Result<T, ScoringError>;

impl ScoringError {
    /// Reject NaN/infinite values, then values outside `[min, max]`.
    pub fn check_range(field: &str, value: f64, min: f64, max: f64) -> ScoringResult<()> {
        if !value.is_finite() {
            return Err(Self::NonFinite {
                field: field.to_string(),
            });
        }
        if value < min || value > max {
            return Err(Self::OutOfRange {
                field: field.to_string(),
                value,
                min,
                max,
            });
        }
        Ok(())
    }
}
