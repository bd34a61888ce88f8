//! Error handling for REX.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod scoring_error;

pub use config_error::ConfigError;
pub use error_code::RexErrorCode;
pub use scoring_error::{ScoringError, ScoringResult};
