//! # rex-core
//!
//! Foundation crate for the REX scoring engine.
//! Defines the input/output records, identifiers, errors, config, tracing
//! setup and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::ScoringConfig;
pub use errors::{ConfigError, RexErrorCode, ScoringError};
pub use types::{
    AssessmentMode, Criterion, DeclaredExpertise, PeerAssessment, Proposal, ProposalAggregate,
    ProposalStatus, Review, ReviewRexResult, ReviewerProfile, ReviewerReputation,
    ScoringSnapshot,
};
