//! Core types shared across the REX workspace.

pub mod identifiers;
pub mod outputs;
pub mod records;
pub mod snapshot;

pub use identifiers::{AssessmentId, ProposalId, ReviewId, ReviewerId};
pub use outputs::{
    ExpertiseBreakdown, FlagStats, PosteriorSummary, ProposalAggregate, ProposalStatus,
    ReputationComponent, ReviewRexResult, ReviewerReputation,
};
pub use records::{
    AssessmentMode, Criterion, DeclaredExpertise, PeerAssessment, PeerCriteriaScores, Proposal,
    Review, ReviewerProfile,
};
pub use snapshot::ScoringSnapshot;
