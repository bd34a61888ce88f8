//! # rex-scoring
//!
//! REX scoring engine: expertise → reputation → REX calibration → review
//! quality → proposal aggregation (quality and risk Beta posteriors).
//! Every run is a full, deterministic recomputation over one snapshot.

pub mod aggregation;
pub mod expertise;
pub mod history;
pub mod pipeline;
pub mod quality;
pub mod reputation;
pub mod rex;
pub mod stats;

pub use aggregation::{ProposalAccumulator, ProposalAggregator};
pub use expertise::{DomainExpertiseEstimator, ExpertiseEstimator};
pub use pipeline::{ScoringPipeline, ScoringReport};
pub use quality::ReviewQualityScorer;
pub use reputation::ReputationEstimator;
pub use rex::{RexCalculator, RexScore};
