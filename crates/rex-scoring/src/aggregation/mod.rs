//! Proposal aggregation: quality and risk Beta posteriors, status and
//! ranking.

pub mod accumulator;
pub mod aggregator;

pub use accumulator::{classify, ranking_score, ProposalAccumulator, ReviewContribution};
pub use aggregator::ProposalAggregator;
