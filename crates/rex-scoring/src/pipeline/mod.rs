//! End-to-end scoring over one snapshot.

pub mod report;
pub mod runner;

pub use report::{rank, Diagnostics, RankedProposal, ScoringReport};
pub use runner::ScoringPipeline;
