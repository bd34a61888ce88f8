//! Reviewer history derivation.
//!
//! Histories are derived wholesale from one immutable snapshot on every run:
//! peer ratings received, flags raised with their peer verdicts, and missed
//! chances to flag consensus low-quality proposals.

pub mod derive;
pub mod index;

pub use derive::{
    AssessedReview, FlagOutcome, HistoryBuilder, MissOpportunity, PeerRating, RaisedFlag,
    ReviewerHistory,
};
pub use index::SnapshotIndex;
