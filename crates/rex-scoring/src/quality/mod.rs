//! Review quality scoring.

pub mod scorer;

pub use scorer::ReviewQualityScorer;
