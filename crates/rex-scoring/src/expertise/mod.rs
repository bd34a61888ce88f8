//! Expertise estimation.
//!
//! Two distinct notions live here: per-review expertise (with a binary
//! thematic match) feeds REX, while rater domain expertise (weighted
//! interest overlap) only weights peer ratings.

pub mod domain;
pub mod review;

pub use domain::DomainExpertiseEstimator;
pub use review::{thematic_match, ExpertiseEstimator};

/// Tags and interests compare trimmed and ASCII-lowercased. Config tag
/// tables are keyed by this form.
pub(crate) fn tag_key(tag: &str) -> String {
    tag.trim().to_ascii_lowercase()
}
