//! Span names for the scoring phases.
//!
//! Every pipeline phase opens an `info` span with one of these names, so
//! log queries can select a phase without matching message text. The
//! enclosing run span is `rex.pipeline`.

/// Per-review expertise estimation.
pub const EXPERTISE: &str = "rex.expertise";

/// History derivation and batch reputation.
pub const REPUTATION: &str = "rex.reputation";

/// Per-review REX and quality.
pub const REVIEW_SCORING: &str = "rex.review_scoring";

/// Per-proposal aggregation.
pub const AGGREGATION: &str = "rex.aggregation";

/// All span names, in pipeline order.
pub const ALL: [&str; 4] = [EXPERTISE, REPUTATION, REVIEW_SCORING, AGGREGATION];
