//! Per-review quality from its criterion scores.

use std::collections::BTreeMap;

use rex_core::constants::normalize_criterion;
use rex_core::types::Criterion;

use crate::stats::{clamp_unit, generalized_power_mean};

/// Combines a review's populated criteria with a reliability-tuned power
/// mean. More reliable reviews use a larger exponent, so their strongest
/// criteria count for more.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewQualityScorer;

impl ReviewQualityScorer {
    pub fn new() -> Self {
        Self
    }

    /// Quality in `[0, 1]`, or `None` when no criterion is populated.
    pub fn score(&self, criteria: &BTreeMap<Criterion, i32>, gm_exponent: f64) -> Option<f64> {
        if criteria.is_empty() {
            return None;
        }
        let values: Vec<f64> = criteria.values().map(|s| normalize_criterion(*s)).collect();
        let weights = vec![1.0 / values.len() as f64; values.len()];
        generalized_power_mean(&values, &weights, gm_exponent).map(clamp_unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_criteria_give_none() {
        assert_eq!(ReviewQualityScorer::new().score(&BTreeMap::new(), 1.2), None);
    }

    #[test]
    fn all_top_scores_give_one() {
        let criteria: BTreeMap<Criterion, i32> = Criterion::ALL.iter().map(|c| (*c, 3)).collect();
        let q = ReviewQualityScorer::new().score(&criteria, 1.5).unwrap();
        assert!((q - 1.0).abs() < 1e-12);
    }

    #[test]
    fn exponent_one_is_mean_of_normalized_scores() {
        let criteria = BTreeMap::from([(Criterion::Team, 3), (Criterion::Budget, -3)]);
        let q = ReviewQualityScorer::new().score(&criteria, 1.0).unwrap();
        assert!((q - 0.5).abs() < 1e-12);
    }

    #[test]
    fn higher_exponent_leans_toward_best_criterion() {
        let criteria = BTreeMap::from([
            (Criterion::Impact, 3),
            (Criterion::Feasibility, 0),
            (Criterion::Team, -2),
        ]);
        let scorer = ReviewQualityScorer::new();
        let cautious = scorer.score(&criteria, 0.6).unwrap();
        let confident = scorer.score(&criteria, 1.8).unwrap();
        assert!(confident > cautious);
    }
}
