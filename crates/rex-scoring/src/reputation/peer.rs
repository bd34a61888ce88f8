//! Peer-rating reputation.
//!
//! Raw peer ratings are normalized to `[0, 1]`, debiased per rater, weighted
//! by rater expertise, shrunk per review, then shrunk again across reviews.

use rustc_hash::FxHashMap;

use rex_core::config::PeerRatingConfig;

use crate::history::{AssessedReview, PeerRating, ReviewerHistory};
use crate::stats::{bayesian_shrinkage, clamp_unit, mean_and_std, weighted_shrinkage, z_score};

/// Mean and standard deviation of one criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Moments {
    mean: f64,
    std: f64,
}

impl Moments {
    fn of(values: &[f64]) -> Self {
        let (mean, std) = mean_and_std(values);
        Self { mean, std }
    }
}

/// Specificity, clarity, insightful.
type CriterionMoments = [Moments; 3];

fn criteria(rating: &PeerRating<'_>) -> [f64; 3] {
    [rating.specificity, rating.clarity, rating.insightful]
}

fn moments_of(ratings: &[&PeerRating<'_>]) -> CriterionMoments {
    let mut columns: [Vec<f64>; 3] = Default::default();
    for rating in ratings {
        for (column, value) in columns.iter_mut().zip(criteria(rating)) {
            column.push(value);
        }
    }
    [
        Moments::of(&columns[0]),
        Moments::of(&columns[1]),
        Moments::of(&columns[2]),
    ]
}

/// Per-rater harshness/leniency calibration over every rating in a snapshot.
///
/// A rating from a rater with at least `min_ratings` ratings is z-scored
/// against that rater's own distribution and mapped back onto the
/// population distribution of the same criterion. Ratings from sparser
/// raters pass through unchanged.
#[derive(Debug, Clone, Default)]
pub struct RaterCalibration {
    raters: FxHashMap<String, CriterionMoments>,
    population: CriterionMoments,
}

impl RaterCalibration {
    pub fn from_histories<'h, 's: 'h>(
        histories: impl IntoIterator<Item = &'h ReviewerHistory<'s>>,
        min_ratings: usize,
    ) -> Self {
        let mut by_rater: FxHashMap<&str, Vec<&PeerRating<'_>>> = FxHashMap::default();
        let mut all: Vec<&PeerRating<'_>> = Vec::new();
        for history in histories {
            for rating in history.assessed_reviews.iter().flat_map(|r| r.ratings.iter()) {
                by_rater.entry(rating.rater_id).or_default().push(rating);
                all.push(rating);
            }
        }

        let raters = by_rater
            .into_iter()
            .filter(|(_, ratings)| ratings.len() >= min_ratings.max(2))
            .map(|(rater, ratings)| (rater.to_string(), moments_of(&ratings)))
            .collect();

        Self {
            raters,
            population: moments_of(&all),
        }
    }

    /// Number of raters whose ratings are debiased.
    pub fn calibrated_raters(&self) -> usize {
        self.raters.len()
    }

    /// Debiased `[specificity, clarity, insightful]`.
    pub fn debias(&self, rating: &PeerRating<'_>) -> [f64; 3] {
        let raw = criteria(rating);
        let Some(rater) = self.raters.get(rating.rater_id) else {
            return raw;
        };
        let mut out = raw;
        for (i, value) in out.iter_mut().enumerate() {
            let z = z_score(raw[i], rater[i].mean, rater[i].std);
            *value = clamp_unit(self.population[i].mean + z * self.population[i].std);
        }
        out
    }
}

/// Computes a reviewer's peer reputation.
pub struct PeerReputationEstimator<'a> {
    config: &'a PeerRatingConfig,
    calibration: &'a RaterCalibration,
}

impl<'a> PeerReputationEstimator<'a> {
    pub fn new(config: &'a PeerRatingConfig, calibration: &'a RaterCalibration) -> Self {
        Self {
            config,
            calibration,
        }
    }

    /// `clamp(base + multiplier × raterExpertise, min, max)`.
    pub fn rater_weight(&self, rater_expertise: f64) -> f64 {
        let w = &self.config.rater_weight;
        (w.base + w.expertise_multiplier * rater_expertise)
            .min(w.max)
            .max(w.min)
    }

    /// Combined quality of one rating after debiasing.
    pub fn rating_score(&self, rating: &PeerRating<'_>) -> f64 {
        let [specificity, clarity, insightful] = self.calibration.debias(rating);
        let c = self.config;
        clamp_unit(
            c.specificity_weight * specificity
                + c.clarity_weight * clarity
                + c.insight_weight * insightful,
        )
    }

    /// Rater-weighted peer score of one review, shrunk toward the prior.
    pub fn review_score(&self, review: &AssessedReview<'_>) -> f64 {
        let (weighted_sum, total_weight) =
            review.ratings.iter().fold((0.0, 0.0), |(sum, total), rating| {
                let weight = self.rater_weight(rating.rater_expertise);
                (sum + weight * self.rating_score(rating), total + weight)
            });
        weighted_shrinkage(
            weighted_sum,
            total_weight,
            self.config.prior,
            self.config.review_prior_weight,
        )
    }

    /// Peer reputation across all assessed reviews; `None` without any.
    pub fn estimate(&self, history: &ReviewerHistory<'_>) -> Option<f64> {
        if history.assessed_reviews.is_empty() {
            return None;
        }
        let scores: Vec<f64> = history
            .assessed_reviews
            .iter()
            .map(|review| self.review_score(review))
            .collect();
        Some(clamp_unit(bayesian_shrinkage(
            &scores,
            self.config.prior,
            self.config.reviewer_prior_weight,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(rater: &'static str, value: f64, expertise: f64) -> PeerRating<'static> {
        PeerRating {
            rater_id: rater,
            specificity: value,
            clarity: value,
            insightful: value,
            rater_expertise: expertise,
        }
    }

    fn history(reviews: Vec<Vec<PeerRating<'static>>>) -> ReviewerHistory<'static> {
        ReviewerHistory {
            reviewer_id: "author",
            assessed_reviews: reviews
                .into_iter()
                .map(|ratings| AssessedReview {
                    review_id: "r",
                    ratings,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn rater_weight_is_clamped() {
        let config = PeerRatingConfig::default();
        let calibration = RaterCalibration::default();
        let est = PeerReputationEstimator::new(&config, &calibration);
        assert_eq!(est.rater_weight(0.0), 0.5);
        assert_eq!(est.rater_weight(0.5), 1.0);
        assert_eq!(est.rater_weight(1.0), 1.5);
        assert_eq!(est.rater_weight(5.0), 1.5);
    }

    #[test]
    fn no_assessed_reviews_gives_none() {
        let config = PeerRatingConfig::default();
        let calibration = RaterCalibration::default();
        let est = PeerReputationEstimator::new(&config, &calibration);
        assert_eq!(est.estimate(&history(vec![])), None);
    }

    #[test]
    fn strong_ratings_raise_reputation_above_prior() {
        let config = PeerRatingConfig::default();
        let calibration = RaterCalibration::default();
        let est = PeerReputationEstimator::new(&config, &calibration);
        let h = history(vec![
            vec![rating("a", 1.0, 0.5), rating("b", 1.0, 0.5)],
            vec![rating("a", 1.0, 0.5)],
        ]);
        let rep = est.estimate(&h).unwrap();
        assert!(rep > 0.5 && rep <= 1.0, "rep = {rep}");
    }

    #[test]
    fn review_score_shrinks_toward_prior() {
        let config = PeerRatingConfig::default();
        let calibration = RaterCalibration::default();
        let est = PeerReputationEstimator::new(&config, &calibration);
        let review = AssessedReview {
            review_id: "r",
            ratings: vec![rating("a", 1.0, 0.5)],
        };
        // weight 1.0: (0.5·1 + 1.0·1) / 2
        assert!((est.review_score(&review) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn harsh_rater_is_debiased_onto_population() {
        // Rater "harsh" spans 0.0..0.2, rater "kind" spans 0.8..1.0.
        let h = history(vec![vec![
            rating("harsh", 0.0, 0.5),
            rating("harsh", 0.1, 0.5),
            rating("harsh", 0.2, 0.5),
            rating("kind", 0.8, 0.5),
            rating("kind", 0.9, 0.5),
            rating("kind", 1.0, 0.5),
        ]]);
        let calibration = RaterCalibration::from_histories([&h], 3);
        assert_eq!(calibration.calibrated_raters(), 2);

        // Each rater's top rating maps to the same debiased value.
        let harsh_top = calibration.debias(&rating("harsh", 0.2, 0.5));
        let kind_top = calibration.debias(&rating("kind", 1.0, 0.5));
        for i in 0..3 {
            assert!((harsh_top[i] - kind_top[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn sparse_rater_passes_through() {
        let h = history(vec![vec![rating("once", 0.3, 0.5)]]);
        let calibration = RaterCalibration::from_histories([&h], 3);
        assert_eq!(calibration.debias(&rating("once", 0.3, 0.5)), [0.3; 3]);
    }
}
