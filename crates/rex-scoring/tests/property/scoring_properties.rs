//! Property tests for rex-scoring.

use proptest::prelude::*;

use rex_core::config::{AggregationConfig, RexConfig};
use rex_core::types::ProposalId;

use rex_scoring::aggregation::{ProposalAccumulator, ReviewContribution};
use rex_scoring::stats::{bayesian_shrinkage, beta_cdf, geometric_mean, WeightedMoments};
use rex_scoring::RexCalculator;

fn contribution() -> impl Strategy<Value = ReviewContribution> {
    (
        0.0f64..2.0,
        0.0f64..=1.0,
        prop::option::of(0.0f64..=1.0),
        any::<bool>(),
    )
        .prop_map(
            |(effective_weight, expertise_total, quality_score, is_low_quality_flag)| {
                ReviewContribution {
                    effective_weight,
                    expertise_total,
                    quality_score,
                    is_low_quality_flag,
                }
            },
        )
}

// ── PROP-01: shrinkage limits ──
proptest! {
    #[test]
    fn prop_shrinkage_empty_is_prior(prior in 0.0f64..=1.0, weight in 0.0f64..10.0) {
        prop_assert_eq!(bayesian_shrinkage(&[], prior, weight), prior);
    }

    #[test]
    fn prop_shrinkage_zero_weight_is_sample(x in 0.0f64..=1.0, prior in 0.0f64..=1.0) {
        prop_assert!((bayesian_shrinkage(&[x], prior, 0.0) - x).abs() < 1e-12);
    }
}

// ── PROP-02: geometric mean ──
proptest! {
    #[test]
    fn prop_geometric_mean_zero_annihilates(b in 0.0f64..=1.0) {
        prop_assert_eq!(geometric_mean(0.0, b, 1.0, 1.0), 0.0);
    }

    #[test]
    fn prop_geometric_mean_of_equal_values(a in 0.0f64..=1.0) {
        prop_assert!((geometric_mean(a, a, 1.0, 1.0) - a).abs() < 1e-12);
    }
}

// ── PROP-03: REX monotonicity and bounds ──
proptest! {
    #[test]
    fn prop_rex_monotone(
        rep in 0.0f64..=1.0,
        exp in 0.0f64..=1.0,
        bump in 0.0f64..=1.0,
    ) {
        let config = RexConfig::default();
        let calc = RexCalculator::new(&config);
        let base = calc.rex(rep, exp);
        let more_rep = calc.rex((rep + bump).min(1.0), exp);
        let more_exp = calc.rex(rep, (exp + bump).min(1.0));
        prop_assert!(more_rep >= base);
        prop_assert!(more_exp >= base);

        let s = calc.score(rep, exp);
        prop_assert!((0.0..=1.0).contains(&s.rex));
        prop_assert!((0.0..=1.0).contains(&s.reliability));
        prop_assert!(s.effective_weight >= 0.0);
    }
}

// ── PROP-04: Beta CDF endpoints ──
proptest! {
    #[test]
    fn prop_beta_cdf_endpoints(alpha in 0.01f64..100.0, beta in 0.01f64..100.0) {
        prop_assert_eq!(beta_cdf(0.0, alpha, beta), 0.0);
        prop_assert_eq!(beta_cdf(1.0, alpha, beta), 1.0);
        let mid = beta_cdf(0.5, alpha, beta);
        prop_assert!((0.0..=1.0).contains(&mid));
    }
}

// ── PROP-05: aggregation bounds ──
proptest! {
    #[test]
    fn prop_aggregate_in_bounds(reviews in prop::collection::vec(contribution(), 0..12)) {
        let mut acc = ProposalAccumulator::new();
        for r in &reviews {
            acc.add(r);
        }
        let agg = acc.finish(ProposalId::from("p"), &AggregationConfig::default());

        prop_assert!((0.0..=1.0).contains(&agg.p_high));
        prop_assert!((0.0..=1.0).contains(&agg.p_low));
        prop_assert!(agg.quality_score.map_or(true, |q| (0.0..=1.0).contains(&q)));
        prop_assert!(agg.ranking_score >= 0.0);
        prop_assert!(agg.disagreement >= 0.0);
        prop_assert_eq!(agg.review_count, reviews.len());
    }
}

// ── PROP-06: accumulation order ──
proptest! {
    #[test]
    fn prop_aggregation_order_independent(
        reviews in prop::collection::vec(contribution(), 1..10),
        split in 0usize..10,
    ) {
        let config = AggregationConfig::default();
        let mut forward = ProposalAccumulator::new();
        for r in &reviews {
            forward.add(r);
        }
        let mut backward = ProposalAccumulator::new();
        for r in reviews.iter().rev() {
            backward.add(r);
        }
        let split = split.min(reviews.len());
        let mut left = ProposalAccumulator::new();
        let mut right = ProposalAccumulator::new();
        for r in &reviews[..split] {
            left.add(r);
        }
        for r in &reviews[split..] {
            right.add(r);
        }
        left.merge(&right);

        let a = forward.finish(ProposalId::from("p"), &config);
        for other in [backward, left] {
            let b = other.finish(ProposalId::from("p"), &config);
            prop_assert_eq!(a.review_count, b.review_count);
            prop_assert!((a.p_low - b.p_low).abs() < 1e-9);
            prop_assert!((a.p_high - b.p_high).abs() < 1e-9);
            prop_assert!((a.disagreement - b.disagreement).abs() < 1e-9);
        }
    }
}

// ── PROP-07: identical samples never disagree ──
proptest! {
    #[test]
    fn prop_identical_samples_zero_variance(
        value in 0.0f64..=1.0,
        weights in prop::collection::vec(0.01f64..3.0, 1..10),
    ) {
        let mut moments = WeightedMoments::new();
        for w in &weights {
            moments.push(value, *w);
        }
        prop_assert!(moments.variance() < 1e-24);
    }
}
