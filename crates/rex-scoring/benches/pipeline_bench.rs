//! Criterion benchmarks for rex-scoring.
//!
//! Synthetic snapshots: every reviewer reviews a rotating slice of
//! proposals, one review in seven is flagged, and each review gets two peer
//! assessments.

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use rex_core::config::{AggregationConfig, ScoringConfig};
use rex_core::types::{
    AssessmentMode, Criterion as ReviewCriterion, PeerAssessment, PeerCriteriaScores, Proposal,
    ProposalId, Review, ReviewId, ReviewerId, ReviewerProfile, ScoringSnapshot,
};
use rex_scoring::aggregation::{ProposalAccumulator, ReviewContribution};
use rex_scoring::ScoringPipeline;

const TAGS: [&str; 4] = ["defi", "infra", "community", "tooling"];

fn make_snapshot(reviewers: usize, proposals: usize, reviews_per_reviewer: usize) -> ScoringSnapshot {
    let submitted_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    let profiles: Vec<ReviewerProfile> = (0..reviewers)
        .map(|i| {
            let mut p = ReviewerProfile::new(format!("u{i}"));
            p.declared_interests = vec![TAGS[i % TAGS.len()].to_string()];
            p.admin_validation_score = Some((i % 10) as f64 / 10.0);
            p
        })
        .collect();

    let proposal_list: Vec<Proposal> = (0..proposals)
        .map(|i| Proposal {
            id: ProposalId::from(format!("p{i}")),
            tags: vec![TAGS[i % TAGS.len()].to_string()],
            title: None,
        })
        .collect();

    let mut reviews = Vec::new();
    for i in 0..reviewers {
        for j in 0..reviews_per_reviewer {
            let n = reviews.len();
            let score = ((i + j) % 7) as i32 - 3;
            reviews.push(Review {
                id: ReviewId::from(format!("r{n}")),
                reviewer_id: ReviewerId::from(format!("u{i}")),
                proposal_id: ProposalId::from(format!("p{}", (i + j * 3) % proposals)),
                criteria_scores: ReviewCriterion::ALL.iter().map(|c| (*c, score)).collect(),
                self_expertise_level: Some((n % 5) as u8 + 1),
                is_low_quality_flag: n % 7 == 0,
                flag_reasons: vec![],
                submitted_at,
            });
        }
    }

    let mut peer_assessments = Vec::new();
    for (n, review) in reviews.iter().enumerate() {
        for k in 1..=2 {
            let rater = ReviewerId::from(format!("u{}", (n + k * 5) % reviewers));
            let mode = if review.is_low_quality_flag {
                AssessmentMode::LowQualityAgreement { agree: k == 1 || n % 2 == 0 }
            } else {
                let s = ((n + k) % 7) as i32 - 3;
                AssessmentMode::Normal {
                    criteria_scores: PeerCriteriaScores::new(s, s, s),
                }
            };
            peer_assessments.push(PeerAssessment {
                id: format!("a{n}-{k}").into(),
                review_id: review.id.clone(),
                rater_id: rater,
                mode,
            });
        }
    }

    ScoringSnapshot {
        reviewers: profiles,
        reviews,
        peer_assessments,
        proposals: proposal_list,
    }
}

fn bench_pipeline(c: &mut Criterion) {
    let pipeline = ScoringPipeline::new(ScoringConfig::default());
    let mut group = c.benchmark_group("pipeline_run");
    for &(reviewers, proposals) in &[(50, 20), (500, 200), (2000, 500)] {
        let snapshot = make_snapshot(reviewers, proposals, 5);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{reviewers}x{proposals}")),
            &snapshot,
            |b, snapshot| b.iter(|| pipeline.run(black_box(snapshot)).unwrap()),
        );
    }
    group.finish();
}

fn bench_accumulator(c: &mut Criterion) {
    let config = AggregationConfig::default();
    let reviews: Vec<ReviewContribution> = (0..1000)
        .map(|i| ReviewContribution {
            effective_weight: 0.5 + (i % 10) as f64 / 10.0,
            expertise_total: (i % 5) as f64 / 5.0,
            quality_score: (i % 4 != 0).then(|| (i % 11) as f64 / 10.0),
            is_low_quality_flag: i % 9 == 0,
        })
        .collect();

    c.bench_function("accumulate_1000_reviews", |b| {
        b.iter(|| {
            let mut acc = ProposalAccumulator::new();
            for r in &reviews {
                acc.add(black_box(r));
            }
            acc.finish(ProposalId::from("p"), &config)
        })
    });
}

criterion_group!(benches, bench_pipeline, bench_accumulator);
criterion_main!(benches);
