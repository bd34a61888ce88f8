//! Batch proposal aggregation over per-review REX results.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::debug;

use rex_core::config::AggregationConfig;
use rex_core::types::{ProposalAggregate, ProposalId, ReviewRexResult};

use super::accumulator::{ProposalAccumulator, ReviewContribution};

pub struct ProposalAggregator<'a> {
    config: &'a AggregationConfig,
}

impl<'a> ProposalAggregator<'a> {
    pub fn new(config: &'a AggregationConfig) -> Self {
        Self { config }
    }

    /// Aggregate one proposal. Review order does not affect the result.
    pub fn aggregate<'r>(
        &self,
        proposal_id: &ProposalId,
        reviews: impl IntoIterator<Item = &'r ReviewRexResult>,
    ) -> ProposalAggregate {
        let mut acc = ProposalAccumulator::new();
        for review in reviews {
            acc.add(&ReviewContribution::from(review));
        }
        let aggregate = acc.finish(proposal_id.clone(), self.config);
        debug!(
            proposal = %proposal_id,
            reviews = aggregate.review_count,
            p_high = aggregate.p_high,
            p_low = aggregate.p_low,
            status = aggregate.status.name(),
            "proposal aggregated"
        );
        aggregate
    }

    /// Aggregate every proposal in parallel. Proposals listed in
    /// `proposal_ids` without reviews still get an aggregate.
    pub fn aggregate_all<'r, I>(
        &self,
        proposal_ids: I,
        results: &'r [ReviewRexResult],
    ) -> BTreeMap<ProposalId, ProposalAggregate>
    where
        I: IntoIterator<Item = &'r ProposalId>,
    {
        let mut groups: BTreeMap<&'r ProposalId, Vec<&'r ReviewRexResult>> = proposal_ids
            .into_iter()
            .map(|id| (id, Vec::new()))
            .collect();
        for result in results {
            groups.entry(&result.proposal_id).or_default().push(result);
        }

        groups
            .par_iter()
            .map(|(id, reviews)| {
                (
                    (*id).clone(),
                    self.aggregate(id, reviews.iter().copied()),
                )
            })
            .collect()
    }
}
