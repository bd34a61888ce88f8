//! Final reputation from the available components.

use rex_core::config::FinalReputationConfig;
use rex_core::types::{FlagStats, ReputationComponent};

use crate::stats::clamp_unit;

/// Combine peer and flag reputation.
///
/// The configured weights are renormalized over the components present.
/// Flag reputation already carries the miss penalty. Without it, a reviewer
/// who had chances to flag has the penalty applied to the combined value,
/// or to the miss-only baseline when there is no peer reputation either.
/// Anyone else with no component gets the default reputation.
pub fn final_reputation(
    peer: Option<f64>,
    flag: Option<f64>,
    flag_stats: &FlagStats,
    config: &FinalReputationConfig,
) -> (f64, Vec<ReputationComponent>) {
    let parts: Vec<(ReputationComponent, f64, f64)> = [
        peer.map(|v| (ReputationComponent::Peer, v, config.peer_weight)),
        flag.map(|v| (ReputationComponent::Flag, v, config.flag_weight)),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        if flag_stats.opportunities > 0 {
            return (
                clamp_unit(config.miss_only_baseline * flag_stats.miss_penalty),
                vec![ReputationComponent::MissPenalty],
            );
        }
        return (config.default_reputation, Vec::new());
    }

    let weight_sum: f64 = parts.iter().map(|(_, _, w)| w).sum();
    let value = if weight_sum > 0.0 {
        parts.iter().map(|(_, v, w)| v * w).sum::<f64>() / weight_sum
    } else {
        parts.iter().map(|(_, v, _)| v).sum::<f64>() / parts.len() as f64
    };
    let mut components: Vec<ReputationComponent> = parts.into_iter().map(|(c, _, _)| c).collect();

    if flag.is_none() && flag_stats.opportunities > 0 {
        components.push(ReputationComponent::MissPenalty);
        return (clamp_unit(value * flag_stats.miss_penalty), components);
    }
    (clamp_unit(value), components)
}
