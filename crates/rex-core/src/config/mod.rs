//! Configuration system for REX.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod aggregation_config;
pub mod expertise_config;
pub mod reputation_config;
pub mod rex_config;
pub mod scoring_config;

pub use aggregation_config::AggregationConfig;
pub use expertise_config::{DomainExpertiseConfig, ExpertiseConfig};
pub use reputation_config::{
    FinalReputationConfig, FlagReputationConfig, PeerRatingConfig, RaterWeightConfig,
    ReputationConfig,
};
pub use rex_config::RexConfig;
pub use scoring_config::{CliOverrides, ScoringConfig};
