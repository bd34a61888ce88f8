//! Statistical utilities shared by every estimator.

pub mod beta;
pub mod means;
pub mod normalize;
pub mod shrinkage;

pub use beta::{beta_cdf, erf, normal_cdf, BetaPosterior};
pub use means::{generalized_power_mean, geometric_mean, WeightedMoments};
pub use normalize::{clamp_unit, mean_and_std, sigmoid, z_score, z_score_normalize};
pub use shrinkage::{bayesian_shrinkage, weighted_shrinkage};
