//! REX calibration configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the REX score, its logistic calibration, and the
/// quantities reliability drives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RexConfig {
    /// Geometric-mean exponent on reputation. Default: 1.0.
    pub reputation_exponent: f64,
    /// Geometric-mean exponent on expertise. Default: 1.0.
    pub expertise_exponent: f64,
    /// Logistic steepness k in `1 / (1 + e^(−k(rex − m)))`. Default: 4.0.
    pub sigmoid_steepness: f64,
    /// Logistic midpoint m. Default: 0.5.
    pub sigmoid_midpoint: f64,
    /// `effectiveWeight = scale × reliability`. Default: 2.0.
    pub effective_weight_scale: f64,
    /// `gmExponent = base + slope × reliability`. Default: 0.6.
    pub gm_exponent_base: f64,
    /// Default: 1.2.
    pub gm_exponent_slope: f64,
}

impl Default for RexConfig {
    fn default() -> Self {
        Self {
            reputation_exponent: 1.0,
            expertise_exponent: 1.0,
            sigmoid_steepness: 4.0,
            sigmoid_midpoint: 0.5,
            effective_weight_scale: 2.0,
            gm_exponent_base: 0.6,
            gm_exponent_slope: 1.2,
        }
    }
}
