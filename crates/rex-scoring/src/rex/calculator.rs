//! REX score and its calibration.
//!
//! `rex = geometricMean(reputation, expertise)`, `reliability` is a logistic
//! transform of REX, and reliability drives both the review's vote weight
//! and the power-mean exponent its criteria are combined with.

use serde::{Deserialize, Serialize};

use rex_core::config::RexConfig;

use crate::stats::{clamp_unit, geometric_mean, sigmoid};

/// REX and the quantities derived from it for one review.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RexScore {
    pub rex: f64,
    pub reliability: f64,
    pub effective_weight: f64,
    pub gm_exponent: f64,
}

pub struct RexCalculator<'a> {
    config: &'a RexConfig,
}

impl<'a> RexCalculator<'a> {
    pub fn new(config: &'a RexConfig) -> Self {
        Self { config }
    }

    /// `clamp(geometricMean(reputation, expertise, α, β), 0, 1)`.
    pub fn rex(&self, reputation: f64, expertise: f64) -> f64 {
        clamp_unit(geometric_mean(
            reputation,
            expertise,
            self.config.reputation_exponent,
            self.config.expertise_exponent,
        ))
    }

    /// `1 / (1 + e^(−k(rex − m)))`; exactly 0.5 at the midpoint.
    pub fn reliability(&self, rex: f64) -> f64 {
        sigmoid(self.config.sigmoid_steepness * (rex - self.config.sigmoid_midpoint))
    }

    pub fn effective_weight(&self, reliability: f64) -> f64 {
        self.config.effective_weight_scale * reliability
    }

    pub fn gm_exponent(&self, reliability: f64) -> f64 {
        self.config.gm_exponent_base + self.config.gm_exponent_slope * reliability
    }

    /// Per-review REX and calibration.
    pub fn score(&self, reputation: f64, expertise: f64) -> RexScore {
        let rex = self.rex(reputation, expertise);
        let reliability = self.reliability(rex);
        RexScore {
            rex,
            reliability,
            effective_weight: self.effective_weight(reliability),
            gm_exponent: self.gm_exponent(reliability),
        }
    }

    /// Profile-level REX for matching and display; same formula with the
    /// reviewer's profile expertise.
    pub fn profile_rex(&self, reputation: f64, profile_expertise: f64) -> f64 {
        self.rex(reputation, profile_expertise)
    }
}
