//! REX calculation.

pub mod calculator;

pub use calculator::{RexCalculator, RexScore};
