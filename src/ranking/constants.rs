//! Ranking constants - all scoring values in one place
//!
//! Scores are display values only. List order is the source of truth.

// Tier anchors (the score each tier gravitates toward)
pub const HIGH_TIER_BASE: f64 = 9.0;
pub const MID_TIER_BASE: f64 = 6.5;
pub const LOW_TIER_BASE: f64 = 3.0;

// Score bounds (inclusive)
pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 10.0;

// Total spread of the position shift: top rank gets +SWING/2, bottom rank -SWING/2
pub const POSITION_SWING: f64 = 2.0;

// Scores keep one decimal place
pub const SCORE_PRECISION: f64 = 10.0;
