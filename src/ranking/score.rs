//! Score synthesis - turn a final list position into a display score

use super::constants::{MAX_SCORE, MIN_SCORE, POSITION_SWING, SCORE_PRECISION};
use super::tier::Tier;

/// Position factor: 1.0 at the top of the list, 0.0 at the bottom
///
/// A list holding only the new item has no spread to measure, so it sits at
/// the neutral 0.5 and the score lands exactly on the tier anchor.
pub fn position_factor(final_index: usize, len_after_insert: usize) -> f64 {
    if len_after_insert <= 1 {
        return 0.5;
    }
    let span = (len_after_insert - 1) as f64;
    1.0 - final_index as f64 / span
}

/// Round to one decimal place
pub fn round_score(value: f64) -> f64 {
    (value * SCORE_PRECISION).round() / SCORE_PRECISION
}

/// Score for an item of `tier` placed at `final_index`
///
/// `len_after_insert` counts the new item. Position shifts the tier anchor
/// by at most `POSITION_SWING / 2` either way, and the result is clamped to
/// [MIN_SCORE, MAX_SCORE].
pub fn synthesize_score(tier: Tier, final_index: usize, len_after_insert: usize) -> f64 {
    let base = tier.base_score();
    let factor = position_factor(final_index, len_after_insert);
    let raw = base + (factor - 0.5) * POSITION_SWING;
    round_score(raw.clamp(MIN_SCORE, MAX_SCORE))
}
