//! Session score: one 0–100 number combining accuracy, time and order.
//!
//! ```text
//! accuracy_score = correct / total_words × 100
//! time_ratio     = (time_taken_ms / 1000) / (total_words × 5)
//! time_score     = 100 - 40r           (r ≤ 1)
//!                | 60 - 30(r - 1)      (r ≤ 2)
//!                | 30 - 10(r - 2)      (otherwise), clamped to [10, 100]
//! base           = 0.7 × accuracy_score + 0.3 × time_score (+15 for a perfect order)
//! score          = round(clamp(base, 0, 100))
//! ```
//!
//! Each word is budgeted five seconds; finishing inside the budget keeps the
//! time score above 60.

use crate::difficulty::round_half_up;

/// Seconds budgeted per word.
const SECONDS_PER_WORD: f64 = 5.0;
/// Bonus for finding every word in sentence order.
const ORDER_BONUS: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreInput {
    pub correct_placements: u32,
    pub total_words: u32,
    pub time_taken_ms: u64,
    pub order_correct: bool,
}

/// Piecewise time score for a ratio of elapsed to budgeted time.
#[must_use]
pub fn time_score(time_ratio: f64) -> f64 {
    let score = if time_ratio <= 1.0 {
        100.0 - 40.0 * time_ratio
    } else if time_ratio <= 2.0 {
        60.0 - 30.0 * (time_ratio - 1.0)
    } else {
        30.0 - 10.0 * (time_ratio - 2.0)
    };
    score.clamp(10.0, 100.0)
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn session_score(input: &ScoreInput) -> u8 {
    let total_words = f64::from(input.total_words.max(1));
    let accuracy_score = f64::from(input.correct_placements) / total_words * 100.0;
    let time_ratio = (input.time_taken_ms as f64 / 1000.0) / (total_words * SECONDS_PER_WORD);

    let mut base = 0.7 * accuracy_score + 0.3 * time_score(time_ratio);
    if input.order_correct && input.correct_placements >= input.total_words {
        base += ORDER_BONUS;
    }
    round_half_up(base.clamp(0.0, 100.0)) as u8
}
