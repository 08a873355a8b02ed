//! Difficulty weight derivation.
//!
//! Longer or more complex answers are harder to type correctly, so they
//! weigh more when the game samples questions. The weight is derived from
//! the answer text, never authored.

use crate::normalize::normalize;
use crate::question::Question;

const MIN_WEIGHT: f64 = 0.5;
const MAX_WEIGHT: f64 = 3.0;
/// Tuned so typical short answers land near 1.0.
const LENGTH_DIVISOR: f64 = 5.0;

/// Compute the selection weight for a question.
///
/// Always in `[0.5, 3.0]`, rounded to one decimal place. The digit and
/// symbol bonuses are additive and can both apply to the same answer.
pub fn compute_weight(question: &Question) -> f64 {
    let normalized = normalize(&question.answer);
    let mut weight = normalized.chars().count() as f64;

    if normalized.chars().any(|c| c.is_ascii_digit()) {
        weight += 0.5;
    }

    // Anything outside lowercase ASCII letters, digits and whitespace
    // counts as a symbol; digits are excluded from this class so the two
    // bonuses stack.
    if normalized
        .chars()
        .any(|c| !c.is_ascii_lowercase() && !c.is_ascii_digit() && !c.is_whitespace())
    {
        weight += 0.5;
    }

    // Empty normalized answers still get a nonzero floor weight so they
    // remain selectable.
    if weight == 0.0 {
        weight = MIN_WEIGHT;
    }

    let clipped = (weight / LENGTH_DIVISOR).clamp(MIN_WEIGHT, MAX_WEIGHT);
    (clipped * 10.0).round() / 10.0
}
