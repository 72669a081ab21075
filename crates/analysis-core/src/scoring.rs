//! Score arithmetic shared by the category scorers and the overall composer.
//!
//! Every score in the engine is an integer percentage in [0, 100]. Category scores
//! are weighted averages normalized by the sum of the weights actually present
//! (weights never have to add up to 100), and fall back to a neutral score when
//! nothing carries weight.

/// Score used when a category has no active, weighted rules
pub const NEUTRAL_SCORE: u8 = 70;

/// Contribution assumed for a factor the signal snapshot does not cover
pub const UNKNOWN_FACTOR_SCORE: f64 = 70.0;

/// Clamp a per-rule contribution into [0, 100]. NaN counts as 0.
pub fn clamp_contribution(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Negative weights are malformed and count as zero.
pub fn effective_weight(weight: i32) -> u32 {
    weight.max(0) as u32
}

/// Round to the nearest integer score (halves away from zero) and clamp to [0, 100].
pub fn round_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

/// Weighted average of `(contribution, weight)` pairs.
///
/// Zero-weight entries are excluded from both numerator and denominator. Returns
/// `neutral` when the total weight is zero.
pub fn weighted_score<I>(items: I, neutral: u8) -> u8
where
    I: IntoIterator<Item = (f64, u32)>,
{
    let mut weighted_sum = 0.0;
    let mut total_weight: u64 = 0;

    for (contribution, weight) in items {
        if weight == 0 {
            continue;
        }
        weighted_sum += clamp_contribution(contribution) * weight as f64;
        total_weight += weight as u64;
    }

    if total_weight == 0 {
        neutral
    } else {
        round_score(weighted_sum / total_weight as f64)
    }
}

/// Combine integer scores with integer weights exactly, rounding half up.
///
/// Returns `None` when the weights sum to zero.
pub fn compose_scores(parts: &[(u8, u32)]) -> Option<u8> {
    let total_weight: u64 = parts.iter().map(|(_, w)| *w as u64).sum();
    if total_weight == 0 {
        return None;
    }
    let weighted_sum: u64 = parts.iter().map(|(s, w)| *s as u64 * *w as u64).sum();
    let rounded = (2 * weighted_sum + total_weight) / (2 * total_weight);
    Some(rounded.min(100) as u8)
}
