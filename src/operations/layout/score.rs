use super::pack::RollAllocation;

const WASTE_WEIGHT: f64 = 10.0;
const ISSUE_WEIGHT: f64 = 50.0;
const STRIP_WEIGHT: f64 = 2.0;
const ROLL_WEIGHT: f64 = 5.0;
const SINGLE_WIDTH_BONUS: f64 = 20.0;
const EFFICIENT_ROLL_BONUS: f64 = 3.0;
/// Rolls wasting less than this share of their length earn the efficiency bonus.
const EFFICIENT_ROLL_WASTE: f64 = 0.10;

/// Ranks a candidate plan; lower is better.
#[must_use]
pub fn score_plan(
    waste_percentage: f64,
    issue_count: usize,
    strip_count: usize,
    rolls: &[RollAllocation],
    max_roll_length: f64,
) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let mut score = waste_percentage * WASTE_WEIGHT
        + issue_count as f64 * ISSUE_WEIGHT
        + strip_count as f64 * STRIP_WEIGHT
        + rolls.len() as f64 * ROLL_WEIGHT;

    if let Some(first) = rolls.first() {
        if rolls.iter().all(|r| r.roll_width == first.roll_width) {
            score -= SINGLE_WIDTH_BONUS;
        }
    }
    let efficient = rolls
        .iter()
        .filter(|r| max_roll_length > 0.0 && r.waste_length / max_roll_length < EFFICIENT_ROLL_WASTE)
        .count();
    #[allow(clippy::cast_precision_loss)]
    let bonus = efficient as f64 * EFFICIENT_ROLL_BONUS;
    score - bonus
}
