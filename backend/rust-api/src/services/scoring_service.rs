use crate::models::quiz::PointsBreakdown;

// Scoring policy. Attempt 1 keeps the full base and earns the first-try
// bonus; every retry drops the multiplier by a quarter down to the floor,
// so repeated guessing can never beat a first try. The speed bonus decays
// linearly and is exhausted at the cutoff.
const ATTEMPT_DECAY_PER_RETRY: f64 = 0.25;
const ATTEMPT_MULTIPLIER_FLOOR: f64 = 0.25;
pub const FIRST_TRY_BONUS: u32 = 25;
pub const MAX_SPEED_BONUS: u32 = 50;
pub const SPEED_BONUS_CUTOFF_MS: u64 = 30_000;

/// Pure scoring function: (base points, attempt number, elapsed time) to an
/// itemized breakdown. Only called for a correct answer; attempt numbers
/// below 1 are treated as 1.
pub fn calculate_points(base_points: u32, attempt_number: u32, elapsed_ms: u64) -> PointsBreakdown {
    let attempt_number = attempt_number.max(1);

    let attempt_multiplier = (1.0 - ATTEMPT_DECAY_PER_RETRY * (attempt_number - 1) as f64)
        .max(ATTEMPT_MULTIPLIER_FLOOR);
    let base_after_multiplier = (base_points as f64 * attempt_multiplier).round() as u32;

    let first_try_bonus = if attempt_number == 1 { FIRST_TRY_BONUS } else { 0 };

    let speed_bonus = if elapsed_ms >= SPEED_BONUS_CUTOFF_MS {
        0
    } else {
        let remaining = 1.0 - elapsed_ms as f64 / SPEED_BONUS_CUTOFF_MS as f64;
        (MAX_SPEED_BONUS as f64 * remaining).round() as u32
    };

    PointsBreakdown {
        base_points,
        attempt_multiplier,
        attempt_number,
        base_after_multiplier,
        first_try_bonus,
        speed_bonus,
        total_points: base_after_multiplier + first_try_bonus + speed_bonus,
    }
}
