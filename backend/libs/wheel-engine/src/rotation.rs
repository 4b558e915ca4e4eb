// ============================================
// Wheel Rotation (轉盤角度)
// ============================================
//
// Maps a discrete winner index to the accumulated angle the wheel has to
// turn to stop on it:
//
//   segment  = 360 / total
//   rotation = 360 * extra_spins + index * segment + u * segment * 0.8
//
// The offset keeps the stop inside the winning segment, away from its far
// edge. The raw value is what gets animated; normalize only for bookkeeping.

use crate::error::{Result, WheelError};
use crate::random::{next_index, RandomSource};

pub const FULL_TURN: f64 = 360.0;
/// Fraction of a segment the stop offset may cover
pub const SEGMENT_OFFSET_SPAN: f64 = 0.8;
pub const MIN_EXTRA_SPINS: u32 = 4;
pub const EXTRA_SPIN_CHOICES: u32 = 3;

/// Degrees covered by one segment
pub fn segment_angle(total_candidates: usize) -> Result<f64> {
    if total_candidates == 0 {
        return Err(WheelError::InvalidSegmentCount);
    }
    Ok(FULL_TURN / total_candidates as f64)
}

/// Accumulated rotation landing the pointer inside the winner's segment
pub fn winner_rotation_angle<R>(
    winner_index: usize,
    total_candidates: usize,
    extra_spins: u32,
    rng: &mut R,
) -> Result<f64>
where
    R: RandomSource + ?Sized,
{
    let segment = segment_angle(total_candidates)?;
    if winner_index >= total_candidates {
        return Err(WheelError::WinnerIndexOutOfRange {
            index: winner_index,
            total: total_candidates,
        });
    }

    let winner_angle = winner_index as f64 * segment;
    let random_offset = rng.next_unit() * segment * SEGMENT_OFFSET_SPAN;

    Ok(FULL_TURN * f64::from(extra_spins) + winner_angle + random_offset)
}

/// Extra full revolutions for the animation, uniform in {4, 5, 6}
pub fn random_extra_spins<R>(rng: &mut R) -> u32
where
    R: RandomSource + ?Sized,
{
    MIN_EXTRA_SPINS + next_index(rng, EXTRA_SPIN_CHOICES as usize) as u32
}

/// Fisher-Yates shuffle into a new vector, leaving the input untouched
pub fn shuffle<T, R>(items: &[T], rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: RandomSource + ?Sized,
{
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = next_index(rng, i + 1);
        shuffled.swap(i, j);
    }
    shuffled
}

/// Accumulated rotation folded into `[0, 360)`
pub fn normalize_rotation(degrees: f64) -> f64 {
    degrees.rem_euclid(FULL_TURN)
}
