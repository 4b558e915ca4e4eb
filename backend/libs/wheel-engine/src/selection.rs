//! Weighted random draw over candidates
//!
//! Cumulative-weight sampling: one pass builds running sums, one uniform
//! draw in `[0, total)` picks the first candidate whose running sum reaches it.

use crate::models::{BiasMode, Candidate};
use crate::random::RandomSource;
use crate::weights::{compute_weights_at, UNIFORM_WEIGHT};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// Pick one candidate with probability proportional to its weight
///
/// Returns `None` for an empty list. A single candidate is returned without
/// looking at `weights` or touching the random source. When `weights` does
/// not line up with `candidates` the draw falls back to uniform weights.
pub fn draw_winner<'a, R>(
    candidates: &'a [Candidate],
    weights: &[f64],
    rng: &mut R,
) -> Option<&'a Candidate>
where
    R: RandomSource + ?Sized,
{
    match candidates {
        [] => None,
        [only] => Some(only),
        _ if weights.len() != candidates.len() => {
            warn!(
                candidates = candidates.len(),
                weights = weights.len(),
                "Weight count does not match candidates, drawing uniformly"
            );
            let uniform = vec![UNIFORM_WEIGHT; candidates.len()];
            draw_index(&uniform, rng).and_then(|index| candidates.get(index))
        }
        _ => draw_index(weights, rng).and_then(|index| candidates.get(index)),
    }
}

/// Index form of [`draw_winner`]
pub fn draw_index<R>(weights: &[f64], rng: &mut R) -> Option<usize>
where
    R: RandomSource + ?Sized,
{
    match weights.len() {
        0 => return None,
        1 => return Some(0),
        _ => {}
    }

    let mut cumulative = Vec::with_capacity(weights.len());
    let mut running = 0.0_f64;
    for &weight in weights {
        running += weight;
        cumulative.push(running);
    }

    let total_weight = running;
    let target = rng.next_unit() * total_weight;

    let index = cumulative
        .iter()
        .position(|&sum| target <= sum)
        // Rounding at the upper edge falls through to the last candidate
        .unwrap_or(weights.len() - 1);

    debug!(
        candidates = weights.len(),
        total_weight = total_weight,
        target = target,
        winner_index = index,
        "Weighted draw resolved"
    );

    Some(index)
}

/// Weight the candidates for `bias_mode` and draw a winner
pub fn spin<'a, R>(
    candidates: &'a [Candidate],
    bias_mode: BiasMode,
    rng: &mut R,
) -> Option<&'a Candidate>
where
    R: RandomSource + ?Sized,
{
    spin_at(candidates, bias_mode, Utc::now(), rng)
}

/// [`spin`] with an explicit "now" for date weighting
pub fn spin_at<'a, R>(
    candidates: &'a [Candidate],
    bias_mode: BiasMode,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Option<&'a Candidate>
where
    R: RandomSource + ?Sized,
{
    spin_index_at(candidates, bias_mode, now, rng).and_then(|index| candidates.get(index))
}

/// Position of the [`spin_at`] winner within `candidates`
pub fn spin_index_at<R>(
    candidates: &[Candidate],
    bias_mode: BiasMode,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Option<usize>
where
    R: RandomSource + ?Sized,
{
    match candidates {
        [] => None,
        [_] => Some(0),
        _ => {
            let weights = compute_weights_at(candidates, bias_mode, now);
            draw_index(&weights, rng)
        }
    }
}
