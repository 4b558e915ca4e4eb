// ============================================
// Bias Weights (偏好權重)
// ============================================
//
// Maps a candidate list + bias mode to one weight per candidate.
//
// none:   every candidate weighs 1
// rating: rated candidates weigh their average rating, unrated ones weigh
//         the mean of the rated candidates (3.0 if none qualify)
// date:   tiers on days until the first scheduled start
//
//   no schedule      0.5
//   past             0.2
//   [0, 1] days      5.0
//   (1, 7] days      3.0
//   (7, 30] days     exp(-days / 10)
//   > 30 days        0.3
//
// The tiers are fixed domain constants. The jumps at 7 and 30 days are
// existing behavior and are kept as-is.

use crate::models::{BiasMode, Candidate};
use chrono::{DateTime, Utc};
use tracing::debug;

pub const UNIFORM_WEIGHT: f64 = 1.0;
pub const BASELINE_RATING: f64 = 3.0;

pub const UNSCHEDULED_WEIGHT: f64 = 0.5;
pub const PAST_WEIGHT: f64 = 0.2;
pub const IMMINENT_WEIGHT: f64 = 5.0;
pub const THIS_WEEK_WEIGHT: f64 = 3.0;
pub const FAR_FUTURE_WEIGHT: f64 = 0.3;
pub const DATE_DECAY_DAYS: f64 = 10.0;

const MILLIS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;

/// Compute weights relative to the current instant
pub fn compute_weights(candidates: &[Candidate], bias_mode: BiasMode) -> Vec<f64> {
    compute_weights_at(candidates, bias_mode, Utc::now())
}

/// Compute weights with an explicit "now" for date weighting
pub fn compute_weights_at(
    candidates: &[Candidate],
    bias_mode: BiasMode,
    now: DateTime<Utc>,
) -> Vec<f64> {
    let weights = match bias_mode {
        BiasMode::None => uniform_weights(candidates),
        BiasMode::Rating => rating_weights(candidates),
        BiasMode::Date => date_weights(candidates, now),
    };

    debug!(
        bias_mode = %bias_mode,
        candidates = candidates.len(),
        total_weight = weights.iter().sum::<f64>(),
        "Bias weights computed"
    );

    weights
}

fn uniform_weights(candidates: &[Candidate]) -> Vec<f64> {
    vec![UNIFORM_WEIGHT; candidates.len()]
}

fn rating_weights(candidates: &[Candidate]) -> Vec<f64> {
    if !candidates.iter().any(Candidate::has_rating) {
        return uniform_weights(candidates);
    }

    // Mean over every non-null rating, zeros included
    let rated: Vec<f64> = candidates.iter().filter_map(|c| c.average_rating).collect();
    let group_average = if rated.is_empty() {
        BASELINE_RATING
    } else {
        rated.iter().sum::<f64>() / rated.len() as f64
    };

    candidates
        .iter()
        .map(|candidate| match candidate.average_rating {
            Some(rating) if rating > 0.0 => rating,
            _ => group_average,
        })
        .collect()
}

fn date_weights(candidates: &[Candidate], now: DateTime<Utc>) -> Vec<f64> {
    if !candidates.iter().any(Candidate::has_schedule) {
        return uniform_weights(candidates);
    }

    candidates
        .iter()
        .map(|candidate| match candidate.first_schedule() {
            Some(schedule) => date_weight(days_until(schedule.start_at, now)),
            None => UNSCHEDULED_WEIGHT,
        })
        .collect()
}

/// Fractional days from `now` until `start_at` (negative when past)
pub fn days_until(start_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (start_at - now).num_milliseconds() as f64 / MILLIS_PER_DAY
}

/// Weight for an event `days_away` days from now
pub fn date_weight(days_away: f64) -> f64 {
    if days_away < 0.0 {
        PAST_WEIGHT
    } else if days_away <= 1.0 {
        IMMINENT_WEIGHT
    } else if days_away <= 7.0 {
        THIS_WEEK_WEIGHT
    } else if days_away <= 30.0 {
        (-days_away / DATE_DECAY_DAYS).exp()
    } else {
        FAR_FUTURE_WEIGHT
    }
}
