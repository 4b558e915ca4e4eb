//! Spin session driving the wheel screen
//!
//! State transitions:
//! - Ready → Spinning: `request_spin` / `spin_with` draws the winner up front
//! - Spinning → Result: `complete_spin`, called when the animation finishes
//! - Result → Ready: `reset` ("spin again")
//!
//! The session never waits on anything; the presentation layer owns timing.

use crate::availability::check_bias_availability;
use crate::error::{Result, WheelError};
use crate::models::{eligible_candidates, BiasMode, Candidate};
use crate::random::RandomSource;
use crate::rotation::{random_extra_spins, winner_rotation_angle};
use crate::selection::spin_index_at;
use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{info, warn};

pub const DEFAULT_SPIN_DURATION_MS: u64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelState {
    /// Waiting for the user to spin
    Ready,
    /// Winner chosen, animation running
    Spinning,
    /// Animation finished, winner shown
    Result,
}

impl WheelState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WheelState::Ready => "ready",
            WheelState::Spinning => "spinning",
            WheelState::Result => "result",
        }
    }
}

impl fmt::Display for WheelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the animation needs to land on the winner
#[derive(Debug, Clone, PartialEq)]
pub struct SpinPlan {
    pub winner: Candidate,
    pub winner_index: usize,
    pub extra_spins: u32,
    /// Raw accumulated degrees to animate to
    pub target_rotation: f64,
    pub duration_ms: u64,
}

/// Outcome of asking the session to spin
#[derive(Debug, Clone, PartialEq)]
pub enum SpinRequest {
    Started(SpinPlan),
    /// Nothing on the wheel; state stays `Ready`
    NoCandidates,
    /// Requested bias cannot differentiate candidates; state stays `Ready`
    BiasUnavailable {
        bias_mode: BiasMode,
        reason: &'static str,
    },
}

pub struct WheelSession<R: RandomSource> {
    candidates: Vec<Candidate>,
    rng: R,
    state: WheelState,
    winner: Option<Candidate>,
    spin_duration_ms: u64,
}

impl<R: RandomSource> WheelSession<R> {
    /// Start a session over the activities flagged for the wheel
    pub fn new(activities: &[Candidate], rng: R) -> Self {
        Self {
            candidates: eligible_candidates(activities),
            rng,
            state: WheelState::Ready,
            winner: None,
            spin_duration_ms: DEFAULT_SPIN_DURATION_MS,
        }
    }

    pub fn with_spin_duration(mut self, duration_ms: u64) -> Self {
        self.spin_duration_ms = duration_ms;
        self
    }

    pub fn state(&self) -> WheelState {
        self.state
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn winner(&self) -> Option<&Candidate> {
        self.winner.as_ref()
    }

    /// Replace the wheel contents after activities were reloaded
    pub fn reload(&mut self, activities: &[Candidate]) -> Result<()> {
        if self.state == WheelState::Spinning {
            return Err(self.invalid("reload"));
        }
        self.candidates = eligible_candidates(activities);
        Ok(())
    }

    /// Spin with `bias_mode`, refusing when the bias is not actionable
    pub fn request_spin(&mut self, bias_mode: BiasMode) -> Result<SpinRequest> {
        self.ensure_ready("spin")?;

        if self.candidates.is_empty() {
            return Ok(SpinRequest::NoCandidates);
        }

        let check = check_bias_availability(&self.candidates, bias_mode);
        if let (false, Some(reason)) = (check.available, check.reason) {
            warn!(
                bias_mode = %bias_mode,
                candidates = self.candidates.len(),
                reason = reason,
                "Bias mode not available"
            );
            return Ok(SpinRequest::BiasUnavailable { bias_mode, reason });
        }

        self.spin_with(bias_mode)
    }

    /// Spin with `bias_mode` unconditionally (e.g. "use random instead")
    pub fn spin_with(&mut self, bias_mode: BiasMode) -> Result<SpinRequest> {
        self.spin_with_at(bias_mode, Utc::now())
    }

    /// [`Self::spin_with`] with an explicit "now" for date weighting
    pub fn spin_with_at(
        &mut self,
        bias_mode: BiasMode,
        now: DateTime<Utc>,
    ) -> Result<SpinRequest> {
        self.ensure_ready("spin")?;

        let drawn = spin_index_at(&self.candidates, bias_mode, now, &mut self.rng)
            .and_then(|index| self.candidates.get(index).map(|winner| (index, winner.clone())));
        let (index, winner) = match drawn {
            Some(drawn) => drawn,
            None => return Ok(SpinRequest::NoCandidates),
        };
        let extra_spins = random_extra_spins(&mut self.rng);
        let target_rotation =
            winner_rotation_angle(index, self.candidates.len(), extra_spins, &mut self.rng)?;

        self.state = WheelState::Spinning;
        self.winner = Some(winner.clone());

        info!(
            bias_mode = %bias_mode,
            winner_id = %winner.id,
            winner_index = index,
            extra_spins = extra_spins,
            target_rotation = target_rotation,
            "Wheel spinning"
        );

        Ok(SpinRequest::Started(SpinPlan {
            winner,
            winner_index: index,
            extra_spins,
            target_rotation,
            duration_ms: self.spin_duration_ms,
        }))
    }

    /// Animation finished: show the winner
    pub fn complete_spin(&mut self) -> Result<&Candidate> {
        if self.state != WheelState::Spinning {
            return Err(self.invalid("complete spin"));
        }
        self.state = WheelState::Result;

        let winner = self.winner.as_ref().ok_or(WheelError::InvalidTransition {
            from: WheelState::Spinning,
            action: "complete spin",
        })?;
        info!(winner_id = %winner.id, "Wheel stopped");
        Ok(winner)
    }

    /// "Spin again": clear the winner and return to `Ready`
    pub fn reset(&mut self) -> Result<()> {
        if self.state != WheelState::Result {
            return Err(self.invalid("reset"));
        }
        self.winner = None;
        self.state = WheelState::Ready;
        info!("Wheel reset");
        Ok(())
    }

    fn ensure_ready(&self, action: &'static str) -> Result<()> {
        if self.state == WheelState::Ready {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> WheelError {
        WheelError::InvalidTransition {
            from: self.state,
            action,
        }
    }
}
