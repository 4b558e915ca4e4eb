use crate::config::WheelConfig;
use crate::error::Result;
use crate::models::{BiasMode, Candidate};
use crate::random::{ConfiguredRandom, RandomSource, ThreadRandom};
use crate::rotation::{random_extra_spins, shuffle, winner_rotation_angle};
use crate::selection::spin_at;
use crate::session::WheelSession;
use chrono::{DateTime, Utc};

/// Selection engine bound to a random source
///
/// Thin context object over the free functions so callers hand the random
/// capability over once instead of on every call.
pub struct WheelEngine<R: RandomSource> {
    rng: R,
    config: WheelConfig,
}

impl WheelEngine<ThreadRandom> {
    pub fn new() -> Self {
        Self::with_random(ThreadRandom)
    }
}

impl Default for WheelEngine<ThreadRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl WheelEngine<ConfiguredRandom> {
    /// Seeded when `rng_seed` is set, thread entropy otherwise
    pub fn from_config(config: WheelConfig) -> Self {
        Self {
            rng: ConfiguredRandom::from_seed(config.rng_seed),
            config,
        }
    }
}

impl<R: RandomSource> WheelEngine<R> {
    pub fn with_random(rng: R) -> Self {
        Self {
            rng,
            config: WheelConfig::default(),
        }
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    /// Spin with the configured default bias mode
    pub fn spin_default<'a>(&mut self, candidates: &'a [Candidate]) -> Option<&'a Candidate> {
        self.spin(candidates, self.config.default_bias_mode)
    }

    pub fn spin<'a>(
        &mut self,
        candidates: &'a [Candidate],
        bias_mode: BiasMode,
    ) -> Option<&'a Candidate> {
        self.spin_at(candidates, bias_mode, Utc::now())
    }

    pub fn spin_at<'a>(
        &mut self,
        candidates: &'a [Candidate],
        bias_mode: BiasMode,
        now: DateTime<Utc>,
    ) -> Option<&'a Candidate> {
        spin_at(candidates, bias_mode, now, &mut self.rng)
    }

    pub fn extra_spins(&mut self) -> u32 {
        random_extra_spins(&mut self.rng)
    }

    pub fn rotation_for(
        &mut self,
        winner_index: usize,
        total_candidates: usize,
        extra_spins: u32,
    ) -> Result<f64> {
        winner_rotation_angle(winner_index, total_candidates, extra_spins, &mut self.rng)
    }

    pub fn shuffle(&mut self, candidates: &[Candidate]) -> Vec<Candidate> {
        shuffle(candidates, &mut self.rng)
    }

    /// Hand the random source over to a spin session
    pub fn into_session(self, activities: &[Candidate]) -> WheelSession<R> {
        let duration = self.config.spin_duration_ms;
        WheelSession::new(activities, self.rng).with_spin_duration(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandom;

    #[test]
    fn test_seeded_config_reproduces_draws() {
        let candidates: Vec<Candidate> =
            (0..6).map(|i| Candidate::new(format!("c{i}"))).collect();
        let config = WheelConfig {
            rng_seed: Some(99),
            ..Default::default()
        };

        let mut first = WheelEngine::from_config(config.clone());
        let mut second = WheelEngine::from_config(config);

        for _ in 0..50 {
            let a = first.spin(&candidates, BiasMode::None).unwrap().id;
            let b = second.spin(&candidates, BiasMode::None).unwrap().id;
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_default_bias_from_config() {
        let candidates = vec![
            Candidate::new("loved").with_rating(5.0, 3),
            Candidate::new("hated").with_rating(0.0001, 3),
        ];
        let config = WheelConfig {
            default_bias_mode: BiasMode::Rating,
            rng_seed: Some(1),
            ..Default::default()
        };
        let mut engine = WheelEngine::from_config(config);

        let loved = (0..1000)
            .filter(|_| engine.spin_default(&candidates).unwrap().title == "loved")
            .count();
        assert!(loved > 990, "loved = {loved}");
    }

    #[test]
    fn test_session_inherits_duration() {
        let config = WheelConfig {
            spin_duration_ms: 800,
            rng_seed: Some(5),
            ..Default::default()
        };
        let candidates = vec![Candidate::new("a"), Candidate::new("b")];
        let mut session = WheelEngine::from_config(config).into_session(&candidates);

        match session.spin_with(BiasMode::None).unwrap() {
            crate::session::SpinRequest::Started(plan) => assert_eq!(plan.duration_ms, 800),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_engine_utilities() {
        let mut engine = WheelEngine::with_random(SeededRandom::new(8));
        let candidates = vec![Candidate::new("a"), Candidate::new("b"), Candidate::new("c")];

        assert!((4..=6).contains(&engine.extra_spins()));
        assert_eq!(engine.shuffle(&candidates).len(), 3);
        assert!(engine.rotation_for(1, 3, 5).unwrap() >= 1800.0 + 120.0);
    }
}
