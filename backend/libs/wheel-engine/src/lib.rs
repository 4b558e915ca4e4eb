//! Wheel Decider selection engine
//!
//! Picks an activity for a group by spinning a wheel:
//! - **Bias weights**: uniform, rating-weighted or date-weighted candidate weights
//! - **Weighted draw**: cumulative-weight sampling over the candidates
//! - **Bias availability**: whether a bias mode can differentiate the candidates
//! - **Rotation**: target angle, extra spins and shuffle for the wheel animation
//! - **Session**: `ready → spinning → result` flow for the wheel screen
//!
//! All randomness goes through [`RandomSource`], so draws can be seeded or mocked.
//!
//! # Example
//!
//! ```rust
//! use wheel_engine::{spin, BiasMode, Candidate, SeededRandom};
//!
//! let activities = vec![
//!     Candidate::new("Bowling").with_ratings(&[5, 4]),
//!     Candidate::new("Picnic"),
//! ];
//! let mut rng = SeededRandom::new(7);
//!
//! let winner = spin(&activities, BiasMode::Rating, &mut rng).unwrap();
//! assert!(activities.iter().any(|a| a.id == winner.id));
//! ```

pub mod availability;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod random;
pub mod rotation;
pub mod selection;
pub mod session;
pub mod weights;

// Re-export main types for convenience
pub use availability::{check_bias_availability, BiasAvailability};
pub use config::WheelConfig;
pub use engine::WheelEngine;
pub use error::{Result, WheelError};
pub use models::{
    eligible_candidates, winner_index, ActivitySchedule, BiasMode, Candidate, RatingSummary,
};
pub use random::{ConfiguredRandom, RandomSource, SeededRandom, ThreadRandom};
pub use rotation::{normalize_rotation, random_extra_spins, shuffle, winner_rotation_angle};
pub use selection::{draw_winner, spin, spin_at, spin_index_at};
pub use session::{SpinPlan, SpinRequest, WheelSession, WheelState};
pub use weights::{compute_weights, compute_weights_at};
