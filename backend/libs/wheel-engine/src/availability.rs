use crate::models::{BiasMode, Candidate};
use serde::Serialize;

pub const NO_RATINGS_REASON: &str = "No ratings yet. Will use random selection.";
pub const NO_SCHEDULES_REASON: &str = "No scheduled activities. Will use random selection.";

/// Whether a bias mode will actually differentiate the current candidates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BiasAvailability {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

impl BiasAvailability {
    fn available() -> Self {
        Self {
            available: true,
            reason: None,
        }
    }

    fn unavailable(reason: &'static str) -> Self {
        Self {
            available: false,
            reason: Some(reason),
        }
    }

    fn when(available: bool, reason: &'static str) -> Self {
        if available {
            Self::available()
        } else {
            Self::unavailable(reason)
        }
    }
}

/// Check a bias mode against the candidates without substituting another mode
pub fn check_bias_availability(candidates: &[Candidate], bias_mode: BiasMode) -> BiasAvailability {
    match bias_mode {
        BiasMode::None => BiasAvailability::available(),
        BiasMode::Rating => BiasAvailability::when(
            candidates.iter().any(Candidate::has_rating),
            NO_RATINGS_REASON,
        ),
        BiasMode::Date => BiasAvailability::when(
            candidates.iter().any(Candidate::has_schedule),
            NO_SCHEDULES_REASON,
        ),
    }
}
