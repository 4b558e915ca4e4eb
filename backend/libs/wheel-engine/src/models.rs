use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// How draw probabilities are weighted for a spin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiasMode {
    #[default]
    None,   // 均勻隨機
    Rating, // 依平均評分加權
    Date,   // 依排程日期加權
}

impl BiasMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BiasMode::None => "none",
            BiasMode::Rating => "rating",
            BiasMode::Date => "date",
        }
    }
}

impl fmt::Display for BiasMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySchedule {
    pub start_at: DateTime<Utc>,
    #[serde(default)]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub timezone: Option<String>,
}

impl ActivitySchedule {
    pub fn starting_at(start_at: DateTime<Utc>) -> Self {
        Self {
            start_at,
            end_at: None,
            timezone: None,
        }
    }
}

/// An activity eligible for the wheel draw.
///
/// Field names follow the activity rows returned by the backend, so a
/// candidate can be deserialized straight from a group activity listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: Uuid,
    pub title: String,
    /// `None` until the activity has been rated at least once
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub ratings_count: u32,
    /// Only the first entry is consulted by date weighting
    #[serde(default)]
    pub activity_schedules: Option<Vec<ActivitySchedule>>,
    #[serde(default = "default_include_in_wheel")]
    pub include_in_wheel: bool,
}

fn default_include_in_wheel() -> bool {
    true
}

impl Candidate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            average_rating: None,
            ratings_count: 0,
            activity_schedules: None,
            include_in_wheel: true,
        }
    }

    /// Set a precomputed average rating
    pub fn with_rating(mut self, average_rating: f64, ratings_count: u32) -> Self {
        self.average_rating = Some(average_rating);
        self.ratings_count = ratings_count;
        self
    }

    /// Aggregate raw star ratings into `average_rating` / `ratings_count`
    pub fn with_ratings(mut self, stars: &[u8]) -> Self {
        let summary = RatingSummary::from_stars(stars);
        self.average_rating = summary.average_rating;
        self.ratings_count = summary.ratings_count;
        self
    }

    /// Append a schedule entry
    pub fn with_schedule(mut self, start_at: DateTime<Utc>) -> Self {
        self.activity_schedules
            .get_or_insert_with(Vec::new)
            .push(ActivitySchedule::starting_at(start_at));
        self
    }

    pub fn excluded_from_wheel(mut self) -> Self {
        self.include_in_wheel = false;
        self
    }

    pub fn has_rating(&self) -> bool {
        self.average_rating.is_some()
    }

    pub fn first_schedule(&self) -> Option<&ActivitySchedule> {
        self.activity_schedules.as_deref().and_then(<[_]>::first)
    }

    pub fn has_schedule(&self) -> bool {
        self.first_schedule().is_some()
    }
}

/// Average and count of the star ratings left on an activity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RatingSummary {
    pub average_rating: Option<f64>,
    pub ratings_count: u32,
}

impl RatingSummary {
    pub fn from_stars(stars: &[u8]) -> Self {
        if stars.is_empty() {
            return Self::default();
        }

        let total: f64 = stars.iter().map(|&s| f64::from(s)).sum();
        Self {
            average_rating: Some(total / stars.len() as f64),
            ratings_count: stars.len() as u32,
        }
    }
}

/// Activities flagged for the wheel, in their original order
pub fn eligible_candidates(candidates: &[Candidate]) -> Vec<Candidate> {
    candidates
        .iter()
        .filter(|c| c.include_in_wheel)
        .cloned()
        .collect()
}

/// Position of the winner on the displayed wheel (first match by id)
pub fn winner_index(candidates: &[Candidate], winner_id: Uuid) -> Option<usize> {
    candidates.iter().position(|c| c.id == winner_id)
}
