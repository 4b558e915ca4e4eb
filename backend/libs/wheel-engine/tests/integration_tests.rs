//! Integration tests for the wheel engine

use chrono::{Duration, Utc};
use std::collections::HashSet;
use wheel_engine::{
    check_bias_availability, compute_weights, compute_weights_at, draw_winner, eligible_candidates,
    normalize_rotation, random_extra_spins, shuffle, spin, spin_at, winner_index,
    winner_rotation_angle, BiasMode, Candidate, RandomSource, SeededRandom, SpinRequest,
    WheelEngine, WheelError, WheelSession, WheelState,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Always returns the same unit value and counts calls
struct FixedRandom {
    value: f64,
    calls: usize,
}

impl FixedRandom {
    fn new(value: f64) -> Self {
        Self { value, calls: 0 }
    }
}

impl RandomSource for FixedRandom {
    fn next_unit(&mut self) -> f64 {
        self.calls += 1;
        self.value
    }
}

fn group_activities() -> Vec<Candidate> {
    let rows = serde_json::json!([
        {
            "id": "6b1f0c2a-1d2e-4f3a-9b8c-7d6e5f4a3b2c",
            "title": "Board game night",
            "average_rating": 4.5,
            "ratings_count": 2,
            "activity_schedules": [],
            "include_in_wheel": true
        },
        {
            "id": "0e9d8c7b-6a5f-4e3d-2c1b-0a9f8e7d6c5b",
            "title": "Rock climbing",
            "average_rating": null,
            "ratings_count": 0,
            "activity_schedules": null,
            "include_in_wheel": true
        },
        {
            "id": "1a2b3c4d-5e6f-4a7b-8c9d-0e1f2a3b4c5d",
            "title": "Wine tasting",
            "average_rating": 1.5,
            "ratings_count": 4,
            "include_in_wheel": false
        }
    ]);
    serde_json::from_value(rows).unwrap()
}

// ==================== Selection ====================

#[test]
fn test_spin_winner_is_member_for_every_mode() {
    init_tracing();
    let activities = group_activities();
    let mut rng = SeededRandom::new(17);

    for mode in [BiasMode::None, BiasMode::Rating, BiasMode::Date] {
        for _ in 0..200 {
            let winner = spin(&activities, mode, &mut rng).unwrap();
            assert!(activities.contains(winner));
        }
    }
}

#[test]
fn test_empty_and_single_candidate() {
    let mut rng = FixedRandom::new(0.3);

    for mode in [BiasMode::None, BiasMode::Rating, BiasMode::Date] {
        assert!(spin(&[], mode, &mut rng).is_none());
    }

    let single = vec![Candidate::new("Only option").with_schedule(Utc::now())];
    for mode in [BiasMode::None, BiasMode::Rating, BiasMode::Date] {
        assert_eq!(spin(&single, mode, &mut rng), Some(&single[0]));
    }

    assert_eq!(rng.calls, 0);
}

#[test]
fn test_draw_winner_never_empty_for_non_empty_list() {
    let only = vec![Candidate::new("Only option")];
    let mut rng = FixedRandom::new(0.6);

    assert_eq!(draw_winner(&only, &[], &mut rng), Some(&only[0]));
    assert_eq!(rng.calls, 0);

    let pair = vec![Candidate::new("a"), Candidate::new("b")];
    for weights in [&[1.0][..], &[1.0, 1.0, 1.0][..]] {
        let winner = draw_winner(&pair, weights, &mut rng).unwrap();
        assert!(pair.contains(winner));
    }
}

#[test]
fn test_weighted_draw_three_to_one() {
    let candidates = vec![Candidate::new("three"), Candidate::new("one")];
    let weights = [3.0, 1.0];
    let mut rng = SeededRandom::new(100_000);

    let draws = 100_000;
    let mut first = 0;
    for _ in 0..draws {
        if draw_winner(&candidates, &weights, &mut rng).unwrap().title == "three" {
            first += 1;
        }
    }

    let share = first as f64 / draws as f64;
    assert!((0.74..0.76).contains(&share), "share = {share}");
}

// ==================== Weights ====================

#[test]
fn test_rating_weights_scenario() {
    let candidates = vec![
        Candidate::new("five").with_ratings(&[5, 5]),
        Candidate::new("unrated"),
        Candidate::new("one").with_ratings(&[1]),
    ];

    assert_eq!(compute_weights(&candidates, BiasMode::Rating), vec![5.0, 3.0, 1.0]);

    let unrated = vec![Candidate::new("a"), Candidate::new("b")];
    assert_eq!(compute_weights(&unrated, BiasMode::Rating), vec![1.0, 1.0]);
}

#[test]
fn test_date_weights_scenario() {
    let now = Utc::now();
    let candidates = vec![
        Candidate::new("in 12 hours").with_schedule(now + Duration::hours(12)),
        Candidate::new("in 3 days").with_schedule(now + Duration::days(3)),
        Candidate::new("in 20 days").with_schedule(now + Duration::days(20)),
        Candidate::new("yesterday").with_schedule(now - Duration::days(1)),
        Candidate::new("unscheduled"),
    ];

    let weights = compute_weights_at(&candidates, BiasMode::Date, now);

    assert_eq!(weights.len(), candidates.len());
    assert_eq!(weights[0], 5.0);
    assert_eq!(weights[1], 3.0);
    assert!((weights[2] - (-20.0f64 / 10.0).exp()).abs() < 1e-6);
    assert_eq!(weights[3], 0.2);
    assert_eq!(weights[4], 0.5);
}

#[test]
fn test_date_bias_shifts_probability_towards_soon() {
    let now = Utc::now();
    let candidates = vec![
        Candidate::new("tonight").with_schedule(now + Duration::hours(3)),
        Candidate::new("last month").with_schedule(now - Duration::days(30)),
    ];
    let mut rng = SeededRandom::new(9);

    let tonight = (0..10_000)
        .filter_map(|_| spin_at(&candidates, BiasMode::Date, now, &mut rng))
        .filter(|winner| winner.title == "tonight")
        .count();

    // Expected 5.0 / 5.2 ≈ 96%
    assert!(tonight > 9_400, "tonight = {tonight}");
}

// ==================== Availability ====================

#[test]
fn test_bias_availability() {
    let unrated = vec![Candidate::new("a"), Candidate::new("b")];
    let check = check_bias_availability(&unrated, BiasMode::Rating);
    assert!(!check.available);
    assert!(check.reason.is_some_and(|r| !r.is_empty()));

    let activities = group_activities();
    let check = check_bias_availability(&activities, BiasMode::Rating);
    assert!(check.available);
    assert!(check.reason.is_none());

    // Empty schedule lists do not count as scheduled
    let check = check_bias_availability(&activities, BiasMode::Date);
    assert!(!check.available);
}

// ==================== Rotation ====================

#[test]
fn test_winner_rotation_examples() {
    assert_eq!(
        winner_rotation_angle(2, 5, 4, &mut FixedRandom::new(0.0)),
        Ok(1584.0)
    );

    let max = winner_rotation_angle(2, 5, 4, &mut FixedRandom::new(1.0)).unwrap();
    assert!((max - 1641.6).abs() < 1e-9);

    assert_eq!(
        winner_rotation_angle(0, 0, 4, &mut FixedRandom::new(0.0)),
        Err(WheelError::InvalidSegmentCount)
    );
}

#[test]
fn test_rotation_bounds_with_random_offsets() {
    let mut rng = SeededRandom::new(21);
    for _ in 0..1000 {
        let extra = random_extra_spins(&mut rng);
        let rotation = winner_rotation_angle(3, 7, extra, &mut rng).unwrap();
        let segment = 360.0 / 7.0;
        let base = 360.0 * extra as f64 + 3.0 * segment;
        assert!(rotation >= base && rotation < base + segment);
        assert!(normalize_rotation(rotation) < 360.0);
    }
}

#[test]
fn test_extra_spins_cover_all_values() {
    let mut rng = SeededRandom::new(4);
    let seen: HashSet<u32> = (0..300).map(|_| random_extra_spins(&mut rng)).collect();
    assert_eq!(seen, HashSet::from([4, 5, 6]));
}

#[test]
fn test_shuffle_is_permutation() {
    let activities: Vec<Candidate> = (0..10).map(|i| Candidate::new(format!("#{i}"))).collect();
    let before = activities.clone();
    let mut rng = SeededRandom::new(12);

    let shuffled = shuffle(&activities, &mut rng);

    assert_eq!(activities, before);
    let original_ids: HashSet<_> = activities.iter().map(|a| a.id).collect();
    let shuffled_ids: HashSet<_> = shuffled.iter().map(|a| a.id).collect();
    assert_eq!(shuffled.len(), activities.len());
    assert_eq!(original_ids, shuffled_ids);
}

// ==================== Session ====================

#[test]
fn test_wheel_screen_flow() {
    init_tracing();
    let activities = group_activities();
    assert_eq!(eligible_candidates(&activities).len(), 2);

    let mut session = WheelSession::new(&activities, SeededRandom::new(77));

    // Date bias is not actionable: the screen offers random instead
    let request = session.request_spin(BiasMode::Date).unwrap();
    assert!(matches!(request, SpinRequest::BiasUnavailable { .. }));
    assert_eq!(session.state(), WheelState::Ready);

    let plan = match session.spin_with(BiasMode::None).unwrap() {
        SpinRequest::Started(plan) => plan,
        other => panic!("unexpected {:?}", other),
    };
    assert_eq!(session.state(), WheelState::Spinning);
    assert_eq!(
        winner_index(session.candidates(), plan.winner.id),
        Some(plan.winner_index)
    );

    let segment = 360.0 / session.candidates().len() as f64;
    let base = 360.0 * plan.extra_spins as f64 + plan.winner_index as f64 * segment;
    assert!(plan.target_rotation >= base && plan.target_rotation < base + segment);

    let shown = session.complete_spin().unwrap().id;
    assert_eq!(shown, plan.winner.id);
    assert_eq!(session.state(), WheelState::Result);

    session.reset().unwrap();
    assert!(matches!(
        session.request_spin(BiasMode::Rating).unwrap(),
        SpinRequest::Started(_)
    ));
}

#[test]
fn test_engine_context_object() {
    let mut engine = WheelEngine::with_random(SeededRandom::new(3));
    let activities = group_activities();

    let winner = engine.spin(&activities, BiasMode::Rating).unwrap();
    assert!(activities.contains(winner));
    assert!((4..=6).contains(&engine.extra_spins()));
    assert_eq!(engine.shuffle(&activities).len(), activities.len());
}
