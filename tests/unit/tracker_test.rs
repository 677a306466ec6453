//! Unit tests for session aggregation.

use formcoach::exercises::ExerciseKind;
use formcoach::metrics::{FitnessTracker, POSTURE_HISTORY_LEN};
use std::time::{Duration, Instant};

#[test]
fn test_posture_history_keeps_latest_100() {
    let mut tracker = FitnessTracker::new(ExerciseKind::Squat, 70.0, Instant::now());
    for i in 0..105 {
        tracker.update_posture_score(i as f32);
    }

    let history: Vec<f32> = tracker.posture_history().collect();
    assert_eq!(history.len(), POSTURE_HISTORY_LEN);
    assert_eq!(history.first(), Some(&5.0));
    assert_eq!(history.last(), Some(&104.0));
}

#[test]
fn test_update_time_overwrites() {
    let mut tracker = FitnessTracker::new(ExerciseKind::Plank, 70.0, Instant::now());
    tracker.update_time(12.0);
    tracker.update_time(3.0);
    assert_eq!(tracker.time_held(), 3.0);
}

#[test]
fn test_update_reps_is_idempotent() {
    let start = Instant::now();
    let mut tracker = FitnessTracker::new(ExerciseKind::PushUp, 70.0, start);

    tracker.update_reps(1, start + Duration::from_secs(2));
    tracker.update_reps(1, start + Duration::from_secs(3));
    tracker.update_reps(1, start + Duration::from_secs(4));

    assert_eq!(tracker.reps(), 1);
    assert_eq!(tracker.rep_intervals().len(), 1);
}

#[test]
fn test_calories_scale_with_weight_and_met() {
    let mut light = FitnessTracker::new(ExerciseKind::HighKnees, 50.0, Instant::now());
    let mut heavy = FitnessTracker::new(ExerciseKind::HighKnees, 100.0, Instant::now());

    light.update_calories(360.0, 1.5);
    heavy.update_calories(360.0, 1.5);

    // 10 MET * 1.5 * 50 kg * 0.1 h
    assert!((light.calories_burned() - 75.0).abs() < 1e-3);
    assert!((heavy.calories_burned() - 2.0 * light.calories_burned()).abs() < 1e-3);
}

#[test]
fn test_met_table() {
    assert_eq!(ExerciseKind::Squat.met(), 5.0);
    assert_eq!(ExerciseKind::PushUp.met(), 8.0);
    assert_eq!(ExerciseKind::Plank.met(), 3.0);
    assert_eq!(ExerciseKind::HighKnees.met(), 10.0);
    assert_eq!(ExerciseKind::ChairPose.met(), 3.0);
    assert_eq!(ExerciseKind::TreePose.met(), 2.5);
    assert_eq!(ExerciseKind::WarriorPose.met(), 3.0);
    assert_eq!(ExerciseKind::Meditation.met(), 3.0);
}

#[test]
fn test_summary_serializes_exercise_id() {
    let start = Instant::now();
    let tracker = FitnessTracker::new(ExerciseKind::ChairPose, 70.0, start);
    let summary = tracker.summary(start + Duration::from_millis(2900));

    assert_eq!(summary.active_time_sec, 2);
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["exercise"], "chair_pose");
    assert_eq!(json["reps"], 0);
}
