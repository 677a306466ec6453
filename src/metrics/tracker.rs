//! Per-session fitness aggregation.
//!
//! Collects reps, hold time, posture samples, joint angles and calories for
//! one session and produces value snapshots on demand.

use crate::exercises::ExerciseKind;
use crate::metrics::window::SampleWindow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use uuid::Uuid;

/// Posture samples kept for the quality percentage.
pub const POSTURE_HISTORY_LEN: usize = 100;
/// Body weight used when none is configured.
pub const DEFAULT_BODY_WEIGHT_KG: f32 = 70.0;

/// Immutable snapshot of a session's metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Session identifier
    pub session_id: Uuid,
    /// Wall-clock session start
    pub started_at: DateTime<Utc>,
    /// Active exercise
    pub exercise: ExerciseKind,
    /// Repetitions counted
    pub reps: u32,
    /// Seconds of correct form (one decimal)
    pub time_held_sec: f32,
    /// Mean primary joint angle (one decimal)
    pub average_angle: f32,
    /// Share of good posture samples in percent (one decimal)
    pub posture_quality_percent: f32,
    /// Mean seconds between reps (one decimal)
    pub avg_rep_speed_sec: f32,
    /// Estimated calories (two decimals)
    pub calories_burned: f32,
    /// Whole seconds since the session started
    pub active_time_sec: u64,
}

/// Aggregates metrics for a single session.
#[derive(Debug, Clone)]
pub struct FitnessTracker {
    session_id: Uuid,
    started_at: DateTime<Utc>,
    exercise: ExerciseKind,
    body_weight_kg: f32,
    /// Monotonic session start
    start: Instant,
    reps: u32,
    time_held: f32,
    calories_burned: f32,
    posture_history: SampleWindow,
    /// Seconds between consecutive reps; the first is measured from start
    rep_intervals: Vec<f32>,
    last_rep_at: Instant,
    angle_sum: f64,
    angle_count: u64,
}

fn round_to(value: f32, places: i32) -> f32 {
    let factor = 10f32.powi(places);
    (value * factor).round() / factor
}

impl FitnessTracker {
    /// Start tracking a session at `start`.
    pub fn new(exercise: ExerciseKind, body_weight_kg: f32, start: Instant) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
            exercise,
            body_weight_kg,
            start,
            reps: 0,
            time_held: 0.0,
            calories_burned: 0.0,
            posture_history: SampleWindow::new(POSTURE_HISTORY_LEN),
            rep_intervals: Vec::new(),
            last_rep_at: start,
            angle_sum: 0.0,
            angle_count: 0,
        }
    }

    /// Set the current rep count, recording the interval when it increased.
    pub fn update_reps(&mut self, reps: u32, now: Instant) {
        if reps > self.reps {
            let interval = now.saturating_duration_since(self.last_rep_at);
            self.rep_intervals.push(interval.as_secs_f32());
            self.last_rep_at = now;
        }
        self.reps = reps;
    }

    /// Overwrite the held time. Accumulation is the exercise's job.
    pub fn update_time(&mut self, seconds: f32) {
        self.time_held = seconds;
    }

    /// Append a posture sample (1.0 good, 0.0 bad).
    pub fn update_posture_score(&mut self, score: f32) {
        self.posture_history.push(score);
    }

    /// Recompute calories from the total session duration.
    ///
    /// The result replaces the previous estimate, so the latest intensity
    /// applies to the whole session.
    pub fn update_calories(&mut self, duration_sec: f32, intensity: f32) {
        let hours = duration_sec / 3600.0;
        self.calories_burned = self.exercise.met() * intensity * self.body_weight_kg * hours;
    }

    /// Add a joint angle sample to the session average.
    pub fn record_angle(&mut self, angle: f32) {
        if angle.is_finite() {
            self.angle_sum += angle as f64;
            self.angle_count += 1;
        }
    }

    pub fn reps(&self) -> u32 {
        self.reps
    }

    pub fn time_held(&self) -> f32 {
        self.time_held
    }

    pub fn calories_burned(&self) -> f32 {
        self.calories_burned
    }

    /// Posture samples, oldest first.
    pub fn posture_history(&self) -> impl Iterator<Item = f32> + '_ {
        self.posture_history.iter().copied()
    }

    pub fn rep_intervals(&self) -> &[f32] {
        &self.rep_intervals
    }

    /// Unrounded mean joint angle, 0 when no angle was recorded.
    pub fn average_angle(&self) -> f32 {
        if self.angle_count == 0 {
            0.0
        } else {
            (self.angle_sum / self.angle_count as f64) as f32
        }
    }

    pub fn exercise(&self) -> ExerciseKind {
        self.exercise
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    /// Snapshot of the session at `now`.
    pub fn summary(&self, now: Instant) -> SessionSummary {
        let posture_quality = self.posture_history.mean().unwrap_or(0.0) * 100.0;
        let avg_rep_speed = if self.rep_intervals.is_empty() {
            0.0
        } else {
            self.rep_intervals.iter().sum::<f32>() / self.rep_intervals.len() as f32
        };

        SessionSummary {
            session_id: self.session_id,
            started_at: self.started_at,
            exercise: self.exercise,
            reps: self.reps,
            time_held_sec: round_to(self.time_held, 1),
            average_angle: round_to(self.average_angle(), 1),
            posture_quality_percent: round_to(posture_quality, 1),
            avg_rep_speed_sec: round_to(avg_rep_speed, 1),
            calories_burned: round_to(self.calories_burned, 2),
            active_time_sec: now.saturating_duration_since(self.start).as_secs(),
        }
    }
}
