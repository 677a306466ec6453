//! Plank hold timer.

use crate::exercises::hold::HoldTimer;
use crate::exercises::types::{tag_joints, FeedbackMap, FormTag};
use crate::pose::PoseLandmark;
use std::time::Instant;

/// Shoulder–hip–ankle angle above which the body counts as straight.
pub const MIN_BODY_ANGLE: f32 = 160.0;

const JOINTS: [PoseLandmark; 3] = [
    PoseLandmark::LeftShoulder,
    PoseLandmark::LeftHip,
    PoseLandmark::LeftAnkle,
];

#[derive(Debug, Clone, Default)]
pub struct Plank {
    timer: HoldTimer,
}

impl Plank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the body line is straight enough.
    pub fn is_correct(body_angle: f32) -> bool {
        body_angle > MIN_BODY_ANGLE
    }

    /// Advance with the body angle; returns held seconds and joint feedback.
    pub fn update(&mut self, body_angle: f32, now: Instant) -> (f32, FeedbackMap) {
        let mut feedback = FeedbackMap::new();
        if !body_angle.is_finite() {
            return (self.timer.time_held(), feedback);
        }

        let correct = Self::is_correct(body_angle);
        tag_joints(&mut feedback, &JOINTS, FormTag::from_ok(correct));
        (self.timer.update(correct, now), feedback)
    }

    pub fn timer_mut(&mut self) -> &mut HoldTimer {
        &mut self.timer
    }

    pub fn time_held(&self) -> f32 {
        self.timer.time_held()
    }
}
