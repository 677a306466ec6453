//! Chair pose hold timer.

use crate::exercises::hold::HoldTimer;
use crate::exercises::types::{tag_joints, FeedbackMap, FormTag};
use crate::pose::PoseLandmark;
use std::ops::RangeInclusive;
use std::time::Instant;

/// Acceptable hip–knee–ankle angle range.
pub const KNEE_RANGE: RangeInclusive<f32> = 90.0..=120.0;

const JOINTS: [PoseLandmark; 3] = [
    PoseLandmark::LeftHip,
    PoseLandmark::LeftKnee,
    PoseLandmark::LeftAnkle,
];

#[derive(Debug, Clone, Default)]
pub struct ChairPose {
    timer: HoldTimer,
}

impl ChairPose {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_correct(knee_angle: f32) -> bool {
        KNEE_RANGE.contains(&knee_angle)
    }

    /// Advance with the knee angle; returns held seconds and joint feedback.
    pub fn update(&mut self, knee_angle: f32, now: Instant) -> (f32, FeedbackMap) {
        let mut feedback = FeedbackMap::new();
        if !knee_angle.is_finite() {
            return (self.timer.time_held(), feedback);
        }

        let correct = Self::is_correct(knee_angle);
        tag_joints(&mut feedback, &JOINTS, FormTag::from_ok(correct));
        (self.timer.update(correct, now), feedback)
    }

    pub fn timer_mut(&mut self) -> &mut HoldTimer {
        &mut self.timer
    }
}
