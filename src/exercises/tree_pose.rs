//! Tree pose hold timer.
//!
//! The raised leg is measured as hip–knee–wrist: the wrist stands in for the
//! raised ankle, which the hands usually rest near in this pose.

use crate::exercises::hold::HoldTimer;
use crate::exercises::types::{tag_joints, FeedbackMap, FormTag};
use crate::pose::PoseLandmark;
use std::time::Instant;

/// Standing leg must be nearly straight.
pub const MIN_STANDING_ANGLE: f32 = 160.0;
/// Raised leg must be clearly bent.
pub const MAX_RAISED_ANGLE: f32 = 120.0;

const STANDING_JOINTS: [PoseLandmark; 3] = [
    PoseLandmark::LeftHip,
    PoseLandmark::LeftKnee,
    PoseLandmark::LeftAnkle,
];
const RAISED_JOINTS: [PoseLandmark; 1] = [PoseLandmark::LeftWrist];

#[derive(Debug, Clone, Default)]
pub struct TreePose {
    timer: HoldTimer,
}

impl TreePose {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance with both leg angles; returns held seconds and joint feedback.
    pub fn update(
        &mut self,
        standing_leg_angle: f32,
        raised_leg_angle: f32,
        now: Instant,
    ) -> (f32, FeedbackMap) {
        let mut feedback = FeedbackMap::new();
        if !standing_leg_angle.is_finite() || !raised_leg_angle.is_finite() {
            return (self.timer.time_held(), feedback);
        }

        let standing_ok = standing_leg_angle > MIN_STANDING_ANGLE;
        let raised_ok = raised_leg_angle < MAX_RAISED_ANGLE;

        tag_joints(&mut feedback, &STANDING_JOINTS, FormTag::from_ok(standing_ok));
        tag_joints(&mut feedback, &RAISED_JOINTS, FormTag::from_ok(raised_ok));

        (self.timer.update(standing_ok && raised_ok, now), feedback)
    }

    pub fn timer_mut(&mut self) -> &mut HoldTimer {
        &mut self.timer
    }
}
