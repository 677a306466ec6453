//! Squat repetition counter.

use crate::exercises::rep::RepCounter;
use crate::exercises::types::{tag_joints, FeedbackMap, FormTag, RepPhase};
use crate::pose::PoseLandmark;

/// Knee angle below which the squat is in the bottom phase.
pub const DOWN_ANGLE: f32 = 90.0;
/// Knee angle above which the squat is standing again.
pub const UP_ANGLE: f32 = 160.0;
/// Knee angle below which the squat is too deep.
pub const TOO_DEEP_ANGLE: f32 = 70.0;

const JOINTS: [PoseLandmark; 3] = [
    PoseLandmark::LeftHip,
    PoseLandmark::LeftKnee,
    PoseLandmark::LeftAnkle,
];

/// Counts squats from the hip–knee–ankle angle.
#[derive(Debug, Clone)]
pub struct Squat {
    counter: RepCounter,
}

impl Default for Squat {
    fn default() -> Self {
        Self::new()
    }
}

impl Squat {
    pub fn new() -> Self {
        Self {
            counter: RepCounter::new(DOWN_ANGLE, UP_ANGLE),
        }
    }

    /// Advance with the knee angle; returns the rep count and joint feedback.
    pub fn update(&mut self, knee_angle: f32) -> (u32, FeedbackMap) {
        let mut feedback = FeedbackMap::new();
        if !knee_angle.is_finite() {
            return (self.counter.reps(), feedback);
        }

        tag_joints(&mut feedback, &JOINTS, FormTag::from_ok(knee_angle >= TOO_DEEP_ANGLE));
        (self.counter.update(knee_angle), feedback)
    }

    pub fn reps(&self) -> u32 {
        self.counter.reps()
    }

    pub fn phase(&self) -> RepPhase {
        self.counter.phase()
    }
}
