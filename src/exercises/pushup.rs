//! Push-up repetition counter.

use crate::exercises::rep::RepCounter;
use crate::exercises::types::{tag_joints, FeedbackMap, FormTag};
use crate::pose::PoseLandmark;

pub const DOWN_ANGLE: f32 = 90.0;
pub const UP_ANGLE: f32 = 160.0;
/// Elbow angle below which the push-up has collapsed.
pub const COLLAPSED_ANGLE: f32 = 60.0;

const JOINTS: [PoseLandmark; 3] = [
    PoseLandmark::LeftShoulder,
    PoseLandmark::LeftElbow,
    PoseLandmark::LeftWrist,
];

/// Counts push-ups from the shoulder–elbow–wrist angle.
#[derive(Debug, Clone)]
pub struct PushUp {
    counter: RepCounter,
}

impl Default for PushUp {
    fn default() -> Self {
        Self::new()
    }
}

impl PushUp {
    pub fn new() -> Self {
        Self {
            counter: RepCounter::new(DOWN_ANGLE, UP_ANGLE),
        }
    }

    /// Advance with the elbow angle; returns the rep count and joint feedback.
    pub fn update(&mut self, elbow_angle: f32) -> (u32, FeedbackMap) {
        let mut feedback = FeedbackMap::new();
        if !elbow_angle.is_finite() {
            return (self.counter.reps(), feedback);
        }

        tag_joints(
            &mut feedback,
            &JOINTS,
            FormTag::from_ok(elbow_angle >= COLLAPSED_ANGLE),
        );
        (self.counter.update(elbow_angle), feedback)
    }

    pub fn reps(&self) -> u32 {
        self.counter.reps()
    }
}
