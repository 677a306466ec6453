//! Warrior II pose checker.
//!
//! Three independent checks must all pass: arms level with the shoulders,
//! a wide stance, and exactly one knee bent near 90° with the other leg
//! straight. Time is derived from a count of correct frames at an assumed
//! input rate, so reported seconds drift when the real frame rate differs.

use crate::exercises::types::{WarriorFeedback, WarriorReading};
use crate::pose::{angle, Pose, PoseLandmark};

/// Max vertical gap between shoulder and wrist for level arms.
pub const MAX_ARM_DROP: f32 = 0.1;
/// Minimum ankle-to-ankle distance in normalized units.
pub const MIN_STANCE_WIDTH: f32 = 0.4;
/// Exclusive bounds for the bent front knee.
pub const BENT_KNEE_MIN: f32 = 80.0;
pub const BENT_KNEE_MAX: f32 = 110.0;
/// The back knee must exceed this angle.
pub const STRAIGHT_KNEE_MIN: f32 = 160.0;

#[derive(Debug, Clone)]
pub struct WarriorPose {
    correct_frames: u64,
    assumed_fps: f32,
}

impl WarriorPose {
    /// Create a checker that converts frames to seconds at `assumed_fps`.
    pub fn new(assumed_fps: f32) -> Self {
        Self {
            correct_frames: 0,
            assumed_fps: if assumed_fps > 0.0 { assumed_fps } else { 30.0 },
        }
    }

    fn bent(angle: f32) -> bool {
        angle > BENT_KNEE_MIN && angle < BENT_KNEE_MAX
    }

    /// Evaluate one frame. Returns `None` when a knee angle is undefined.
    pub fn update(&mut self, pose: &Pose) -> Option<WarriorReading> {
        let p = |part: PoseLandmark| pose.get(part).position();

        let left_knee = angle(
            p(PoseLandmark::LeftHip),
            p(PoseLandmark::LeftKnee),
            p(PoseLandmark::LeftAnkle),
        );
        let right_knee = angle(
            p(PoseLandmark::RightHip),
            p(PoseLandmark::RightKnee),
            p(PoseLandmark::RightAnkle),
        );
        if !left_knee.is_finite() || !right_knee.is_finite() {
            return None;
        }

        let left_drop = (p(PoseLandmark::LeftShoulder).y - p(PoseLandmark::LeftWrist).y).abs();
        let right_drop = (p(PoseLandmark::RightShoulder).y - p(PoseLandmark::RightWrist).y).abs();
        let arms_ok = left_drop <= MAX_ARM_DROP && right_drop <= MAX_ARM_DROP;

        let stance = p(PoseLandmark::LeftAnkle).distance(p(PoseLandmark::RightAnkle));
        let legs_ok = stance >= MIN_STANCE_WIDTH;

        let knees_ok = (Self::bent(left_knee) && right_knee > STRAIGHT_KNEE_MIN)
            || (Self::bent(right_knee) && left_knee > STRAIGHT_KNEE_MIN);

        let feedback = WarriorFeedback {
            arms: if arms_ok {
                "Good arm position"
            } else {
                "Raise arms to shoulder height"
            }
            .to_string(),
            legs: if legs_ok { "Good stance" } else { "Widen your stance" }.to_string(),
            knees: if knees_ok {
                "Perfect knee bend"
            } else {
                "Bend front knee to 90 degrees"
            }
            .to_string(),
        };

        let is_correct = arms_ok && legs_ok && knees_ok;
        if is_correct {
            self.correct_frames += 1;
        }

        Some(WarriorReading {
            is_correct,
            hold_time: self.hold_time(),
            feedback,
        })
    }

    /// Seconds of correct form.
    pub fn hold_time(&self) -> f32 {
        self.correct_frames as f32 / self.assumed_fps
    }

    pub fn correct_frames(&self) -> u64 {
        self.correct_frames
    }
}

impl Default for WarriorPose {
    fn default() -> Self {
        Self::new(30.0)
    }
}
