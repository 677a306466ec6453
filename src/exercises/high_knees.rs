//! High knees counter.
//!
//! Not angle based: a rep is counted when a knee rises above its hip and it
//! is not the same side that was counted last. A knee held up across frames
//! is counted once.

use crate::exercises::types::{FeedbackMap, FormTag, Side};
use crate::pose::PoseLandmark;

#[derive(Debug, Clone, Default)]
pub struct HighKnees {
    reps: u32,
    last_side: Option<Side>,
}

impl HighKnees {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance with which knees are currently raised.
    pub fn update(&mut self, left_knee_up: bool, right_knee_up: bool) -> (u32, FeedbackMap) {
        let mut feedback = FeedbackMap::new();
        feedback.insert(PoseLandmark::LeftKnee.index(), FormTag::from_ok(left_knee_up));
        feedback.insert(PoseLandmark::RightKnee.index(), FormTag::from_ok(right_knee_up));

        if left_knee_up && self.last_side != Some(Side::Left) {
            self.count(Side::Left);
        } else if right_knee_up && self.last_side != Some(Side::Right) {
            self.count(Side::Right);
        }

        (self.reps, feedback)
    }

    fn count(&mut self, side: Side) {
        self.reps += 1;
        self.last_side = Some(side);
        tracing::debug!("High knee {} ({:?})", self.reps, side);
    }

    pub fn reps(&self) -> u32 {
        self.reps
    }

    /// Side counted on the most recent rep.
    pub fn last_side(&self) -> Option<Side> {
        self.last_side
    }
}
