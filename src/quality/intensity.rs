//! Motion intensity estimation.
//!
//! Intensity scales the calorie model. It grows with how far the torso
//! (shoulders and hips) moved since the previous frame.

use crate::pose::{Pose, PoseLandmark};
use glam::Vec2;

/// Landmarks whose displacement drives intensity.
const TRACKED: [PoseLandmark; 4] = [
    PoseLandmark::LeftShoulder,
    PoseLandmark::RightShoulder,
    PoseLandmark::LeftHip,
    PoseLandmark::RightHip,
];

const DISPLACEMENT_GAIN: f32 = 10.0;
const MAX_BOOST: f32 = 2.0;

/// Resting intensity multiplier.
pub const BASE_INTENSITY: f32 = 1.0;
/// Highest intensity multiplier.
pub const MAX_INTENSITY: f32 = BASE_INTENSITY + MAX_BOOST;

/// Estimates a motion-intensity multiplier in `[1.0, 3.0]`.
#[derive(Debug, Default)]
pub struct IntensityEstimator {
    previous: Option<[Vec2; 4]>,
}

impl IntensityEstimator {
    /// Create an estimator with no frame history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next pose and return the intensity multiplier.
    ///
    /// The first pose after creation or [`reset`](Self::reset) yields 1.0.
    pub fn update(&mut self, pose: &Pose) -> f32 {
        let current = TRACKED.map(|part| pose.get(part).position());

        let intensity = match self.previous {
            Some(previous) => {
                let displacement: f32 = current
                    .iter()
                    .zip(previous.iter())
                    .map(|(c, p)| c.distance(*p))
                    .sum();
                let boost = (displacement * DISPLACEMENT_GAIN).min(MAX_BOOST);
                if boost.is_finite() {
                    (BASE_INTENSITY + boost).clamp(BASE_INTENSITY, MAX_INTENSITY)
                } else {
                    BASE_INTENSITY
                }
            }
            None => BASE_INTENSITY,
        };

        self.previous = Some(current);
        intensity
    }

    /// Forget the previous frame.
    pub fn reset(&mut self) {
        self.previous = None;
    }
}
