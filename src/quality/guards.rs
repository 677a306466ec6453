//! Frame quality guards: lighting, subject visibility and fatigue.
//!
//! All checks are pure. They produce warnings; whether to gate exercise
//! logic on them is the caller's decision.

use crate::pose::{CameraFrame, Pose, PoseLandmark};
use image::RgbImage;

/// Mean grayscale brightness above which lighting is sufficient.
pub const MIN_BRIGHTNESS: f32 = 50.0;

/// Landmarks that must be in view for full-body exercises.
pub const KEY_LANDMARKS: [PoseLandmark; 8] = [
    PoseLandmark::LeftShoulder,
    PoseLandmark::RightShoulder,
    PoseLandmark::LeftHip,
    PoseLandmark::RightHip,
    PoseLandmark::LeftKnee,
    PoseLandmark::RightKnee,
    PoseLandmark::LeftAnkle,
    PoseLandmark::RightAnkle,
];

/// Fraction of key landmarks that must be in view.
const MIN_VISIBLE_FRACTION: f32 = 0.7;
/// Per-landmark visibility threshold.
const MIN_LANDMARK_VISIBILITY: f32 = 0.5;
/// Margin from the frame edge, in normalized units.
const EDGE_MARGIN: f32 = 0.05;

const UNEVEN_SHOULDER_DELTA: f32 = 0.1;
const HEAD_DROOP_DISTANCE: f32 = 0.2;
const FATIGUE_THRESHOLD: f32 = 0.7;

/// Result of the lighting check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingCheck {
    /// Mean grayscale brightness (0-255)
    pub brightness: f32,
    /// Whether lighting is sufficient
    pub sufficient: bool,
}

impl LightingCheck {
    fn from_brightness(brightness: f32) -> Self {
        Self {
            brightness,
            sufficient: brightness > MIN_BRIGHTNESS,
        }
    }
}

/// Check lighting from pixel data using mean grayscale brightness.
pub fn check_lighting(image: &RgbImage) -> LightingCheck {
    let gray = image::imageops::grayscale(image);
    let pixels = gray.as_raw();

    let brightness = if pixels.is_empty() {
        0.0
    } else {
        let sum: u64 = pixels.iter().map(|&p| p as u64).sum();
        sum as f32 / pixels.len() as f32
    };

    LightingCheck::from_brightness(brightness)
}

/// Check lighting for a frame, using pixels when present and falling back to
/// a brightness value reported by the capture source.
pub fn check_frame_lighting(frame: &CameraFrame) -> Option<LightingCheck> {
    if let Some(image) = &frame.image {
        return Some(check_lighting(image));
    }
    frame.brightness.map(LightingCheck::from_brightness)
}

/// Result of the visibility check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibilityCheck {
    /// Enough of the body is in view
    Ready,
    /// Too little of the body is in view
    OutOfZone {
        /// Key landmarks that passed
        visible: usize,
        /// Human-readable instruction
        reason: String,
    },
}

impl VisibilityCheck {
    /// Whether the subject is adequately framed.
    pub fn is_ready(&self) -> bool {
        matches!(self, VisibilityCheck::Ready)
    }
}

fn in_frame(value: f32) -> bool {
    value > EDGE_MARGIN && value < 1.0 - EDGE_MARGIN
}

/// Check that the key landmarks are visible and away from the frame edges.
pub fn check_visibility(pose: &Pose) -> VisibilityCheck {
    let visible = KEY_LANDMARKS
        .iter()
        .map(|&part| pose.get(part))
        .filter(|lm| lm.visibility > MIN_LANDMARK_VISIBILITY && in_frame(lm.x) && in_frame(lm.y))
        .count();

    if (visible as f32) < KEY_LANDMARKS.len() as f32 * MIN_VISIBLE_FRACTION {
        VisibilityCheck::OutOfZone {
            visible,
            reason: "Step back - Full body not visible".to_string(),
        }
    } else {
        VisibilityCheck::Ready
    }
}

/// Result of the fatigue heuristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FatigueCheck {
    /// Heuristic score (0.0, 0.5 or 1.0)
    pub score: f32,
    /// Whether the subject looks fatigued
    pub fatigued: bool,
}

/// Detect fatigue from uneven shoulders and a drooping head.
pub fn detect_fatigue(pose: &Pose) -> FatigueCheck {
    let left = pose.get(PoseLandmark::LeftShoulder);
    let right = pose.get(PoseLandmark::RightShoulder);
    let nose = pose.get(PoseLandmark::Nose);

    let shoulder_drop = (left.y - right.y).abs();
    let shoulder_mid_y = (left.y + right.y) / 2.0;
    let head_gap = (nose.y - shoulder_mid_y).abs();

    let mut score = 0.0;
    if shoulder_drop > UNEVEN_SHOULDER_DELTA {
        score += 0.5;
    }
    if head_gap < HEAD_DROOP_DISTANCE {
        score += 0.5;
    }

    FatigueCheck {
        score,
        fatigued: score > FATIGUE_THRESHOLD,
    }
}
