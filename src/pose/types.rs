//! Pose landmark types.
//!
//! Landmarks arrive from an external pose estimator as an ordered sequence
//! of 33 points in normalized image coordinates.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of landmarks in a full-body pose.
pub const LANDMARK_COUNT: usize = 33;

/// A single body landmark in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position (0.0 = left edge, 1.0 = right edge)
    pub x: f32,
    /// Vertical position (0.0 = top edge, 1.0 = bottom edge)
    pub y: f32,
    /// Depth relative to the hips
    pub z: f32,
    /// Detector confidence that the landmark is visible (0.0-1.0)
    #[serde(default)]
    pub visibility: f32,
}

impl Landmark {
    /// Create a landmark at the given position with full visibility.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility: 1.0,
        }
    }

    /// Builder-style visibility override.
    pub fn with_visibility(mut self, visibility: f32) -> Self {
        self.visibility = visibility;
        self
    }

    /// Position in normalized coordinates.
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Position projected into pixel space, truncated to whole pixels.
    pub fn pixel_position(&self, width: u32, height: u32) -> Vec2 {
        Vec2::new(
            (self.x * width as f32).trunc(),
            (self.y * height as f32).trunc(),
        )
    }
}

/// Anatomical landmark indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(usize)]
pub enum PoseLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl PoseLandmark {
    /// Index into the landmark sequence.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Errors raised while obtaining or validating poses.
#[derive(Debug, Error)]
pub enum PoseError {
    #[error("Expected 33 landmarks, got {0}")]
    WrongLandmarkCount(usize),

    #[error("Landmarker has been shut down")]
    ShutDown,

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Malformed frame on line {line}: {message}")]
    ParseError { line: usize, message: String },
}

impl From<std::io::Error> for PoseError {
    fn from(err: std::io::Error) -> Self {
        PoseError::IoError(err.to_string())
    }
}

/// A validated full-body pose for one frame. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    landmarks: Vec<Landmark>,
}

impl Pose {
    /// Validate a landmark sequence.
    pub fn new(landmarks: Vec<Landmark>) -> Result<Self, PoseError> {
        if landmarks.len() != LANDMARK_COUNT {
            return Err(PoseError::WrongLandmarkCount(landmarks.len()));
        }
        Ok(Self { landmarks })
    }

    /// A pose with every landmark at the same position. Handy for tests and
    /// as a base to override individual joints.
    pub fn uniform(landmark: Landmark) -> Self {
        Self {
            landmarks: vec![landmark; LANDMARK_COUNT],
        }
    }

    /// Replace one landmark, returning the modified pose.
    pub fn with(mut self, part: PoseLandmark, landmark: Landmark) -> Self {
        self.landmarks[part.index()] = landmark;
        self
    }

    /// Landmark for an anatomical part.
    pub fn get(&self, part: PoseLandmark) -> &Landmark {
        &self.landmarks[part.index()]
    }

    /// All landmarks in index order.
    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }
}
