//! Pose landmarks, joint angles and the landmarker resource.

pub mod angles;
pub mod detector;
pub mod types;

pub use angles::angle;
pub use detector::{CameraFrame, PoseLandmarker, ReplayLandmarker};
pub use types::{Landmark, Pose, PoseError, PoseLandmark, LANDMARK_COUNT};
