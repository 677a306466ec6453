//! FormCoach - real-time exercise session analytics
//!
//! Turns per-frame body landmarks into rep counts, hold times, posture
//! feedback, quality warnings and calorie estimates for a live workout
//! session, with pause/resume when the subject leaves the frame.

pub mod exercises;
pub mod metrics;
pub mod pose;
pub mod quality;
pub mod recording;
pub mod session;
pub mod storage;
pub mod sync;

// Re-export commonly used types
pub use exercises::{ExerciseKind, ExerciseMachine};
pub use metrics::{FitnessTracker, SessionSummary};
pub use pose::{Landmark, Pose, PoseLandmark};
pub use session::SessionPipeline;
pub use storage::config::AppConfig;
pub use sync::WorkoutUploader;
