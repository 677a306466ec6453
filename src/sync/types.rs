//! Workout submission types.

use crate::exercises::ExerciseKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Session-end record sent to the workout API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSubmission {
    /// Exercise identifier
    pub exercise: ExerciseKind,
    /// Repetitions counted
    pub reps: u32,
    /// Whole seconds since the session started
    #[serde(rename = "duration")]
    pub duration_sec: u64,
    /// Mean primary joint angle
    pub avg_angle: f32,
    /// Estimated calories
    pub calories: f32,
    /// Posture quality in percent
    pub posture_score: f32,
    /// Ghost-mode replay timeline as a JSON array string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replay_data: Option<String>,
}

/// Errors from workout submission.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Workout API not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Workout API returned status {0}")]
    Status(u16),
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SyncError::Timeout
        } else if let Some(status) = err.status() {
            SyncError::Status(status.as_u16())
        } else {
            SyncError::Network(err.to_string())
        }
    }
}
