//! Session types: status, per-frame warnings and reports, errors.

use crate::exercises::ExerciseOutcome;
use crate::quality::{FatigueCheck, LightingCheck};
use serde::Serialize;
use thiserror::Error;

/// Session lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Frames update the active exercise
    #[default]
    Active,
    /// Subject has been out of view too long; exercise updates suppressed
    Paused,
    /// Session ended by the caller
    Ended,
}

/// Non-fatal per-frame condition surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionWarning {
    /// Mean frame brightness below threshold
    LowLighting { brightness: f32 },
    /// Too few key landmarks in view
    OutOfZone { reason: String },
    /// Uneven shoulders and drooping head
    Fatigue { score: f32 },
    /// Subject out of view; exercise updates suppressed
    Paused,
    /// A required joint angle was undefined this frame
    DegenerateGeometry,
}

impl SessionWarning {
    /// User-facing message.
    pub fn message(&self) -> String {
        match self {
            SessionWarning::LowLighting { .. } => "Low lighting - Move to a brighter area".to_string(),
            SessionWarning::OutOfZone { reason } => reason.clone(),
            SessionWarning::Fatigue { .. } => "Fatigue detected - Consider taking a break".to_string(),
            SessionWarning::Paused => "PAUSED - User out of frame".to_string(),
            SessionWarning::DegenerateGeometry => "Hold still - Joint not measurable".to_string(),
        }
    }
}

/// Everything the pipeline derived from one frame.
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    /// Frame sequence number
    pub sequence: u64,
    /// Status after this frame
    pub status: SessionStatus,
    /// Whether landmarks were detected
    pub subject_present: bool,
    /// Warnings raised this frame
    pub warnings: Vec<SessionWarning>,
    /// Lighting check, when brightness was measurable
    #[serde(skip)]
    pub lighting: Option<LightingCheck>,
    /// Fatigue heuristic, when a pose was detected
    #[serde(skip)]
    pub fatigue: Option<FatigueCheck>,
    /// Movement intensity multiplier used for calories
    pub intensity: f32,
    /// Exercise update, when the exercise advanced this frame
    pub outcome: Option<ExerciseOutcome>,
    /// Session calorie estimate after this frame
    pub calories_burned: f32,
}

impl FrameReport {
    pub(crate) fn new(sequence: u64, status: SessionStatus, subject_present: bool) -> Self {
        Self {
            sequence,
            status,
            subject_present,
            warnings: Vec::new(),
            lighting: None,
            fatigue: None,
            intensity: 1.0,
            outcome: None,
            calories_burned: 0.0,
        }
    }

    /// Whether a given warning kind was raised.
    pub fn has_warning(&self, predicate: impl Fn(&SessionWarning) -> bool) -> bool {
        self.warnings.iter().any(predicate)
    }
}

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session already ended")]
    AlreadyEnded,

    #[error("Pose detection failed: {0}")]
    Detector(#[from] crate::pose::PoseError),
}
