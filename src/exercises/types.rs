//! Shared exercise types.

use crate::pose::PoseLandmark;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Supported exercises. Fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    #[default]
    Squat,
    #[serde(rename = "pushup")]
    PushUp,
    HighKnees,
    Plank,
    ChairPose,
    TreePose,
    WarriorPose,
    Meditation,
}

impl ExerciseKind {
    /// All supported exercises.
    pub const ALL: [ExerciseKind; 8] = [
        ExerciseKind::Squat,
        ExerciseKind::PushUp,
        ExerciseKind::HighKnees,
        ExerciseKind::Plank,
        ExerciseKind::ChairPose,
        ExerciseKind::TreePose,
        ExerciseKind::WarriorPose,
        ExerciseKind::Meditation,
    ];

    /// Stable identifier used in configuration and submissions.
    pub fn id(&self) -> &'static str {
        match self {
            ExerciseKind::Squat => "squat",
            ExerciseKind::PushUp => "pushup",
            ExerciseKind::HighKnees => "high_knees",
            ExerciseKind::Plank => "plank",
            ExerciseKind::ChairPose => "chair_pose",
            ExerciseKind::TreePose => "tree_pose",
            ExerciseKind::WarriorPose => "warrior_pose",
            ExerciseKind::Meditation => "meditation",
        }
    }

    /// Get display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ExerciseKind::Squat => "Squats",
            ExerciseKind::PushUp => "Push-ups",
            ExerciseKind::HighKnees => "High Knees",
            ExerciseKind::Plank => "Plank",
            ExerciseKind::ChairPose => "Chair Pose",
            ExerciseKind::TreePose => "Tree Pose",
            ExerciseKind::WarriorPose => "Warrior Pose",
            ExerciseKind::Meditation => "Meditation",
        }
    }

    /// Metabolic equivalent of the exercise.
    pub fn met(&self) -> f32 {
        match self {
            ExerciseKind::Squat => 5.0,
            ExerciseKind::PushUp => 8.0,
            ExerciseKind::Plank => 3.0,
            ExerciseKind::HighKnees => 10.0,
            ExerciseKind::ChairPose => 3.0,
            ExerciseKind::TreePose => 2.5,
            _ => 3.0,
        }
    }

    /// Whether the exercise is scored by repetitions.
    pub fn counts_reps(&self) -> bool {
        matches!(
            self,
            ExerciseKind::Squat | ExerciseKind::PushUp | ExerciseKind::HighKnees
        )
    }
}

impl std::fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Error for unknown exercise identifiers.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown exercise: {0}")]
pub struct UnknownExercise(pub String);

impl FromStr for ExerciseKind {
    type Err = UnknownExercise;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Separators are ignored: "push-up", "push_up" and "pushup" all match
        let squash = |v: &str| -> String {
            v.chars()
                .filter(|c| !matches!(c, '-' | '_' | ' '))
                .map(|c| c.to_ascii_lowercase())
                .collect()
        };
        let wanted = squash(s.trim());
        ExerciseKind::ALL
            .into_iter()
            .find(|kind| squash(kind.id()) == wanted)
            .ok_or_else(|| UnknownExercise(s.to_string()))
    }
}

/// Per-joint correctness tag for overlay rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormTag {
    Good,
    Bad,
}

impl FormTag {
    /// Tag for a boolean correctness result.
    pub fn from_ok(ok: bool) -> Self {
        if ok {
            FormTag::Good
        } else {
            FormTag::Bad
        }
    }
}

/// Landmark index to correctness tag, recomputed every frame.
pub type FeedbackMap = BTreeMap<usize, FormTag>;

/// Tag a set of joints in a feedback map.
pub fn tag_joints(map: &mut FeedbackMap, joints: &[PoseLandmark], tag: FormTag) {
    for joint in joints {
        map.insert(joint.index(), tag);
    }
}

/// Phase of a two-state repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepPhase {
    #[default]
    Up,
    Down,
}

/// Body side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Meditation tracker output for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeditationReading {
    /// Whether the subject is seated in view
    pub present: bool,
    /// Estimated breaths per minute
    pub breath_rate: u32,
    /// Stillness score (0-100)
    pub posture_score: f32,
    /// Seconds since the first present frame
    pub duration_sec: f32,
    /// Guidance text
    pub feedback: String,
}

/// Textual per-check feedback for warrior pose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarriorFeedback {
    pub arms: String,
    pub legs: String,
    pub knees: String,
}

/// Warrior pose output for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarriorReading {
    /// Whether all three checks passed this frame
    pub is_correct: bool,
    /// Seconds of correct form
    pub hold_time: f32,
    /// Per-check feedback
    pub feedback: WarriorFeedback,
}

/// Live metric produced by an exercise update.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExerciseMetric {
    /// Repetition count
    Reps { reps: u32 },
    /// Seconds of correct form
    HoldSeconds { seconds: f32 },
    /// Meditation reading
    Meditation(MeditationReading),
}

impl ExerciseMetric {
    /// Value plotted on screen and in replays.
    pub fn score(&self) -> f32 {
        match self {
            ExerciseMetric::Reps { reps } => *reps as f32,
            ExerciseMetric::HoldSeconds { seconds } => *seconds,
            ExerciseMetric::Meditation(reading) => reading.posture_score,
        }
    }
}

/// Result of advancing the active exercise by one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseOutcome {
    /// Live metric
    pub metric: ExerciseMetric,
    /// Joint feedback for overlay rendering
    pub joints: FeedbackMap,
    /// Textual guidance
    pub notes: Vec<String>,
    /// Posture sample for the session history (0.0 = bad, 1.0 = good)
    pub posture_sample: Option<f32>,
    /// Primary joint angle this frame, for the session average
    pub primary_angle: Option<f32>,
}
