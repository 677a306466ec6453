//! Per-exercise state machines.
//!
//! Every exercise advances one frame at a time and reports a live metric
//! plus feedback, but each has its own inputs and state. The active exercise
//! is chosen once per session and wrapped in [`ExerciseMachine`], which
//! extracts the right inputs from the pose.

pub mod chair_pose;
pub mod high_knees;
pub mod hold;
pub mod meditation;
pub mod plank;
pub mod pushup;
pub mod rep;
pub mod squat;
pub mod tree_pose;
pub mod types;
pub mod warrior_pose;

pub use chair_pose::ChairPose;
pub use high_knees::HighKnees;
pub use hold::HoldTimer;
pub use meditation::Meditation;
pub use plank::Plank;
pub use pushup::PushUp;
pub use squat::Squat;
pub use tree_pose::TreePose;
pub use types::{
    ExerciseKind, ExerciseMetric, ExerciseOutcome, FeedbackMap, FormTag, MeditationReading,
    RepPhase, Side, UnknownExercise, WarriorFeedback, WarriorReading,
};
pub use warrior_pose::WarriorPose;

use crate::pose::angles::is_valid;
use crate::pose::{angle, Pose, PoseLandmark};
use glam::Vec2;
use std::time::Instant;

/// Knee angles that count as controlled squat depth for posture scoring.
const SQUAT_GOOD_RANGE: std::ops::RangeInclusive<f32> = 70.0..=160.0;

/// Pose accessor that projects to pixel space when frame dimensions are known.
#[derive(Debug, Clone, Copy)]
pub struct PoseGeometry<'a> {
    pose: &'a Pose,
    dimensions: Option<(u32, u32)>,
}

impl<'a> PoseGeometry<'a> {
    pub fn new(pose: &'a Pose, dimensions: Option<(u32, u32)>) -> Self {
        Self { pose, dimensions }
    }

    /// Position of a landmark in the working coordinate space.
    pub fn point(&self, part: PoseLandmark) -> Vec2 {
        let lm = self.pose.get(part);
        match self.dimensions {
            Some((w, h)) => lm.pixel_position(w, h),
            None => lm.position(),
        }
    }

    /// Angle at `b` formed by `a` and `c`.
    pub fn angle(&self, a: PoseLandmark, b: PoseLandmark, c: PoseLandmark) -> f32 {
        angle(self.point(a), self.point(b), self.point(c))
    }

    pub fn pose(&self) -> &'a Pose {
        self.pose
    }
}

/// The active exercise for a session.
#[derive(Debug, Clone)]
pub enum ExerciseMachine {
    Squat(Squat),
    PushUp(PushUp),
    HighKnees(HighKnees),
    Plank(Plank),
    ChairPose(ChairPose),
    TreePose(TreePose),
    WarriorPose(WarriorPose),
    Meditation(Meditation),
}

fn posture(ok: bool) -> Option<f32> {
    Some(if ok { 1.0 } else { 0.0 })
}

impl ExerciseMachine {
    /// Create the machine for an exercise. `assumed_fps` is used by the
    /// frame-counting exercises (warrior pose, meditation).
    pub fn new(kind: ExerciseKind, assumed_fps: f32) -> Self {
        match kind {
            ExerciseKind::Squat => ExerciseMachine::Squat(Squat::new()),
            ExerciseKind::PushUp => ExerciseMachine::PushUp(PushUp::new()),
            ExerciseKind::HighKnees => ExerciseMachine::HighKnees(HighKnees::new()),
            ExerciseKind::Plank => ExerciseMachine::Plank(Plank::new()),
            ExerciseKind::ChairPose => ExerciseMachine::ChairPose(ChairPose::new()),
            ExerciseKind::TreePose => ExerciseMachine::TreePose(TreePose::new()),
            ExerciseKind::WarriorPose => ExerciseMachine::WarriorPose(WarriorPose::new(assumed_fps)),
            ExerciseKind::Meditation => ExerciseMachine::Meditation(Meditation::new(assumed_fps)),
        }
    }

    pub fn kind(&self) -> ExerciseKind {
        match self {
            ExerciseMachine::Squat(_) => ExerciseKind::Squat,
            ExerciseMachine::PushUp(_) => ExerciseKind::PushUp,
            ExerciseMachine::HighKnees(_) => ExerciseKind::HighKnees,
            ExerciseMachine::Plank(_) => ExerciseKind::Plank,
            ExerciseMachine::ChairPose(_) => ExerciseKind::ChairPose,
            ExerciseMachine::TreePose(_) => ExerciseKind::TreePose,
            ExerciseMachine::WarriorPose(_) => ExerciseKind::WarriorPose,
            ExerciseMachine::Meditation(_) => ExerciseKind::Meditation,
        }
    }

    /// Advance by one frame.
    ///
    /// Returns `None` when a required joint angle is undefined (coincident
    /// landmarks); the machine state is left untouched in that case.
    pub fn advance(&mut self, geo: &PoseGeometry<'_>, now: Instant) -> Option<ExerciseOutcome> {
        use PoseLandmark::*;

        let outcome = match self {
            ExerciseMachine::Squat(squat) => {
                let knee = valid(geo.angle(LeftHip, LeftKnee, LeftAnkle))?;
                let (reps, joints) = squat.update(knee);
                ExerciseOutcome {
                    metric: ExerciseMetric::Reps { reps },
                    joints,
                    notes: Vec::new(),
                    posture_sample: posture(SQUAT_GOOD_RANGE.contains(&knee)),
                    primary_angle: Some(knee),
                }
            }
            ExerciseMachine::PushUp(pushup) => {
                let elbow = valid(geo.angle(LeftShoulder, LeftElbow, LeftWrist))?;
                let (reps, joints) = pushup.update(elbow);
                ExerciseOutcome {
                    metric: ExerciseMetric::Reps { reps },
                    joints,
                    notes: Vec::new(),
                    posture_sample: posture(elbow > pushup::COLLAPSED_ANGLE),
                    primary_angle: Some(elbow),
                }
            }
            ExerciseMachine::HighKnees(high_knees) => {
                let pose = geo.pose();
                let left_up = pose.get(LeftKnee).y < pose.get(LeftHip).y;
                let right_up = pose.get(RightKnee).y < pose.get(RightHip).y;
                let (reps, joints) = high_knees.update(left_up, right_up);
                ExerciseOutcome {
                    metric: ExerciseMetric::Reps { reps },
                    joints,
                    notes: Vec::new(),
                    posture_sample: None,
                    primary_angle: None,
                }
            }
            ExerciseMachine::Plank(plank) => {
                let body = valid(geo.angle(LeftShoulder, LeftHip, LeftAnkle))?;
                let (seconds, joints) = plank.update(body, now);
                ExerciseOutcome {
                    metric: ExerciseMetric::HoldSeconds { seconds },
                    joints,
                    notes: Vec::new(),
                    posture_sample: posture(Plank::is_correct(body)),
                    primary_angle: Some(body),
                }
            }
            ExerciseMachine::ChairPose(chair) => {
                let knee = valid(geo.angle(LeftHip, LeftKnee, LeftAnkle))?;
                let (seconds, joints) = chair.update(knee, now);
                ExerciseOutcome {
                    metric: ExerciseMetric::HoldSeconds { seconds },
                    joints,
                    notes: Vec::new(),
                    posture_sample: posture(ChairPose::is_correct(knee)),
                    primary_angle: Some(knee),
                }
            }
            ExerciseMachine::TreePose(tree) => {
                let standing = valid(geo.angle(LeftHip, LeftKnee, LeftAnkle))?;
                let raised = valid(geo.angle(LeftHip, LeftKnee, LeftWrist))?;
                let (seconds, joints) = tree.update(standing, raised, now);
                let correct = standing > tree_pose::MIN_STANDING_ANGLE
                    && raised < tree_pose::MAX_RAISED_ANGLE;
                ExerciseOutcome {
                    metric: ExerciseMetric::HoldSeconds { seconds },
                    joints,
                    notes: Vec::new(),
                    posture_sample: posture(correct),
                    primary_angle: Some(standing),
                }
            }
            ExerciseMachine::WarriorPose(warrior) => {
                let reading = warrior.update(geo.pose())?;
                ExerciseOutcome {
                    metric: ExerciseMetric::HoldSeconds {
                        seconds: reading.hold_time,
                    },
                    joints: FeedbackMap::new(),
                    notes: vec![
                        reading.feedback.arms,
                        reading.feedback.legs,
                        reading.feedback.knees,
                    ],
                    posture_sample: posture(reading.is_correct),
                    primary_angle: None,
                }
            }
            ExerciseMachine::Meditation(meditation) => {
                let reading = meditation.update(geo.pose(), now);
                let posture_sample = reading
                    .present
                    .then_some(reading.posture_score / 100.0);
                ExerciseOutcome {
                    notes: vec![reading.feedback.clone()],
                    metric: ExerciseMetric::Meditation(reading),
                    joints: FeedbackMap::new(),
                    posture_sample,
                    primary_angle: None,
                }
            }
        };

        Some(outcome)
    }

    /// Rebase an in-progress hold streak or meditation clock after a pause so
    /// the paused time is not counted. No effect on rep exercises.
    pub fn rebase_hold(&mut self, now: Instant) {
        match self {
            ExerciseMachine::Plank(m) => m.timer_mut().rebase(now),
            ExerciseMachine::ChairPose(m) => m.timer_mut().rebase(now),
            ExerciseMachine::TreePose(m) => m.timer_mut().rebase(now),
            ExerciseMachine::Meditation(m) => m.rebase(now),
            _ => {}
        }
    }
}

fn valid(angle: f32) -> Option<f32> {
    if is_valid(angle) {
        Some(angle)
    } else {
        tracing::debug!("Skipping frame: undefined joint angle");
        None
    }
}
