//! Per-frame session pipeline.
//!
//! Each frame runs to completion before the next is accepted:
//! quality guards, presence control, intensity and calories, the active
//! exercise, then aggregation. Readers get value snapshots through a watch
//! channel and never touch the live state.

use crate::exercises::{ExerciseKind, ExerciseMachine, ExerciseMetric, PoseGeometry};
use crate::metrics::{FitnessTracker, SessionSummary};
use crate::pose::{CameraFrame, Pose, PoseError, PoseLandmarker};
use crate::quality::{check_frame_lighting, check_visibility, detect_fatigue, IntensityEstimator, VisibilityCheck};
use crate::recording::ReplayRecorder;
use crate::session::controller::{ControllerEvent, SessionController, DEFAULT_PAUSE_AFTER};
use crate::session::types::{FrameReport, SessionError, SessionStatus, SessionWarning};
use crate::storage::config::{AppConfig, SessionSettings};
use crate::sync::WorkoutSubmission;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Result of ending a session.
#[derive(Debug, Clone)]
pub struct SessionEnd {
    /// Final snapshot
    pub summary: SessionSummary,
    /// Record for the workout API; `None` when the session was too short
    pub submission: Option<WorkoutSubmission>,
}

/// Owns all state for one live session.
pub struct SessionPipeline {
    settings: SessionSettings,
    machine: ExerciseMachine,
    tracker: FitnessTracker,
    controller: SessionController,
    intensity: IntensityEstimator,
    replay: Option<ReplayRecorder>,
    snapshots: watch::Sender<SessionSummary>,
    start: Instant,
}

impl SessionPipeline {
    /// Start a session for the configured exercise at `start`.
    pub fn new(config: &AppConfig, start: Instant) -> Self {
        Self::with_exercise(config.exercise, config, start)
    }

    /// Start a session for an explicit exercise.
    pub fn with_exercise(exercise: ExerciseKind, config: &AppConfig, start: Instant) -> Self {
        let settings = config.session.clone();
        let tracker = FitnessTracker::new(exercise, config.body_weight_kg, start);
        let (snapshots, _) = watch::channel(tracker.summary(start));

        tracing::info!(
            "Session {} started: {}",
            tracker.session_id(),
            exercise.display_name()
        );

        Self {
            machine: ExerciseMachine::new(exercise, settings.assumed_fps),
            controller: SessionController::new(
                Duration::try_from_secs_f32(settings.pause_after_secs).unwrap_or(DEFAULT_PAUSE_AFTER),
            ),
            intensity: IntensityEstimator::new(),
            replay: settings.record_replay.then(|| ReplayRecorder::new(start)),
            snapshots,
            tracker,
            settings,
            start,
        }
    }

    /// Subscribe to summary snapshots, refreshed after every frame.
    pub fn subscribe(&self) -> watch::Receiver<SessionSummary> {
        self.snapshots.subscribe()
    }

    /// Process one frame with the pose detected in it, if any.
    pub fn process(
        &mut self,
        frame: &CameraFrame,
        pose: Option<&Pose>,
    ) -> Result<FrameReport, SessionError> {
        if !self.controller.is_running() {
            return Err(SessionError::AlreadyEnded);
        }

        let now = frame.timestamp;
        let mut report = FrameReport::new(frame.sequence, self.controller.status(), pose.is_some());

        report.lighting = check_frame_lighting(frame);
        if let Some(lighting) = report.lighting.filter(|l| !l.sufficient) {
            report.warnings.push(SessionWarning::LowLighting {
                brightness: lighting.brightness,
            });
        }

        let mut visible = true;
        if let Some(pose) = pose {
            if let VisibilityCheck::OutOfZone { reason, .. } = check_visibility(pose) {
                visible = false;
                report.warnings.push(SessionWarning::OutOfZone { reason });
            }

            let fatigue = detect_fatigue(pose);
            if fatigue.fatigued {
                report.warnings.push(SessionWarning::Fatigue { score: fatigue.score });
            }
            report.fatigue = Some(fatigue);
        }

        if let Some(ControllerEvent::Resumed { .. }) = self.controller.observe(pose.is_some(), now) {
            self.machine.rebase_hold(now);
            self.intensity.reset();
        }
        report.status = self.controller.status();

        if self.controller.is_paused() {
            report.warnings.push(SessionWarning::Paused);
        }

        match pose {
            Some(pose) if report.status == SessionStatus::Active => {
                if visible || !self.settings.gate_on_low_visibility {
                    self.advance(frame, pose, &mut report);
                }
            }
            _ => {}
        }

        report.calories_burned = self.tracker.calories_burned();
        self.snapshots.send_replace(self.tracker.summary(now));
        Ok(report)
    }

    fn advance(&mut self, frame: &CameraFrame, pose: &Pose, report: &mut FrameReport) {
        let now = frame.timestamp;

        report.intensity = self.intensity.update(pose);
        let elapsed = now.saturating_duration_since(self.start).as_secs_f32();
        self.tracker.update_calories(elapsed, report.intensity);

        let geometry = PoseGeometry::new(pose, frame.dimensions());
        let Some(outcome) = self.machine.advance(&geometry, now) else {
            report.warnings.push(SessionWarning::DegenerateGeometry);
            return;
        };

        match &outcome.metric {
            ExerciseMetric::Reps { reps } => self.tracker.update_reps(*reps, now),
            ExerciseMetric::HoldSeconds { seconds } => self.tracker.update_time(*seconds),
            ExerciseMetric::Meditation(reading) => {
                if reading.present {
                    self.tracker.update_time(reading.duration_sec);
                }
            }
        }
        if let Some(sample) = outcome.posture_sample {
            self.tracker.update_posture_score(sample);
        }
        if let Some(angle) = outcome.primary_angle {
            self.tracker.record_angle(angle);
        }
        if let Some(replay) = self.replay.as_mut() {
            replay.record(now, outcome.metric.score());
        }

        report.outcome = Some(outcome);
    }

    /// Run frames through a landmarker until the source is exhausted.
    ///
    /// Detection failures count as frames without a subject; only a shut
    /// down landmarker stops the loop.
    pub fn run<L, I, F>(
        &mut self,
        landmarker: &mut L,
        frames: I,
        mut on_report: F,
    ) -> Result<u64, SessionError>
    where
        L: PoseLandmarker + ?Sized,
        I: IntoIterator<Item = CameraFrame>,
        F: FnMut(&FrameReport),
    {
        let mut processed = 0;

        for frame in frames {
            let pose = match landmarker.detect(&frame) {
                Ok(pose) => pose,
                Err(PoseError::ShutDown) => return Err(PoseError::ShutDown.into()),
                Err(e) => {
                    tracing::warn!("Pose detection failed on frame {}: {}", frame.sequence, e);
                    None
                }
            };

            let report = self.process(&frame, pose.as_ref())?;
            on_report(&report);
            processed += 1;
        }

        Ok(processed)
    }

    /// End the session and build the submission record.
    pub fn finish(&mut self, now: Instant) -> Result<SessionEnd, SessionError> {
        self.controller.stop()?;

        let summary = self.tracker.summary(now);
        self.snapshots.send_replace(summary.clone());

        let reps = self.tracker.reps();
        let duration_sec = summary.active_time_sec;

        let submission = if reps == 0 && duration_sec < self.settings.min_save_secs {
            tracing::info!("Workout too short, not saving");
            None
        } else {
            Some(WorkoutSubmission {
                exercise: self.tracker.exercise(),
                reps,
                duration_sec,
                avg_angle: self.tracker.average_angle(),
                calories: self.tracker.calories_burned(),
                posture_score: summary.posture_quality_percent,
                replay_data: self.replay.as_ref().and_then(ReplayRecorder::to_json),
            })
        };

        tracing::info!(
            "Session {} finished: {} reps, {:.1}s held, {:.2} kcal",
            self.tracker.session_id(),
            summary.reps,
            summary.time_held_sec,
            summary.calories_burned
        );

        Ok(SessionEnd {
            summary,
            submission,
        })
    }

    /// Current snapshot.
    pub fn summary(&self, now: Instant) -> SessionSummary {
        self.tracker.summary(now)
    }

    pub fn status(&self) -> SessionStatus {
        self.controller.status()
    }

    pub fn exercise(&self) -> ExerciseKind {
        self.machine.kind()
    }

    pub fn tracker(&self) -> &FitnessTracker {
        &self.tracker
    }

    pub fn replay(&self) -> Option<&ReplayRecorder> {
        self.replay.as_ref()
    }
}
