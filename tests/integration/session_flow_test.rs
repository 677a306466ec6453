//! Integration tests for the per-frame session pipeline.

use crate::pose_mock::{plank, standing};
use formcoach::exercises::{ExerciseKind, ExerciseMetric};
use formcoach::pose::{CameraFrame, Landmark, Pose, PoseLandmark};
use formcoach::session::{FrameReport, SessionPipeline, SessionStatus, SessionWarning};
use formcoach::storage::config::AppConfig;
use std::time::{Duration, Instant};

fn config(exercise: ExerciseKind) -> AppConfig {
    AppConfig {
        exercise,
        ..Default::default()
    }
}

struct Clock {
    start: Instant,
    seq: u64,
}

impl Clock {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            seq: 0,
        }
    }

    fn frame(&mut self, t_ms: u64) -> CameraFrame {
        self.seq += 1;
        CameraFrame::bare(self.seq, self.start + Duration::from_millis(t_ms))
    }

    fn at(&self, t_ms: u64) -> Instant {
        self.start + Duration::from_millis(t_ms)
    }
}

fn held_seconds(report: &FrameReport) -> f32 {
    match report.outcome.as_ref().map(|o| &o.metric) {
        Some(ExerciseMetric::HoldSeconds { seconds }) => *seconds,
        other => panic!("expected hold metric, got {other:?}"),
    }
}

fn paused(report: &FrameReport) -> bool {
    report.has_warning(|w| matches!(w, SessionWarning::Paused))
}

#[test]
fn test_squat_session_counts_reps_and_submits() {
    let mut clock = Clock::new();
    let mut pipeline = SessionPipeline::new(&config(ExerciseKind::Squat), clock.start);

    let mut t = 0;
    for _ in 0..3 {
        for knee in [175.0, 130.0, 80.0, 130.0, 175.0] {
            pipeline.process(&clock.frame(t), Some(&standing(knee))).unwrap();
            t += 400;
        }
    }

    let end = pipeline.finish(clock.at(t)).unwrap();
    assert_eq!(end.summary.reps, 3);
    assert_eq!(end.summary.exercise, ExerciseKind::Squat);
    assert!(end.summary.average_angle > 80.0 && end.summary.average_angle < 175.0);
    // 80° is inside the 70-160 band, 130° too; only 175° is outside
    assert!((end.summary.posture_quality_percent - 60.0).abs() < 0.11);
    assert!(end.summary.calories_burned > 0.0);

    let submission = end.submission.expect("session with reps is submitted");
    assert_eq!(submission.reps, 3);
    assert_eq!(submission.duration_sec, 6);
    let replay = submission.replay_data.expect("replay recorded");
    assert!(replay.starts_with(r#"[{"t":0,"#));
}

#[test]
fn test_long_absence_pauses_and_preserves_hold() {
    let mut clock = Clock::new();
    let mut pipeline = SessionPipeline::new(&config(ExerciseKind::Plank), clock.start);

    let mut last = None;
    for t in (0..=3000).step_by(100) {
        last = Some(pipeline.process(&clock.frame(t), Some(&plank(172.0))).unwrap());
    }
    assert!((held_seconds(&last.unwrap()) - 3.0).abs() < 1e-3);

    // Out of frame from 3.1s; pause once more than 2s have passed
    for t in (3100..=5100).step_by(100) {
        let report = pipeline.process(&clock.frame(t), None).unwrap();
        assert!(!paused(&report), "paused too early at {t}ms");
    }
    let report = pipeline.process(&clock.frame(5200), None).unwrap();
    assert!(paused(&report));
    assert_eq!(report.status, SessionStatus::Paused);
    assert!(report.outcome.is_none());

    let report = pipeline.process(&clock.frame(7000), None).unwrap();
    assert!(paused(&report));

    // Back after the gap, with the torso shifted
    let shifted = plank(172.0).with(PoseLandmark::LeftShoulder, Landmark::new(0.25, 0.62));
    let report = pipeline.process(&clock.frame(8000), Some(&shifted)).unwrap();
    assert_eq!(report.status, SessionStatus::Active);
    assert_eq!(report.intensity, 1.0);
    assert!((held_seconds(&report) - 3.0).abs() < 1e-3);

    let report = pipeline.process(&clock.frame(9000), Some(&plank(172.0))).unwrap();
    assert!((held_seconds(&report) - 4.0).abs() < 1e-3);
    assert!((pipeline.tracker().time_held() - 4.0).abs() < 1e-3);
}

fn meditation_seconds(report: &FrameReport) -> f32 {
    match report.outcome.as_ref().map(|o| &o.metric) {
        Some(ExerciseMetric::Meditation(reading)) => reading.duration_sec,
        other => panic!("expected meditation reading, got {other:?}"),
    }
}

#[test]
fn test_pause_not_counted_as_meditation_time() {
    let mut clock = Clock::new();
    let mut pipeline = SessionPipeline::new(&config(ExerciseKind::Meditation), clock.start);

    for t in (0..=3000).step_by(100) {
        pipeline.process(&clock.frame(t), Some(&standing(175.0))).unwrap();
    }
    assert!((pipeline.tracker().time_held() - 3.0).abs() < 1e-3);

    for t in (3100..=20000).step_by(100) {
        pipeline.process(&clock.frame(t), None).unwrap();
    }
    assert_eq!(pipeline.status(), SessionStatus::Paused);

    let report = pipeline.process(&clock.frame(20100), Some(&standing(175.0))).unwrap();
    assert_eq!(report.status, SessionStatus::Active);
    assert!((meditation_seconds(&report) - 3.0).abs() < 1e-3);
    assert!((pipeline.tracker().time_held() - 3.0).abs() < 1e-3);

    pipeline.process(&clock.frame(21100), Some(&standing(175.0))).unwrap();
    assert!((pipeline.tracker().time_held() - 4.0).abs() < 1e-3);
}

#[test]
fn test_short_absence_does_not_pause() {
    let mut clock = Clock::new();
    let mut pipeline = SessionPipeline::new(&config(ExerciseKind::Plank), clock.start);

    pipeline.process(&clock.frame(0), Some(&plank(172.0))).unwrap();
    pipeline.process(&clock.frame(1000), Some(&plank(172.0))).unwrap();

    for t in (1100..=2900).step_by(100) {
        let report = pipeline.process(&clock.frame(t), None).unwrap();
        assert!(!paused(&report));
    }

    let report = pipeline.process(&clock.frame(3000), Some(&plank(172.0))).unwrap();
    assert_eq!(report.status, SessionStatus::Active);
    assert!(!paused(&report));
    // No pause, so the streak simply continued
    assert!((held_seconds(&report) - 3.0).abs() < 1e-3);
}

#[test]
fn test_plank_sag_resets_hold() {
    let mut clock = Clock::new();
    let mut pipeline = SessionPipeline::new(&config(ExerciseKind::Plank), clock.start);

    let mut held = Vec::new();
    for (t, angle) in [(0, 172.0), (500, 172.0), (1000, 172.0), (1500, 100.0), (2000, 172.0)] {
        let report = pipeline.process(&clock.frame(t), Some(&plank(angle))).unwrap();
        held.push(held_seconds(&report));
    }

    assert!(held[0] < held[1] && held[1] < held[2]);
    assert!((held[3] - 1.0).abs() < 1e-3);
    assert!(held[4].abs() < 1e-3);
}

#[test]
fn test_degenerate_pose_is_skipped() {
    let mut clock = Clock::new();
    let mut pipeline = SessionPipeline::new(&config(ExerciseKind::Squat), clock.start);

    pipeline.process(&clock.frame(0), Some(&standing(175.0))).unwrap();
    pipeline.process(&clock.frame(100), Some(&standing(80.0))).unwrap();

    // Ankle on the knee: knee angle undefined
    let collapsed = standing(175.0).with(PoseLandmark::LeftAnkle, *standing(175.0).get(PoseLandmark::LeftKnee));
    let report = pipeline.process(&clock.frame(200), Some(&collapsed)).unwrap();

    assert!(report.has_warning(|w| matches!(w, SessionWarning::DegenerateGeometry)));
    assert!(report.outcome.is_none());
    assert_eq!(pipeline.tracker().reps(), 0);

    pipeline.process(&clock.frame(300), Some(&standing(175.0))).unwrap();
    assert_eq!(pipeline.tracker().reps(), 1);
}

#[test]
fn test_meditation_with_hidden_shoulders() {
    let mut clock = Clock::new();
    let mut pipeline = SessionPipeline::new(&config(ExerciseKind::Meditation), clock.start);

    let hidden = Pose::uniform(Landmark::new(0.5, 0.5).with_visibility(0.3))
        .with(PoseLandmark::LeftShoulder, Landmark::new(0.4, 0.4).with_visibility(0.2))
        .with(PoseLandmark::RightShoulder, Landmark::new(0.6, 0.4).with_visibility(0.2));

    for t in (0..3000).step_by(33) {
        let report = pipeline.process(&clock.frame(t), Some(&hidden)).unwrap();
        match report.outcome.map(|o| o.metric) {
            Some(ExerciseMetric::Meditation(reading)) => {
                assert!(!reading.present);
                assert_eq!(reading.posture_score, 0.0);
                assert_eq!(reading.breath_rate, 0);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    let summary = pipeline.summary(clock.at(3000));
    assert_eq!(summary.posture_quality_percent, 0.0);
    assert_eq!(summary.time_held_sec, 0.0);
}

#[test]
fn test_snapshot_reader_on_another_thread() {
    let mut clock = Clock::new();
    let mut pipeline = SessionPipeline::new(&config(ExerciseKind::Squat), clock.start);
    let rx = pipeline.subscribe();

    for (i, knee) in [175.0, 80.0, 175.0].into_iter().enumerate() {
        pipeline
            .process(&clock.frame(i as u64 * 500), Some(&standing(knee)))
            .unwrap();
    }

    let reps = std::thread::spawn(move || rx.borrow().reps).join().unwrap();
    assert_eq!(reps, 1);
}
