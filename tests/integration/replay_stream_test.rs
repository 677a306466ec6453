//! Integration tests for recorded landmark streams.

use crate::pose_mock::{jsonl_line, standing};
use formcoach::exercises::ExerciseKind;
use formcoach::pose::{CameraFrame, PoseError, PoseLandmarker, ReplayLandmarker};
use formcoach::recording::ReplayRecorder;
use formcoach::session::{frame_feed, SessionError, SessionPipeline, SessionWarning};
use formcoach::storage::config::AppConfig;
use std::io::Write;
use std::time::Instant;
use tempfile::NamedTempFile;

/// Three squats at 640x480, with a dropout and a malformed line.
fn squat_recording() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    let mut t = 0;
    for rep in 0..3 {
        for knee in [175.0, 60.0, 175.0] {
            writeln!(file, "{}", jsonl_line(t, Some(&standing(knee)), Some(120.0))).unwrap();
            t += 700;
        }
        if rep == 1 {
            writeln!(file, "{}", jsonl_line(t, None, Some(30.0))).unwrap();
            t += 700;
            writeln!(file, "{{\"t_ms\": \"oops\"}}").unwrap();
        }
    }
    file.flush().unwrap();
    file
}

#[test]
fn test_replayed_squats_are_counted() {
    let file = squat_recording();
    let mut landmarker = ReplayLandmarker::open(file.path()).unwrap();
    assert_eq!(landmarker.len(), 10);

    let start = Instant::now();
    let frames = landmarker.frames(start);
    let end = frames.last().map(|f| f.timestamp).unwrap();
    assert!(frames.iter().all(|f| f.dimensions() == Some((640, 480))));

    let config = AppConfig {
        exercise: ExerciseKind::Squat,
        ..Default::default()
    };
    let mut pipeline = SessionPipeline::new(&config, start);

    let mut dark_frames = 0;
    let processed = pipeline
        .run(&mut landmarker, frames, |report| {
            if report.has_warning(|w| matches!(w, SessionWarning::LowLighting { .. })) {
                dark_frames += 1;
                assert!(!report.subject_present);
            }
        })
        .unwrap();
    landmarker.shutdown();

    assert_eq!(processed, 10);
    assert_eq!(dark_frames, 1);

    let session = pipeline.finish(end).unwrap();
    assert_eq!(session.summary.reps, 3);

    let submission = session.submission.unwrap();
    let timeline = ReplayRecorder::parse(&submission.replay_data.unwrap()).unwrap();
    assert_eq!(timeline.first().map(|p| p.score), Some(0.0));
    assert_eq!(timeline.last().map(|p| p.score), Some(3.0));
    assert!(timeline.windows(2).all(|w| w[0].t < w[1].t));
}

#[test]
fn test_shut_down_landmarker_stops_run() {
    let file = squat_recording();
    let mut landmarker = ReplayLandmarker::open(file.path()).unwrap();
    let start = Instant::now();
    let frames = landmarker.frames(start);
    landmarker.shutdown();

    assert!(matches!(
        landmarker.detect(&frames[0]),
        Err(PoseError::ShutDown)
    ));

    let mut pipeline = SessionPipeline::new(&AppConfig::default(), start);
    let result = pipeline.run(&mut landmarker, frames, |_| {});
    assert!(matches!(result, Err(SessionError::Detector(PoseError::ShutDown))));
}

#[test]
fn test_feed_drives_pipeline_from_capture_thread() {
    let file = squat_recording();
    let mut landmarker = ReplayLandmarker::open(file.path()).unwrap();
    let start = Instant::now();
    let frames: Vec<CameraFrame> = landmarker.frames(start);
    let total = frames.len() as u64;

    let (tx, feed) = frame_feed();
    let producer = std::thread::spawn(move || {
        for frame in frames {
            tx.send(frame).unwrap();
        }
    });
    producer.join().unwrap();

    let mut pipeline = SessionPipeline::new(&AppConfig::default(), start);
    let processed = pipeline.run(&mut landmarker, feed, |_| {}).unwrap();

    // Everything was queued before processing began: only the newest survives
    assert_eq!(processed, 1);
    assert!(processed < total);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ReplayLandmarker::open(dir.path().join("nope.jsonl"));
    assert!(matches!(result, Err(PoseError::IoError(_))));
}
