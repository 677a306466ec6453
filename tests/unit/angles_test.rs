//! Unit tests for joint angles and pose validation.

use formcoach::pose::{angle, Landmark, Pose, PoseError, PoseLandmark, LANDMARK_COUNT};
use glam::Vec2;

#[test]
fn test_right_and_straight_angles() {
    let b = Vec2::new(0.5, 0.5);
    assert!((angle(Vec2::new(0.5, 0.2), b, Vec2::new(0.8, 0.5)) - 90.0).abs() < 1e-3);
    assert!((angle(Vec2::new(0.5, 0.2), b, Vec2::new(0.5, 0.8)) - 180.0).abs() < 1e-3);
    assert!(angle(Vec2::new(0.5, 0.2), b, Vec2::new(0.5, 0.1)).abs() < 1e-3);
}

#[test]
fn test_angle_is_symmetric() {
    let a = Vec2::new(0.1, 0.9);
    let b = Vec2::new(0.4, 0.4);
    let c = Vec2::new(0.9, 0.3);
    assert!((angle(a, b, c) - angle(c, b, a)).abs() < 1e-4);
}

#[test]
fn test_coincident_points_are_undefined() {
    let p = Vec2::new(0.3, 0.3);
    let q = Vec2::new(0.6, 0.1);
    assert!(angle(p, p, q).is_nan());
    assert!(angle(q, p, p).is_nan());
    assert!(angle(p, p, p).is_nan());
}

#[test]
fn test_pose_requires_33_landmarks() {
    let landmarks = vec![Landmark::new(0.5, 0.5); LANDMARK_COUNT - 1];
    assert!(matches!(
        Pose::new(landmarks),
        Err(PoseError::WrongLandmarkCount(32))
    ));

    let pose = Pose::new(vec![Landmark::new(0.5, 0.5); LANDMARK_COUNT]).unwrap();
    assert_eq!(pose.landmarks().len(), 33);
}

#[test]
fn test_landmark_indices() {
    assert_eq!(PoseLandmark::Nose.index(), 0);
    assert_eq!(PoseLandmark::LeftShoulder.index(), 11);
    assert_eq!(PoseLandmark::RightWrist.index(), 16);
    assert_eq!(PoseLandmark::LeftHip.index(), 23);
    assert_eq!(PoseLandmark::RightAnkle.index(), 28);
}

#[test]
fn test_pixel_projection_truncates() {
    let lm = Landmark::new(0.5049, 0.2501);
    let p = lm.pixel_position(640, 480);
    assert_eq!(p, Vec2::new(323.0, 120.0));
}
