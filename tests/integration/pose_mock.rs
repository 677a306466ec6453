//! Synthetic poses and recorded streams for session tests.

use formcoach::pose::{Landmark, Pose, PoseLandmark};
use glam::Vec2;

/// Point at `length` from `origin`, rotated `degrees` from straight up.
fn ray(origin: Vec2, degrees: f32, length: f32) -> Vec2 {
    let theta = degrees.to_radians();
    origin + length * Vec2::new(theta.sin(), -theta.cos())
}

fn lm(p: Vec2) -> Landmark {
    Landmark::new(p.x, p.y)
}

/// Upright subject, fully in frame, with the left knee bent to
/// `knee_deg` (180 = straight leg).
pub fn standing(knee_deg: f32) -> Pose {
    let hip = Vec2::new(0.45, 0.5);
    let knee = Vec2::new(0.45, 0.68);
    let ankle = ray(knee, knee_deg, 0.18);

    Pose::uniform(Landmark::new(0.5, 0.5))
        .with(PoseLandmark::Nose, Landmark::new(0.5, 0.1))
        .with(PoseLandmark::LeftShoulder, Landmark::new(0.45, 0.3))
        .with(PoseLandmark::RightShoulder, Landmark::new(0.55, 0.3))
        .with(PoseLandmark::LeftElbow, Landmark::new(0.42, 0.4))
        .with(PoseLandmark::LeftWrist, Landmark::new(0.42, 0.48))
        .with(PoseLandmark::LeftHip, lm(hip))
        .with(PoseLandmark::RightHip, Landmark::new(0.55, 0.5))
        .with(PoseLandmark::LeftKnee, lm(knee))
        .with(PoseLandmark::RightKnee, Landmark::new(0.55, 0.68))
        .with(PoseLandmark::LeftAnkle, lm(ankle))
        .with(PoseLandmark::RightAnkle, Landmark::new(0.55, 0.86))
}

/// Side-on plank with the shoulder–hip–ankle line bent to `body_deg`.
pub fn plank(body_deg: f32) -> Pose {
    let hip = Vec2::new(0.5, 0.6);
    let shoulder = Vec2::new(0.2, 0.6);
    // Ray hip→shoulder points left; rotate the ankle ray from straight right
    let theta = (180.0 - body_deg).to_radians();
    let ankle = hip + 0.3 * Vec2::new(theta.cos(), theta.sin());

    Pose::uniform(Landmark::new(0.5, 0.5))
        .with(PoseLandmark::Nose, Landmark::new(0.12, 0.62))
        .with(PoseLandmark::LeftShoulder, lm(shoulder))
        .with(PoseLandmark::RightShoulder, Landmark::new(0.21, 0.58))
        .with(PoseLandmark::LeftHip, lm(hip))
        .with(PoseLandmark::RightHip, Landmark::new(0.51, 0.58))
        .with(PoseLandmark::LeftKnee, Landmark::new(0.65, 0.6))
        .with(PoseLandmark::RightKnee, Landmark::new(0.66, 0.58))
        .with(PoseLandmark::LeftAnkle, lm(ankle))
        .with(PoseLandmark::RightAnkle, Landmark::new(ankle.x + 0.01, ankle.y - 0.02))
}

/// One line of a recorded landmark stream.
pub fn jsonl_line(t_ms: u64, pose: Option<&Pose>, brightness: Option<f32>) -> String {
    let value = serde_json::json!({
        "t_ms": t_ms,
        "landmarks": pose.map(|p| p.landmarks().to_vec()),
        "brightness": brightness,
        "width": 640,
        "height": 480,
    });
    value.to_string()
}
