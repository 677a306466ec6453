//! Meditation tracker.
//!
//! Estimates breathing rate from the vertical oscillation of the shoulders
//! and scores stillness from the short-term spread of the same signal.

use crate::exercises::types::MeditationReading;
use crate::metrics::window::SampleWindow;
use crate::pose::{Pose, PoseLandmark};
use std::time::{Duration, Instant};

/// Seconds of shoulder samples used for breath detection.
pub const BREATH_WINDOW_SECS: f32 = 5.0;
/// Samples used for the stillness estimate.
pub const STILLNESS_SAMPLES: usize = 10;
/// Minimum shoulder visibility for the subject to count as present.
pub const MIN_SHOULDER_VISIBILITY: f32 = 0.5;

const VERY_STILL: f32 = 0.002;
const CALM: f32 = 0.01;
const INITIAL_SCORE: f32 = 100.0;

const FEEDBACK_ABSENT: &str = "Please sit in front of the camera.";
const FEEDBACK_START: &str = "Sit comfortably and breathe deeply.";
const FEEDBACK_EXCELLENT: &str = "Excellent stillness. Focus on your breath.";
const FEEDBACK_CALM: &str = "Good. Breathe deeply.";
const FEEDBACK_MOVING: &str = "Try to remain still.";

#[derive(Debug, Clone)]
pub struct Meditation {
    shoulder_y: SampleWindow,
    fps: f32,
    breath_rate: u32,
    posture_score: f32,
    started_at: Option<Instant>,
    /// Duration reported on the last present frame
    held: f32,
    feedback: &'static str,
}

impl Meditation {
    /// Create a tracker for input arriving at roughly `fps` frames per second.
    pub fn new(fps: f32) -> Self {
        let fps = if fps > 0.0 { fps } else { 30.0 };
        let capacity = (fps * BREATH_WINDOW_SECS).round().max(1.0) as usize;

        Self {
            shoulder_y: SampleWindow::new(capacity),
            fps,
            breath_rate: 0,
            posture_score: INITIAL_SCORE,
            started_at: None,
            held: 0.0,
            feedback: FEEDBACK_START,
        }
    }

    /// Advance with the current pose.
    ///
    /// When either shoulder is poorly visible the subject is reported absent
    /// and no internal state changes.
    pub fn update(&mut self, pose: &Pose, now: Instant) -> MeditationReading {
        let left = pose.get(PoseLandmark::LeftShoulder);
        let right = pose.get(PoseLandmark::RightShoulder);

        if left.visibility < MIN_SHOULDER_VISIBILITY || right.visibility < MIN_SHOULDER_VISIBILITY {
            return MeditationReading {
                present: false,
                breath_rate: 0,
                posture_score: 0.0,
                duration_sec: self.duration(now),
                feedback: FEEDBACK_ABSENT.to_string(),
            };
        }

        let started = *self.started_at.get_or_insert(now);
        self.shoulder_y.push((left.y + right.y) / 2.0);

        // Breath rate needs more than a second of signal
        if self.shoulder_y.len() as f32 > self.fps {
            self.breath_rate = self.estimate_breath_rate();
        }

        if self.shoulder_y.len() > STILLNESS_SAMPLES {
            if let Some(movement) = self.shoulder_y.recent_std_dev(STILLNESS_SAMPLES) {
                self.score_stillness(movement);
            }
        }

        self.held = now.saturating_duration_since(started).as_secs_f32();

        MeditationReading {
            present: true,
            breath_rate: self.breath_rate,
            posture_score: self.posture_score,
            duration_sec: self.held,
            feedback: self.feedback.to_string(),
        }
    }

    /// Breaths per minute from zero crossings of the detrended signal. A full
    /// breath (inhale and exhale) produces two crossings.
    fn estimate_breath_rate(&self) -> u32 {
        let Some(mean) = self.shoulder_y.mean() else {
            return 0;
        };

        let signs: Vec<i8> = self
            .shoulder_y
            .iter()
            .map(|&y| {
                let d = y - mean;
                if d > 0.0 {
                    1
                } else if d < 0.0 {
                    -1
                } else {
                    0
                }
            })
            .collect();

        let crossings = signs.windows(2).filter(|w| w[0] != w[1]).count();
        let window_secs = self.shoulder_y.len() as f32 / self.fps;

        if window_secs > 0.0 {
            ((crossings as f32 / 2.0) * (60.0 / window_secs)) as u32
        } else {
            0
        }
    }

    fn score_stillness(&mut self, movement: f32) {
        if movement < VERY_STILL {
            self.posture_score = (self.posture_score + 0.5).min(100.0);
            self.feedback = FEEDBACK_EXCELLENT;
        } else if movement < CALM {
            self.posture_score = (self.posture_score + 0.1).min(100.0);
            self.feedback = FEEDBACK_CALM;
        } else {
            self.posture_score = (self.posture_score - 1.0).max(0.0);
            self.feedback = FEEDBACK_MOVING;
        }
    }

    /// Shift the session start so a pause gap does not count as meditation
    /// time. The next present frame continues from the last reported duration.
    pub fn rebase(&mut self, now: Instant) {
        if self.started_at.is_some() {
            let held = Duration::from_secs_f32(self.held.max(0.0));
            self.started_at = Some(now.checked_sub(held).unwrap_or(now));
            tracing::debug!("Meditation rebased to {:.1}s", self.held);
        }
    }

    fn duration(&self, now: Instant) -> f32 {
        self.started_at
            .map(|start| now.saturating_duration_since(start).as_secs_f32())
            .unwrap_or(0.0)
    }

    /// Current stillness score.
    pub fn posture_score(&self) -> f32 {
        self.posture_score
    }

    /// Last estimated breath rate.
    pub fn breath_rate(&self) -> u32 {
        self.breath_rate
    }
}

impl Default for Meditation {
    fn default() -> Self {
        Self::new(30.0)
    }
}
