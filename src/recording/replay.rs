//! Ghost-mode replay timeline.
//!
//! Samples the live exercise metric once per elapsed second so a later
//! session can race against this one. The timeline is stored as a JSON
//! array string alongside the workout.

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// One replay sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReplayPoint {
    /// Whole seconds since the session started
    pub t: u64,
    /// Live metric value (reps, held seconds or stillness score)
    pub score: f32,
}

/// Records a per-second replay timeline.
#[derive(Debug, Clone)]
pub struct ReplayRecorder {
    start: Instant,
    points: Vec<ReplayPoint>,
}

impl ReplayRecorder {
    /// Start recording at `start`.
    pub fn new(start: Instant) -> Self {
        Self {
            start,
            points: Vec::new(),
        }
    }

    /// Record `score` if no sample exists yet for the current second.
    ///
    /// Returns true when a sample was stored.
    pub fn record(&mut self, now: Instant, score: f32) -> bool {
        if !score.is_finite() {
            return false;
        }

        let t = now.saturating_duration_since(self.start).as_secs();
        if self.points.last().is_some_and(|p| p.t >= t) {
            return false;
        }

        self.points.push(ReplayPoint { t, score });
        true
    }

    pub fn points(&self) -> &[ReplayPoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Serialize the timeline, or `None` when nothing was recorded.
    pub fn to_json(&self) -> Option<String> {
        if self.points.is_empty() {
            return None;
        }
        match serde_json::to_string(&self.points) {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::warn!("Failed to serialize replay data: {}", e);
                None
            }
        }
    }

    /// Parse a stored timeline.
    pub fn parse(json: &str) -> Result<Vec<ReplayPoint>, serde_json::Error> {
        serde_json::from_str(json)
    }
}
