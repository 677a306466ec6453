//! Streak timer for hold exercises.
//!
//! A streak is an unbroken run of frames in correct form. The timer reports
//! the duration of the current streak only. When form breaks, the streak
//! start is cleared but the last duration is kept until a new streak begins,
//! at which point it restarts from zero.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default)]
pub struct HoldTimer {
    streak_start: Option<Instant>,
    time_held: f32,
}

impl HoldTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance with this frame's correctness and return the held seconds.
    pub fn update(&mut self, correct: bool, now: Instant) -> f32 {
        match (correct, self.streak_start) {
            (true, None) => {
                self.streak_start = Some(now);
                self.time_held = 0.0;
                tracing::debug!("Hold streak started");
            }
            (true, Some(start)) => {
                self.time_held = now.saturating_duration_since(start).as_secs_f32();
            }
            (false, Some(_)) => {
                self.streak_start = None;
                tracing::debug!("Hold streak broken after {:.1}s", self.time_held);
            }
            (false, None) => {}
        }

        self.time_held
    }

    /// Shift an active streak so that it resumes from its recorded duration
    /// at `now`, discarding time spent paused.
    pub fn rebase(&mut self, now: Instant) {
        if self.streak_start.is_some() {
            let held = Duration::from_secs_f32(self.time_held.max(0.0));
            self.streak_start = Some(now.checked_sub(held).unwrap_or(now));
            tracing::debug!("Hold streak rebased to {:.1}s", self.time_held);
        }
    }

    /// Whether a streak is in progress.
    pub fn in_streak(&self) -> bool {
        self.streak_start.is_some()
    }

    /// Seconds held in the current (or last) streak.
    pub fn time_held(&self) -> f32 {
        self.time_held
    }
}
