//! Session pause/resume control.
//!
//! The session pauses once the subject has been out of view for longer than
//! a configured duration, and resumes on the first frame they reappear.

use crate::session::types::{SessionError, SessionStatus};
use std::time::{Duration, Instant};

/// Default out-of-view time before pausing.
pub const DEFAULT_PAUSE_AFTER: Duration = Duration::from_secs(2);

/// Status transition produced by [`SessionController::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    /// Subject out of view too long
    Paused,
    /// Subject back in view after a pause
    Resumed {
        /// How long the session was paused
        paused_for: Duration,
    },
}

/// Tracks subject presence and the session lifecycle.
#[derive(Debug, Clone)]
pub struct SessionController {
    status: SessionStatus,
    pause_after: Duration,
    /// When the current absence began
    absent_since: Option<Instant>,
    /// When the current pause began
    paused_at: Option<Instant>,
}

impl SessionController {
    /// Create a running controller.
    pub fn new(pause_after: Duration) -> Self {
        Self {
            status: SessionStatus::Active,
            pause_after,
            absent_since: None,
            paused_at: None,
        }
    }

    /// Observe subject presence for a frame at `now`.
    pub fn observe(&mut self, present: bool, now: Instant) -> Option<ControllerEvent> {
        if self.status == SessionStatus::Ended {
            return None;
        }

        if present {
            self.absent_since = None;
            if self.status == SessionStatus::Paused {
                self.status = SessionStatus::Active;
                let paused_for = self
                    .paused_at
                    .take()
                    .map(|at| now.saturating_duration_since(at))
                    .unwrap_or_default();
                tracing::info!("Session resumed after {:.1}s", paused_for.as_secs_f32());
                return Some(ControllerEvent::Resumed { paused_for });
            }
            return None;
        }

        let since = *self.absent_since.get_or_insert(now);
        if self.status == SessionStatus::Active && now.saturating_duration_since(since) > self.pause_after {
            self.status = SessionStatus::Paused;
            self.paused_at = Some(now);
            tracing::info!("Session paused: subject out of frame");
            return Some(ControllerEvent::Paused);
        }

        None
    }

    /// End the session.
    pub fn stop(&mut self) -> Result<(), SessionError> {
        if self.status == SessionStatus::Ended {
            return Err(SessionError::AlreadyEnded);
        }
        self.status = SessionStatus::Ended;
        tracing::info!("Session stopped");
        Ok(())
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_paused(&self) -> bool {
        self.status == SessionStatus::Paused
    }

    /// Whether the session has not been ended.
    pub fn is_running(&self) -> bool {
        self.status != SessionStatus::Ended
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new(DEFAULT_PAUSE_AFTER)
    }
}
