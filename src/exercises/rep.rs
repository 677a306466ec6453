//! Two-state repetition counter shared by angle-driven rep exercises.

use crate::exercises::types::RepPhase;

/// Counts a repetition on each DOWN→UP transition.
///
/// The band between the two thresholds is a dead zone: the phase only flips
/// once the angle crosses the far threshold, so jitter near either one
/// cannot re-trigger.
#[derive(Debug, Clone)]
pub struct RepCounter {
    phase: RepPhase,
    reps: u32,
    down_below: f32,
    up_above: f32,
}

impl RepCounter {
    /// Create a counter that enters DOWN below `down_below` degrees and
    /// counts on returning above `up_above` degrees.
    pub fn new(down_below: f32, up_above: f32) -> Self {
        Self {
            phase: RepPhase::Up,
            reps: 0,
            down_below,
            up_above,
        }
    }

    /// Advance with the current joint angle. Non-finite angles are ignored.
    pub fn update(&mut self, angle: f32) -> u32 {
        if !angle.is_finite() {
            return self.reps;
        }

        match self.phase {
            RepPhase::Up if angle < self.down_below => {
                self.phase = RepPhase::Down;
                tracing::debug!("Rep phase UP -> DOWN at {:.1}°", angle);
            }
            RepPhase::Down if angle > self.up_above => {
                self.phase = RepPhase::Up;
                self.reps += 1;
                tracing::debug!("Rep {} completed at {:.1}°", self.reps, angle);
            }
            _ => {}
        }

        self.reps
    }

    /// Current phase.
    pub fn phase(&self) -> RepPhase {
        self.phase
    }

    /// Repetitions counted so far.
    pub fn reps(&self) -> u32 {
        self.reps
    }
}
