//! Session metrics aggregation.

pub mod tracker;
pub mod window;

pub use tracker::{FitnessTracker, SessionSummary, DEFAULT_BODY_WEIGHT_KG, POSTURE_HISTORY_LEN};
pub use window::SampleWindow;
