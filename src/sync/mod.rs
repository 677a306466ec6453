//! Workout submission to the remote API.

pub mod client;
pub mod types;

pub use client::{wait_for_submission, WorkoutUploader};
pub use types::{SyncError, WorkoutSubmission};
