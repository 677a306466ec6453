//! Session recording.

pub mod replay;

pub use replay::{ReplayPoint, ReplayRecorder};
