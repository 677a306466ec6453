//! Live session: presence control, per-frame pipeline and frame feed.

pub mod controller;
pub mod feed;
pub mod pipeline;
pub mod types;

pub use controller::{ControllerEvent, SessionController, DEFAULT_PAUSE_AFTER};
pub use feed::{frame_feed, FrameFeed};
pub use pipeline::{SessionEnd, SessionPipeline};
pub use types::{FrameReport, SessionError, SessionStatus, SessionWarning};
