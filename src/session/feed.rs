//! Freshest-frame feed between capture and processing.
//!
//! The capture side pushes every frame; the processing side takes only the
//! newest one available and discards the backlog, so a slow detector never
//! works on stale frames.

use crate::pose::CameraFrame;
use crossbeam::channel::{unbounded, Receiver, Sender, TryRecvError};

/// Create a connected capture sender and processing feed.
pub fn frame_feed() -> (Sender<CameraFrame>, FrameFeed) {
    let (tx, rx) = unbounded();
    (tx, FrameFeed { rx, dropped: 0 })
}

/// Receiving end of a frame feed.
pub struct FrameFeed {
    rx: Receiver<CameraFrame>,
    /// Frames discarded because a newer one was available
    dropped: u64,
}

impl FrameFeed {
    /// Newest queued frame without blocking.
    pub fn latest(&mut self) -> Option<CameraFrame> {
        let mut newest = None;
        loop {
            match self.rx.try_recv() {
                Ok(frame) => {
                    if newest.replace(frame).is_some() {
                        self.dropped += 1;
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        newest
    }

    /// Block until a frame arrives, then return the newest one queued.
    ///
    /// Returns `None` once the sender is gone and the queue is empty.
    pub fn next_frame(&mut self) -> Option<CameraFrame> {
        let first = self.rx.recv().ok()?;
        match self.latest() {
            Some(newer) => {
                self.dropped += 1;
                Some(newer)
            }
            None => Some(first),
        }
    }

    /// Number of frames discarded so far.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl Iterator for FrameFeed {
    type Item = CameraFrame;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame()
    }
}
