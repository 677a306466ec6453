//! Pose landmarker resource.
//!
//! Landmark inference is external to this crate. A landmarker is an owned
//! resource with an explicit lifecycle: it is created (initialized) by the
//! caller, handed to the frame loop, and shut down when the session ends.

use crate::pose::types::{Landmark, Pose, PoseError};
use image::RgbImage;
use serde::Deserialize;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::{Duration, Instant};

/// One captured camera frame.
#[derive(Debug, Clone)]
pub struct CameraFrame {
    /// Monotonic sequence number assigned by the capture source
    pub sequence: u64,
    /// Capture time
    pub timestamp: Instant,
    /// Frame width in pixels, if known
    pub width: Option<u32>,
    /// Frame height in pixels, if known
    pub height: Option<u32>,
    /// Pixel data, when the capture source provides it
    pub image: Option<RgbImage>,
    /// Pre-computed mean grayscale brightness, for sources without pixels
    pub brightness: Option<f32>,
}

impl CameraFrame {
    /// A frame with no pixel data or dimensions.
    pub fn bare(sequence: u64, timestamp: Instant) -> Self {
        Self {
            sequence,
            timestamp,
            width: None,
            height: None,
            image: None,
            brightness: None,
        }
    }

    /// Attach pixel data, taking the dimensions from the image.
    pub fn with_image(mut self, image: RgbImage) -> Self {
        self.width = Some(image.width());
        self.height = Some(image.height());
        self.image = Some(image);
        self
    }

    /// Pixel dimensions, when both are known.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some((w, h)),
            _ => None,
        }
    }
}

/// Produces landmarks for camera frames.
pub trait PoseLandmarker {
    /// Detect the first person in the frame. `Ok(None)` means nobody was found.
    fn detect(&mut self, frame: &CameraFrame) -> Result<Option<Pose>, PoseError>;

    /// Release the underlying resources. Later `detect` calls fail.
    fn shutdown(&mut self);
}

/// A line of a recorded landmark stream.
#[derive(Debug, Deserialize)]
struct RecordedFrame {
    t_ms: u64,
    landmarks: Option<Vec<Landmark>>,
    #[serde(default)]
    brightness: Option<f32>,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
}

/// A parsed recorded frame: the pose plus the capture metadata.
#[derive(Debug, Clone)]
struct ReplayEntry {
    t_ms: u64,
    pose: Option<Pose>,
    brightness: Option<f32>,
    width: Option<u32>,
    height: Option<u32>,
}

/// Parse one JSON line of a recorded stream.
fn parse_line(line_no: usize, line: &str) -> Result<ReplayEntry, PoseError> {
    let parse_error = |message: String| PoseError::ParseError {
        line: line_no,
        message,
    };

    let recorded: RecordedFrame =
        serde_json::from_str(line).map_err(|e| parse_error(e.to_string()))?;

    let pose = recorded
        .landmarks
        .map(Pose::new)
        .transpose()
        .map_err(|e| parse_error(e.to_string()))?;

    Ok(ReplayEntry {
        t_ms: recorded.t_ms,
        pose,
        brightness: recorded.brightness,
        width: recorded.width,
        height: recorded.height,
    })
}

/// Landmarker that plays back a recorded JSON-lines landmark stream.
///
/// Each line is `{"t_ms": .., "landmarks": [..33..] | null, "brightness": ..,
/// "width": .., "height": ..}`. Malformed lines are skipped with a warning.
pub struct ReplayLandmarker {
    frames: Vec<ReplayEntry>,
    active: bool,
}

impl ReplayLandmarker {
    /// Load a recorded stream from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PoseError> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load a recorded stream from any buffered reader.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, PoseError> {
        let mut frames = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(idx + 1, &line) {
                Ok(frame) => frames.push(frame),
                Err(e) => tracing::warn!("Skipping recorded frame: {}", e),
            }
        }

        tracing::info!("Loaded {} recorded frames", frames.len());
        Ok(Self {
            frames,
            active: true,
        })
    }

    /// Number of recorded frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the recording holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Camera frames for the recording, timestamped relative to `start`.
    pub fn frames(&self, start: Instant) -> Vec<CameraFrame> {
        self.frames
            .iter()
            .enumerate()
            .map(|(seq, entry)| CameraFrame {
                sequence: seq as u64,
                timestamp: start + Duration::from_millis(entry.t_ms),
                width: entry.width,
                height: entry.height,
                image: None,
                brightness: entry.brightness,
            })
            .collect()
    }
}

impl PoseLandmarker for ReplayLandmarker {
    fn detect(&mut self, frame: &CameraFrame) -> Result<Option<Pose>, PoseError> {
        if !self.active {
            return Err(PoseError::ShutDown);
        }

        Ok(self
            .frames
            .get(frame.sequence as usize)
            .and_then(|entry| entry.pose.clone()))
    }

    fn shutdown(&mut self) {
        if self.active {
            self.active = false;
            self.frames.clear();
            tracing::info!("Replay landmarker shut down");
        }
    }
}
