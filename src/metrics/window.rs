//! Bounded sample windows.
//!
//! A fixed-capacity FIFO of samples: once full, pushing evicts the oldest.

use std::collections::VecDeque;

/// Fixed-capacity window of `f32` samples.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    /// Buffer of recent values
    buffer: VecDeque<f32>,
    /// Maximum number of samples kept
    capacity: usize,
    /// Running sum for efficient mean
    sum: f64,
}

impl SampleWindow {
    /// Create a window holding at most `capacity` samples.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
            sum: 0.0,
        }
    }

    /// Add a sample, evicting the oldest if the window is full.
    pub fn push(&mut self, value: f32) {
        self.buffer.push_back(value);
        self.sum += value as f64;

        if self.buffer.len() > self.capacity {
            if let Some(old) = self.buffer.pop_front() {
                self.sum -= old as f64;
            }
        }
    }

    /// Mean of the samples, or `None` when empty.
    pub fn mean(&self) -> Option<f32> {
        if self.buffer.is_empty() {
            None
        } else {
            Some((self.sum / self.buffer.len() as f64) as f32)
        }
    }

    /// Population standard deviation of the most recent `n` samples.
    ///
    /// Uses fewer samples if the window holds less than `n`.
    pub fn recent_std_dev(&self, n: usize) -> Option<f32> {
        let take = n.min(self.buffer.len());
        if take == 0 {
            return None;
        }

        let recent = self.buffer.iter().skip(self.buffer.len() - take);
        let mean = recent.clone().map(|&v| v as f64).sum::<f64>() / take as f64;
        let variance = recent
            .map(|&v| {
                let d = v as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / take as f64;

        Some(variance.sqrt() as f32)
    }

    /// Iterate over samples, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &f32> + Clone + '_ {
        self.buffer.iter()
    }

    /// Check if the window is at capacity.
    pub fn is_full(&self) -> bool {
        self.buffer.len() >= self.capacity
    }

    /// Maximum number of samples kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the number of samples in the window.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the window is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Remove all samples.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.sum = 0.0;
    }
}
