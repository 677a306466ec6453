//! Workout API client.
//!
//! Submits finished sessions with a bearer token and a short timeout.
//! Submission is never retried; callers on the capture path use
//! [`WorkoutUploader::submit_detached`], which only logs failures.

use std::time::Duration;

use crate::storage::config::ApiConfig;
use crate::sync::types::{SyncError, WorkoutSubmission};

/// Path of the save endpoint relative to the API base URL.
const SAVE_ENDPOINT: &str = "/workouts/save";

/// Authenticated client for the workout API.
#[derive(Debug, Clone)]
pub struct WorkoutUploader {
    /// HTTP client
    http: reqwest::Client,
    /// Base URL for API
    base_url: String,
    /// Bearer token
    token: String,
}

impl WorkoutUploader {
    /// Create an uploader with an explicit base URL, token and timeout.
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self, SyncError> {
        if token.is_empty() {
            return Err(SyncError::NotConfigured("missing API token".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SyncError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Create an uploader from API settings. Fails when no token is set.
    pub fn from_config(config: &ApiConfig) -> Result<Self, SyncError> {
        let token = config
            .token
            .as_deref()
            .ok_or_else(|| SyncError::NotConfigured("missing API token".to_string()))?;
        Self::new(&config.base_url, token, Duration::from_secs(config.timeout_secs))
    }

    /// Full URL of the save endpoint.
    pub fn save_url(&self) -> String {
        format!("{}{}", self.base_url, SAVE_ENDPOINT)
    }

    /// Submit a finished session.
    pub async fn save(&self, submission: &WorkoutSubmission) -> Result<(), SyncError> {
        let response = self
            .http
            .post(self.save_url())
            .header("Authorization", format!("Bearer {}", self.token))
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status(status.as_u16()));
        }

        tracing::info!(
            "Workout saved: {} reps of {}",
            submission.reps,
            submission.exercise.id()
        );
        Ok(())
    }

    /// Submit on the current tokio runtime without waiting for the result.
    ///
    /// Failures are logged. Returns `None` when called outside a runtime.
    pub fn submit_detached(
        &self,
        submission: WorkoutSubmission,
    ) -> Option<tokio::task::JoinHandle<()>> {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!("No async runtime; workout not submitted");
                return None;
            }
        };

        let uploader = self.clone();
        Some(handle.spawn(async move {
            if let Err(e) = uploader.save(&submission).await {
                tracing::warn!("Failed to save workout: {}", e);
            }
        }))
    }
}

/// Wait for a detached submission to finish.
///
/// Returns `false` when the task panicked or was cancelled; the join error is
/// logged rather than propagated.
pub async fn wait_for_submission(handle: tokio::task::JoinHandle<()>) -> bool {
    match handle.await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Workout submission task failed: {}", e);
            false
        }
    }
}
