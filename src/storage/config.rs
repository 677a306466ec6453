//! Application configuration.
//!
//! Loaded from `config.toml` in the platform data directory, then patched
//! from environment variables. A missing file yields defaults.

use crate::exercises::ExerciseKind;
use crate::metrics::DEFAULT_BODY_WEIGHT_KG;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable selecting the exercise.
pub const ENV_EXERCISE: &str = "ACTIVE_EXERCISE";
/// Environment variable holding the API bearer token.
pub const ENV_TOKEN: &str = "USER_TOKEN";
/// Environment variable overriding the API base URL.
pub const ENV_API_URL: &str = "API_URL";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Exercise tracked by new sessions
    pub exercise: ExerciseKind,
    /// Body weight for the calorie estimate (30-250 kg)
    pub body_weight_kg: f32,
    /// Session settings
    pub session: SessionSettings,
    /// Workout API settings
    pub api: ApiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            exercise: ExerciseKind::default(),
            body_weight_kg: DEFAULT_BODY_WEIGHT_KG,
            session: SessionSettings::default(),
            api: ApiConfig::default(),
        }
    }
}

/// Per-session behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Seconds out of view before the session pauses
    pub pause_after_secs: f32,
    /// Frame rate assumed by frame-counting exercises
    pub assumed_fps: f32,
    /// Skip exercise updates while the body is not fully visible
    pub gate_on_low_visibility: bool,
    /// Record a ghost-mode replay timeline
    pub record_replay: bool,
    /// Sessions with no reps shorter than this are not submitted
    pub min_save_secs: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            pause_after_secs: 2.0,
            assumed_fps: 30.0,
            gate_on_low_visibility: false,
            record_replay: true,
            min_save_secs: 5,
        }
    }
}

/// Workout API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL, without trailing slash
    pub base_url: String,
    /// Bearer token; submission is disabled without one
    pub token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api/v1".to_string(),
            token: None,
            timeout_secs: 5,
        }
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl AppConfig {
    /// Validate body weight (30-250 kg).
    pub fn validate_weight(weight: f32) -> bool {
        (30.0..=250.0).contains(&weight)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !Self::validate_weight(self.body_weight_kg) {
            return Err(ConfigError::InvalidValue(format!(
                "body_weight_kg must be between 30 and 250, got {}",
                self.body_weight_kg
            )));
        }
        if !positive(self.session.pause_after_secs) {
            return Err(ConfigError::InvalidValue(
                "session.pause_after_secs must be positive".to_string(),
            ));
        }
        if !positive(self.session.assumed_fps) {
            return Err(ConfigError::InvalidValue(
                "session.assumed_fps must be positive".to_string(),
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "api.timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from a variable lookup.
    ///
    /// Empty values are ignored. An unknown exercise keeps the configured one.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(value) = get(ENV_EXERCISE) {
            match value.parse::<ExerciseKind>() {
                Ok(kind) => self.exercise = kind,
                Err(e) => tracing::warn!("Ignoring {}: {}", ENV_EXERCISE, e),
            }
        }
        if let Some(token) = get(ENV_TOKEN) {
            self.api.token = Some(token);
        }
        if let Some(url) = get(ENV_API_URL) {
            self.api.base_url = url.trim_end_matches('/').to_string();
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "formcoach", "FormCoach")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load configuration from the default location and apply env overrides.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let mut config = load_config_from(get_config_path())?;
    config.data_dir = get_data_dir();
    config.apply_env_overrides();
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file. A missing file yields defaults.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    config.validate()?;

    Ok(config)
}

/// Save configuration to the default location.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(config, get_config_path())
}

/// Save configuration to a file, creating parent directories.
pub fn save_config_to(config: &AppConfig, path: impl AsRef<Path>) -> Result<(), ConfigError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content = toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}
