//! Unit tests for configuration files.

use formcoach::exercises::ExerciseKind;
use formcoach::storage::config::{load_config_from, save_config_to, AppConfig, ConfigError};
use tempfile::tempdir;

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let config = load_config_from(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = AppConfig {
        exercise: ExerciseKind::WarriorPose,
        body_weight_kg: 82.5,
        ..Default::default()
    };
    config.session.pause_after_secs = 3.0;
    config.session.gate_on_low_visibility = true;
    config.api.token = Some("token-123".to_string());

    save_config_to(&config, &path).unwrap();
    let loaded = load_config_from(&path).unwrap();
    assert_eq!(loaded, config);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("exercise = \"warrior_pose\""));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "exercise = [unclosed").unwrap();

    assert!(matches!(load_config_from(&path), Err(ConfigError::ParseError(_))));
}

#[test]
fn test_unknown_exercise_in_file_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "exercise = \"burpee\"\n").unwrap();

    assert!(matches!(load_config_from(&path), Err(ConfigError::ParseError(_))));
}

#[test]
fn test_out_of_range_weight_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "body_weight_kg = 12.0\n").unwrap();

    assert!(matches!(load_config_from(&path), Err(ConfigError::InvalidValue(_))));
}
