use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use floatipop::config::*;
use tempfile::tempdir;

#[test]
fn empty_file_means_defaults() {
    let config = GameConfig::parse("").unwrap();
    assert_eq!(config, GameConfig::default());
    assert_eq!(config.frame_rate, 60);
    assert!(!config.start_platform);
    assert_eq!(config.log_filter, "info");
}

#[test]
fn fields_override_defaults() {
    let config = GameConfig::parse(
        "frame_rate = 30\nstart_platform = true\nscore_dir = \"/tmp/fip\"\nlog_filter = \"debug\"\n",
    )
    .unwrap();
    assert_eq!(config.frame_rate, 30);
    assert!(config.start_platform);
    assert_eq!(config.score_dir(), PathBuf::from("/tmp/fip"));
    assert_eq!(config.log_filter, "debug");
    assert_eq!(config.data_dir, None);
}

#[test]
fn frame_duration_matches_rate() {
    let config = GameConfig::default();
    let d = config.frame_duration();
    assert!(d > Duration::from_millis(16) && d < Duration::from_millis(17));
}

#[test]
fn zero_frame_rate_rejected() {
    let err = GameConfig::parse("frame_rate = 0").unwrap_err();
    assert!(matches!(err, ConfigError::FrameRate(0)));
}

#[test]
fn unknown_field_rejected() {
    let err = GameConfig::parse("colour = \"blue\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().unwrap();
    let config = GameConfig::load(&dir.path().join(CONFIG_FILE)).unwrap();
    assert_eq!(config, GameConfig::default());
}

#[test]
fn bad_file_reports_its_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    fs::write(&path, "frame_rate = \"fast\"").unwrap();

    match GameConfig::load(&path) {
        Err(ConfigError::Parse { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn score_dir_defaults_to_game_dir() {
    let config = GameConfig::default();
    assert_eq!(config.score_dir(), default_game_dir());
    assert!(default_game_dir().ends_with(".floatipop"));
}
