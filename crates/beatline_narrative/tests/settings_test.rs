//! Tests for layered configuration.

use beatline_narrative::{BeatlineConfig, PlaybackSettings};
use std::io::Write;
use std::time::Duration;

#[test]
fn test_bundled_defaults() {
    let config = BeatlineConfig::from_toml_str("").unwrap();

    assert_eq!(config.playback.max_answer_attempts(), &None);
    assert_eq!(config.playback.input_timeout(), None);
    assert_eq!(config.playback.ui_poll_interval(), Duration::from_millis(16));
    assert_eq!(config.playback.default_analyzer().as_deref(), Some("keyword"));
    assert_eq!(config.analyzer.model(), "gpt-3.5-turbo");
    assert_eq!(config.analyzer.api_key_env(), "OPENAI_API_KEY");
}

#[test]
fn test_overrides_layer_over_defaults() {
    let config = BeatlineConfig::from_toml_str(
        r#"
        [playback]
        max_answer_attempts = 3
        input_timeout_secs = 12.5

        [analyzer]
        model = "gpt-4o-mini"
        "#,
    )
    .unwrap();

    assert_eq!(config.playback.max_answer_attempts(), &Some(3));
    assert_eq!(
        config.playback.input_timeout(),
        Some(Duration::from_millis(12_500))
    );
    assert_eq!(*config.playback.event_capacity(), 64);
    assert_eq!(config.analyzer.model(), "gpt-4o-mini");
    assert_eq!(config.analyzer.api_key_env(), "OPENAI_API_KEY");
}

#[test]
fn test_from_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[playback]\nui_poll_interval_ms = 0\nanalysis_timeout_secs = 2").unwrap();

    let config = BeatlineConfig::from_file(file.path()).unwrap();

    assert_eq!(config.playback.ui_poll_interval(), Duration::from_millis(1));
    assert_eq!(config.playback.analysis_timeout(), Some(Duration::from_secs(2)));
}

#[test]
fn test_missing_file_is_config_error() {
    assert!(BeatlineConfig::from_file("/no/such/beatline.toml").is_err());
}

#[test]
fn test_builder_methods() {
    let settings = PlaybackSettings::default()
        .with_max_answer_attempts(4)
        .with_analysis_timeout(Duration::from_secs(3))
        .with_default_analyzer("exact");

    assert_eq!(settings.max_answer_attempts(), &Some(4));
    assert_eq!(settings.analysis_timeout(), Some(Duration::from_secs(3)));
    assert_eq!(settings.default_analyzer().as_deref(), Some("exact"));
}

#[test]
fn test_zero_attempt_cap_means_unbounded() {
    let config = BeatlineConfig::from_toml_str("[playback]\nmax_answer_attempts = 0").unwrap();

    assert_eq!(config.playback.max_answer_attempts(), &Some(0));
    assert_eq!(config.playback.attempt_limit(), None);
    assert_eq!(
        PlaybackSettings::default().with_max_answer_attempts(2).attempt_limit(),
        Some(2)
    );
}
